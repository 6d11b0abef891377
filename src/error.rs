use crate::types::{AppId, AssetId, ContextId};

/// An error reading or writing a file.
#[derive(thiserror::Error, Debug)]
pub enum FileError {
    #[error("Filesystem error: {}", .0)]
    FileSystem(#[from] std::io::Error),
    #[error("Error parsing file contents: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Path conversion to string failed")]
    PathError,
}

/// Any error produced by this crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The selection mode is not recognized. This is a programming error on the caller's side
    /// and should not be retried.
    #[error("Unknown mode: {}", .0)]
    UnknownMode(String),
    #[error("Duplicate asset {appid}_{contextid}_{assetid} in inventory")]
    DuplicateAsset {
        appid: AppId,
        contextid: ContextId,
        assetid: AssetId,
    },
    #[error("Invalid element ID: {}", .0)]
    InvalidElementId(String),
    #[error("Error parsing inventory: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("{}", .0)]
    Host(#[from] HostError),
    #[error("{}", .0)]
    AttributeKey(#[from] AttributeKeyError),
    #[error("{}", .0)]
    File(#[from] FileError),
}

/// An error returned by the page hosting the trade offer window.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Trade status was rejected: {}", .0)]
    Rejected(String),
    #[error("Trade offer window is unavailable")]
    Unavailable,
}

/// An error decoding an [`AttributeKey`][crate::AttributeKey].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AttributeKeyError {
    #[error("Expected 5 segments in attribute key, got {}", .0)]
    SegmentCount(usize),
    #[error("Invalid escape sequence in attribute key: \\{}", .0)]
    InvalidEscape(char),
    #[error("Attribute key ends with a dangling escape")]
    DanglingEscape,
    #[error("Invalid flag value in attribute key: {}", .0)]
    InvalidFlag(String),
}
