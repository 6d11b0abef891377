//! Grouping keys for visually identical items.
//!
//! Items rendered with the same icon, border color, effect and flags are counted together
//! in an offer summary. [`AttributeKey`] serializes those attributes into one string so
//! they can be used as a map key, and decodes them again when the summary is rendered.

use crate::error::AttributeKeyError;
use serde::{Serialize, Deserialize};
use std::fmt;

const DELIMITER: char = '\n';
const ESCAPE: char = '\\';
const FLAG_SET: &str = "1";
const SEGMENTS: usize = 5;

/// The visual attributes of a rendered item.
///
/// Empty strings are treated as absent values. Construct with [`Attributes::new`] and the
/// builder methods so that this holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawAttributes", into = "RawAttributes")]
pub struct Attributes {
    img: Option<String>,
    border_color: Option<String>,
    effect: Option<String>,
    uncraft: bool,
    strange: bool,
}

impl Attributes {
    /// Creates attributes with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// The icon URL.
    pub fn img<T>(mut self, img: T) -> Self
    where
        T: Into<String>,
    {
        self.img = non_empty(img.into());
        self
    }

    /// The border color.
    pub fn border_color<T>(mut self, border_color: T) -> Self
    where
        T: Into<String>,
    {
        self.border_color = non_empty(border_color.into());
        self
    }

    /// The particle effect.
    pub fn effect<T>(mut self, effect: T) -> Self
    where
        T: Into<String>,
    {
        self.effect = non_empty(effect.into());
        self
    }

    /// Whether the item is uncraftable.
    pub fn uncraft(mut self, uncraft: bool) -> Self {
        self.uncraft = uncraft;
        self
    }

    /// Whether the item is strange.
    pub fn strange(mut self, strange: bool) -> Self {
        self.strange = strange;
        self
    }

    pub fn get_img(&self) -> Option<&str> {
        self.img.as_deref()
    }

    pub fn get_border_color(&self) -> Option<&str> {
        self.border_color.as_deref()
    }

    pub fn get_effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    pub fn is_uncraft(&self) -> bool {
        self.uncraft
    }

    pub fn is_strange(&self) -> bool {
        self.strange
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[derive(Serialize, Deserialize)]
struct RawAttributes {
    #[serde(default, deserialize_with = "crate::serialize::empty_string_is_none")]
    img: Option<String>,
    #[serde(default, deserialize_with = "crate::serialize::empty_string_is_none")]
    border_color: Option<String>,
    #[serde(default, deserialize_with = "crate::serialize::empty_string_is_none")]
    effect: Option<String>,
    #[serde(default, deserialize_with = "crate::serialize::into_bool")]
    uncraft: bool,
    #[serde(default, deserialize_with = "crate::serialize::into_bool")]
    strange: bool,
}

impl From<RawAttributes> for Attributes {
    fn from(raw: RawAttributes) -> Self {
        Self {
            img: raw.img,
            border_color: raw.border_color,
            effect: raw.effect,
            uncraft: raw.uncraft,
            strange: raw.strange,
        }
    }
}

impl From<Attributes> for RawAttributes {
    fn from(attributes: Attributes) -> Self {
        Self {
            img: attributes.img,
            border_color: attributes.border_color,
            effect: attributes.effect,
            uncraft: attributes.uncraft,
            strange: attributes.strange,
        }
    }
}

/// A serialized [`Attributes`] value. Two keys are equal exactly when their attributes are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeKey(String);

impl AttributeKey {
    /// Encodes attributes into a key.
    pub fn encode(attributes: &Attributes) -> Self {
        let mut key = String::new();

        push_segment(&mut key, attributes.img.as_deref());
        key.push(DELIMITER);
        push_segment(&mut key, attributes.border_color.as_deref());
        key.push(DELIMITER);
        push_segment(&mut key, attributes.effect.as_deref());
        key.push(DELIMITER);
        push_flag(&mut key, attributes.uncraft);
        key.push(DELIMITER);
        push_flag(&mut key, attributes.strange);

        Self(key)
    }

    /// Decodes a string produced by [`AttributeKey::encode`].
    pub fn decode(key: &str) -> Result<Attributes, AttributeKeyError> {
        let segments = split_segments(key)?;

        if segments.len() != SEGMENTS {
            return Err(AttributeKeyError::SegmentCount(segments.len()));
        }

        let mut segments = segments.into_iter();
        let mut next = || segments.next().unwrap_or_default();
        let img = non_empty(next());
        let border_color = non_empty(next());
        let effect = non_empty(next());
        let uncraft = parse_flag(next())?;
        let strange = parse_flag(next())?;

        Ok(Attributes {
            img,
            border_color,
            effect,
            uncraft,
            strange,
        })
    }

    /// Decodes the attributes this key was made from.
    pub fn attributes(&self) -> Result<Attributes, AttributeKeyError> {
        Self::decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Attributes> for AttributeKey {
    fn from(attributes: &Attributes) -> Self {
        Self::encode(attributes)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn push_segment(key: &mut String, value: Option<&str>) {
    for c in value.unwrap_or_default().chars() {
        match c {
            ESCAPE => {
                key.push(ESCAPE);
                key.push(ESCAPE);
            },
            DELIMITER => {
                key.push(ESCAPE);
                key.push('n');
            },
            c => key.push(c),
        }
    }
}

fn push_flag(key: &mut String, flag: bool) {
    if flag {
        key.push_str(FLAG_SET);
    }
}

fn parse_flag(segment: String) -> Result<bool, AttributeKeyError> {
    match segment.as_str() {
        FLAG_SET => Ok(true),
        "" => Ok(false),
        _ => Err(AttributeKeyError::InvalidFlag(segment)),
    }
}

fn split_segments(key: &str) -> Result<Vec<String>, AttributeKeyError> {
    let mut segments = Vec::with_capacity(SEGMENTS);
    let mut current = String::new();
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        match c {
            ESCAPE => match chars.next() {
                Some(ESCAPE) => current.push(ESCAPE),
                Some('n') => current.push(DELIMITER),
                Some(other) => return Err(AttributeKeyError::InvalidEscape(other)),
                None => return Err(AttributeKeyError::DanglingEscape),
            },
            DELIMITER => segments.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    segments.push(current);

    Ok(segments)
}
