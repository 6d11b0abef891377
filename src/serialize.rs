//! Contains custom serialization and deserialization functions for the page's JSON shapes.
//! Steam's trade offer page stores most identifiers as strings and most flags as `0`/`1`.

use std::marker::PhantomData;
use std::fmt::Display;
use std::str::FromStr;
use serde::Deserialize;
use serde::de::{self, Deserializer, Unexpected};

/// Deserializes a value that may be either a number or a numeric string.
pub fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    T::Err: Display,
{
    struct NumericVisitor<T> {
        marker: PhantomData<T>,
    }

    impl<'de, T> de::Visitor<'de> for NumericVisitor<T>
    where
        T: FromStr + TryFrom<u64>,
        T::Err: Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an integer or a string")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::try_from(v)
                .map_err(|_| de::Error::custom("Number too large to fit in target type"))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse::<T>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(NumericVisitor {
        marker: PhantomData,
    })
}

/// Deserializes a boolean which may be given as `true`/`false`, `0`/`1` or `"0"`/`"1"`.
pub fn into_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct DeserializeBoolVisitor;

    impl<'de> de::Visitor<'de> for DeserializeBoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a boolean, zero or one")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(de::Error::invalid_value(
                    Unexpected::Unsigned(other),
                    &"zero or one",
                )),
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match v {
                "0" | "" => Ok(false),
                "1" => Ok(true),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"zero or one",
                )),
            }
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }
    }

    deserializer.deserialize_any(DeserializeBoolVisitor)
}

/// Deserializes an optional string, treating an empty string as `None`.
pub fn empty_string_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;

    Ok(s.filter(|s| !s.is_empty()))
}

/// Serializes a value as a string and deserializes it from a string.
pub mod string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}
