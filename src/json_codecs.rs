//! Serde helpers for the quoted integers the beacon API uses.
//! The API encodes every uint64 as a decimal string, some nodes send bare numbers anyway.
use serde::{de, Deserializer, Serializer};
use std::fmt;

pub mod quoted_u64 {
    use super::*;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuotedU64Visitor)
    }
}

pub mod quoted_unix_seconds {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    pub fn serialize<S>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.timestamp().to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = deserializer.deserialize_any(QuotedU64Visitor)?;
        i64::try_from(seconds)
            .ok()
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
            .ok_or_else(|| {
                de::Error::custom(format!("timestamp {seconds} out of range"))
            })
    }
}

struct QuotedU64Visitor;

impl<'de> de::Visitor<'de> for QuotedU64Visitor {
    type Value = u64;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a u64 as a decimal string or a number")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value).map_err(|_| {
            E::invalid_value(de::Unexpected::Signed(value), &self)
        })
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value
            .parse::<u64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}
