use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

pub const BLS_PUBKEY_LENGTH: usize = 48;

/// A compressed BLS12-381 public key as the beacon chain identifies validators by.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BlsPubKey([u8; BLS_PUBKEY_LENGTH]);

#[derive(Debug, Error, PartialEq)]
pub enum ParsePubKeyError {
    #[error("public key {0} is missing the 0x prefix")]
    MissingPrefix(String),
    #[error("public key is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("public key should be 48 bytes, got {0}")]
    InvalidLength(usize),
}

impl BlsPubKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParsePubKeyError> {
        <[u8; BLS_PUBKEY_LENGTH]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ParsePubKeyError::InvalidLength(bytes.len()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; BLS_PUBKEY_LENGTH]> for BlsPubKey {
    fn from(bytes: [u8; BLS_PUBKEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for BlsPubKey {
    type Err = ParsePubKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s
            .strip_prefix("0x")
            .ok_or_else(|| ParsePubKeyError::MissingPrefix(s.to_string()))?;
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for BlsPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for BlsPubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlsPubKey({self})")
    }
}

impl Serialize for BlsPubKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlsPubKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}
