//! Identifiers for points in chain history the beacon API accepts as `{state_id}`.
use super::Slot;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub type StateRoot = String;

const ROOT_HEX_LENGTH: usize = 64;

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum StateId {
    Head,
    Genesis,
    Finalized,
    Justified,
    Slot(Slot),
    Root(StateRoot),
}

#[derive(Debug, Error, PartialEq)]
#[error("failed to parse state id {0}, expected head, genesis, finalized, justified, a slot or a 0x-prefixed state root")]
pub struct ParseStateIdError(String);

impl FromStr for StateId {
    type Err = ParseStateIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(Self::Head),
            "genesis" => Ok(Self::Genesis),
            "finalized" => Ok(Self::Finalized),
            "justified" => Ok(Self::Justified),
            root if root.starts_with("0x") => {
                let hex = &root[2..];
                if hex.len() == ROOT_HEX_LENGTH
                    && hex.chars().all(|c| c.is_ascii_hexdigit())
                {
                    Ok(Self::Root(root.to_lowercase()))
                } else {
                    Err(ParseStateIdError(s.to_string()))
                }
            }
            slot => slot
                .parse::<Slot>()
                .map(Self::Slot)
                .map_err(|_| ParseStateIdError(s.to_string())),
        }
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Head => write!(f, "head"),
            Self::Genesis => write!(f, "genesis"),
            Self::Finalized => write!(f, "finalized"),
            Self::Justified => write!(f, "justified"),
            Self::Slot(slot) => write!(f, "{slot}"),
            Self::Root(root) => write!(f, "{root}"),
        }
    }
}

impl From<Slot> for StateId {
    fn from(slot: Slot) -> Self {
        Self::Slot(slot)
    }
}

impl Serialize for StateId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATE_ROOT: &str =
        "0x36cb7e3d4585fb90a4ed17a0139de34a08b8354d1a7a054dbe3e4d8a0b93e625";

    #[test]
    fn parse_named_state_ids_test() {
        assert_eq!("head".parse::<StateId>().unwrap(), StateId::Head);
        assert_eq!("genesis".parse::<StateId>().unwrap(), StateId::Genesis);
        assert_eq!("finalized".parse::<StateId>().unwrap(), StateId::Finalized);
        assert_eq!("justified".parse::<StateId>().unwrap(), StateId::Justified);
    }

    #[test]
    fn parse_slot_state_id_test() {
        assert_eq!("32".parse::<StateId>().unwrap(), StateId::Slot(Slot(32)));
    }

    #[test]
    fn parse_root_state_id_test() {
        assert_eq!(
            STATE_ROOT.parse::<StateId>().unwrap(),
            StateId::Root(STATE_ROOT.to_string())
        );
    }

    #[test]
    fn reject_unresolvable_state_ids_test() {
        assert!("latest".parse::<StateId>().is_err());
        assert!("-1".parse::<StateId>().is_err());
        assert!("0x1234".parse::<StateId>().is_err());
        assert!("".parse::<StateId>().is_err());
    }

    #[test]
    fn display_matches_api_path_segment_test() {
        assert_eq!(StateId::Slot(Slot(32)).to_string(), "32");
        assert_eq!(StateId::Genesis.to_string(), "genesis");
        assert_eq!(StateId::Root(STATE_ROOT.to_string()).to_string(), STATE_ROOT);
    }
}
