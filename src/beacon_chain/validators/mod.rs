mod pubkey;

use super::Epoch;
use crate::units::GweiNewtype;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub use pubkey::{BlsPubKey, ParsePubKeyError, BLS_PUBKEY_LENGTH};

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct ValidatorIndex(#[serde(with = "crate::json_codecs::quoted_u64")] pub u64);

impl Display for ValidatorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ValidatorIndex {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorStatus {
    PendingInitialized,
    PendingQueued,
    ActiveOngoing,
    ActiveExiting,
    ActiveSlashed,
    ExitedUnslashed,
    ExitedSlashed,
    WithdrawalPossible,
    WithdrawalDone,
}

impl ValidatorStatus {
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::ActiveOngoing | Self::ActiveExiting | Self::ActiveSlashed
        )
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Validator {
    pub pubkey: BlsPubKey,
    pub withdrawal_credentials: String,
    pub effective_balance: GweiNewtype,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

/// A validator as the beacon API reports it for a given state.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValidatorEnvelope {
    pub index: ValidatorIndex,
    pub balance: GweiNewtype,
    pub status: ValidatorStatus,
    pub validator: Validator,
}

impl ValidatorEnvelope {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn effective_balance(&self) -> GweiNewtype {
        self.validator.effective_balance
    }

    pub fn pubkey(&self) -> &BlsPubKey {
        &self.validator.pubkey
    }

    pub fn without_balance(self) -> Self {
        Self {
            balance: GweiNewtype::ZERO,
            ..self
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ValidatorBalance {
    pub index: ValidatorIndex,
    pub balance: GweiNewtype,
}
