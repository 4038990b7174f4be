mod attestations;
pub mod balances;
pub mod node;
mod slots;
mod states;
mod validators;

pub use attestations::{AttestationData, Checkpoint, CommitteeIndex, FinalityCheckpoints};
pub use node::{BeaconNode, BeaconNodeError, BeaconNodeHttp, Genesis};
pub use slots::{Epoch, Slot};
pub use states::{ParseStateIdError, StateId, StateRoot};
pub use validators::{
    BlsPubKey, ParsePubKeyError, Validator, ValidatorBalance, ValidatorEnvelope,
    ValidatorIndex, ValidatorStatus, BLS_PUBKEY_LENGTH,
};
