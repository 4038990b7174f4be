//! JSON fixtures shaped like beacon API responses.
use serde_json::{json, Value};

pub const KNOWN_PUBKEY: &str = "0xb2007d1354db791b924fd35a6b0a8525266a021765b54641f4d415daa50c511204d6acc213a23468f2173e60cc950e26";
pub const UNKNOWN_PUBKEY: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const OTHER_PUBKEY: &str = "0xa1d1ad0714035353258038e964ae9675dc0252ee22cea896825c01458e1807bfad2f9969338798548d9858a571f7425c";
pub const STATE_ROOT: &str =
    "0x36cb7e3d4585fb90a4ed17a0139de34a08b8354d1a7a054dbe3e4d8a0b93e625";
pub const BLOCK_ROOT: &str =
    "0x35376f52006e12b7e9247b457277fb34f6bd32d83a651e24c2669467607e0778";

/// Wraps `data` the way the beacon API envelopes every response.
pub fn data_response(data: Value) -> String {
    json!({
        "execution_optimistic": false,
        "finalized": true,
        "data": data,
    })
    .to_string()
}

pub fn error_response(code: u16, message: &str) -> String {
    json!({
        "code": code,
        "message": message,
        "stacktraces": [],
    })
    .to_string()
}

pub fn validator_json(index: u64, pubkey: &str, balance: u64, status: &str) -> Value {
    json!({
        "index": index.to_string(),
        "balance": balance.to_string(),
        "status": status,
        "validator": {
            "pubkey": pubkey,
            "withdrawal_credentials": "0x00f50428677c60f997aadeab24aabf7fceaef491c96a52b463ae91f95611cf71",
            "effective_balance": "32000000000",
            "slashed": false,
            "activation_eligibility_epoch": "0",
            "activation_epoch": "0",
            "exit_epoch": "18446744073709551615",
            "withdrawable_epoch": "18446744073709551615"
        }
    })
}

pub fn header_json(slot: u64) -> Value {
    json!({
        "root": BLOCK_ROOT,
        "canonical": true,
        "header": {
            "message": {
                "slot": slot.to_string(),
                "proposer_index": "1",
                "parent_root": "0x0000000000000000000000000000000000000000000000000000000000000000",
                "state_root": STATE_ROOT,
                "body_root": "0xcd7c49966ebe72b1214e6d4733adf6bf06935c5fbc3b3ad08e84e3085428b82f"
            },
            "signature": format!("0x{}", "00".repeat(96))
        }
    })
}

pub fn checkpoint_json(epoch: u64) -> Value {
    json!({
        "epoch": epoch.to_string(),
        "root": BLOCK_ROOT,
    })
}

pub fn attestation_data_json(slot: u64, committee_index: u64) -> Value {
    json!({
        "slot": slot.to_string(),
        "index": committee_index.to_string(),
        "beacon_block_root": BLOCK_ROOT,
        "source": checkpoint_json((slot / 32).saturating_sub(1)),
        "target": checkpoint_json(slot / 32),
    })
}

pub fn genesis_json(genesis_time: i64) -> Value {
    json!({
        "genesis_time": genesis_time.to_string(),
        "genesis_validators_root": "0x4b363db94e286120d76eb905340fdd4e54bfe9f06bf33ff6cf5ad27f511bfe95",
        "genesis_fork_version": "0x00000000"
    })
}
