pub mod beacon_chain;
pub mod env;
pub mod json_codecs;
pub mod log;
pub mod units;
