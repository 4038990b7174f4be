use anyhow::Result;
use beacon_node_client::{
    beacon_chain::{
        balances::{self, get_effective_balance_sum},
        BeaconNode, BeaconNodeHttp, BlsPubKey, CommitteeIndex, Slot, StateId, ValidatorIndex,
    },
    env::{EnvConfig, ENV_CONFIG},
    log,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::{collections::BTreeMap, time::Duration};
use tracing::debug;

/// Query a beacon node over its HTTP API and print the answers as JSON.
#[derive(Parser)]
#[command(name = "beacon-node-client", version)]
struct Cli {
    /// Beacon node address, defaults to BEACON_URL.
    #[arg(long, global = true)]
    beacon_url: Option<String>,
    /// Request timeout in seconds, defaults to BEACON_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Slot the chain is in right now.
    CurrentSlot,
    AttestationData {
        /// Defaults to the current slot.
        #[arg(long)]
        slot: Option<Slot>,
        #[arg(long, default_value_t = 0)]
        committee_index: u64,
    },
    Validators {
        #[arg(long, default_value = "head")]
        state_id: StateId,
        /// Repeat to query several keys, leave out for all validators.
        #[arg(long = "pubkey")]
        pub_keys: Vec<BlsPubKey>,
        #[arg(long)]
        without_balance: bool,
    },
    Balances {
        #[arg(long, default_value = "head")]
        state_id: StateId,
        #[arg(long = "index")]
        indices: Vec<u64>,
    },
    Genesis,
    Finality {
        #[arg(long, default_value = "head")]
        state_id: StateId,
    },
    Version,
    EffectiveBalanceSum {
        #[arg(long, default_value = "head")]
        state_id: StateId,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(beacon_node: &BeaconNodeHttp, command: Command) -> Result<()> {
    match command {
        Command::CurrentSlot => {
            let slot = beacon_node.get_current_slot().await?;
            print_json(&json!({ "slot": slot, "epoch": slot.epoch() }))
        }
        Command::AttestationData {
            slot,
            committee_index,
        } => {
            let slot = match slot {
                Some(slot) => slot,
                None => beacon_node.get_current_slot().await?,
            };
            let attestation_data = beacon_node
                .get_attestation_data(slot, CommitteeIndex(committee_index))
                .await?;
            print_json(&attestation_data)
        }
        Command::Validators {
            state_id,
            pub_keys,
            without_balance,
        } => {
            let validators = if without_balance {
                beacon_node
                    .get_validators_without_balance_by_pub_key(&state_id, &pub_keys)
                    .await?
            } else {
                beacon_node
                    .get_validators_by_pub_key(&state_id, &pub_keys)
                    .await?
            };
            debug!(
                total_balance = %balances::sum_balances(validators.values()),
                "fetched validators"
            );
            print_json(&validators.into_iter().collect::<BTreeMap<_, _>>())
        }
        Command::Balances { state_id, indices } => {
            let indices = indices
                .into_iter()
                .map(ValidatorIndex)
                .collect::<Vec<_>>();
            let balances = beacon_node
                .get_validator_balances(&state_id, &indices)
                .await?;
            print_json(&balances.into_iter().collect::<BTreeMap<_, _>>())
        }
        Command::Genesis => print_json(&beacon_node.get_genesis().await?),
        Command::Finality { state_id } => {
            print_json(&beacon_node.get_finality_checkpoints(&state_id).await?)
        }
        Command::Version => print_json(&json!({
            "version": beacon_node.get_node_version().await?
        })),
        Command::EffectiveBalanceSum { state_id } => {
            print_json(&get_effective_balance_sum(beacon_node, &state_id).await?)
        }
    }
}

/// Command line flags take precedence over the environment.
fn with_overrides(
    config: &EnvConfig,
    beacon_url: Option<String>,
    timeout_secs: Option<u64>,
) -> EnvConfig {
    EnvConfig {
        beacon_url: beacon_url.or_else(|| config.beacon_url.clone()),
        beacon_timeout: timeout_secs.map_or(config.beacon_timeout, Duration::from_secs),
        ..config.clone()
    }
}

#[tokio::main]
pub async fn main() -> Result<()> {
    log::init_with_env();

    let cli = Cli::parse();

    let config = with_overrides(&ENV_CONFIG, cli.beacon_url, cli.timeout_secs);
    let beacon_node = BeaconNodeHttp::from_config(&config).await?;

    run(&beacon_node, cli.command).await
}
