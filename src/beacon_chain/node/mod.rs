//! Functions and data structures for communicating with a beacon node over its HTTP API.
//! Every call is a single round trip bounded by the timeout the client was built with.
mod error;
#[cfg(test)]
pub mod test_utils;

pub use error::BeaconNodeError;

use super::{
    AttestationData, BlsPubKey, CommitteeIndex, FinalityCheckpoints, Slot,
    StateId, StateRoot, ValidatorBalance, ValidatorEnvelope, ValidatorIndex,
};
use crate::{
    env::{EnvConfig, ENV_CONFIG},
    units::GweiNewtype,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use reqwest::{StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, time::Duration};
use tracing::{debug, info};

#[derive(Deserialize)]
struct BeaconResponse<T> {
    data: T,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BeaconHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: String,
    pub state_root: StateRoot,
    pub body_root: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BeaconHeaderEnvelope {
    pub message: BeaconHeader,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BeaconHeaderSignedEnvelope {
    /// block_root
    pub root: String,
    pub header: BeaconHeaderEnvelope,
}

impl BeaconHeaderSignedEnvelope {
    pub fn slot(&self) -> Slot {
        self.header.message.slot
    }

    pub fn state_root(&self) -> StateRoot {
        self.header.message.state_root.clone()
    }

    pub fn parent_root(&self) -> String {
        self.header.message.parent_root.clone()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Genesis {
    #[serde(with = "crate::json_codecs::quoted_unix_seconds")]
    pub genesis_time: DateTime<Utc>,
    pub genesis_validators_root: String,
    pub genesis_fork_version: String,
}

#[derive(Deserialize)]
struct NodeVersion {
    version: String,
}

#[automock]
#[async_trait]
pub trait BeaconNode {
    async fn get_attestation_data(
        &self,
        slot: Slot,
        committee_index: CommitteeIndex,
    ) -> Result<AttestationData>;
    /// The slot the chain is in right now, from genesis time and the wall clock.
    /// Unlike the head header this does not lag behind on skipped slots.
    async fn get_current_slot(&self) -> Result<Slot>;
    async fn get_finality_checkpoints(
        &self,
        state_id: &StateId,
    ) -> Result<FinalityCheckpoints>;
    async fn get_genesis(&self) -> Result<Genesis>;
    async fn get_last_header(&self) -> Result<BeaconHeaderSignedEnvelope>;
    async fn get_node_version(&self) -> Result<String>;
    /// An empty `indices` slice returns the balances of all validators.
    async fn get_validator_balances(
        &self,
        state_id: &StateId,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, GweiNewtype>>;
    /// An empty `indices` slice returns all validators.
    async fn get_validators_by_index(
        &self,
        state_id: &StateId,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, ValidatorEnvelope>>;
    /// An empty `pub_keys` slice returns all validators. Keys the state does
    /// not know are left out of the result.
    async fn get_validators_by_pub_key(
        &self,
        state_id: &StateId,
        pub_keys: &[BlsPubKey],
    ) -> Result<HashMap<BlsPubKey, ValidatorEnvelope>>;
    /// Like [`BeaconNode::get_validators_by_pub_key`] with every balance zeroed.
    async fn get_validators_without_balance_by_pub_key(
        &self,
        state_id: &StateId,
        pub_keys: &[BlsPubKey],
    ) -> Result<HashMap<BlsPubKey, ValidatorEnvelope>>;
}

#[derive(Clone, Debug)]
pub struct BeaconNodeHttp {
    client: reqwest::Client,
    server: Url,
    timeout: Duration,
}

fn parse_beacon_url(beacon_url: &str) -> Result<Url, BeaconNodeError> {
    let invalid_url = |reason: String| BeaconNodeError::InvalidUrl {
        url: beacon_url.to_string(),
        reason,
    };

    let url = Url::parse(beacon_url).map_err(|err| invalid_url(err.to_string()))?;

    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() && url.host().is_some() => {
            Ok(url)
        }
        scheme => Err(invalid_url(format!(
            "expected an http(s) url with a host, got scheme {scheme}"
        ))),
    }
}

fn slot_at(
    genesis_time: &DateTime<Utc>,
    now: &DateTime<Utc>,
) -> Result<Slot, BeaconNodeError> {
    Slot::from_date_time_rounded_down(genesis_time, now).ok_or(
        BeaconNodeError::BeforeGenesis {
            genesis_time: *genesis_time,
        },
    )
}

fn join_ids<T: Display>(ids: &[T]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl BeaconNodeHttp {
    /// Validates the address and builds a client, without touching the network.
    pub fn new(beacon_url: &str, timeout: Duration) -> Result<Self, BeaconNodeError> {
        let server = parse_beacon_url(beacon_url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            server,
            timeout,
        })
    }

    /// Builds a client and checks the node answers before handing it out.
    pub async fn connect(beacon_url: &str, timeout: Duration) -> Result<Self> {
        let beacon_node = Self::new(beacon_url, timeout)?;
        let version = beacon_node.get_node_version().await?;
        info!(
            server = %beacon_node.server,
            %version,
            "connected to beacon node"
        );
        Ok(beacon_node)
    }

    /// Connects to the node at `BEACON_URL` using `BEACON_TIMEOUT_SECS`.
    pub async fn from_env() -> Result<Self> {
        Self::from_config(&ENV_CONFIG).await
    }

    pub async fn from_config(config: &EnvConfig) -> Result<Self> {
        let beacon_url = config
            .beacon_url
            .as_deref()
            .ok_or(BeaconNodeError::MissingBeaconUrl)?;
        Self::connect(beacon_url, config.beacon_timeout).await
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Appends `segments` to `<server>/eth/v1`.
    fn eth_v1_url(&self, segments: &[&str]) -> Result<Url, BeaconNodeError> {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|()| BeaconNodeError::InvalidUrl {
                url: self.server.to_string(),
                reason: "url cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("eth")
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    fn states_url(
        &self,
        state_id: &StateId,
        resource: &str,
        ids: &str,
    ) -> Result<Url, BeaconNodeError> {
        let state_id = state_id.to_string();
        let mut url =
            self.eth_v1_url(&["beacon", "states", &state_id, resource])?;
        // no id filter means every validator in the state
        if !ids.is_empty() {
            url.query_pairs_mut().append_pair("id", ids);
        }
        Ok(url)
    }

    fn request_error(&self, path: &str, err: reqwest::Error) -> BeaconNodeError {
        if err.is_timeout() {
            BeaconNodeError::Timeout {
                path: path.to_string(),
                timeout: self.timeout,
            }
        } else {
            BeaconNodeError::Http(err)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BeaconNodeError> {
        let path = url.path().to_string();
        debug!(%url, "get_json");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.request_error(&path, err))?;

        match res.status() {
            StatusCode::OK => {
                let bytes = res
                    .bytes()
                    .await
                    .map_err(|err| self.request_error(&path, err))?;
                serde_json::from_slice::<BeaconResponse<T>>(&bytes)
                    .map(|envelope| envelope.data)
                    .map_err(|source| BeaconNodeError::Json { path, source })
            }
            StatusCode::NOT_FOUND => {
                let body = res.text().await.unwrap_or_default();
                Err(BeaconNodeError::NotFound {
                    path,
                    message: error::error_message_from_body(&body),
                })
            }
            status => {
                let body = res.text().await.unwrap_or_default();
                Err(BeaconNodeError::Server {
                    path,
                    status,
                    message: error::error_message_from_body(&body),
                })
            }
        }
    }

    async fn get_validators(
        &self,
        state_id: &StateId,
        ids: &str,
    ) -> Result<Vec<ValidatorEnvelope>, BeaconNodeError> {
        let url = self.states_url(state_id, "validators", ids)?;
        self.get_json::<Vec<ValidatorEnvelope>>(url).await
    }
}

#[async_trait]
impl BeaconNode for BeaconNodeHttp {
    async fn get_attestation_data(
        &self,
        slot: Slot,
        committee_index: CommitteeIndex,
    ) -> Result<AttestationData> {
        let mut url = self.eth_v1_url(&["validator", "attestation_data"])?;
        url.query_pairs_mut()
            .append_pair("slot", &slot.to_string())
            .append_pair("committee_index", &committee_index.to_string());

        let attestation_data = self.get_json::<AttestationData>(url).await?;
        Ok(attestation_data)
    }

    async fn get_current_slot(&self) -> Result<Slot> {
        let genesis = self.get_genesis().await?;
        let slot = slot_at(&genesis.genesis_time, &Utc::now())?;
        Ok(slot)
    }

    async fn get_finality_checkpoints(
        &self,
        state_id: &StateId,
    ) -> Result<FinalityCheckpoints> {
        let url = self.states_url(state_id, "finality_checkpoints", "")?;
        let checkpoints = self.get_json::<FinalityCheckpoints>(url).await?;
        Ok(checkpoints)
    }

    async fn get_genesis(&self) -> Result<Genesis> {
        let url = self.eth_v1_url(&["beacon", "genesis"])?;
        let genesis = self.get_json::<Genesis>(url).await?;
        Ok(genesis)
    }

    async fn get_last_header(&self) -> Result<BeaconHeaderSignedEnvelope> {
        let url = self.eth_v1_url(&["beacon", "headers", "head"])?;
        let header = self.get_json::<BeaconHeaderSignedEnvelope>(url).await?;
        Ok(header)
    }

    async fn get_node_version(&self) -> Result<String> {
        let url = self.eth_v1_url(&["node", "version"])?;
        let node_version = self.get_json::<NodeVersion>(url).await?;
        Ok(node_version.version)
    }

    async fn get_validator_balances(
        &self,
        state_id: &StateId,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, GweiNewtype>> {
        let url =
            self.states_url(state_id, "validator_balances", &join_ids(indices))?;
        let balances = self
            .get_json::<Vec<ValidatorBalance>>(url)
            .await?
            .into_iter()
            .map(|balance| (balance.index, balance.balance))
            .collect();
        Ok(balances)
    }

    async fn get_validators_by_index(
        &self,
        state_id: &StateId,
        indices: &[ValidatorIndex],
    ) -> Result<HashMap<ValidatorIndex, ValidatorEnvelope>> {
        let validators = self
            .get_validators(state_id, &join_ids(indices))
            .await?
            .into_iter()
            .map(|validator| (validator.index, validator))
            .collect();
        Ok(validators)
    }

    async fn get_validators_by_pub_key(
        &self,
        state_id: &StateId,
        pub_keys: &[BlsPubKey],
    ) -> Result<HashMap<BlsPubKey, ValidatorEnvelope>> {
        let validators = self
            .get_validators(state_id, &join_ids(pub_keys))
            .await?
            .into_iter()
            .map(|validator| (*validator.pubkey(), validator))
            .collect::<HashMap<_, _>>();

        debug!(
            %state_id,
            requested = pub_keys.len(),
            found = validators.len(),
            "got validators by pub key"
        );

        Ok(validators)
    }

    async fn get_validators_without_balance_by_pub_key(
        &self,
        state_id: &StateId,
        pub_keys: &[BlsPubKey],
    ) -> Result<HashMap<BlsPubKey, ValidatorEnvelope>> {
        let validators = self
            .get_validators(state_id, &join_ids(pub_keys))
            .await?
            .into_iter()
            .map(|validator| (*validator.pubkey(), validator.without_balance()))
            .collect();
        Ok(validators)
    }
}
