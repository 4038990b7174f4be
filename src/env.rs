//! Configuration read from the process environment.
use lazy_static::lazy_static;
use std::{str::FromStr, time::Duration};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_BEACON_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Env {
    Dev,
    Prod,
    Stag,
}

#[derive(Debug, Error)]
#[error("failed to parse env {0}, expected one of dev, stag, prod")]
pub struct ParseEnvError(String);

impl FromStr for Env {
    type Err = ParseEnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" | "development" => Ok(Self::Dev),
            "stag" | "staging" => Ok(Self::Stag),
            "prod" | "production" => Ok(Self::Prod),
            unknown => Err(ParseEnvError(unknown.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnvConfig {
    pub env: Env,
    pub beacon_url: Option<String>,
    pub beacon_timeout: Duration,
}

impl EnvConfig {
    /// Builds the config from a variable lookup, falling back to defaults for
    /// anything missing or unparsable.
    pub fn from_lookup(get_var: impl Fn(&str) -> Option<String>) -> Self {
        let env = get_var("ENV")
            .and_then(|env| {
                env.parse::<Env>()
                    .map_err(|err| warn!(%err, "falling back to dev env"))
                    .ok()
            })
            .unwrap_or(Env::Dev);

        let beacon_timeout = get_var("BEACON_TIMEOUT_SECS")
            .and_then(|secs| {
                secs.parse::<u64>()
                    .map_err(|_| {
                        warn!(
                            %secs,
                            "BEACON_TIMEOUT_SECS is not a whole number of seconds, using default"
                        )
                    })
                    .ok()
            })
            .map_or(DEFAULT_BEACON_TIMEOUT, Duration::from_secs);

        Self {
            env,
            beacon_url: get_var("BEACON_URL").filter(|url| !url.is_empty()),
            beacon_timeout,
        }
    }
}

pub(crate) fn get_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn get_env_config() -> EnvConfig {
    EnvConfig::from_lookup(get_env_var)
}

lazy_static! {
    pub static ref ENV_CONFIG: EnvConfig = get_env_config();
}
