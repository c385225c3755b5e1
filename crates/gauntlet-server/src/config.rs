use std::{collections::HashMap, fs, str::FromStr, time::Duration};

use gauntlet_primitives::{
    alloy::primitives::Address,
    constants::{
        DEFAULT_BID_WAIT_TIME_MS, DEFAULT_SETTLEMENT_CONTRACTS,
        DEFAULT_WINNER_PERMISSION_TIME_SECS, MAX_BID_WAIT_TIME_MS,
        MAX_WINNER_PERMISSION_TIME_SECS,
    },
    signing::SigningDomain,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

use crate::{engine::AuctionConfig, subscription_manager::DEFAULT_CHANNEL_CAPACITY};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_port: u16,
    pub log_level: String,
    pub bid_wait_time_ms: u64,
    /// Seconds.
    pub winner_permission_time: u64,
    pub settlement_contracts: HashMap<u64, Address>,
    pub signing_domain: SigningDomain,
    pub broadcast_capacity: usize,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Failed to parse log level: {0}")]
    LogLevelParseError(String),
    #[error("Invalid value {value:?} for {name}")]
    EnvOverrideError { name: &'static str, value: String },
    #[error("{name} is {value}, the maximum is {max}")]
    OutOfRangeError {
        name: &'static str,
        value: u64,
        max: u64,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            log_level: "info".to_string(),
            bid_wait_time_ms: DEFAULT_BID_WAIT_TIME_MS,
            winner_permission_time: DEFAULT_WINNER_PERMISSION_TIME_SECS,
            settlement_contracts: DEFAULT_SETTLEMENT_CONTRACTS.clone(),
            signing_domain: SigningDomain::default(),
            broadcast_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()
    }

    /// Apply `PORT`, `BID_WAIT_TIME_MS`, `WINNER_PERMISSION_TIME` and `LOG_LEVEL` from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = parse_override(&lookup, "PORT")? {
            self.server_port = port;
        }
        if let Some(wait) = parse_override(&lookup, "BID_WAIT_TIME_MS")? {
            self.bid_wait_time_ms = wait;
        }
        if let Some(permission) = parse_override(&lookup, "WINNER_PERMISSION_TIME")? {
            self.winner_permission_time = permission;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level;
        }
        self.validate()
    }

    /// Reject auction timings the engine cannot turn into deadlines.
    pub fn validate(self) -> Result<Self, ConfigError> {
        check_max("bid_wait_time_ms", self.bid_wait_time_ms, MAX_BID_WAIT_TIME_MS)?;
        check_max(
            "winner_permission_time",
            self.winner_permission_time,
            MAX_WINNER_PERMISSION_TIME_SECS,
        )?;
        Ok(self)
    }

    /// Environment overrides from the process.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevelParseError(self.log_level.clone()))
    }

    pub fn auction_config(&self) -> AuctionConfig {
        AuctionConfig {
            bid_wait_time: Duration::from_millis(self.bid_wait_time_ms),
            winner_permission_time_secs: self.winner_permission_time,
            settlement_contracts: self.settlement_contracts.clone(),
            signing_domain: self.signing_domain.clone(),
        }
    }
}

fn check_max(name: &'static str, value: u64, max: u64) -> Result<(), ConfigError> {
    if value > max {
        return Err(ConfigError::OutOfRangeError { name, value, max });
    }
    Ok(())
}

fn parse_override<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvOverrideError { name, value })
        })
        .transpose()
}
