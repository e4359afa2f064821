//! Engine configuration

use thiserror::Error;

/// Tunables for the inventory and ledger actors.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Chance that a newly sealed box swaps one normal slot for a hidden style
    /// (env: BLINDBOX_HIDDEN_PROBABILITY)
    pub hidden_probability: f64,
    /// Number of inventory actors; boxes are spread across them by id
    /// (env: BLINDBOX_STOCK_SHARDS)
    pub stock_shards: usize,
    /// Mailbox capacity of every actor (env: BLINDBOX_CHANNEL_BUFFER)
    pub channel_buffer: usize,
    /// Page size for purchase history when the query gives none
    /// (env: BLINDBOX_PAGE_SIZE)
    pub default_page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value:?}")]
    Malformed { name: &'static str, value: String },

    #[error("{name} is out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hidden_probability: 0.05,
            stock_shards: 4,
            channel_buffer: 32,
            default_page_size: 10,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            hidden_probability: parse(&lookup, "BLINDBOX_HIDDEN_PROBABILITY")?
                .unwrap_or(defaults.hidden_probability),
            stock_shards: parse(&lookup, "BLINDBOX_STOCK_SHARDS")?.unwrap_or(defaults.stock_shards),
            channel_buffer: parse(&lookup, "BLINDBOX_CHANNEL_BUFFER")?
                .unwrap_or(defaults.channel_buffer),
            default_page_size: parse(&lookup, "BLINDBOX_PAGE_SIZE")?
                .unwrap_or(defaults.default_page_size),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.hidden_probability) {
            return Err(ConfigError::OutOfRange {
                name: "BLINDBOX_HIDDEN_PROBABILITY",
                reason: format!("{} is not within [0, 1]", self.hidden_probability),
            });
        }
        for (name, value) in [
            ("BLINDBOX_STOCK_SHARDS", self.stock_shards),
            ("BLINDBOX_CHANNEL_BUFFER", self.channel_buffer),
            ("BLINDBOX_PAGE_SIZE", self.default_page_size),
        ] {
            if value == 0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    reason: "must be at least 1".into(),
                });
            }
        }
        Ok(())
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Malformed { name, value }),
    }
}
