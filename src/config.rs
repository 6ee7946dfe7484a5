use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const ENV_PREFIX: &str = "USER_RELAY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub topic_arn: String,
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub publish_empty: Option<bool>,
    #[serde(default)]
    pub region: Option<String>,
}

/// Which change records qualify for the outbound batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Only records whose event name is `INSERT`, compared case-insensitively.
    #[default]
    InsertsOnly,
    /// Every record, one-to-one.
    All,
}

impl Config {
    /// Loads configuration from an optional TOML file layered under
    /// `USER_RELAY_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::from_sources(path, None)
    }

    /// Same as [`Config::load`], but reads variables from `env` instead of the
    /// process environment when given.
    pub fn from_sources(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn inserts_only(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
            filter: FilterMode::InsertsOnly,
            publish_empty: None,
            region: None,
        }
    }

    pub fn all_records(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
            filter: FilterMode::All,
            publish_empty: None,
            region: None,
        }
    }

    pub fn with_publish_empty(mut self, publish_empty: bool) -> Self {
        self.publish_empty = Some(publish_empty);
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.topic_arn.trim().is_empty() {
            return Err(Error::Config("topic_arn must not be empty".to_string()));
        }
        Ok(())
    }

    /// Whether an empty batch is still sent. Unset means "inserts only skips,
    /// all-records sends".
    pub fn publishes_empty(&self) -> bool {
        self.publish_empty.unwrap_or(self.filter == FilterMode::All)
    }
}
