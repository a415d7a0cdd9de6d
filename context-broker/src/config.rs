/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Broker configuration, loaded from JSON5.

use crate::error::{BrokerError, Result};
use crate::expiration::IsoDuration;
use crate::observability::events;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

const COMPONENT: &str = "config";

pub const DEFAULT_DURATION: &str = "P1M";
pub const DEFAULT_PURGE_INTERVAL_MS: u64 = 60_000;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    /// Upstream broker used when no local provider matches.
    #[serde(default)]
    pub remote_broker: Option<String>,
    /// Lifetime of subscriptions and registrations that do not carry one.
    #[serde(default = "default_duration")]
    pub default_duration: String,
    #[serde(default = "default_purge_interval_ms")]
    pub purge_interval_ms: u64,
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

fn default_purge_interval_ms() -> u64 {
    DEFAULT_PURGE_INTERVAL_MS
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            remote_broker: None,
            default_duration: default_duration(),
            purge_interval_ms: default_purge_interval_ms(),
        }
    }
}

impl BrokerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BrokerError::Config(format!("Unable to read config file {}: {e}", path.display()))
        })?;

        let config = Self::from_json5_str(&contents)?;
        debug!(
            event = events::CONFIG_LOAD_OK,
            component = COMPONENT,
            path = %path.display(),
            remote_broker = config.remote_broker.as_deref().unwrap_or("none"),
            "configuration loaded"
        );

        Ok(config)
    }

    pub fn from_json5_str(contents: &str) -> Result<Self> {
        let config: Self = json5::from_str(contents)
            .map_err(|e| BrokerError::Config(format!("Unable to parse config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot: a parseable default duration and a non-zero interval.
    pub fn validate(&self) -> Result<()> {
        self.default_duration()?;
        if self.purge_interval_ms == 0 {
            return Err(BrokerError::Config(
                "purge_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn default_duration(&self) -> Result<IsoDuration> {
        IsoDuration::parse(&self.default_duration).map_err(|e| {
            BrokerError::Config(format!("invalid default_duration: {e}"))
        })
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_millis(self.purge_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = BrokerConfig::from_json5_str("{}").expect("empty config is valid");

        assert_eq!(config, BrokerConfig::default());
        assert_eq!(config.default_duration, "P1M");
        assert_eq!(config.purge_interval(), Duration::from_secs(60));
    }

    #[test]
    fn json5_comments_and_trailing_commas_are_accepted() {
        let config = BrokerConfig::from_json5_str(
            r#"{
                // upstream
                remote_broker: "http://remote:8082",
                purge_interval_ms: 500,
            }"#,
        )
        .expect("json5 config is valid");

        assert_eq!(config.remote_broker.as_deref(), Some("http://remote:8082"));
        assert_eq!(config.purge_interval_ms, 500);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = BrokerConfig::from_json5_str(r#"{ remote_brokers: "http://typo" }"#);

        assert!(matches!(result, Err(BrokerError::Config(_))));
    }

    #[test]
    fn invalid_default_duration_is_a_config_error() {
        for raw in ["PIPO", "-P1D"] {
            let result =
                BrokerConfig::from_json5_str(&format!(r#"{{ default_duration: "{raw}" }}"#));

            assert!(
                matches!(result, Err(BrokerError::Config(ref message)) if message.contains(raw)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn zero_purge_interval_is_rejected() {
        let result = BrokerConfig::from_json5_str("{ purge_interval_ms: 0 }");

        assert!(matches!(result, Err(BrokerError::Config(_))));
    }

    #[test]
    fn shipped_config_file_loads() {
        let config = BrokerConfig::from_file(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/BROKER_CONFIG.json5"
        ))
        .expect("shipped config should load");

        assert_eq!(config.remote_broker.as_deref(), Some("http://localhost:8082"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = BrokerConfig::from_file("does-not-exist.json5");

        assert!(matches!(result, Err(BrokerError::Config(_))));
    }
}
