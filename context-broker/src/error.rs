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

//! Error types surfaced synchronously to the transport layer.

use crate::model::{CodeEnum, StatusCode};
use crate::routing::ForwardError;
use thiserror::Error;

/// Failures reported by broker operations.
///
/// None of these leave a store partially modified.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("negative duration is not allowed: {raw}")]
    NegativeDuration { raw: String },

    #[error("bad duration: {raw}")]
    MalformedDuration { raw: String },

    #[error("bad pattern: {raw}: {reason}")]
    BadPattern { raw: String, reason: String },

    #[error("no remote broker configured to forward queryContext")]
    MissingRemoteBroker,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to start background runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

impl BrokerError {
    /// Maps the error onto the NGSI status code a transport layer should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BrokerError::NegativeDuration { .. }
            | BrokerError::MalformedDuration { .. }
            | BrokerError::BadPattern { .. } => {
                StatusCode::with_details(CodeEnum::Code400, self.to_string())
            }
            BrokerError::InvalidRequest(_) => {
                StatusCode::with_details(CodeEnum::Code472, self.to_string())
            }
            BrokerError::MissingRemoteBroker
            | BrokerError::Forward(_)
            | BrokerError::Config(_)
            | BrokerError::Runtime(_) => {
                StatusCode::with_details(CodeEnum::Code500, self.to_string())
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use super::BrokerError;

    #[test]
    fn messages_keep_ngsi_wording() {
        let negative = BrokerError::NegativeDuration {
            raw: "-PT10S".to_string(),
        };
        let malformed = BrokerError::MalformedDuration {
            raw: "PIPO".to_string(),
        };

        assert!(negative
            .to_string()
            .starts_with("negative duration is not allowed"));
        assert_eq!(malformed.to_string(), "bad duration: PIPO");
    }

    #[test]
    fn validation_errors_map_to_bad_request() {
        let error = BrokerError::BadPattern {
            raw: "](".to_string(),
            reason: "unclosed group".to_string(),
        };

        let status = error.status_code();

        assert_eq!(status.code, "400");
        assert!(status.details.unwrap_or_default().contains("bad pattern"));
    }

    #[test]
    fn missing_remote_broker_maps_to_internal_error() {
        assert_eq!(BrokerError::MissingRemoteBroker.status_code().code, "500");
    }
}
