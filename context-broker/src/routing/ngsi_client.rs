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

//! Outbound NGSI client seam.

use crate::model::{QueryContext, QueryContextResponse, UpdateContext, UpdateContextResponse};
use async_trait::async_trait;
use thiserror::Error;

/// A forward to a provider or remote broker that did not produce a response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("forward to {url} failed: {reason}")]
pub struct ForwardError {
    pub url: String,
    pub reason: String,
}

impl ForwardError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Sends NGSI requests to another broker or to a providing application.
///
/// Implementations own transport concerns such as timeouts and headers; a
/// timed out call is reported as a [`ForwardError`].
#[async_trait]
pub trait NgsiClient: Send + Sync {
    async fn update_context(
        &self,
        url: &str,
        update: &UpdateContext,
    ) -> Result<UpdateContextResponse, ForwardError>;

    async fn query_context(
        &self,
        url: &str,
        query: &QueryContext,
    ) -> Result<QueryContextResponse, ForwardError>;
}
