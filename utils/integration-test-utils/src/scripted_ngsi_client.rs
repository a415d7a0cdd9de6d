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

use async_trait::async_trait;
use context_broker::{
    ForwardError, NgsiClient, QueryContext, QueryContextResponse, UpdateContext,
    UpdateContextResponse,
};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::debug;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ForwardKind {
    Update,
    Query,
}

/// One request received by a [`ScriptedNgsiClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct ForwardCall {
    pub kind: ForwardKind,
    pub url: String,
}

/// `NgsiClient` answering from a script and recording every call.
///
/// Calls are recorded before the optional delay, so a test can see that a
/// forward started even when it never waits for its completion.
#[derive(Default)]
pub struct ScriptedNgsiClient {
    name: String,
    fail: bool,
    delay: Option<Duration>,
    update_response: UpdateContextResponse,
    query_response: QueryContextResponse,
    calls: Mutex<Vec<ForwardCall>>,
    call_received: Notify,
}

impl ScriptedNgsiClient {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Every call fails with a `ForwardError`.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Every call sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_update_response(mut self, response: UpdateContextResponse) -> Self {
        self.update_response = response;
        self
    }

    pub fn with_query_response(mut self, response: QueryContextResponse) -> Self {
        self.query_response = response;
        self
    }

    pub fn calls(&self) -> Vec<ForwardCall> {
        self.calls.lock().clone()
    }

    /// Waits until at least `count` calls were received.
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let notified = self.call_received.notified();
            if self.calls.lock().len() >= count {
                return;
            }
            notified.await;
        }
    }

    async fn record(&self, kind: ForwardKind, url: &str) -> Result<(), ForwardError> {
        debug!("{}: received {kind:?} for {url}", self.name);
        self.calls.lock().push(ForwardCall {
            kind,
            url: url.to_string(),
        });
        self.call_received.notify_waiters();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(ForwardError::new(url, format!("{} refuses to answer", self.name)));
        }
        Ok(())
    }
}

#[async_trait]
impl NgsiClient for ScriptedNgsiClient {
    async fn update_context(
        &self,
        url: &str,
        _update: &UpdateContext,
    ) -> Result<UpdateContextResponse, ForwardError> {
        self.record(ForwardKind::Update, url).await?;
        Ok(self.update_response.clone())
    }

    async fn query_context(
        &self,
        url: &str,
        _query: &QueryContext,
    ) -> Result<QueryContextResponse, ForwardError> {
        self.record(ForwardKind::Query, url).await?;
        Ok(self.query_response.clone())
    }
}
