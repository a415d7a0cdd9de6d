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

//! Outward facade owning both stores and the router.

use crate::config::BrokerConfig;
use crate::error::Result;
use crate::model::{
    CodeEnum, QueryContext, QueryContextResponse, RegisterContext, RegisterContextResponse,
    StatusCode, SubscribeContext, SubscribeContextResponse, SubscribeResponse, UnsubscribeContext,
    UnsubscribeContextResponse, UpdateContext, UpdateContextResponse,
};
use crate::observability::events;
use crate::registrations::LocalRegistrations;
use crate::routing::{ContextRouter, ForwardOutcome, NgsiClient};
use crate::subscriptions::Subscriptions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

const COMPONENT: &str = "context_broker";

/// A light NGSI context broker.
///
/// Requests arrive already deserialized from the transport layer; errors come
/// back as [`crate::BrokerError`], which maps onto an NGSI status code.
pub struct ContextBroker {
    subscriptions: Arc<Subscriptions>,
    registrations: Arc<LocalRegistrations>,
    router: ContextRouter,
    stopped: AtomicBool,
}

impl ContextBroker {
    /// Starts both stores with their purge timers.
    pub fn new(config: &BrokerConfig, client: Arc<dyn NgsiClient>) -> Result<Self> {
        config.validate()?;

        let subscriptions = Arc::new(Subscriptions::from_config(config)?);
        let registrations = Arc::new(LocalRegistrations::from_config(config)?);
        let router = ContextRouter::new(
            registrations.clone(),
            client,
            config.remote_broker.clone(),
        );

        info!(
            event = events::BROKER_START,
            component = COMPONENT,
            remote_broker = config.remote_broker.as_deref().unwrap_or("none"),
            default_duration = config.default_duration.as_str(),
            purge_interval_ms = config.purge_interval_ms,
            "context broker started"
        );

        Ok(Self {
            subscriptions,
            registrations,
            router,
            stopped: AtomicBool::new(false),
        })
    }

    /// Publishes the outcome of every detached remote-broker update on `outcomes`.
    pub fn with_outcome_observer(
        mut self,
        outcomes: mpsc::UnboundedSender<ForwardOutcome>,
    ) -> Self {
        self.router.set_outcome_observer(outcomes);
        self
    }

    pub fn subscribe_context(
        &self,
        mut request: SubscribeContext,
    ) -> Result<SubscribeContextResponse> {
        let subscription_id = self.subscriptions.add_subscription(&mut request)?;

        Ok(SubscribeContextResponse {
            subscribe_response: SubscribeResponse {
                subscription_id,
                duration: request.duration,
                throttling: request.throttling,
            },
        })
    }

    pub fn unsubscribe_context(&self, request: &UnsubscribeContext) -> UnsubscribeContextResponse {
        let code = if self.subscriptions.delete_subscription(request) {
            CodeEnum::Code200
        } else {
            CodeEnum::Code470
        };

        UnsubscribeContextResponse {
            subscription_id: request.subscription_id.clone(),
            status_code: StatusCode::from(code),
        }
    }

    pub fn register_context(
        &self,
        mut request: RegisterContext,
    ) -> Result<RegisterContextResponse> {
        self.router.register_context(&mut request)
    }

    pub async fn update_context(&self, update: &UpdateContext) -> Result<UpdateContextResponse> {
        self.router.update_context(update).await
    }

    pub async fn query_context(&self, query: &QueryContext) -> Result<QueryContextResponse> {
        self.router.query_context(query).await
    }

    pub fn subscriptions(&self) -> &Arc<Subscriptions> {
        &self.subscriptions
    }

    pub fn registrations(&self) -> &Arc<LocalRegistrations> {
        &self.registrations
    }

    pub fn router(&self) -> &ContextRouter {
        &self.router
    }

    /// Stops both purge timers. Idempotent, and also run on drop.
    pub fn shutdown(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }

        self.subscriptions.shutdown();
        self.registrations.shutdown();

        info!(
            event = events::BROKER_SHUTDOWN,
            component = COMPONENT,
            subscriptions = self.subscriptions.len(),
            registrations = self.registrations.len(),
            "context broker stopped"
        );
    }
}

impl Drop for ContextBroker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
