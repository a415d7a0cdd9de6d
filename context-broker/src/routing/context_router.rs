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

//! Routing of updates, queries and registrations.

use crate::error::{BrokerError, Result};
use crate::model::{
    CodeEnum, QueryContext, QueryContextResponse, RegisterContext, RegisterContextResponse,
    UpdateContext, UpdateContextResponse,
};
use crate::observability::{events, fields};
use crate::registrations::LocalRegistrations;
use crate::routing::ngsi_client::NgsiClient;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const COMPONENT: &str = "context_router";

/// Completion of a detached update forward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Delivered { url: String },
    Failed { url: String, reason: String },
}

impl ForwardOutcome {
    pub fn url(&self) -> &str {
        match self {
            ForwardOutcome::Delivered { url } | ForwardOutcome::Failed { url, .. } => url,
        }
    }
}

/// Picks the destination of each request: a registered provider first, then the
/// remote broker, then a local answer.
///
/// Updates that fall through to the remote broker are forwarded on a detached
/// task; their outcome is only logged, and published to the observer if one is
/// attached. Queries always wait for their forward.
pub struct ContextRouter {
    registrations: Arc<LocalRegistrations>,
    client: Arc<dyn NgsiClient>,
    remote_broker: Option<String>,
    outcomes: Option<mpsc::UnboundedSender<ForwardOutcome>>,
}

impl ContextRouter {
    pub fn new(
        registrations: Arc<LocalRegistrations>,
        client: Arc<dyn NgsiClient>,
        remote_broker: Option<String>,
    ) -> Self {
        Self {
            registrations,
            client,
            remote_broker,
            outcomes: None,
        }
    }

    pub fn with_outcome_observer(
        mut self,
        outcomes: mpsc::UnboundedSender<ForwardOutcome>,
    ) -> Self {
        self.set_outcome_observer(outcomes);
        self
    }

    pub(crate) fn set_outcome_observer(
        &mut self,
        outcomes: mpsc::UnboundedSender<ForwardOutcome>,
    ) {
        self.outcomes = Some(outcomes);
    }

    pub fn remote_broker(&self) -> Option<&str> {
        self.remote_broker.as_deref()
    }

    /// Routes `update` on its first context element.
    ///
    /// A matching provider receives the update and its answer is returned. In
    /// every other case the caller gets a `200 OK` per submitted element, whether
    /// or not a remote broker was there to forward to.
    pub async fn update_context(&self, update: &UpdateContext) -> Result<UpdateContextResponse> {
        let Some(primary) = update.context_elements.first() else {
            debug!(
                event = events::ROUTE_UPDATE_START,
                component = COMPONENT,
                reason = fields::REASON_NO_CONTEXT_ELEMENTS,
                "empty update answered locally"
            );
            return Ok(UpdateContextResponse::default());
        };

        debug!(
            event = events::ROUTE_UPDATE_START,
            component = COMPONENT,
            entity = %fields::format_entity(&primary.entity_id),
            elements = update.context_elements.len(),
            action = ?update.update_action,
            "routing updateContext"
        );

        let attributes = primary.attribute_names();
        let provider = self
            .registrations
            .find_providing_application(&primary.entity_id, &attributes)?
            .next();

        if let Some(url) = provider {
            debug!(
                event = events::ROUTE_PROVIDER_FOUND,
                component = COMPONENT,
                url = url.as_str(),
                "forwarding update to providing application"
            );
            return self.forward_update(&url, update).await;
        }

        match &self.remote_broker {
            Some(url) => self.spawn_detached_update(url.clone(), update.clone()),
            None => warn!(
                event = events::FORWARD_NO_REMOTE_BROKER,
                component = COMPONENT,
                entity = %fields::format_entity(&primary.entity_id),
                "no remote broker to forward updateContext to"
            ),
        }

        Ok(UpdateContextResponse::acknowledging(update, CodeEnum::Code200))
    }

    /// Routes `query` on its first entity id and waits for the answer.
    pub async fn query_context(&self, query: &QueryContext) -> Result<QueryContextResponse> {
        let Some(primary) = query.entity_id_list.first() else {
            return Err(BrokerError::InvalidRequest(
                "queryContext requires at least one entity id".to_string(),
            ));
        };

        let attributes: HashSet<String> = query.attribute_list.iter().cloned().collect();
        debug!(
            event = events::ROUTE_QUERY_START,
            component = COMPONENT,
            entity = %fields::format_entity(primary),
            attributes = %fields::format_attributes(Some(&attributes)),
            "routing queryContext"
        );

        let provider = self
            .registrations
            .find_providing_application(primary, &attributes)?
            .next();

        let url = match provider {
            Some(url) => {
                debug!(
                    event = events::ROUTE_PROVIDER_FOUND,
                    component = COMPONENT,
                    url = url.as_str(),
                    "forwarding query to providing application"
                );
                url
            }
            None => self
                .remote_broker
                .clone()
                .ok_or(BrokerError::MissingRemoteBroker)?,
        };

        debug!(
            event = events::FORWARD_SEND_ATTEMPT,
            component = COMPONENT,
            url = url.as_str(),
            "forwarding queryContext"
        );
        let response = self.client.query_context(&url, query).await.map_err(|err| {
            debug!(
                event = events::FORWARD_SEND_FAILED,
                component = COMPONENT,
                url = url.as_str(),
                err = %err,
                "queryContext forward failed"
            );
            err
        })?;

        debug!(
            event = events::FORWARD_SEND_OK,
            component = COMPONENT,
            url = url.as_str(),
            "queryContext forward succeeded"
        );
        Ok(response)
    }

    /// Stores `register` as a local registration.
    pub fn register_context(
        &self,
        register: &mut RegisterContext,
    ) -> Result<RegisterContextResponse> {
        debug!(
            event = events::ROUTE_REGISTER_START,
            component = COMPONENT,
            entry_id = register.registration_id.as_deref().unwrap_or(fields::NONE),
            duration = register.duration.as_deref().unwrap_or(fields::NONE),
            "registering context"
        );

        let registration_id = self.registrations.update_registration_context(register)?;

        Ok(RegisterContextResponse {
            registration_id,
            duration: register.duration.clone(),
        })
    }

    async fn forward_update(
        &self,
        url: &str,
        update: &UpdateContext,
    ) -> Result<UpdateContextResponse> {
        debug!(
            event = events::FORWARD_SEND_ATTEMPT,
            component = COMPONENT,
            url,
            "forwarding updateContext"
        );

        match self.client.update_context(url, update).await {
            Ok(response) => {
                debug!(
                    event = events::FORWARD_SEND_OK,
                    component = COMPONENT,
                    url,
                    "updateContext forward succeeded"
                );
                Ok(response)
            }
            Err(err) => {
                debug!(
                    event = events::FORWARD_SEND_FAILED,
                    component = COMPONENT,
                    url,
                    err = %err,
                    "updateContext forward failed"
                );
                Err(err.into())
            }
        }
    }

    fn spawn_detached_update(&self, url: String, update: UpdateContext) {
        let client = self.client.clone();
        let outcomes = self.outcomes.clone();

        debug!(
            event = events::FORWARD_DETACHED,
            component = COMPONENT,
            url = url.as_str(),
            elements = update.context_elements.len(),
            "forwarding updateContext to remote broker without waiting"
        );

        tokio::spawn(async move {
            let outcome = match client.update_context(&url, &update).await {
                Ok(_) => {
                    debug!(
                        event = events::FORWARD_SEND_OK,
                        component = COMPONENT,
                        url = url.as_str(),
                        "updateContext completed on remote broker"
                    );
                    ForwardOutcome::Delivered { url }
                }
                Err(err) => {
                    warn!(
                        event = events::FORWARD_SEND_FAILED,
                        component = COMPONENT,
                        url = url.as_str(),
                        err = %err,
                        "updateContext failed on remote broker"
                    );
                    ForwardOutcome::Failed {
                        url,
                        reason: err.reason,
                    }
                }
            };

            if let Some(outcomes) = outcomes {
                if let Err(mpsc::error::SendError(outcome)) = outcomes.send(outcome) {
                    debug!(
                        event = events::FORWARD_OUTCOME_DROPPED,
                        component = COMPONENT,
                        url = outcome.url(),
                        reason = fields::REASON_OBSERVER_CLOSED,
                        "forward outcome observer is gone"
                    );
                }
            }
        });
    }
}
