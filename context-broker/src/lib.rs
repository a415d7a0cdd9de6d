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

//! # context-broker
//!
//! `context-broker` is the core of a light NGSI context broker: consumers
//! subscribe to entities, providers register the entities they serve, and
//! updates and queries are routed to whichever party can answer them.
//!
//! Typical usage goes through [`ContextBroker`], built from a [`BrokerConfig`]
//! and an [`NgsiClient`] that carries forwarded requests.
//!
//! ```
//! use std::sync::Arc;
//! use context_broker::{
//!     BrokerConfig, BrokerError, ContextBroker, ContextRegistration, EntityId, QueryContext,
//!     RegisterContext, SubscribeContext,
//! };
//!
//! # pub mod mock_client {
//! #     use async_trait::async_trait;
//! #     use context_broker::{
//! #         ForwardError, NgsiClient, QueryContext, QueryContextResponse, UpdateContext,
//! #         UpdateContextResponse,
//! #     };
//! #
//! #     pub struct MockClient;
//! #
//! #     #[async_trait]
//! #     impl NgsiClient for MockClient {
//! #         async fn update_context(
//! #             &self,
//! #             _url: &str,
//! #             _update: &UpdateContext,
//! #         ) -> Result<UpdateContextResponse, ForwardError> {
//! #             Ok(UpdateContextResponse::default())
//! #         }
//! #         async fn query_context(
//! #             &self,
//! #             _url: &str,
//! #             _query: &QueryContext,
//! #         ) -> Result<QueryContextResponse, ForwardError> {
//! #             Ok(QueryContextResponse::default())
//! #         }
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let client = Arc::new(mock_client::MockClient);
//! let broker = ContextBroker::new(&BrokerConfig::default(), client).unwrap();
//!
//! let subscribed = broker
//!     .subscribe_context(SubscribeContext::new(
//!         vec![EntityId::pattern("Room.*", "Room")],
//!         "http://consumer/notify",
//!     ))
//!     .unwrap();
//! assert!(!subscribed.subscribe_response.subscription_id.is_empty());
//!
//! // No provider and no remote broker: queries cannot be answered.
//! let query = QueryContext::new(vec![EntityId::literal("Room1", "Room")], &["temperature"]);
//! assert!(matches!(
//!     broker.query_context(&query).await,
//!     Err(BrokerError::MissingRemoteBroker)
//! ));
//!
//! // Once a provider registers, the query is forwarded to it.
//! broker
//!     .register_context(RegisterContext::new(vec![ContextRegistration::new(
//!         vec![EntityId::literal("Room1", "Room")],
//!         "http://provider",
//!     )]))
//!     .unwrap();
//! assert!(broker.query_context(&query).await.is_ok());
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Model: NGSI request and response shapes
//! - Matching: entity-id pattern and attribute rules
//! - Store: generic expiring entry store with lazy, snapshot-based search
//! - Expiration: ISO-8601 durations and the per-store purge timer
//! - Facades: [`Subscriptions`] and [`LocalRegistrations`]
//! - Routing: provider, then remote broker, then local answer
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod broker;
pub use broker::ContextBroker;

mod config;
pub use config::{BrokerConfig, DEFAULT_DURATION, DEFAULT_PURGE_INTERVAL_MS};

mod error;
pub use error::{BrokerError, Result};

mod expiration;
pub use expiration::{compute_expiry, IsoDuration, PurgeTimer};

mod matching;
pub use matching::{attributes_satisfy, entity_matches, CompiledEntityId};

mod model;
pub use model::*;

#[doc(hidden)]
pub mod observability;

mod registrations;
pub use registrations::{LocalRegistrations, Registration};

mod routing;
pub use routing::{ContextRouter, ForwardError, ForwardOutcome, NgsiClient};

mod runtime;

mod store;
pub use store::{EntryStore, Matches, StoreEntry, Stored, Upserted};

mod subscriptions;
pub use subscriptions::{Subscription, Subscriptions};
