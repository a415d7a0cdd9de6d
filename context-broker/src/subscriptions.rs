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

//! Consumer subscriptions: the subscription store and its purge timer.

use crate::config::BrokerConfig;
use crate::error::{BrokerError, Result};
use crate::expiration::{IsoDuration, PurgeTimer};
use crate::matching::{attributes_satisfy, CompiledEntityId};
use crate::model::{EntityId, SubscribeContext, UnsubscribeContext};
use crate::observability::{events, fields};
use crate::store::{EntryStore, Matches, StoreEntry, Stored};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const COMPONENT: &str = "subscriptions";

/// A validated `subscribeContext` request.
#[derive(Debug)]
pub struct Subscription {
    context: SubscribeContext,
    entity_ids: Vec<CompiledEntityId>,
    attributes: HashSet<String>,
}

impl Subscription {
    /// Compiles every pattern of `context`, failing with [`BrokerError::BadPattern`]
    /// on the first one that does not compile.
    pub fn new(context: SubscribeContext) -> Result<Self> {
        if context.entity_id_list.is_empty() {
            return Err(BrokerError::InvalidRequest(
                "subscribeContext requires at least one entity id".to_string(),
            ));
        }

        let entity_ids = CompiledEntityId::compile_all(&context.entity_id_list)?;
        let attributes = context.attribute_list.iter().cloned().collect();

        Ok(Self {
            context,
            entity_ids,
            attributes,
        })
    }

    pub fn context(&self) -> &SubscribeContext {
        &self.context
    }

    /// Callback URI notifications are sent to.
    pub fn reference(&self) -> &str {
        &self.context.reference
    }

    pub fn attributes(&self) -> &HashSet<String> {
        &self.attributes
    }
}

impl StoreEntry for Subscription {
    // A subscription without attributes is interested in all of them.
    fn matches(&self, search: &CompiledEntityId, required: Option<&HashSet<String>>) -> bool {
        self.entity_ids.iter().any(|entity_id| search.matches(entity_id))
            && (self.attributes.is_empty() || attributes_satisfy(required, &self.attributes))
    }
}

/// Owns the subscription store and keeps it purged.
pub struct Subscriptions {
    store: Arc<EntryStore<Subscription>>,
    default_duration: IsoDuration,
    timer: Mutex<PurgeTimer>,
}

impl Subscriptions {
    pub fn new(default_duration: IsoDuration, purge_interval: Duration) -> Result<Self> {
        let store = Arc::new(EntryStore::new(fields::STORE_SUBSCRIPTIONS));
        let purged = store.clone();
        let timer = PurgeTimer::start(fields::STORE_SUBSCRIPTIONS, purge_interval, move |now| {
            purged.purge_expired(now)
        })?;

        Ok(Self {
            store,
            default_duration,
            timer: Mutex::new(timer),
        })
    }

    pub fn from_config(config: &BrokerConfig) -> Result<Self> {
        Self::new(config.default_duration()?, config.purge_interval())
    }

    /// Stores `request` and writes the generated id and expiration date back into it.
    ///
    /// A request without a duration lives for the configured default duration.
    pub fn add_subscription(&self, request: &mut SubscribeContext) -> Result<String> {
        let stored = self.store_subscription(request).map_err(|err| {
            debug!(
                event = events::SUBSCRIPTION_ADD_FAILED,
                component = COMPONENT,
                reference = request.reference.as_str(),
                err = %err,
                "subscription rejected"
            );
            err
        })?;

        request.subscription_id = Some(stored.id().to_string());
        request.expiration_date = Some(stored.expires_at());

        debug!(
            event = events::SUBSCRIPTION_ADD_OK,
            component = COMPONENT,
            entry_id = stored.id(),
            reference = stored.entry().reference(),
            expires_at = %stored.expires_at(),
            "subscription added"
        );

        Ok(stored.id().to_string())
    }

    fn store_subscription(&self, request: &SubscribeContext) -> Result<Arc<Stored<Subscription>>> {
        let ttl = match request.duration.as_deref() {
            Some(raw) => IsoDuration::parse(raw)?,
            None => self.default_duration.clone(),
        };
        let subscription = Subscription::new(request.clone())?;
        self.store.insert_for(subscription, &ttl)
    }

    pub fn get_subscription(&self, subscription_id: &str) -> Option<Arc<Stored<Subscription>>> {
        self.store.get(subscription_id)
    }

    /// `true` when the subscription existed and was removed.
    pub fn delete_subscription(&self, request: &UnsubscribeContext) -> bool {
        let deleted = self.store.delete(&request.subscription_id);

        let event = if deleted {
            events::SUBSCRIPTION_DELETE_OK
        } else {
            events::SUBSCRIPTION_DELETE_MISSING
        };
        debug!(
            event,
            component = COMPONENT,
            entry_id = request.subscription_id.as_str(),
            "subscription delete"
        );

        deleted
    }

    /// Lazily yields the live subscriptions interested in `search` and `attributes`.
    pub fn find_subscriptions(
        &self,
        search: &EntityId,
        attributes: Option<&HashSet<String>>,
    ) -> Result<Matches<Subscription>> {
        debug!(
            event = events::SUBSCRIPTION_FIND,
            component = COMPONENT,
            entity = %fields::format_entity(search),
            attributes = %fields::format_attributes(attributes),
            "searching subscriptions"
        );

        self.store.find(search, attributes, Utc::now())
    }

    /// Drops every expired subscription now, independently of the timer.
    pub fn purge_expired_subscriptions(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Stops the purge timer. Stored subscriptions stay readable.
    pub fn shutdown(&self) {
        self.timer.lock().stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscriptions() -> Subscriptions {
        Subscriptions::new(
            IsoDuration::parse("P1M").expect("default duration"),
            Duration::from_secs(3_600),
        )
        .expect("subscriptions should start")
    }

    #[test]
    fn absent_duration_uses_the_default() {
        let subscriptions = subscriptions();
        let mut request = SubscribeContext::new(vec![EntityId::literal("A", "string")], "http://A");
        let before = Utc::now();

        subscriptions
            .add_subscription(&mut request)
            .expect("subscription should be added");

        let expiration = request.expiration_date.expect("expiration is written back");
        assert!(expiration > before + chrono::Duration::days(27));
    }

    #[test]
    fn subscription_without_entities_is_invalid() {
        let subscriptions = subscriptions();
        let mut request = SubscribeContext::new(vec![], "http://A");

        let result = subscriptions.add_subscription(&mut request);

        assert!(matches!(result, Err(BrokerError::InvalidRequest(_))));
        assert!(request.subscription_id.is_none());
        assert!(subscriptions.is_empty());
    }

    #[test]
    fn subscription_without_attributes_matches_any_filter() {
        let subscriptions = subscriptions();
        let mut request = SubscribeContext::new(vec![EntityId::literal("A", "string")], "http://A");
        subscriptions
            .add_subscription(&mut request)
            .expect("subscription should be added");
        let required: HashSet<String> = ["temp".to_string()].into();

        let hits = subscriptions
            .find_subscriptions(&EntityId::literal("A", "string"), Some(&required))
            .expect("search should run")
            .count();

        assert_eq!(hits, 1);
    }

    #[test]
    fn shutdown_keeps_entries_readable() {
        let subscriptions = subscriptions();
        let mut request = SubscribeContext::new(vec![EntityId::literal("A", "string")], "http://A");
        let id = subscriptions
            .add_subscription(&mut request)
            .expect("subscription should be added");

        subscriptions.shutdown();
        subscriptions.shutdown();

        assert!(subscriptions.get_subscription(&id).is_some());
    }
}
