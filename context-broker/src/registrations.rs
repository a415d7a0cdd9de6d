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

//! Provider registrations: the registration store and its purge timer.

use crate::config::BrokerConfig;
use crate::error::{BrokerError, Result};
use crate::expiration::{IsoDuration, PurgeTimer};
use crate::matching::{attributes_satisfy, CompiledEntityId};
use crate::model::{ContextRegistration, EntityId, RegisterContext};
use crate::observability::{events, fields};
use crate::store::{EntryStore, StoreEntry, Stored, Upserted};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const COMPONENT: &str = "registrations";

/// One `ContextRegistration` with its patterns compiled.
#[derive(Debug)]
struct ProviderBinding {
    entity_ids: Vec<CompiledEntityId>,
    attributes: HashSet<String>,
    providing_application: String,
}

impl ProviderBinding {
    fn compile(registration: &ContextRegistration) -> Result<Self> {
        Ok(Self {
            entity_ids: CompiledEntityId::compile_all(&registration.entity_id_list)?,
            attributes: registration
                .context_registration_attribute_list
                .iter()
                .map(|attribute| attribute.name.clone())
                .collect(),
            providing_application: registration.providing_application.clone(),
        })
    }

    // An empty attribute list serves every attribute.
    fn matches(&self, search: &CompiledEntityId, required: Option<&HashSet<String>>) -> bool {
        self.entity_ids.iter().any(|entity_id| search.matches(entity_id))
            && (self.attributes.is_empty() || attributes_satisfy(required, &self.attributes))
    }
}

/// A validated `registerContext` request.
#[derive(Debug)]
pub struct Registration {
    context: RegisterContext,
    providers: Vec<ProviderBinding>,
}

impl Registration {
    pub fn new(context: RegisterContext) -> Result<Self> {
        if context.context_registration_list.is_empty() {
            return Err(BrokerError::InvalidRequest(
                "registerContext requires at least one context registration".to_string(),
            ));
        }

        let providers = context
            .context_registration_list
            .iter()
            .map(ProviderBinding::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { context, providers })
    }

    pub fn context(&self) -> &RegisterContext {
        &self.context
    }

    /// Providers of this registration able to serve `search` with `required`, in declaration order.
    pub fn providing_applications<'a>(
        &'a self,
        search: &'a CompiledEntityId,
        required: Option<&'a HashSet<String>>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.providers
            .iter()
            .filter(move |provider| provider.matches(search, required))
            .map(|provider| provider.providing_application.as_str())
    }
}

impl StoreEntry for Registration {
    fn matches(&self, search: &CompiledEntityId, required: Option<&HashSet<String>>) -> bool {
        self.providers
            .iter()
            .any(|provider| provider.matches(search, required))
    }
}

/// Owns the registration store and keeps it purged.
pub struct LocalRegistrations {
    store: Arc<EntryStore<Registration>>,
    default_duration: IsoDuration,
    timer: Mutex<PurgeTimer>,
}

impl LocalRegistrations {
    pub fn new(default_duration: IsoDuration, purge_interval: Duration) -> Result<Self> {
        let store = Arc::new(EntryStore::new(fields::STORE_REGISTRATIONS));
        let purged = store.clone();
        let timer = PurgeTimer::start(fields::STORE_REGISTRATIONS, purge_interval, move |now| {
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

    /// Creates, replaces or removes a registration and returns its id.
    ///
    /// * zero duration with an id: the registration is removed.
    /// * known id: patterns, providers and expiry are replaced under the same id.
    /// * no id or unknown id: a registration is created under a new id. With a
    ///   zero duration it is stored already expired: the returned id is never
    ///   yielded by a provider lookup and the entry goes at the next purge.
    ///
    /// The id is written back into `request`. Nothing changes on error.
    pub fn update_registration_context(&self, request: &mut RegisterContext) -> Result<String> {
        let result = self.apply_registration(request);
        match &result {
            Ok(registration_id) => request.registration_id = Some(registration_id.clone()),
            Err(err) => debug!(
                event = events::REGISTRATION_UPDATE_FAILED,
                component = COMPONENT,
                entry_id = request.registration_id.as_deref().unwrap_or(fields::NONE),
                err = %err,
                "registration rejected"
            ),
        }
        result
    }

    fn apply_registration(&self, request: &RegisterContext) -> Result<String> {
        let ttl = match request.duration.as_deref() {
            Some(raw) => IsoDuration::parse(raw)?,
            None => self.default_duration.clone(),
        };

        let removal = request.registration_id.as_deref().filter(|_| ttl.is_zero());
        if let Some(registration_id) = removal {
            let removed = self.store.delete(registration_id);
            debug!(
                event = events::REGISTRATION_REMOVE_OK,
                component = COMPONENT,
                entry_id = registration_id,
                removed,
                "registration removed"
            );
            return Ok(registration_id.to_string());
        }

        let registration = Registration::new(request.clone())?;
        let upserted = self
            .store
            .upsert(request.registration_id.as_deref(), registration, &ttl)?;

        let (event, message) = match upserted {
            Upserted::Replaced(_) => (events::REGISTRATION_REPLACE_OK, "registration replaced"),
            Upserted::Inserted(_) => (events::REGISTRATION_CREATE_OK, "registration created"),
        };
        let stored = upserted.stored();
        debug!(
            event,
            component = COMPONENT,
            entry_id = stored.id(),
            expires_at = %stored.expires_at(),
            "{message}"
        );

        Ok(stored.id().to_string())
    }

    pub fn get_registration(&self, registration_id: &str) -> Option<Arc<Stored<Registration>>> {
        self.store.get(registration_id)
    }

    /// Lazily yields the provider URI of every live `ContextRegistration`
    /// able to serve `search` with `attributes`.
    pub fn find_providing_application(
        &self,
        search: &EntityId,
        attributes: &HashSet<String>,
    ) -> Result<impl Iterator<Item = String>> {
        debug!(
            event = events::PROVIDER_LOOKUP,
            component = COMPONENT,
            entity = %fields::format_entity(search),
            attributes = %fields::format_attributes(Some(attributes)),
            "searching providing applications"
        );

        let search = CompiledEntityId::compile(search)?;
        let required = attributes.clone();
        let matches = self
            .store
            .find_compiled(search.clone(), Some(required.clone()), Utc::now());

        Ok(matches.flat_map(move |stored| {
            stored
                .entry()
                .providing_applications(&search, Some(&required))
                .map(str::to_string)
                .collect::<Vec<_>>()
        }))
    }

    /// Drops every expired registration now, independently of the timer.
    pub fn purge_expired_registrations(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Stops the purge timer. Stored registrations stay readable.
    pub fn shutdown(&self) {
        self.timer.lock().stop();
    }
}
