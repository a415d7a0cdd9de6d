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

//! Generic in-memory store of expiring entries.

use crate::error::Result;
use crate::expiration::IsoDuration;
use crate::matching::CompiledEntityId;
use crate::model::EntityId;
use crate::observability::events;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const COMPONENT: &str = "entry_store";

/// Behaviour an entry needs to be searchable in an [`EntryStore`].
///
/// Entries are validated when they are built, so every pattern they hold has
/// already been compiled by the time they reach a store.
pub trait StoreEntry: Send + Sync + 'static {
    /// `true` when at least one entity id of the entry matches `search` and the
    /// entry's attributes satisfy `required`.
    fn matches(&self, search: &CompiledEntityId, required: Option<&HashSet<String>>) -> bool;
}

/// An entry as held by a store: the entry plus its id and expiry.
#[derive(Debug)]
pub struct Stored<E> {
    id: String,
    expires_at: DateTime<Utc>,
    entry: E,
}

impl<E> Stored<E> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn entry(&self) -> &E {
        &self.entry
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Keyed collection of expiring entries.
///
/// Reads share the lock; writers hold it only for the map operation itself.
/// [`EntryStore::find`] copies the candidate list under the read lock and
/// filters it afterwards, so a caller can consume matches at its own pace.
pub struct EntryStore<E> {
    name: &'static str,
    entries: RwLock<HashMap<String, Arc<Stored<E>>>>,
}

impl<E: StoreEntry> EntryStore<E> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parses `ttl` and stores `entry` under a fresh id.
    ///
    /// Nothing is stored when the duration is negative or malformed.
    pub fn insert(&self, entry: E, ttl: &str) -> Result<Arc<Stored<E>>> {
        let ttl = IsoDuration::parse(ttl)?;
        self.insert_for(entry, &ttl)
    }

    pub fn insert_for(&self, entry: E, ttl: &IsoDuration) -> Result<Arc<Stored<E>>> {
        let expires_at = ttl.expiry_from(Utc::now())?;

        let mut entries = self.entries.write();
        let stored = Self::insert_fresh(&mut entries, entry, expires_at);
        drop(entries);

        debug!(
            event = events::STORE_INSERT_OK,
            component = COMPONENT,
            store = self.name,
            entry_id = stored.id(),
            expires_at = %stored.expires_at(),
            "entry stored"
        );

        Ok(stored)
    }

    /// Replaces the entry stored under `id`, keeping the id, or stores `entry`
    /// under a fresh id when `id` is absent or unknown. Runs under one write lock.
    pub fn upsert(&self, id: Option<&str>, entry: E, ttl: &IsoDuration) -> Result<Upserted<E>> {
        let expires_at = ttl.expiry_from(Utc::now())?;

        let mut entries = self.entries.write();
        if let Some(slot) = id.and_then(|id| entries.get_mut(id)) {
            let stored = Arc::new(Stored {
                id: slot.id.clone(),
                expires_at,
                entry,
            });
            *slot = stored.clone();
            return Ok(Upserted::Replaced(stored));
        }

        Ok(Upserted::Inserted(Self::insert_fresh(
            &mut entries,
            entry,
            expires_at,
        )))
    }

    fn insert_fresh(
        entries: &mut HashMap<String, Arc<Stored<E>>>,
        entry: E,
        expires_at: DateTime<Utc>,
    ) -> Arc<Stored<E>> {
        let id = loop {
            let candidate = Uuid::new_v4().to_string();
            if !entries.contains_key(&candidate) {
                break candidate;
            }
        };

        let stored = Arc::new(Stored {
            id: id.clone(),
            expires_at,
            entry,
        });
        entries.insert(id, stored.clone());
        stored
    }

    /// Returns the entry stored under `id`, expired or not, until it is purged.
    pub fn get(&self, id: &str) -> Option<Arc<Stored<E>>> {
        self.entries.read().get(id).cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Arc<Stored<E>>> {
        self.entries.write().remove(id)
    }

    /// `true` when an entry existed under `id` and was removed.
    pub fn delete(&self, id: &str) -> bool {
        self.remove(id).is_some()
    }

    /// Removes every entry with `expires_at <= now` and returns how many went.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, stored| !stored.is_expired(now));
        let remaining = entries.len();
        drop(entries);

        let removed = before - remaining;
        if removed > 0 {
            info!(
                event = events::STORE_PURGE_OK,
                component = COMPONENT,
                store = self.name,
                removed,
                remaining,
                "expired entries purged"
            );
        }

        removed
    }

    /// Lazily yields the entries alive at `now` that match `search` and `required`.
    ///
    /// Fails with [`crate::BrokerError::BadPattern`] when `search` is an invalid pattern.
    pub fn find(
        &self,
        search: &EntityId,
        required: Option<&HashSet<String>>,
        now: DateTime<Utc>,
    ) -> Result<Matches<E>> {
        let search = CompiledEntityId::compile(search)?;
        Ok(self.find_compiled(search, required.cloned(), now))
    }

    pub fn find_compiled(
        &self,
        search: CompiledEntityId,
        required: Option<HashSet<String>>,
        now: DateTime<Utc>,
    ) -> Matches<E> {
        let snapshot: Vec<Arc<Stored<E>>> = self.entries.read().values().cloned().collect();

        Matches {
            candidates: snapshot.into_iter(),
            search,
            required,
            now,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Result of [`EntryStore::upsert`].
#[derive(Debug)]
pub enum Upserted<E> {
    Replaced(Arc<Stored<E>>),
    Inserted(Arc<Stored<E>>),
}

impl<E> Upserted<E> {
    pub fn stored(&self) -> &Arc<Stored<E>> {
        match self {
            Upserted::Replaced(stored) | Upserted::Inserted(stored) => stored,
        }
    }
}

/// One-shot iterator over the matches of a [`EntryStore::find`] call.
///
/// Candidates are the entries present when `find` was called; expiry and the
/// match rule are evaluated as the iterator is pulled.
pub struct Matches<E> {
    candidates: std::vec::IntoIter<Arc<Stored<E>>>,
    search: CompiledEntityId,
    required: Option<HashSet<String>>,
    now: DateTime<Utc>,
}

impl<E: StoreEntry> Iterator for Matches<E> {
    type Item = Arc<Stored<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        let now = self.now;
        let search = &self.search;
        let required = self.required.as_ref();

        self.candidates
            .by_ref()
            .find(|stored| !stored.is_expired(now) && stored.entry.matches(search, required))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.candidates.size_hint().1)
    }
}
