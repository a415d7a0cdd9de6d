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

//! Entity-id and attribute matching rules.

use crate::error::{BrokerError, Result};
use crate::model::EntityId;
use regex::Regex;
use std::collections::HashSet;

/// Compiles `raw` so that it only matches whole entity ids.
pub(crate) fn compile_pattern(raw: &str) -> Result<Regex> {
    // Validate the raw text first: wrapping can turn an unbalanced pattern into a valid one.
    Regex::new(raw).map_err(|err| BrokerError::BadPattern {
        raw: raw.to_string(),
        reason: err.to_string(),
    })?;

    Regex::new(&format!("^(?:{raw})$")).map_err(|err| BrokerError::BadPattern {
        raw: raw.to_string(),
        reason: err.to_string(),
    })
}

/// An [`EntityId`] whose pattern, if any, has already been compiled.
#[derive(Clone, Debug)]
pub struct CompiledEntityId {
    entity: EntityId,
    regex: Option<Regex>,
}

impl CompiledEntityId {
    /// Fails with [`BrokerError::BadPattern`] when a pattern id is not a valid regex.
    pub fn compile(entity: &EntityId) -> Result<Self> {
        let regex = if entity.is_pattern {
            Some(compile_pattern(&entity.id)?)
        } else {
            None
        };

        Ok(Self {
            entity: entity.clone(),
            regex,
        })
    }

    pub fn compile_all(entities: &[EntityId]) -> Result<Vec<Self>> {
        entities.iter().map(Self::compile).collect()
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// Applies the matching rule with `self` as the searched side.
    ///
    /// Types compare literally. When both sides are patterns, the id of `other`
    /// is tested as a literal string against the pattern of `self`.
    pub fn matches(&self, other: &CompiledEntityId) -> bool {
        if self.entity.type_ != other.entity.type_ {
            return false;
        }

        if let Some(regex) = &self.regex {
            return regex.is_match(&other.entity.id);
        }

        if let Some(regex) = &other.regex {
            return regex.is_match(&self.entity.id);
        }

        self.entity.id == other.entity.id
    }
}

/// Returns `true` when `a` matches `b`.
///
/// Patterns that do not compile never match; stores reject them at insert time.
///
/// ```
/// use context_broker::{entity_matches, EntityId};
///
/// let search = EntityId::pattern("A|B", "string");
///
/// assert!(entity_matches(&search, &EntityId::literal("A", "string")));
/// assert!(!entity_matches(&search, &EntityId::literal("C", "string")));
/// assert!(!entity_matches(&search, &EntityId::literal("A", "other")));
/// ```
pub fn entity_matches(a: &EntityId, b: &EntityId) -> bool {
    match (CompiledEntityId::compile(a), CompiledEntityId::compile(b)) {
        (Ok(a), Ok(b)) => a.matches(&b),
        _ => false,
    }
}

/// Returns `true` when `held` contains every attribute of `required`.
///
/// An absent or empty requirement is satisfied by any attribute set.
pub fn attributes_satisfy(required: Option<&HashSet<String>>, held: &HashSet<String>) -> bool {
    match required {
        None => true,
        Some(required) => required.is_empty() || held.is_superset(required),
    }
}
