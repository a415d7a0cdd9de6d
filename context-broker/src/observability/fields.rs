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

//! Canonical structured field keys and value-format helpers.

use crate::model::EntityId;
use std::collections::HashSet;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const STORE: &str = "store";
pub const ENTRY_ID: &str = "entry_id";
pub const ENTITY: &str = "entity";
pub const ATTRIBUTES: &str = "attributes";
pub const URL: &str = "url";
pub const REMOVED: &str = "removed";
pub const REMAINING: &str = "remaining";
pub const INTERVAL_MS: &str = "interval_ms";
pub const THREAD: &str = "thread";
pub const ELEMENTS: &str = "elements";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const STORE_SUBSCRIPTIONS: &str = "subscriptions";
pub const STORE_REGISTRATIONS: &str = "registrations";
pub const REASON_NO_CONTEXT_ELEMENTS: &str = "no_context_elements";
pub const REASON_OBSERVER_CLOSED: &str = "observer_closed";

pub fn format_entity(entity: &EntityId) -> String {
    entity.to_string()
}

/// Renders an attribute filter as a sorted, comma separated list.
pub fn format_attributes(attributes: Option<&HashSet<String>>) -> String {
    match attributes {
        Some(attributes) if !attributes.is_empty() => {
            let mut names: Vec<&str> = attributes.iter().map(String::as_str).collect();
            names.sort_unstable();
            names.join(",")
        }
        _ => NONE.to_string(),
    }
}
