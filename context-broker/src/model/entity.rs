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

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifies one entity, or a class of entities when `is_pattern` is set.
///
/// The `type` is always compared literally. When `is_pattern` is set, `id` is a
/// regular expression that must match a whole entity id.
///
/// ```
/// use context_broker::EntityId;
///
/// let room = EntityId::new("Room1", "Room", false);
/// let rooms = EntityId::pattern("Room.*", "Room");
///
/// assert!(!room.is_pattern);
/// assert!(rooms.is_pattern);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityId {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub is_pattern: bool,
}

impl EntityId {
    pub fn new(id: &str, type_: &str, is_pattern: bool) -> Self {
        Self {
            id: id.to_string(),
            type_: type_.to_string(),
            is_pattern,
        }
    }

    pub fn literal(id: &str, type_: &str) -> Self {
        Self::new(id, type_, false)
    }

    pub fn pattern(id: &str, type_: &str) -> Self {
        Self::new(id, type_, true)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_pattern {
            write!(f, "{}~/{}/", self.type_, self.id)
        } else {
            write!(f, "{}:{}", self.type_, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EntityId;

    #[test]
    fn entity_id_uses_ngsi_field_names() {
        let entity = EntityId::pattern("A|B", "string");
        let json = serde_json::to_value(&entity).expect("entity id should serialize");

        assert_eq!(json["id"], "A|B");
        assert_eq!(json["type"], "string");
        assert_eq!(json["isPattern"], true);
    }

    #[test]
    fn missing_is_pattern_defaults_to_literal() {
        let entity: EntityId = serde_json::from_str(r#"{"id":"Room1","type":"Room"}"#)
            .expect("entity id should deserialize");

        assert_eq!(entity, EntityId::literal("Room1", "Room"));
    }

    #[test]
    fn display_distinguishes_patterns() {
        assert_eq!(EntityId::literal("A", "T").to_string(), "T:A");
        assert_eq!(EntityId::pattern("A.*", "T").to_string(), "T~/A.*/");
    }
}
