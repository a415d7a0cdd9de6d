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

use crate::model::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRegistrationAttribute {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default)]
    pub is_domain: bool,
}

impl ContextRegistrationAttribute {
    pub fn new(name: &str, type_: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            type_: type_.map(str::to_string),
            is_domain: false,
        }
    }
}

/// One provider declaration: the entities and attributes served by `providing_application`.
///
/// An empty attribute list means the provider serves every attribute of the entities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextRegistration {
    pub entity_id_list: Vec<EntityId>,
    #[serde(default)]
    pub context_registration_attribute_list: Vec<ContextRegistrationAttribute>,
    pub providing_application: String,
}

impl ContextRegistration {
    pub fn new(entity_id_list: Vec<EntityId>, providing_application: &str) -> Self {
        Self {
            entity_id_list,
            context_registration_attribute_list: Vec::new(),
            providing_application: providing_application.to_string(),
        }
    }

    pub fn with_attributes(mut self, names: &[&str]) -> Self {
        self.context_registration_attribute_list = names
            .iter()
            .map(|name| ContextRegistrationAttribute::new(name, None))
            .collect();
        self
    }
}

/// Provider request creating, replacing or removing a registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContext {
    pub context_registration_list: Vec<ContextRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
}

impl RegisterContext {
    pub fn new(context_registration_list: Vec<ContextRegistration>) -> Self {
        Self {
            context_registration_list,
            duration: None,
            registration_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContextResponse {
    pub registration_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}
