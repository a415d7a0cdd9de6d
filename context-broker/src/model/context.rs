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
use serde_json::Value;
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodeEnum {
    Code200,
    Code400,
    Code404,
    Code470,
    Code472,
    Code500,
}

impl CodeEnum {
    pub fn code(&self) -> &'static str {
        match self {
            CodeEnum::Code200 => "200",
            CodeEnum::Code400 => "400",
            CodeEnum::Code404 => "404",
            CodeEnum::Code470 => "470",
            CodeEnum::Code472 => "472",
            CodeEnum::Code500 => "500",
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self {
            CodeEnum::Code200 => "OK",
            CodeEnum::Code400 => "bad request",
            CodeEnum::Code404 => "context element not found",
            CodeEnum::Code470 => "subscription ID not found",
            CodeEnum::Code472 => "invalid parameter",
            CodeEnum::Code500 => "receiver internal error",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCode {
    pub code: String,
    pub reason_phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl StatusCode {
    pub fn with_details(code: CodeEnum, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::from(code)
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CodeEnum::Code200.code()
    }
}

impl From<CodeEnum> for StatusCode {
    fn from(code: CodeEnum) -> Self {
        Self {
            code: code.code().to_string(),
            reason_phrase: code.reason_phrase().to_string(),
            details: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMetadata {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextAttribute {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<ContextMetadata>,
}

impl ContextAttribute {
    pub fn new(name: &str, type_: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            type_: Some(type_.to_string()),
            value,
            metadata: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextElement {
    pub entity_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_domain_name: Option<String>,
    #[serde(default)]
    pub context_attribute_list: Vec<ContextAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_metadata_list: Vec<ContextMetadata>,
}

impl ContextElement {
    pub fn new(entity_id: EntityId, context_attribute_list: Vec<ContextAttribute>) -> Self {
        Self {
            entity_id,
            attribute_domain_name: None,
            context_attribute_list,
            context_metadata_list: Vec::new(),
        }
    }

    /// Names of the attributes carried by this element.
    pub fn attribute_names(&self) -> HashSet<String> {
        self.context_attribute_list
            .iter()
            .map(|attribute| attribute.name.clone())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextElementResponse {
    pub context_element: ContextElement,
    pub status_code: StatusCode,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateAction {
    #[default]
    Update,
    Append,
    Delete,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContext {
    pub context_elements: Vec<ContextElement>,
    #[serde(default)]
    pub update_action: UpdateAction,
}

impl UpdateContext {
    pub fn new(update_action: UpdateAction, context_elements: Vec<ContextElement>) -> Self {
        Self {
            context_elements,
            update_action,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContextResponse {
    #[serde(default)]
    pub context_element_responses: Vec<ContextElementResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<StatusCode>,
}

impl UpdateContextResponse {
    /// Acknowledges every element of `update` with the same status.
    pub fn acknowledging(update: &UpdateContext, code: CodeEnum) -> Self {
        let status_code = StatusCode::from(code);
        Self {
            context_element_responses: update
                .context_elements
                .iter()
                .map(|context_element| ContextElementResponse {
                    context_element: context_element.clone(),
                    status_code: status_code.clone(),
                })
                .collect(),
            error_code: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContext {
    pub entity_id_list: Vec<EntityId>,
    #[serde(default)]
    pub attribute_list: Vec<String>,
}

impl QueryContext {
    pub fn new(entity_id_list: Vec<EntityId>, attribute_list: &[&str]) -> Self {
        Self {
            entity_id_list,
            attribute_list: attribute_list.iter().map(|name| name.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryContextResponse {
    #[serde(default)]
    pub context_element_responses: Vec<ContextElementResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<StatusCode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temperature_element(id: &str) -> ContextElement {
        ContextElement::new(
            EntityId::literal(id, "Room"),
            vec![ContextAttribute::new("temperature", "float", json!(21.5))],
        )
    }

    #[test]
    fn acknowledging_keeps_element_order_and_status() {
        let update = UpdateContext::new(
            UpdateAction::Append,
            vec![temperature_element("Room1"), temperature_element("Room2")],
        );

        let response = UpdateContextResponse::acknowledging(&update, CodeEnum::Code200);

        assert_eq!(response.context_element_responses.len(), 2);
        assert_eq!(
            response.context_element_responses[1].context_element.entity_id.id,
            "Room2"
        );
        assert!(response
            .context_element_responses
            .iter()
            .all(|element_response| element_response.status_code.is_ok()));
        assert!(response.error_code.is_none());
    }

    #[test]
    fn update_action_serializes_uppercase() {
        let update = UpdateContext::new(UpdateAction::Append, vec![]);
        let json = serde_json::to_value(&update).expect("update should serialize");

        assert_eq!(json["updateAction"], "APPEND");
    }

    #[test]
    fn attribute_names_collects_each_name_once() {
        let mut element = temperature_element("Room1");
        element
            .context_attribute_list
            .push(ContextAttribute::new("temperature", "float", json!(22.0)));
        element
            .context_attribute_list
            .push(ContextAttribute::new("pressure", "int", json!(1013)));

        let names = element.attribute_names();

        assert_eq!(names.len(), 2);
        assert!(names.contains("pressure"));
    }
}
