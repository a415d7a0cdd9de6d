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

use crate::model::{EntityId, StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotifyConditionType {
    OnChange,
    OnTimeInterval,
    OnValue,
}

/// Notification trigger attached to a subscription. Not interpreted by the broker core.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyCondition {
    #[serde(rename = "type")]
    pub type_: NotifyConditionType,
    #[serde(default)]
    pub cond_value_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
}

impl NotifyCondition {
    pub fn on_change(cond_values: &[&str]) -> Self {
        Self {
            type_: NotifyConditionType::OnChange,
            cond_value_list: cond_values.iter().map(|value| value.to_string()).collect(),
            restriction: None,
        }
    }
}

/// Consumer request to be notified about entities and attributes.
///
/// `subscription_id` and `expiration_date` are written back by the broker once
/// the subscription is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeContext {
    pub entity_id_list: Vec<EntityId>,
    #[serde(default)]
    pub attribute_list: Vec<String>,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restriction: Option<String>,
    #[serde(default)]
    pub notify_conditions: Vec<NotifyCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl SubscribeContext {
    pub fn new(entity_id_list: Vec<EntityId>, reference: &str) -> Self {
        Self {
            entity_id_list,
            attribute_list: Vec::new(),
            reference: reference.to_string(),
            duration: None,
            restriction: None,
            notify_conditions: Vec::new(),
            throttling: None,
            subscription_id: None,
            expiration_date: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub subscription_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throttling: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeContextResponse {
    pub subscribe_response: SubscribeResponse,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeContext {
    pub subscription_id: String,
}

impl UnsubscribeContext {
    pub fn new(subscription_id: &str) -> Self {
        Self {
            subscription_id: subscription_id.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeContextResponse {
    pub subscription_id: String,
    pub status_code: StatusCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_context_round_trips_ngsi_json() {
        let json = r#"{
            "entityIdList": [{"id": "Room1", "type": "Room", "isPattern": false}],
            "attributeList": ["temperature"],
            "reference": "http://localhost:1028/accumulate",
            "duration": "P1M",
            "notifyConditions": [{"type": "ONCHANGE", "condValueList": ["temperature"]}]
        }"#;

        let subscribe: SubscribeContext =
            serde_json::from_str(json).expect("subscribe context should deserialize");

        assert_eq!(subscribe.entity_id_list[0].id, "Room1");
        assert_eq!(subscribe.duration.as_deref(), Some("P1M"));
        assert_eq!(
            subscribe.notify_conditions[0].type_,
            NotifyConditionType::OnChange
        );
        assert!(subscribe.subscription_id.is_none());
    }
}
