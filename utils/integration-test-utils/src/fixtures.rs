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

use context_broker::{
    ContextAttribute, ContextElement, ContextRegistration, EntityId, NotifyCondition,
    QueryContext, RegisterContext, SubscribeContext, UpdateAction, UpdateContext,
};
use serde_json::json;
use std::collections::HashSet;

pub const DEFAULT_REFERENCE: &str = "http://localhost:1028/accumulate";

/// Subscription on one entity and one attribute, without a duration.
pub fn create_subscribe_context(
    id: &str,
    type_: &str,
    is_pattern: bool,
    reference: &str,
    attribute: &str,
) -> SubscribeContext {
    let mut subscribe_context =
        SubscribeContext::new(vec![EntityId::new(id, type_, is_pattern)], reference);
    subscribe_context.attribute_list = vec![attribute.to_string()];
    subscribe_context
}

/// One month subscription on `Room1` temperature changes.
pub fn create_subscribe_context_temperature() -> SubscribeContext {
    let mut subscribe_context =
        create_subscribe_context("Room1", "Room", false, DEFAULT_REFERENCE, "temperature");
    subscribe_context.duration = Some("P1M".to_string());
    subscribe_context.notify_conditions = vec![NotifyCondition::on_change(&["temperature"])];
    subscribe_context
}

/// Registration of `provider` for one entity and the given attributes.
pub fn create_register_context(
    id: &str,
    type_: &str,
    is_pattern: bool,
    provider: &str,
    attributes: &[&str],
) -> RegisterContext {
    RegisterContext::new(vec![ContextRegistration::new(
        vec![EntityId::new(id, type_, is_pattern)],
        provider,
    )
    .with_attributes(attributes)])
}

/// Update of one literal entity with a float value per attribute.
pub fn create_update_context(id: &str, type_: &str, attributes: &[&str]) -> UpdateContext {
    let context_attributes = attributes
        .iter()
        .enumerate()
        .map(|(index, name)| ContextAttribute::new(name, "float", json!(20.0 + index as f64)))
        .collect();

    UpdateContext::new(
        UpdateAction::Update,
        vec![ContextElement::new(
            EntityId::literal(id, type_),
            context_attributes,
        )],
    )
}

/// Temperature update of `Room1`.
pub fn create_update_context_temperature(value: f64) -> UpdateContext {
    UpdateContext::new(
        UpdateAction::Update,
        vec![ContextElement::new(
            EntityId::literal("Room1", "Room"),
            vec![ContextAttribute::new("temperature", "float", json!(value))],
        )],
    )
}

pub fn create_query_context(
    id: &str,
    type_: &str,
    is_pattern: bool,
    attributes: &[&str],
) -> QueryContext {
    QueryContext::new(vec![EntityId::new(id, type_, is_pattern)], attributes)
}

pub fn names(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
