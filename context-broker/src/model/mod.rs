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

//! NGSI message shapes seen at the broker boundary.
//!
//! Field names serialize in camelCase so the transport layer can (de)serialize
//! requests and responses without an intermediate representation.

mod context;
mod entity;
mod registration;
mod subscription;

pub use context::{
    CodeEnum, ContextAttribute, ContextElement, ContextElementResponse, ContextMetadata,
    QueryContext, QueryContextResponse, StatusCode, UpdateAction, UpdateContext,
    UpdateContextResponse,
};
pub use entity::EntityId;
pub use registration::{
    ContextRegistration, ContextRegistrationAttribute, RegisterContext, RegisterContextResponse,
};
pub use subscription::{
    NotifyCondition, NotifyConditionType, SubscribeContext, SubscribeContextResponse,
    SubscribeResponse, UnsubscribeContext, UnsubscribeContextResponse,
};
