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

//! Canonical structured event names used across `context-broker`.

// Subscription store events.
pub const SUBSCRIPTION_ADD_OK: &str = "subscription_add_ok";
pub const SUBSCRIPTION_ADD_FAILED: &str = "subscription_add_failed";
pub const SUBSCRIPTION_DELETE_OK: &str = "subscription_delete_ok";
pub const SUBSCRIPTION_DELETE_MISSING: &str = "subscription_delete_missing";
pub const SUBSCRIPTION_FIND: &str = "subscription_find";

// Registration store events.
pub const REGISTRATION_CREATE_OK: &str = "registration_create_ok";
pub const REGISTRATION_REPLACE_OK: &str = "registration_replace_ok";
pub const REGISTRATION_REMOVE_OK: &str = "registration_remove_ok";
pub const REGISTRATION_UPDATE_FAILED: &str = "registration_update_failed";
pub const PROVIDER_LOOKUP: &str = "provider_lookup";

// Expiration events.
pub const STORE_INSERT_OK: &str = "store_insert_ok";
pub const STORE_PURGE_OK: &str = "store_purge_ok";
pub const PURGE_TIMER_START: &str = "purge_timer_start";
pub const PURGE_TIMER_STOP: &str = "purge_timer_stop";
pub const PURGE_TIMER_JOIN_FAILED: &str = "purge_timer_join_failed";

// Runtime events.
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";

// Routing events.
pub const ROUTE_UPDATE_START: &str = "route_update_start";
pub const ROUTE_QUERY_START: &str = "route_query_start";
pub const ROUTE_REGISTER_START: &str = "route_register_start";
pub const ROUTE_PROVIDER_FOUND: &str = "route_provider_found";
pub const FORWARD_SEND_ATTEMPT: &str = "forward_send_attempt";
pub const FORWARD_SEND_OK: &str = "forward_send_ok";
pub const FORWARD_SEND_FAILED: &str = "forward_send_failed";
pub const FORWARD_DETACHED: &str = "forward_detached";
pub const FORWARD_NO_REMOTE_BROKER: &str = "forward_no_remote_broker";
pub const FORWARD_OUTCOME_DROPPED: &str = "forward_outcome_dropped";

// Broker lifecycle events.
pub const BROKER_START: &str = "broker_start";
pub const BROKER_SHUTDOWN: &str = "broker_shutdown";
pub const CONFIG_LOAD_OK: &str = "config_load_ok";
