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

//! Shared fixtures, scripted NGSI clients and logging setup for broker tests.

mod fixtures;
pub use fixtures::{
    create_query_context, create_register_context, create_subscribe_context,
    create_subscribe_context_temperature, create_update_context, create_update_context_temperature,
    names, DEFAULT_REFERENCE,
};

mod logging;
pub use logging::init_logging;

mod scripted_ngsi_client;
pub use scripted_ngsi_client::{ForwardCall, ForwardKind, ScriptedNgsiClient};
