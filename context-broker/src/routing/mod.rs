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

//! Request routing between local providers, the remote broker and local answers.
//!
//! The outbound HTTP side is abstracted behind [`NgsiClient`] so the transport
//! layer decides how requests travel and how long they may take.

mod context_router;
mod ngsi_client;

pub use context_router::{ContextRouter, ForwardOutcome};
pub use ngsi_client::{ForwardError, NgsiClient};
