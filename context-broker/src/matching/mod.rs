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

//! Pure matching rules shared by the subscription and registration stores.
//!
//! Entity types compare literally; entity ids compare literally or, when one side
//! is a pattern, as a whole-string regular expression match. Attribute filters
//! require the held attribute set to be a superset of the requested one.

mod entity_matcher;

pub use entity_matcher::{attributes_satisfy, entity_matches, CompiledEntityId};
