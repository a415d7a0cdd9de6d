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

//! Structured logging vocabulary.
//!
//! Every `tracing` call in this crate carries an `event` field naming one of the
//! constants in [`events`] and a `component` field naming the emitting module.
//! Value formatting for entity ids, attribute filters and thread names lives in
//! [`fields`] so the same value always renders the same way.
//!
//! The crate never installs a subscriber; binaries and tests pick their own.

pub mod events;
pub mod fields;
