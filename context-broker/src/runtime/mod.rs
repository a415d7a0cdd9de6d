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

//! Runtime integration layer.
//!
//! Background maintenance (the purge timers) runs on dedicated OS threads that
//! host their own current-thread Tokio runtime, so stores can be built and
//! dropped from synchronous code as well as from inside an application runtime.

pub(crate) mod worker_runtime;
