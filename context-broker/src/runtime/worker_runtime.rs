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

//! Runtime helper for spawning background maintenance loops.

use crate::error::Result;
use crate::observability::events;
use std::future::Future;
use std::thread;
use tokio::runtime::Builder;
use tokio::sync::watch;
use tracing::{debug, warn};

const COMPONENT: &str = "worker_runtime";

/// Runs `run_loop` to completion on a new thread named `thread_name`.
///
/// The runtime is built before the thread is spawned so that both failure modes
/// are reported to the caller instead of killing the thread.
pub(crate) fn spawn_maintenance_loop<F, Fut>(
    thread_name: &str,
    shutdown: watch::Receiver<bool>,
    run_loop: F,
) -> Result<thread::JoinHandle<()>>
where
    F: FnOnce(watch::Receiver<bool>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        thread = thread_name,
        "spawning maintenance runtime"
    );

    let spawned = Builder::new_current_thread()
        .enable_all()
        .build()
        .and_then(|runtime| {
            thread::Builder::new()
                .name(thread_name.to_string())
                .spawn(move || runtime.block_on(run_loop(shutdown)))
        });

    match spawned {
        Ok(handle) => {
            debug!(
                event = events::RUNTIME_SPAWN_OK,
                component = COMPONENT,
                thread = thread_name,
                "maintenance runtime spawned"
            );
            Ok(handle)
        }
        Err(err) => {
            warn!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                thread = thread_name,
                err = %err,
                "failed to spawn maintenance runtime"
            );
            Err(err.into())
        }
    }
}
