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

//! Periodic purge driver, one per store.

use crate::error::{BrokerError, Result};
use crate::observability::events;
use crate::runtime::worker_runtime::spawn_maintenance_loop;
use chrono::{DateTime, Utc};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

const COMPONENT: &str = "purge_timer";
const THREAD_NAME_PREFIX: &str = "context-broker-purge";

/// Calls a purge function at a fixed interval until stopped or dropped.
///
/// Visibility of expired entries never depends on this timer; it only bounds how
/// long they stay in memory.
pub struct PurgeTimer {
    store: &'static str,
    shutdown: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl PurgeTimer {
    pub(crate) fn start<F>(store: &'static str, interval: Duration, purge: F) -> Result<Self>
    where
        F: Fn(DateTime<Utc>) -> usize + Send + 'static,
    {
        if interval.is_zero() {
            return Err(BrokerError::Config(format!(
                "purge interval of the {store} store must be positive"
            )));
        }

        let (shutdown, shutdown_rx) = watch::channel(false);
        let thread_name = format!("{THREAD_NAME_PREFIX}-{store}");
        let handle = spawn_maintenance_loop(&thread_name, shutdown_rx, move |shutdown_rx| {
            purge_loop(interval, purge, shutdown_rx)
        })?;

        info!(
            event = events::PURGE_TIMER_START,
            component = COMPONENT,
            store,
            interval_ms = interval.as_millis() as u64,
            "purge timer started"
        );

        Ok(Self {
            store,
            shutdown,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Signals the timer thread and waits for it to exit. Idempotent.
    pub fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        // The loop may already be gone; there is nobody left to notify then.
        let _ = self.shutdown.send(true);

        if handle.join().is_err() {
            warn!(
                event = events::PURGE_TIMER_JOIN_FAILED,
                component = COMPONENT,
                store = self.store,
                "purge timer thread panicked"
            );
            return;
        }

        info!(
            event = events::PURGE_TIMER_STOP,
            component = COMPONENT,
            store = self.store,
            "purge timer stopped"
        );
    }
}

impl Drop for PurgeTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn purge_loop<F>(interval: Duration, purge: F, mut shutdown: watch::Receiver<bool>)
where
    F: Fn(DateTime<Utc>) -> usize,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; nothing can have expired yet.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                purge(Utc::now());
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}
