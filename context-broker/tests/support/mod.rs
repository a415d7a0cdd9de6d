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

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use context_broker::{
    BrokerConfig, ContextBroker, IsoDuration, LocalRegistrations, NgsiClient, Subscriptions,
};
use std::sync::Arc;
use std::time::Duration;

pub const REMOTE_BROKER: &str = "http://remote-broker:8082";

// Long enough that the timer never interferes with a test.
const TEST_PURGE_INTERVAL: Duration = Duration::from_secs(3_600);

pub fn make_subscriptions() -> Subscriptions {
    integration_test_utils::init_logging();
    Subscriptions::new(default_duration(), TEST_PURGE_INTERVAL).expect("subscriptions should start")
}

pub fn make_registrations() -> LocalRegistrations {
    integration_test_utils::init_logging();
    LocalRegistrations::new(default_duration(), TEST_PURGE_INTERVAL)
        .expect("registrations should start")
}

pub fn make_broker(remote_broker: Option<&str>, client: Arc<dyn NgsiClient>) -> ContextBroker {
    integration_test_utils::init_logging();
    let config = BrokerConfig {
        remote_broker: remote_broker.map(str::to_string),
        purge_interval_ms: TEST_PURGE_INTERVAL.as_millis() as u64,
        ..BrokerConfig::default()
    };
    ContextBroker::new(&config, client).expect("broker should start")
}

fn default_duration() -> IsoDuration {
    IsoDuration::parse(context_broker::DEFAULT_DURATION).expect("default duration should parse")
}

pub fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}
