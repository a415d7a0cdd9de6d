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

mod support;

use context_broker::{
    BrokerError, ContextRegistration, EntityId, LocalRegistrations, RegisterContext,
};
use integration_test_utils::{create_register_context, names};
use std::time::Duration;
use support::{make_registrations, sorted};

fn providers(
    registrations: &LocalRegistrations,
    search: &EntityId,
    attributes: &[&str],
) -> Vec<String> {
    sorted(
        registrations
            .find_providing_application(search, &names(attributes))
            .expect("lookup should run")
            .collect(),
    )
}

#[test]
fn register_then_find_provider() {
    let registrations = make_registrations();
    let mut request =
        create_register_context("Room1", "Room", false, "http://provider", &["temperature"]);

    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    assert!(!registration_id.is_empty());
    assert_eq!(
        providers(&registrations, &EntityId::literal("Room1", "Room"), &["temperature"]),
        vec!["http://provider"]
    );
    assert!(
        providers(&registrations, &EntityId::literal("Room1", "Room"), &["pressure"]).is_empty()
    );
    assert!(
        providers(&registrations, &EntityId::literal("Room2", "Room"), &["temperature"]).is_empty()
    );
}

#[test]
fn registration_without_attributes_serves_every_attribute() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://provider", &[]);
    registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    assert_eq!(
        providers(
            &registrations,
            &EntityId::literal("Room1", "Room"),
            &["temperature", "pressure"]
        ),
        vec!["http://provider"]
    );
}

#[test]
fn pattern_registration_serves_matching_literal_search() {
    let registrations = make_registrations();
    let mut request =
        create_register_context("Room.*", "Room", true, "http://rooms", &["temperature"]);
    registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    assert_eq!(
        providers(&registrations, &EntityId::literal("Room42", "Room"), &["temperature"]),
        vec!["http://rooms"]
    );
    assert!(
        providers(&registrations, &EntityId::literal("Kitchen", "Room"), &["temperature"])
            .is_empty()
    );
}

#[test]
fn every_matching_context_registration_is_returned() {
    let registrations = make_registrations();
    let mut request = RegisterContext::new(vec![
        ContextRegistration::new(vec![EntityId::literal("Room1", "Room")], "http://first")
            .with_attributes(&["temperature"]),
        ContextRegistration::new(vec![EntityId::pattern("Room.*", "Room")], "http://second"),
    ]);
    registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    assert_eq!(
        providers(&registrations, &EntityId::literal("Room1", "Room"), &["temperature"]),
        vec!["http://first", "http://second"]
    );
}

#[test]
fn known_id_replaces_the_registration() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://old", &[]);
    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    let mut replacement = create_register_context("Room1", "Room", false, "http://new", &[]);
    replacement.registration_id = Some(registration_id.clone());
    let replaced_id = registrations
        .update_registration_context(&mut replacement)
        .expect("replacement should be stored");

    assert_eq!(replaced_id, registration_id);
    assert_eq!(registrations.len(), 1);
    assert_eq!(
        providers(&registrations, &EntityId::literal("Room1", "Room"), &[]),
        vec!["http://new"]
    );
}

#[test]
fn unknown_id_creates_a_new_registration() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://provider", &[]);
    request.registration_id = Some("forgotten".to_string());

    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    assert_ne!(registration_id, "forgotten");
    assert_eq!(request.registration_id.as_deref(), Some(registration_id.as_str()));
    assert!(registrations.get_registration(&registration_id).is_some());
}

#[test]
fn zero_duration_removes_the_registration() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://provider", &[]);
    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    let mut removal = create_register_context("Room1", "Room", false, "http://provider", &[]);
    removal.registration_id = Some(registration_id.clone());
    removal.duration = Some("PT0S".to_string());
    let removed_id = registrations
        .update_registration_context(&mut removal)
        .expect("removal should succeed");

    assert_eq!(removed_id, registration_id);
    assert!(registrations.get_registration(&registration_id).is_none());
    assert!(providers(&registrations, &EntityId::literal("Room1", "Room"), &[]).is_empty());
}

#[test]
fn zero_duration_without_id_is_never_visible() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://provider", &[]);
    request.duration = Some("PT0S".to_string());

    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("zero duration is a legal duration");

    assert!(!registration_id.is_empty());
    assert!(providers(&registrations, &EntityId::literal("Room1", "Room"), &[]).is_empty());
    assert_eq!(registrations.purge_expired_registrations(), 1);
    assert!(registrations.get_registration(&registration_id).is_none());
}

#[test]
fn invalid_registrations_leave_the_store_unchanged() {
    let registrations = make_registrations();

    let mut negative = create_register_context("Room1", "Room", false, "http://provider", &[]);
    negative.duration = Some("-PT10S".to_string());
    let mut malformed = create_register_context("Room1", "Room", false, "http://provider", &[]);
    malformed.duration = Some("PIPO".to_string());
    let mut bad_pattern = create_register_context("]|,\\((", "Room", true, "http://provider", &[]);

    assert!(matches!(
        registrations.update_registration_context(&mut negative),
        Err(BrokerError::NegativeDuration { .. })
    ));
    assert!(matches!(
        registrations.update_registration_context(&mut malformed),
        Err(BrokerError::MalformedDuration { .. })
    ));
    assert!(matches!(
        registrations.update_registration_context(&mut bad_pattern),
        Err(BrokerError::BadPattern { .. })
    ));
    assert!(registrations.is_empty());
}

#[test]
fn expired_registrations_provide_nothing() {
    let registrations = make_registrations();
    let mut request = create_register_context("Room1", "Room", false, "http://provider", &[]);
    request.duration = Some("PT1S".to_string());
    let registration_id = registrations
        .update_registration_context(&mut request)
        .expect("registration should be stored");

    std::thread::sleep(Duration::from_millis(1_500));

    assert!(providers(&registrations, &EntityId::literal("Room1", "Room"), &[]).is_empty());
    assert_eq!(registrations.purge_expired_registrations(), 1);
    assert!(registrations.get_registration(&registration_id).is_none());
}
