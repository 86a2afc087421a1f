// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage behavior through the repository and HTTP layers: concurrent
//! writers, on-disk persistence, offline mode and unreadable data.

use axum::http::StatusCode;
use chrono::Utc;
use mindease_tracker::db::{collections, Storage};
use mindease_tracker::error::AppError;
use mindease_tracker::middleware::auth::AuthUser;
use mindease_tracker::models::NewStressEntry;
use mindease_tracker::services::{StoredSession, StressRepository, UserService};
use serde_json::json;
use std::collections::HashSet;
use std::thread;
use tower::ServiceExt;

mod common;

const NUM_CONCURRENT_WRITERS: usize = 8;
const ENTRIES_PER_WRITER: usize = 10;

fn session(user_id: &str) -> AuthUser {
    AuthUser {
        user_id: user_id.to_string(),
    }
}

#[test]
fn test_concurrent_inserts_do_not_lose_entries() {
    // Each insert rewrites the whole collection, so unsynchronized writers
    // would drop each other's entries.
    let repo = StressRepository::new(Storage::in_memory());

    let handles: Vec<_> = (0..NUM_CONCURRENT_WRITERS)
        .map(|writer| {
            let repo = repo.clone();
            thread::spawn(move || {
                let user = session(&format!("user_writer{writer}"));
                for level in (1..=10u8).cycle().take(ENTRIES_PER_WRITER) {
                    repo.save(&user, NewStressEntry::new(Utc::now(), level, "Work"))
                        .expect("save should succeed")
                        .expect("session present");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    for writer in 0..NUM_CONCURRENT_WRITERS {
        let entries = repo
            .load_for_user(&format!("user_writer{writer}"))
            .unwrap();
        assert_eq!(entries.len(), ENTRIES_PER_WRITER);
    }
}

#[test]
fn test_concurrent_registration_creates_one_account() {
    let users = UserService::new(Storage::in_memory());

    let handles: Vec<_> = (0..NUM_CONCURRENT_WRITERS)
        .map(|_| {
            let users = users.clone();
            thread::spawn(move || users.register("race@example.com", "Racer"))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("register thread panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|err| matches!(err, AppError::Conflict(_))));
}

#[test]
fn test_concurrent_first_logins_share_one_account() {
    let users = UserService::new(Storage::in_memory());

    let handles: Vec<_> = (0..NUM_CONCURRENT_WRITERS)
        .map(|_| {
            let users = users.clone();
            thread::spawn(move || users.login("first@example.com").expect("login should succeed"))
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .map(|handle| handle.join().expect("login thread panicked").id)
        .collect();
    assert_eq!(ids.len(), 1);
}

#[test]
fn test_file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let saved = {
        let repo = StressRepository::new(Storage::open_dir(dir.path()).unwrap());
        repo.save(&session("user_disk000"), NewStressEntry::new(Utc::now(), 6, "Commute"))
            .unwrap()
            .unwrap()
    };

    assert!(dir.path().join("stress_data.json").exists());

    let repo = StressRepository::new(Storage::open_dir(dir.path()).unwrap());
    let entries = repo.load_for_user("user_disk000").unwrap();
    assert_eq!(entries, vec![saved]);
}

#[test]
fn test_stored_session_scopes_repository() {
    let storage = Storage::in_memory();
    let repo = StressRepository::new(storage.clone());
    let users = UserService::new(storage.clone());
    let current = StoredSession::new(storage.clone());

    // Logged out: nothing saved, nothing read
    assert!(repo
        .save(&current, NewStressEntry::new(Utc::now(), 5, "Work"))
        .unwrap()
        .is_none());
    assert_eq!(repo.average_stress_level(&current).unwrap(), 0.0);

    let user = users.login("pat@example.com").unwrap();
    current.login(&user).unwrap();
    repo.save(&current, NewStressEntry::new(Utc::now(), 4, "Work"))
        .unwrap()
        .unwrap();
    repo.save(&current, NewStressEntry::new(Utc::now(), 5, "work"))
        .unwrap()
        .unwrap();

    assert_eq!(repo.average_stress_level(&current).unwrap(), 4.5);
    let frequency = repo.stress_source_frequency(&current).unwrap();
    // Sources are case sensitive
    assert_eq!(frequency.get("Work"), Some(&1));
    assert_eq!(frequency.get("work"), Some(&1));

    current.logout().unwrap();
    assert!(repo.load_all(&current).unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_storage_accepts_but_keeps_nothing() {
    let (app, state) = common::create_test_app_with_storage(Storage::offline());
    let token = common::create_test_jwt(&state, "user_offline");

    let response = app
        .clone()
        .oneshot(common::authed_request(
            "POST",
            "/api/stress",
            &token,
            Some(json!({ "stressLevel": 5, "stressSource": "Work" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(common::authed_request("GET", "/api/stress", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["total"], 0);
}

#[tokio::test]
async fn test_corrupted_collection_is_reported_and_preserved() {
    let storage = Storage::in_memory();
    storage
        .set_item(collections::STRESS_DATA, "{not json")
        .unwrap();
    let (app, state) = common::create_test_app_with_storage(storage.clone());
    let token = common::create_test_jwt(&state, "user_alice00");

    let response = app
        .clone()
        .oneshot(common::authed_request("GET", "/api/stats/summary", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "storage_error");
    assert!(body.get("details").is_none());

    // A write must not replace the unreadable blob
    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/stress",
            &token,
            Some(json!({ "stressLevel": 5 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        storage.get_item(collections::STRESS_DATA).unwrap().as_deref(),
        Some("{not json")
    );
}
