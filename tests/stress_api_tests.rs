// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stress entry and statistics endpoint tests.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn log_entry(app: &axum::Router, token: &str, entry: Value) -> Value {
    let response = app
        .clone()
        .oneshot(common::authed_request("POST", "/api/stress", token, Some(entry)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await
}

async fn get_json(app: &axum::Router, token: &str, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(common::authed_request("GET", uri, token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    common::body_json(response).await
}

#[tokio::test]
async fn test_create_and_list_entries() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    let saved = log_entry(
        &app,
        &token,
        json!({
            "stressLevel": 7,
            "stressSource": "Work",
            "symptoms": "headache",
            "timestamp": "2024-03-10T09:15:00Z"
        }),
    )
    .await;

    let id = saved["_id"].as_str().unwrap();
    assert!(id.starts_with("stress_"));
    assert_eq!(saved["userId"], "user_alice00");
    assert_eq!(saved["timestamp"], "2024-03-10T09:15:00.000Z");
    assert_eq!(saved["location"], "");

    let list = get_json(&app, &token, "/api/stress").await;
    assert_eq!(list["total"], 1);
    assert_eq!(list["entries"][0]["_id"], id);
}

#[tokio::test]
async fn test_entries_are_scoped_to_user() {
    let (app, state) = common::create_test_app();
    let alice = common::create_test_jwt(&state, "user_alice00");
    let bob = common::create_test_jwt(&state, "user_bob0000");

    log_entry(&app, &alice, json!({ "stressLevel": 4, "stressSource": "Work" })).await;
    log_entry(&app, &alice, json!({ "stressLevel": 6, "stressSource": "Family" })).await;
    log_entry(&app, &bob, json!({ "stressLevel": 9, "stressSource": "Exams" })).await;

    assert_eq!(get_json(&app, &alice, "/api/stress").await["total"], 2);
    assert_eq!(get_json(&app, &bob, "/api/stress").await["total"], 1);
}

#[tokio::test]
async fn test_create_rejects_out_of_range_level() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    for level in [0, 11] {
        let response = app
            .clone()
            .oneshot(common::authed_request(
                "POST",
                "/api/stress",
                &token,
                Some(json!({ "stressLevel": level, "stressSource": "Work" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "level {level}");
    }

    assert_eq!(get_json(&app, &token, "/api/stress").await["total"], 0);
}

#[tokio::test]
async fn test_create_rejects_overlong_text() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    let response = app
        .oneshot(common::authed_request(
            "POST",
            "/api/stress",
            &token,
            Some(json!({ "stressLevel": 5, "symptoms": "x".repeat(501) })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_summary_without_entries() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    let summary = get_json(&app, &token, "/api/stats/summary").await;
    assert_eq!(summary["average_stress"], 0.0);
    assert_eq!(summary["total_entries"], 0);
    assert_eq!(summary["category"], "low");
}

#[tokio::test]
async fn test_summary_rounds_average() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    for level in [7, 8, 8] {
        log_entry(&app, &token, json!({ "stressLevel": level })).await;
    }

    let summary = get_json(&app, &token, "/api/stats/summary").await;
    // 23 / 3 = 7.666...
    assert_eq!(summary["average_stress"], 7.7);
    assert_eq!(summary["total_entries"], 3);
    assert_eq!(summary["category"], "high");
    assert_eq!(summary["tips"][0], "Try deep breathing exercises");
}

#[tokio::test]
async fn test_sources_trimmed_counted_and_limited() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    for source in ["Work", " Work ", "Family", "", "  ", "Health", "Family", "Work"] {
        log_entry(&app, &token, json!({ "stressLevel": 5, "stressSource": source })).await;
    }

    let body = get_json(&app, &token, "/api/stats/sources").await;
    assert_eq!(
        body["sources"],
        json!([
            { "source": "Work", "count": 3 },
            { "source": "Family", "count": 2 },
            { "source": "Health", "count": 1 },
        ])
    );

    let body = get_json(&app, &token, "/api/stats/sources?limit=1").await;
    assert_eq!(body["sources"], json!([{ "source": "Work", "count": 3 }]));
}

#[tokio::test]
async fn test_timeline_in_entry_order() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    log_entry(
        &app,
        &token,
        json!({ "stressLevel": 3, "activity": "Reading", "timestamp": "2024-03-02T08:00:00Z" }),
    )
    .await;
    log_entry(
        &app,
        &token,
        json!({ "stressLevel": 8, "activity": "Commute", "timestamp": "2024-03-01T18:30:00Z" }),
    )
    .await;

    let body = get_json(&app, &token, "/api/stats/timeline").await;
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["stress_level"], 3);
    assert_eq!(points[1]["activity"], "Commute");
    assert_eq!(points[1]["timestamp"], "2024-03-01T18:30:00.000Z");
}

#[tokio::test]
async fn test_calendar_uses_local_days() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    // 02:00 UTC on March 2 is still March 1 at UTC-5
    log_entry(
        &app,
        &token,
        json!({ "stressLevel": 4, "timestamp": "2024-03-02T02:00:00Z" }),
    )
    .await;
    log_entry(
        &app,
        &token,
        json!({ "stressLevel": 9, "timestamp": "2024-03-01T15:00:00Z" }),
    )
    .await;

    let body = get_json(
        &app,
        &token,
        "/api/stats/calendar?year=2024&month=3&tz_offset_minutes=-300",
    )
    .await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 3);

    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[0]["date"], "2024-03-01");
    assert_eq!(days[0]["average"], 6.5);
    assert_eq!(days[0]["category"], "moderate");
    assert_eq!(days[1]["average"], Value::Null);
    assert_eq!(days[1]["category"], Value::Null);

    let utc = get_json(&app, &token, "/api/stats/calendar?year=2024&month=3").await;
    let days = utc["days"].as_array().unwrap();
    assert_eq!(days[0]["average"], 9.0);
    assert_eq!(days[1]["average"], 4.0);
}

#[tokio::test]
async fn test_calendar_rejects_bad_month() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    let response = app
        .oneshot(common::authed_request(
            "GET",
            "/api/stats/calendar?year=2024&month=13",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_follow_average() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt(&state, "user_alice00");

    // No entries yet: treated as moderate
    let body = get_json(&app, &token, "/api/recommendations?category=music").await;
    assert_eq!(body["average_stress"], 0.0);
    assert_eq!(body["stress_category"], "moderate");
    assert_eq!(body["items"][0]["title"], "Nature Sounds");

    log_entry(&app, &token, json!({ "stressLevel": 9 })).await;

    let body = get_json(&app, &token, "/api/recommendations").await;
    assert_eq!(body["stress_category"], "high");
    let titles: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Calming Classical Music"));
    assert!(titles.contains(&"3-Minute Breathing Space"));
    assert!(!titles.contains(&"Nature Sounds"));
}
