//! Integration tests for patient endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_patient, get_request, json_request, post_heart_rate,
    raw_json_request, send, test_config,
};
use serde_json::json;

#[tokio::test]
async fn test_create_and_get_patient() {
    let (app, _store) = create_test_app(test_config());

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/patients",
            json!({ "name": "Ada Lovelace", "age": 36 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["age"], 36);
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, get_request(&format!("/api/patients/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_missing_patient() {
    let (app, _store) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        get_request(&format!("/api/patients/{}", uuid::Uuid::new_v4())),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Patient not found");

    let (status, _) = send(&app, get_request("/api/patients/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_patient_missing_fields() {
    let (app, _store) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/patients", json!({ "name": "No Age" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid patient data");
}

#[tokio::test]
async fn test_create_patient_malformed_json() {
    let (app, _store) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        raw_json_request(Method::POST, "/api/patients", "{not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid patient data");
}

#[tokio::test]
async fn test_create_patient_invalid_values() {
    let (app, _store) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/patients", json!({ "name": "", "age": -3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid patient data");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_patient() {
    let (app, _store) = create_test_app(test_config());
    let id = create_test_patient(&app, 40).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/patients/{}", id),
            json!({ "age": 41 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 41);
}

#[tokio::test]
async fn test_update_missing_patient_creates_nothing() {
    let (app, _store) = create_test_app(test_config());
    let missing = uuid::Uuid::new_v4();

    let (status, _) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/patients/{}", missing),
            json!({ "name": "Ghost" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get_request(&format!("/api/patients/{}", missing))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_vitals_without_readings() {
    let (app, _store) = create_test_app(test_config());
    let id = create_test_patient(&app, 35).await;

    let (status, body) = send(&app, get_request(&format!("/api/patients/{}/vitals", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unknown");
    assert_eq!(body["zones"]["danger"], "157+ BPM");
    assert!(body.get("alert").is_none());
}

#[tokio::test]
async fn test_vitals_with_critical_reading() {
    let (app, _store) = create_test_app(test_config());
    let id = create_test_patient(&app, 60).await;
    post_heart_rate(&app, &id, 150).await;

    let (status, body) = send(&app, get_request(&format!("/api/patients/{}/vitals", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "critical");
    assert_eq!(body["latestHeartRate"]["heartRate"], 150);
    assert!(body["alert"]["message"]
        .as_str()
        .unwrap()
        .contains("exceeded"));
}
