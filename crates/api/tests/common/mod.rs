//! Common test utilities for integration tests.
//!
//! Tests drive the router in-process against the in-memory store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use domain::models::{
    AccelerometerReading, CreatePatientRequest, GpsReading, HeartRateReading,
    NewAccelerometerReading, NewGpsReading, NewHeartRateReading, Patient, UpdatePatientRequest,
};
use fake::{faker::name::en::Name, Fake};
use persistence::{MemoryStore, StoreError, StoreResult, VitalsStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;
use vital_monitor_api::{
    app::create_app,
    config::{
        Config, DatabaseConfig, LimitsConfig, LoggingConfig, SecurityConfig, ServerConfig,
        StorageConfig, StreamConfig,
    },
};

/// Configuration for tests: in-memory storage, defaults elsewhere.
pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout_secs: 30,
        },
        database: DatabaseConfig::default(),
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig::default(),
        storage: StorageConfig::default(),
        stream: StreamConfig::default(),
        limits: LimitsConfig::default(),
    }
}

/// Create a test application router and the store behind it.
pub fn create_test_app(config: Config) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (create_app(config, store.clone()), store)
}

/// In-memory store that remembers the patients it created and can be
/// switched offline.
#[derive(Default)]
pub struct TestStore {
    inner: MemoryStore,
    created: Mutex<Vec<Uuid>>,
    offline: AtomicBool,
}

impl TestStore {
    pub fn created_patients(&self) -> Vec<Uuid> {
        self.created.lock().unwrap().clone()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl VitalsStore for TestStore {
    fn backend(&self) -> &'static str {
        self.inner.backend()
    }

    async fn ping(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.ping().await
    }

    async fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        self.inner.get_patient(id).await
    }

    async fn create_patient(&self, input: CreatePatientRequest) -> StoreResult<Patient> {
        let patient = self.inner.create_patient(input).await?;
        self.created.lock().unwrap().push(patient.id);
        Ok(patient)
    }

    async fn update_patient(
        &self,
        id: Uuid,
        update: UpdatePatientRequest,
    ) -> StoreResult<Option<Patient>> {
        self.inner.update_patient(id, update).await
    }

    async fn get_heart_rate_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<HeartRateReading>> {
        self.inner.get_heart_rate_readings(patient_id, limit).await
    }

    async fn create_heart_rate_reading(
        &self,
        input: NewHeartRateReading,
    ) -> StoreResult<HeartRateReading> {
        self.inner.create_heart_rate_reading(input).await
    }

    async fn get_gps_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<GpsReading>> {
        self.inner.get_gps_readings(patient_id, limit).await
    }

    async fn create_gps_reading(&self, input: NewGpsReading) -> StoreResult<GpsReading> {
        self.inner.create_gps_reading(input).await
    }

    async fn get_accelerometer_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<AccelerometerReading>> {
        self.inner.get_accelerometer_readings(patient_id, limit).await
    }

    async fn create_accelerometer_reading(
        &self,
        input: NewAccelerometerReading,
    ) -> StoreResult<AccelerometerReading> {
        self.inner.create_accelerometer_reading(input).await
    }
}

/// Create a test application backed by a [`TestStore`].
pub fn create_test_app_with_store(config: Config) -> (Router, Arc<TestStore>) {
    let store = Arc::new(TestStore::default());
    (create_app(config, store.clone()), store)
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a request with a raw, possibly malformed, JSON body.
pub fn raw_json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Send a request and return the status and parsed body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// A random patient name.
pub fn fake_name() -> String {
    Name().fake()
}

/// Create a patient via the API and return its id.
pub async fn create_test_patient(app: &Router, age: i32) -> String {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/patients",
            serde_json::json!({ "name": fake_name(), "age": age }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

/// Record a heart rate reading via the API.
pub async fn post_heart_rate(app: &Router, patient_id: &str, heart_rate: i32) -> serde_json::Value {
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            &format!("/api/patients/{}/heart-rate", patient_id),
            serde_json::json!({ "heartRate": heart_rate, "signalQuality": 90 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}
