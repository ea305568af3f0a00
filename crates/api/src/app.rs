use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use persistence::VitalsStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{accelerometer, gps, health, heart_rate, patients, stream};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VitalsStore>,
    pub config: Arc<Config>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.security.cors_origins;
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_app(config: Config, store: Arc<dyn VitalsStore>) -> Router {
    let config = Arc::new(config);
    let state = AppState {
        store,
        config: config.clone(),
    };

    let api_routes = Router::new()
        .route("/api/patients", post(patients::create_patient))
        .route(
            "/api/patients/:id",
            get(patients::get_patient).patch(patients::update_patient),
        )
        .route("/api/patients/:id/vitals", get(patients::get_patient_vitals))
        .route(
            "/api/patients/:id/heart-rate",
            get(heart_rate::list_heart_rate_readings).post(heart_rate::create_heart_rate_reading),
        )
        .route(
            "/api/patients/:id/heart-rate/latest",
            get(heart_rate::latest_heart_rate),
        )
        .route(
            "/api/patients/:id/heart-rate/history",
            get(heart_rate::heart_rate_history),
        )
        .route(
            "/api/patients/:id/heart-rate/summary",
            get(heart_rate::heart_rate_summary),
        )
        .route(
            "/api/patients/:id/gps",
            get(gps::list_gps_readings).post(gps::create_gps_reading),
        )
        .route("/api/patients/:id/gps/latest", get(gps::latest_gps))
        .route(
            "/api/patients/:id/accelerometer",
            get(accelerometer::list_accelerometer_readings)
                .post(accelerometer::create_accelerometer_reading),
        )
        .route(
            "/api/patients/:id/accelerometer/latest",
            get(accelerometer::latest_accelerometer),
        )
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // The socket outlives any request timeout, so it stays outside those layers.
    let stream_routes = Router::new().route(&config.stream.path, get(stream::stream_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(stream_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
