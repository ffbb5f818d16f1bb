//! Router-level tests driven in-process with `oneshot`

use std::num::NonZeroUsize;
use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tempfile::tempdir;
use tower::ServiceExt;

use sensor_anomaly_service::{
    config::Config,
    create_router,
    logic::{ModelHandle, ScoringService},
    AppState,
};

const CAPACITY: usize = 150;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/forest.json")
}

fn app_with(model: ModelHandle) -> Router {
    app_with_config(model, Config::default())
}

fn app_with_config(model: ModelHandle, config: Config) -> Router {
    let service = ScoringService::new(
        "sensor-anomaly-service",
        model,
        NonZeroUsize::new(CAPACITY).unwrap(),
    );
    create_router(AppState::new(service, config))
}

fn loaded_app() -> Router {
    app_with(ModelHandle::load(fixture_path()).unwrap())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_score(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/score")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn reading(temperature_c: f64, humidity_pct: f64, sound_db: f64) -> Value {
    json!({
        "temperature_c": temperature_c,
        "humidity_pct": humidity_pct,
        "sound_db": sound_db
    })
}

#[tokio::test]
async fn test_status_without_artifact() {
    let dir = tempdir().unwrap();
    let model = ModelHandle::load(dir.path().join("model.json")).unwrap();
    let app = app_with(model);

    let (status, body) = send(&app, get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"service": "sensor-anomaly-service", "model_loaded": false}));
}

#[tokio::test]
async fn test_status_stays_loaded() {
    let app = loaded_app();

    let (_, before) = send(&app, get("/status")).await;
    assert_eq!(before["model_loaded"], true);

    send(&app, post_score(reading(21.0, 60.0, 50.0))).await;
    send(&app, post_score(reading(80.0, 10.0, 95.0))).await;

    let (_, after) = send(&app, get("/status")).await;
    assert_eq!(after["model_loaded"], true);
}

#[tokio::test]
async fn test_score_normal_reading() {
    let app = loaded_app();

    let (status, body) = send(&app, post_score(reading(21.0, 60.0, 50.0))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_anomaly"], false);
    assert_eq!(body["status"], "normal");
    assert!(body["anomaly_score"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_score_far_out_reading() {
    let app = loaded_app();

    let (status, body) = send(&app, post_score(reading(80.0, 10.0, 95.0))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_anomaly"], true);
    assert_eq!(body["status"], "anomaly");
    assert!(body["anomaly_score"].as_f64().unwrap() < 0.0);
}

#[tokio::test]
async fn test_score_without_model_is_503() {
    let app = app_with(ModelHandle::Unloaded);

    let (status, body) = send(&app, post_score(reading(21.0, 60.0, 50.0))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], 503);

    let (_, history) = send(&app, get("/recent_scores")).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let app = loaded_app();

    let (status, body) = send(&app, post_score(json!({"temperature_c": 21.0, "humidity_pct": 60.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, post_score(json!({"temperature_c": "hot", "humidity_pct": 60.0, "sound_db": 50.0}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let broken = Request::builder()
        .method("POST")
        .uri("/score")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&app, broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let untyped = Request::builder()
        .method("POST")
        .uri("/score")
        .body(Body::from(reading(21.0, 60.0, 50.0).to_string()))
        .unwrap();
    let (status, body) = send(&app, untyped).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["status"], 415);

    let (_, history) = send(&app, get("/recent_scores?limit=150")).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn test_recent_scores_rows() {
    let app = loaded_app();
    send(&app, post_score(reading(21.0, 60.0, 50.0))).await;
    send(&app, post_score(reading(80.0, 10.0, 95.0))).await;

    let (status, body) = send(&app, get("/recent_scores")).await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["temperature_c"], 21.0);
    assert_eq!(rows[0]["is_anomaly"], false);
    assert_eq!(rows[1]["temperature_c"], 80.0);
    assert_eq!(rows[1]["humidity_pct"], 10.0);
    assert_eq!(rows[1]["sound_db"], 95.0);
    assert_eq!(rows[1]["is_anomaly"], true);
    assert!(rows[1]["anomaly_score"].is_f64());

    let timestamp = rows[0]["timestamp"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp).unwrap();
    assert_eq!(parsed.offset().local_minus_utc(), 0);
}

#[tokio::test]
async fn test_recent_scores_limits() {
    let app = loaded_app();
    for i in 0..30 {
        send(&app, post_score(reading(15.0 + i as f64 * 0.1, 60.0, 50.0))).await;
    }

    let (_, default) = send(&app, get("/recent_scores")).await;
    assert_eq!(default.as_array().unwrap().len(), 20);

    let (_, five) = send(&app, get("/recent_scores?limit=5")).await;
    let five = five.as_array().unwrap();
    assert_eq!(five.len(), 5);
    assert!((five[4]["temperature_c"].as_f64().unwrap() - 17.9).abs() < 1e-9);

    let (_, zero) = send(&app, get("/recent_scores?limit=0")).await;
    assert_eq!(zero.as_array().unwrap().len(), 1);

    let (_, negative) = send(&app, get("/recent_scores?limit=-4")).await;
    assert_eq!(negative, zero);

    let (status, garbage) = send(&app, get("/recent_scores?limit=many")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(garbage.as_array().unwrap().len(), 20);

    // No intervening submit: identical reads
    let (_, again) = send(&app, get("/recent_scores?limit=5")).await;
    assert_eq!(again.as_array().unwrap(), five);
}

#[tokio::test]
async fn test_history_keeps_last_capacity_readings() {
    let app = loaded_app();
    let submitted: Vec<f64> = (0..CAPACITY + 5).map(|i| 13.0 + i as f64 * 0.1).collect();

    for temperature in &submitted {
        let (status, _) = send(&app, post_score(reading(*temperature, 60.0, 50.0))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send(&app, get(&format!("/recent_scores?limit={}", CAPACITY + 5))).await;
    let kept: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["temperature_c"].as_f64().unwrap())
        .collect();

    assert_eq!(kept.len(), CAPACITY);
    assert_eq!(kept, submitted[5..].to_vec());
}

#[tokio::test]
async fn test_concurrent_submissions() {
    let app = loaded_app();

    let tasks: Vec<_> = (0..40)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let (status, _) = send(&app, post_score(reading(20.0 + (i % 5) as f64, 60.0, 50.0))).await;
                assert_eq!(status, StatusCode::OK);
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    let (_, body) = send(&app, get("/recent_scores?limit=100")).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 40);

    let stamps: Vec<_> = rows
        .iter()
        .map(|r| chrono::DateTime::parse_from_rfc3339(r["timestamp"].as_str().unwrap()).unwrap())
        .collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_model_info() {
    let app = loaded_app();
    let (status, body) = send(&app, get("/model")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["format"], "isolation-forest/v1");
    assert_eq!(body["n_estimators"], 3);
    assert_eq!(body["fingerprint"].as_str().unwrap().len(), 64);

    let (status, _) = send(&app_with(ModelHandle::Unloaded), get("/model")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_and_unknown_route() {
    let app = app_with(ModelHandle::Unloaded);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["history"], json!({"size": 0, "capacity": CAPACITY}));

    let (status, body) = send(&app, get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_health_reports_history_fill() {
    let app = loaded_app();
    for i in 0..3 {
        send(&app, post_score(reading(20.0 + i as f64, 60.0, 50.0))).await;
    }

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["history"]["size"], 3);
    assert_eq!(body["history"]["capacity"], CAPACITY);
}

#[tokio::test]
async fn test_configured_recent_limit() {
    let config = Config {
        recent_limit: 4,
        ..Config::default()
    };
    let app = app_with_config(ModelHandle::load(fixture_path()).unwrap(), config);
    for i in 0..10 {
        send(&app, post_score(reading(15.0 + i as f64, 60.0, 50.0))).await;
    }

    let (_, body) = send(&app, get("/recent_scores")).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3]["temperature_c"], 24.0);
}
