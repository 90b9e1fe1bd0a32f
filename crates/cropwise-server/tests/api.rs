//! HTTP API tests driven through the router with `oneshot`.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use cropwise_core::error::CropwiseError;
use cropwise_core::history::MemoryHistory;
use cropwise_core::model::{Location, WeatherReport};
use cropwise_core::rules::builtin::load_preset;
use cropwise_core::weather::{DisabledWeather, WeatherProvider};
use cropwise_core::PredictionService;
use cropwise_server::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot

struct FixedWeather;

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn current(&self, _location: Location) -> Result<WeatherReport, CropwiseError> {
        Ok(WeatherReport {
            temperature: "22.5".parse().unwrap(),
            humidity: "65".parse().unwrap(),
            description: "clear sky".into(),
            location: "Ludhiana".into(),
        })
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}

struct OfflineWeather;

#[async_trait]
impl WeatherProvider for OfflineWeather {
    async fn current(&self, _location: Location) -> Result<WeatherReport, CropwiseError> {
        Err(CropwiseError::Upstream("timed out".into()))
    }

    fn backend_name(&self) -> &str {
        "offline"
    }
}

fn app_with(weather: Arc<dyn WeatherProvider>) -> Router {
    let service = PredictionService::new(
        load_preset("default").unwrap(),
        weather,
        Arc::new(MemoryHistory::new()),
    );
    create_router(AppState::new(service))
}

fn app() -> Router {
    app_with(Arc::new(FixedWeather))
}

fn post(uri: &str, body: Value, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

fn wheat_request() -> Value {
    json!({
        "nitrogen": 75,
        "phosphorus": 40,
        "potassium": 40,
        "ph": 6.8,
        "rainfall": 90,
        "temperature": 20,
        "humidity": 60
    })
}

#[tokio::test]
async fn test_health_check() {
    let response = app().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["weatherBackend"], "fixed");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_predict_returns_result_shape() {
    let response = app()
        .oneshot(post("/api/predict", wheat_request(), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    // Wheat and Maize both meet all seven criteria; Wheat is declared first.
    assert_eq!(body["crop"], "Wheat");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["alternativeCrops"], json!(["Maize", "Tomato"]));

    let fertilizer = body["fertilizer"].as_array().unwrap();
    assert_eq!(fertilizer.len(), 4);
    assert_eq!(fertilizer[0]["nutrient"], "Nitrogen");
    assert_eq!(fertilizer[0]["status"], "Medium");
    assert_eq!(fertilizer[0]["color"], "yellow");
    assert_eq!(fertilizer[3]["status"], "Optimal");
}

#[tokio::test]
async fn test_predict_out_of_range_is_bad_request() {
    let mut request = wheat_request();
    request["ph"] = json!(15);

    let response = app()
        .oneshot(post("/api/predict", request, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_response(response).await;
    assert_eq!(body["error"], "Invalid input parameters");
    assert_eq!(body["details"][0]["field"], "ph");
}

#[tokio::test]
async fn test_predict_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header("content-type", "application/json")
        .body(Body::from("{ nitrogen: "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_response(response).await;
    assert_eq!(body["error"], "Invalid input parameters");
}

#[tokio::test]
async fn test_predict_at_location_includes_weather() {
    let body = json!({
        "soil": { "nitrogen": 75, "phosphorus": 40, "potassium": 40, "ph": 6.8, "rainfall": 90 },
        "location": { "lat": 30.9, "lon": 75.85 }
    });

    let response = app()
        .oneshot(post("/api/predict/locate", body, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert_eq!(body["weather"]["location"], "Ludhiana");
    assert_eq!(body["weather"]["temperature"], 22.5);
    assert_eq!(body["prediction"]["crop"], "Wheat");
}

#[tokio::test]
async fn test_weather_endpoint() {
    let response = app()
        .oneshot(post("/api/weather", json!({ "lat": 30.9, "lon": 75.85 }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    assert_eq!(body["description"], "clear sky");
    assert_eq!(body["humidity"], 65.0);
}

#[tokio::test]
async fn test_weather_invalid_coordinates() {
    let response = app()
        .oneshot(post("/api/weather", json!({ "lat": 91, "lon": 0 }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weather_offline_is_bad_gateway() {
    let response = app_with(Arc::new(OfflineWeather))
        .oneshot(post("/api/weather", json!({ "lat": 30.9, "lon": 75.85 }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_response(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_weather_disabled_is_internal_error() {
    let response = app_with(Arc::new(DisabledWeather))
        .oneshot(post("/api/weather", json!({ "lat": 30.9, "lon": 75.85 }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_response(response).await;
    assert_eq!(body["error"], "An error occurred processing your request");
}

#[tokio::test]
async fn test_history_requires_identity() {
    let response = app().oneshot(get("/api/history", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_history_lists_user_predictions() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post("/api/predict", wheat_request(), Some("farmer-7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/history", Some("farmer-7")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_response(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["userId"], "farmer-7");
    assert_eq!(records[0]["result"]["crop"], "Wheat");
    assert_eq!(records[0]["soil"]["ph"], 6.8);

    let response = app
        .oneshot(get("/api/history", Some("farmer-8")))
        .await
        .unwrap();
    let body = json_response(response).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_crops_lists_table() {
    let response = app().oneshot(get("/api/crops", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_response(response).await;
    let names: Vec<&str> = body["crops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["crop"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Rice", "Wheat", "Maize", "Cotton", "Sugarcane", "Potato", "Tomato"]
    );
}
