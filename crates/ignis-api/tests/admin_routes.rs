//! Heat spot insertion and report endpoints.

#![allow(clippy::unwrap_used)]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{app, error_category};
use serde_json::json;

fn new_spot() -> serde_json::Value {
    json!({
        "estado_id": 17,
        "bioma_id": 3,
        "data": "2024-09-20",
        "risco_fogo": 0.85,
        "dia_sem_chuva": 40,
        "precipitacao": 0.0,
        "frp": 55.2,
        "latitude": -10.18,
        "longitude": -48.33
    })
}

#[tokio::test]
async fn insert_heat_spot_then_query_it() {
    let app = app();
    let (status, body) = app.post_json("/api/inserir-foco", &new_spot()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["mensagem"].is_string());

    let (_, body) = app
        .get_json("/api/foco_calor?inicio=2024-09-20&fim=2024-09-20")
        .await;
    let spots = body.as_array().unwrap();
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0]["estado"], "Tocantins");
    assert_eq!(spots[0]["dia_sem_chuva"], 40);
}

#[tokio::test]
async fn insert_rejects_out_of_range_latitude() {
    let app = app();
    let mut spot = new_spot();
    spot["latitude"] = json!(123.0);
    let (status, body) = app.post_json("/api/inserir-foco", &spot).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].as_str().unwrap().contains("latitude"));
}

#[tokio::test]
async fn insert_rejects_malformed_body() {
    let app = app();
    let mut spot = new_spot();
    spot.as_object_mut().unwrap().remove("frp");
    let (status, body) = app.post_json("/api/inserir-foco", &spot).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_category(&body), "validation");
}

#[tokio::test]
async fn insert_requires_json_content_type() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri("/api/inserir-foco")
        .body(Body::from(new_spot().to_string()))
        .unwrap();
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_totals_per_state() {
    let app = app();
    let (status, body) = app
        .get_json("/api/relatorio-focos?inicio=2024-09-01&fim=2024-09-30")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"estado": "Mato Grosso", "total_focos": 3},
            {"estado": "Tocantins", "total_focos": 1}
        ])
    );
}

#[tokio::test]
async fn report_requires_range() {
    let app = app();
    let (status, _) = app.get_json("/api/relatorio-focos?inicio=2024-09-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
