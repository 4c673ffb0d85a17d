//! Shared fixtures for the API integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::NaiveDate;
use ignis_api::Server;
use ignis_core::types::{
    BurnedAreaPoint, ChartBucket, ChartQuery, HeatSpot, NewHeatSpot, RegionSummary, RiskPoint,
};
use ignis_core::{Dataset, DateRange, Grouping, IgnisConfig, RegionFilter};
use ignis_storage::{
    BurnedAreaRecord, HeatSpotRecord, MemoryStore, OccurrenceStore, RiskRecord,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// A router over a seeded store plus the temp dir backing `public_dir`.
pub struct TestApp {
    pub router: Router,
    pub public_dir: TempDir,
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn risk(id: i64, state: i32, biome: i32, date: &str, value: Option<f64>) -> RiskRecord {
    RiskRecord {
        id,
        state_id: state,
        biome_id: biome,
        date: day(date),
        risk: value,
        latitude: -10.5,
        longitude: -52.1,
    }
}

fn spot(state: i32, biome: i32, date: &str) -> HeatSpotRecord {
    HeatSpotRecord {
        state_id: state,
        biome_id: biome,
        date: day(date),
        risk: Some(0.9),
        days_without_rain: Some(25),
        precipitation: Some(0.0),
        frp: Some(41.3),
        latitude: -11.2,
        longitude: -50.7,
    }
}

fn burned(state: i32, biome: i32, date: &str) -> BurnedAreaRecord {
    BurnedAreaRecord {
        state_id: state,
        biome_id: biome,
        date: day(date),
        risk: Some(0.7),
        latitude: -9.8,
        longitude: -47.9,
    }
}

pub fn seeded_store() -> MemoryStore {
    MemoryStore::new()
        .with_state(51, "Mato Grosso")
        .with_state(17, "Tocantins")
        .with_risk(risk(1, 51, 3, "2024-09-01", Some(0.8)))
        .with_risk(risk(2, 51, 1, "2024-09-01", Some(0.6)))
        .with_risk(risk(3, 17, 3, "2024-09-01", Some(0.3)))
        .with_risk(risk(4, 17, 3, "2024-09-02", None))
        .with_heat_spot(spot(51, 3, "2024-09-01"))
        .with_heat_spot(spot(51, 3, "2024-09-02"))
        .with_heat_spot(spot(51, 1, "2024-09-03"))
        .with_heat_spot(spot(17, 3, "2024-09-03"))
        .with_burned_area(burned(17, 3, "2024-08-20"))
        .with_burned_area(burned(17, 3, "2024-09-04"))
        .with_burned_area(burned(51, 3, "2024-09-05"))
}

fn write_public_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    std::fs::write(root.join("index.html"), "<html>ignis</html>").unwrap();
    std::fs::write(
        root.join("brasil.geojson"),
        r#"{"type":"FeatureCollection","name":"brasil","features":[]}"#,
    )
    .unwrap();
    std::fs::write(
        root.join("estados.geojson"),
        r#"{"type":"FeatureCollection","name":"estados","features":[]}"#,
    )
    .unwrap();
    let monthly = root.join("geojson").join("area_queimada");
    std::fs::create_dir_all(&monthly).unwrap();
    std::fs::write(
        monthly.join("area_queimada_09.geojson"),
        r#"{"type":"FeatureCollection","name":"setembro","features":[]}"#,
    )
    .unwrap();
    dir
}

pub fn app_with(store: MemoryStore, configure: impl FnOnce(&mut IgnisConfig)) -> TestApp {
    app_with_store(Arc::new(store), configure)
}

pub fn app_with_store(
    store: Arc<dyn OccurrenceStore>,
    configure: impl FnOnce(&mut IgnisConfig),
) -> TestApp {
    let public_dir = write_public_dir();
    let mut config = IgnisConfig::default();
    config.server.public_dir = public_dir.path().to_path_buf();
    configure(&mut config);
    let router = Server::new(store, config).router();
    TestApp { router, public_dir }
}

/// Serves queries from a seeded memory store but fails every ping,
/// like a PostgreSQL pool whose server went away.
pub struct UnreachableStore(pub MemoryStore);

#[async_trait]
impl OccurrenceStore for UnreachableStore {
    fn backend_name(&self) -> &'static str {
        "unreachable"
    }

    async fn risk_summary(
        &self,
        filter: &RegionFilter,
        date: NaiveDate,
        grouping: Grouping,
    ) -> ignis_storage::Result<Vec<RegionSummary>> {
        self.0.risk_summary(filter, date, grouping).await
    }

    async fn risk_points(&self, filter: &RegionFilter) -> ignis_storage::Result<Vec<RiskPoint>> {
        self.0.risk_points(filter).await
    }

    async fn heat_spots(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
        limit: u32,
    ) -> ignis_storage::Result<Vec<HeatSpot>> {
        self.0.heat_spots(filter, range, limit).await
    }

    async fn burned_areas(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
    ) -> ignis_storage::Result<Vec<BurnedAreaPoint>> {
        self.0.burned_areas(filter, range).await
    }

    async fn chart(
        &self,
        dataset: Dataset,
        query: &ChartQuery,
    ) -> ignis_storage::Result<Vec<ChartBucket>> {
        self.0.chart(dataset, query).await
    }

    async fn available_dates(&self, dataset: Dataset) -> ignis_storage::Result<Vec<String>> {
        self.0.available_dates(dataset).await
    }

    async fn insert_heat_spot(&self, spot: &NewHeatSpot) -> ignis_storage::Result<()> {
        self.0.insert_heat_spot(spot).await
    }

    async fn heat_spot_report(
        &self,
        range: &DateRange,
    ) -> ignis_storage::Result<Vec<serde_json::Value>> {
        self.0.heat_spot_report(range).await
    }

    async fn ping(&self) -> ignis_storage::Result<()> {
        Err(ignis_core::Error::config("connection refused").into())
    }
}

pub fn app() -> TestApp {
    app_with(seeded_store(), |_| {})
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, String) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(req).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body) = self.send(req).await;
        (status, serde_json::from_str(&body).unwrap())
    }
}

pub fn error_category(body: &Value) -> &str {
    body["error"]["category"].as_str().unwrap_or_default()
}
