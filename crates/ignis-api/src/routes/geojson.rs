//! GeoJSON overlays read from the public directory.

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use ignis_core::MonthKey;

use crate::Result;
use crate::state::AppState;

const GEOJSON_CONTENT_TYPE: &str = "application/geo+json";

/// `GET /api/brasil`
pub async fn country(State(state): State<AppState>) -> Result<Response> {
    geojson_file(state.public_dir().join("brasil.geojson")).await
}

/// `GET /api/estados`
pub async fn states(State(state): State<AppState>) -> Result<Response> {
    geojson_file(state.public_dir().join("estados.geojson")).await
}

/// Burned area polygons pre-rendered for one month.
pub async fn monthly_burned_area(state: &AppState, month: MonthKey) -> Result<Response> {
    let path = state
        .public_dir()
        .join("geojson")
        .join("area_queimada")
        .join(format!("area_queimada_{month}.geojson"));
    geojson_file(path).await
}

async fn geojson_file(path: PathBuf) -> Result<Response> {
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, GEOJSON_CONTENT_TYPE)], bytes).into_response()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Err(ignis_core::Error::not_found(format!("GeoJSON file {name}")).into())
        }
        Err(e) => Err(ignis_core::Error::io_with_path(e, &path).into()),
    }
}
