//! `/api` routes.

pub mod admin;
pub mod charts;
pub mod dates;
pub mod geojson;
pub mod map;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

/// Router for everything mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/datas_disponiveis", get(dates::available_dates))
        .route("/risco", get(map::risk_summary))
        .route("/risco/pontos", get(map::risk_points))
        .route("/foco_calor", get(map::heat_spots))
        .route("/area_queimada", get(map::burned_areas))
        .route("/inserir-foco", post(admin::insert_heat_spot))
        .route("/relatorio-focos", get(admin::heat_spot_report))
        .route("/grafico/{tipo}", get(charts::chart))
        .route("/brasil", get(geojson::country))
        .route("/estados", get(geojson::states))
}
