//! Map layers: risk, heat spots, burned area.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use ignis_core::MonthKey;
use ignis_core::types::{HeatSpot, RegionSummary, RiskPoint, non_blank};

use super::geojson;
use crate::params::QueryParams;
use crate::state::AppState;
use crate::{ApiError, Result};

/// `GET /api/risco`: average risk per region on one day.
pub async fn risk_summary(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<RegionSummary>>> {
    let filter = params.filter()?;
    let day = params.day()?;
    let grouping = params.grouping();

    let rows = state.store().risk_summary(&filter, day, grouping).await?;
    tracing::debug!(%day, %grouping, rows = rows.len(), "risk summary");
    Ok(Json(rows))
}

/// `GET /api/risco/pontos`: raw risk samples with coordinates.
pub async fn risk_points(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<RiskPoint>>> {
    let filter = params.filter()?;
    Ok(Json(state.store().risk_points(&filter).await?))
}

/// `GET /api/foco_calor`
pub async fn heat_spots(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<HeatSpot>>> {
    let limits = state.limits();
    let filter = params.filter()?;
    let range = params.range()?.ensure_at_most(limits.max_range_days)?;

    let rows = state
        .store()
        .heat_spots(&filter, &range, limits.max_heat_spot_rows)
        .await?;
    if rows.len() as u64 == u64::from(limits.max_heat_spot_rows) {
        tracing::warn!(%range, limit = limits.max_heat_spot_rows, "heat spot result truncated");
    }
    Ok(Json(rows))
}

/// `GET /api/area_queimada`
///
/// With only `inicio`, returns the pre-rendered GeoJSON for that month.
/// With `inicio` and `fim`, returns the observations in the range.
pub async fn burned_areas(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Response> {
    let start = non_blank(params.inicio.as_deref());
    let end = non_blank(params.fim.as_deref());

    match (start, end) {
        (Some(month), None) => {
            let month = MonthKey::parse(month)?;
            geojson::monthly_burned_area(&state, month).await
        }
        (Some(_), Some(_)) => {
            let filter = params.filter()?;
            let range = params.range()?;
            let rows = state.store().burned_areas(&filter, &range).await?;
            Ok(Json(rows).into_response())
        }
        _ => Err(ApiError::bad_request(
            "inicio",
            "inicio is required: a month (MM) for the GeoJSON layer, or inicio and fim (YYYY-MM-DD)",
        )),
    }
}
