//! Heat spot insertion and the per-state report.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use ignis_core::types::NewHeatSpot;
use serde_json::{Value, json};

use crate::params::QueryParams;
use crate::state::AppState;
use crate::{ApiError, Result};

/// `POST /api/inserir-foco`
pub async fn insert_heat_spot(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewHeatSpot>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(spot) =
        payload.map_err(|e| ApiError::from(ignis_core::Error::validation(e.body_text())))?;
    spot.validate()?;

    state.store().insert_heat_spot(&spot).await?;
    tracing::info!(
        estado = spot.estado_id.get(),
        bioma = spot.bioma_id.get(),
        data = %spot.data,
        "heat spot inserted"
    );
    Ok(Json(json!({ "mensagem": "Foco de calor inserido com sucesso." })))
}

/// `GET /api/relatorio-focos`: heat spot totals per state.
pub async fn heat_spot_report(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<Vec<Value>>> {
    let range = params.range()?;
    Ok(Json(state.store().heat_spot_report(&range).await?))
}
