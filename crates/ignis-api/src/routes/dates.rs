//! Date pickers.

use axum::Json;
use axum::extract::State;
use ignis_core::Dataset;
use ignis_core::types::AvailableDates;

use crate::Result;
use crate::params::QueryParams;
use crate::state::AppState;

/// `GET /api/datas_disponiveis?tipo=...`
pub async fn available_dates(
    State(state): State<AppState>,
    params: QueryParams,
) -> Result<Json<AvailableDates>> {
    let dataset: Dataset = params.tipo.as_deref().unwrap_or_default().parse()?;
    let dates = state.store().available_dates(dataset).await?;
    let available = AvailableDates::from_sorted(dates)
        .ok_or_else(|| ignis_core::Error::not_found(format!("available dates for {dataset}")))?;
    Ok(Json(available))
}
