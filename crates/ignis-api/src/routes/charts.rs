//! Bar chart aggregates.

use axum::Json;
use axum::extract::{Path, State};
use ignis_core::Dataset;
use ignis_core::types::{ChartBucket, ChartQuery};

use crate::Result;
use crate::params::QueryParams;
use crate::state::AppState;

/// `GET /api/grafico/{tipo}`: per-region totals (and mean risk for `risco`).
pub async fn chart(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
    params: QueryParams,
) -> Result<Json<Vec<ChartBucket>>> {
    let dataset: Dataset = tipo.parse()?;
    let query = ChartQuery {
        range: params.range()?,
        grouping: params.grouping(),
        filter: params.filter()?,
    };

    let buckets = state.store().chart(dataset, &query).await?;
    tracing::debug!(%dataset, range = %query.range, buckets = buckets.len(), "chart");
    Ok(Json(buckets))
}
