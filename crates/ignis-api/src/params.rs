//! Query string parameters.
//!
//! Every field is kept as a raw string so that malformed values produce
//! the same JSON validation error as any other bad input. [`QueryParams`]
//! is its own extractor: a query string that fails to deserialize (for
//! example a repeated key) is turned into a validation error too.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use chrono::NaiveDate;
use ignis_core::types::require_date;
use ignis_core::{DateRange, Grouping, RegionFilter};
use serde::Deserialize;

use crate::{ApiError, Result};

/// Union of the query parameters accepted by the `/api` routes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct QueryParams {
    /// State id.
    pub estado: Option<String>,
    /// Biome id.
    pub bioma: Option<String>,
    /// Alias of `estado`.
    pub estado_id: Option<String>,
    /// Alias of `bioma`.
    pub bioma_id: Option<String>,
    /// Single day.
    pub data: Option<String>,
    /// Range start.
    pub inicio: Option<String>,
    /// Range end.
    pub fim: Option<String>,
    /// Chart grouping selector.
    pub local: Option<String>,
    /// Dataset name.
    pub tipo: Option<String>,
}

impl QueryParams {
    /// Region filter; `estado`/`bioma` take precedence over the `_id` aliases.
    pub fn filter(&self) -> Result<RegionFilter> {
        let state = first_present(&self.estado, &self.estado_id);
        let biome = first_present(&self.bioma, &self.bioma_id);
        Ok(RegionFilter::from_params(state, biome)?)
    }

    /// Required `data` parameter.
    pub fn day(&self) -> Result<NaiveDate> {
        Ok(require_date("data", self.data.as_deref())?)
    }

    /// Required `inicio`/`fim` range.
    pub fn range(&self) -> Result<DateRange> {
        Ok(DateRange::from_params(
            self.inicio.as_deref(),
            self.fim.as_deref(),
        )?)
    }

    /// Chart grouping from `local`.
    pub fn grouping(&self) -> Grouping {
        Grouping::from_param(self.local.as_deref())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let Query(params) = Query::<QueryParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::from(ignis_core::Error::validation(e.body_text())))?;
        Ok(params)
    }
}

fn first_present<'a>(primary: &'a Option<String>, alias: &'a Option<String>) -> Option<&'a str> {
    ignis_core::types::non_blank(primary.as_deref())
        .or_else(|| ignis_core::types::non_blank(alias.as_deref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        let mut p = QueryParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "estado" => p.estado = v,
                "bioma" => p.bioma = v,
                "estado_id" => p.estado_id = v,
                "bioma_id" => p.bioma_id = v,
                "data" => p.data = v,
                "inicio" => p.inicio = v,
                "fim" => p.fim = v,
                "local" => p.local = v,
                _ => p.tipo = v,
            }
        }
        p
    }

    #[test]
    fn test_filter_prefers_primary_names() {
        let p = params(&[("estado", "51"), ("estado_id", "17"), ("bioma_id", "3")]);
        let f = p.filter().unwrap();
        assert_eq!(f.state.unwrap().get(), 51);
        assert_eq!(f.biome.unwrap().get(), 3);
    }

    #[test]
    fn test_blank_primary_falls_back_to_alias() {
        let p = params(&[("estado", ""), ("estado_id", "17")]);
        assert_eq!(p.filter().unwrap().state.unwrap().get(), 17);
    }

    #[test]
    fn test_bad_state_is_error() {
        assert!(params(&[("estado", "MT")]).filter().is_err());
    }

    #[test]
    fn test_day_required() {
        assert!(QueryParams::default().day().is_err());
        let p = params(&[("data", "2024-09-01")]);
        assert_eq!(p.day().unwrap().to_string(), "2024-09-01");
    }

    async fn extract(uri: &str) -> Result<QueryParams> {
        let (mut parts, ()) = axum::http::Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        QueryParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extractor_reads_query() {
        let p = extract("/api/risco?data=2024-09-01&estado=51").await.unwrap();
        assert_eq!(p.data.as_deref(), Some("2024-09-01"));
        assert_eq!(p.estado.as_deref(), Some("51"));
    }

    #[tokio::test]
    async fn test_extractor_repeated_key_is_validation_error() {
        let err = extract("/api/risco?data=2024-09-01&data=2024-09-02")
            .await
            .unwrap_err();
        assert_eq!(err.classify().1, "validation");
        assert!(err.public_message().contains("duplicate field"));
    }

    #[test]
    fn test_range_and_grouping() {
        let p = params(&[("inicio", "2024-09-01"), ("fim", "2024-09-10"), ("local", "bioma")]);
        assert_eq!(p.range().unwrap().days(), 9);
        assert_eq!(p.grouping(), Grouping::Biome);
        assert_eq!(QueryParams::default().grouping(), Grouping::State);
    }
}
