//! Result rows returned by the API and the insert payload it accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::dataset::Grouping;
use crate::types::dates::DateRange;
use crate::types::region::{BiomeId, RegionFilter, StateId};
use crate::{Error, Result};

/// Average fire risk for one state or biome on one day.
///
/// Exactly one of `estado` and `bioma` is set, depending on the grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummary {
    /// State id when grouped by state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<i32>,
    /// Biome id when grouped by biome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bioma: Option<i32>,
    /// Mean risk; 0 when the database returned no average.
    pub media: f64,
    /// Number of samples.
    pub total: i64,
}

/// A fire risk sample with its coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    /// Row id.
    pub id: i64,
    /// Risk index.
    pub risco_fogo: Option<f64>,
    /// State id.
    pub estado_id: i32,
    /// Biome id.
    pub bioma_id: i32,
    /// Sample date.
    pub data: NaiveDate,
    /// Longitude (`ST_X`).
    pub longitude: f64,
    /// Latitude (`ST_Y`).
    pub latitude: f64,
}

/// A heat spot joined with its state and biome names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatSpot {
    /// Latitude (`ST_Y`).
    pub latitude: f64,
    /// Longitude (`ST_X`).
    pub longitude: f64,
    /// State name.
    pub estado: String,
    /// Biome name.
    pub bioma: String,
    /// Risk index at detection time.
    pub risco_fogo: Option<f64>,
    /// Detection date.
    pub data: NaiveDate,
    /// Consecutive days without rain.
    pub dia_sem_chuva: Option<i32>,
    /// Precipitation.
    pub precipitacao: Option<f64>,
    /// Fire radiative power.
    pub frp: Option<f64>,
}

/// A burned area observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurnedAreaPoint {
    /// Latitude (`ST_Y`).
    pub latitude: f64,
    /// Longitude (`ST_X`).
    pub longitude: f64,
    /// State id.
    pub estado: i32,
    /// Biome id.
    pub bioma: i32,
    /// Risk index attached to the observation.
    pub risco_fogo: Option<f64>,
    /// Satellite pass date.
    pub data: NaiveDate,
}

/// One bar of a chart: a region and its count, plus the mean risk for
/// the risk chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBucket {
    /// State or biome id, depending on the grouping.
    pub local: i32,
    /// Mean risk rounded to two decimals (risk chart only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<f64>,
    /// Number of rows in the bucket.
    pub total: i64,
}

/// Dates (or months) for which a dataset has rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDates {
    /// First available value.
    pub min: String,
    /// Last available value.
    pub max: String,
    /// Every available value, ascending.
    pub datas_disponiveis: Vec<String>,
}

impl AvailableDates {
    /// Wraps an ordered list; `None` when it is empty.
    pub fn from_sorted(dates: Vec<String>) -> Option<Self> {
        let min = dates.first()?.clone();
        let max = dates.last()?.clone();
        Some(Self {
            min,
            max,
            datas_disponiveis: dates,
        })
    }
}

/// A heat spot submitted for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHeatSpot {
    /// State id.
    pub estado_id: StateId,
    /// Biome id.
    pub bioma_id: BiomeId,
    /// Detection date.
    pub data: NaiveDate,
    /// Risk index.
    pub risco_fogo: f64,
    /// Consecutive days without rain.
    pub dia_sem_chuva: i32,
    /// Precipitation.
    pub precipitacao: f64,
    /// Fire radiative power.
    pub frp: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl NewHeatSpot {
    /// Checks ids, coordinate bounds, and non-negative measurements.
    pub fn validate(&self) -> Result<()> {
        for (field, id) in [
            ("estado_id", self.estado_id.get()),
            ("bioma_id", self.bioma_id.get()),
        ] {
            if id <= 0 {
                return Err(Error::validation_field(
                    field,
                    format!("{field} must be positive, got {id}"),
                ));
            }
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::validation_field(
                "latitude",
                format!("latitude must be within [-90, 90], got {}", self.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::validation_field(
                "longitude",
                format!("longitude must be within [-180, 180], got {}", self.longitude),
            ));
        }
        if self.dia_sem_chuva < 0 {
            return Err(Error::validation_field(
                "dia_sem_chuva",
                "dia_sem_chuva must not be negative",
            ));
        }
        for (field, value) in [
            ("risco_fogo", self.risco_fogo),
            ("precipitacao", self.precipitacao),
            ("frp", self.frp),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::validation_field(
                    field,
                    format!("{field} must be a non-negative number"),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters shared by the three chart endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartQuery {
    /// Rows to count.
    pub range: DateRange,
    /// Bucket by state or biome.
    pub grouping: Grouping,
    /// Optional region restriction.
    pub filter: RegionFilter,
}
