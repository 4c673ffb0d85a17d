//! Storage abstraction used by the HTTP layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use ignis_core::types::{
    BurnedAreaPoint, ChartBucket, ChartQuery, HeatSpot, NewHeatSpot, RegionSummary, RiskPoint,
};
use ignis_core::{Dataset, DateRange, Grouping, RegionFilter};

use crate::Result;

/// Read and write access to the wildfire tables.
///
/// Implementations must apply the same filtering, grouping, and ordering
/// so that the in-memory store can stand in for PostgreSQL in tests.
#[async_trait]
pub trait OccurrenceStore: Send + Sync {
    /// Short backend name for logs and readiness output.
    fn backend_name(&self) -> &'static str;

    /// Average risk per region on `date`, ordered by region id.
    async fn risk_summary(
        &self,
        filter: &RegionFilter,
        date: NaiveDate,
        grouping: Grouping,
    ) -> Result<Vec<RegionSummary>>;

    /// Risk samples with coordinates.
    async fn risk_points(&self, filter: &RegionFilter) -> Result<Vec<RiskPoint>>;

    /// Heat spots in `range` joined with state and biome names, at most `limit` rows.
    async fn heat_spots(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
        limit: u32,
    ) -> Result<Vec<HeatSpot>>;

    /// Burned area observations whose pass date falls in `range`.
    async fn burned_areas(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
    ) -> Result<Vec<BurnedAreaPoint>>;

    /// Chart buckets ordered by total descending, then region id.
    async fn chart(&self, dataset: Dataset, query: &ChartQuery) -> Result<Vec<ChartBucket>>;

    /// Distinct `YYYY-MM-DD` days, or `MM` months for burned area, ascending.
    async fn available_dates(&self, dataset: Dataset) -> Result<Vec<String>>;

    /// Inserts a heat spot.
    async fn insert_heat_spot(&self, spot: &NewHeatSpot) -> Result<()>;

    /// Heat spot totals per state for `range`, largest first.
    async fn heat_spot_report(&self, range: &DateRange) -> Result<Vec<serde_json::Value>>;

    /// Cheap liveness probe.
    async fn ping(&self) -> Result<()>;
}
