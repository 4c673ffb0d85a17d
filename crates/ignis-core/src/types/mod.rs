//! Domain types for the wildfire API.

pub mod dataset;
pub mod dates;
pub mod records;
pub mod region;

mod proptests;

pub use dataset::{Dataset, Grouping};
pub use dates::{DateRange, MonthKey, parse_date, require_date};
pub use records::{
    AvailableDates, BurnedAreaPoint, ChartBucket, ChartQuery, HeatSpot, NewHeatSpot,
    RegionSummary, RiskPoint,
};
pub use region::{BiomeId, RegionFilter, StateId, non_blank};
