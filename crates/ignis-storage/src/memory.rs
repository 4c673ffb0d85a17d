//! In-memory store.
//!
//! Holds the three tables as plain vectors and reproduces the SQL
//! semantics of [`PgStore`](crate::PgStore): `AVG` ignores missing risk
//! values, heat spots behave like an inner join on state and biome names,
//! and ordering matches the `ORDER BY` clauses in [`crate::sql`].

use async_trait::async_trait;
use chrono::NaiveDate;
use ignis_core::types::{
    BiomeId, BurnedAreaPoint, ChartBucket, ChartQuery, HeatSpot, NewHeatSpot, RegionSummary,
    RiskPoint,
};
use ignis_core::{Dataset, DateRange, Grouping, RegionFilter};
use serde_json::json;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::Result;
use crate::store::OccurrenceStore;

/// A row of the `risco` table.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRecord {
    /// Row id.
    pub id: i64,
    /// State id.
    pub state_id: i32,
    /// Biome id.
    pub biome_id: i32,
    /// Sample date.
    pub date: NaiveDate,
    /// Risk index.
    pub risk: Option<f64>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

/// A row of the `foco_calor` table.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSpotRecord {
    /// State id.
    pub state_id: i32,
    /// Biome id.
    pub biome_id: i32,
    /// Detection date.
    pub date: NaiveDate,
    /// Risk index.
    pub risk: Option<f64>,
    /// Days without rain.
    pub days_without_rain: Option<i32>,
    /// Precipitation.
    pub precipitation: Option<f64>,
    /// Fire radiative power.
    pub frp: Option<f64>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl From<&NewHeatSpot> for HeatSpotRecord {
    fn from(spot: &NewHeatSpot) -> Self {
        Self {
            state_id: spot.estado_id.get(),
            biome_id: spot.bioma_id.get(),
            date: spot.data,
            risk: Some(spot.risco_fogo),
            days_without_rain: Some(spot.dia_sem_chuva),
            precipitation: Some(spot.precipitacao),
            frp: Some(spot.frp),
            latitude: spot.latitude,
            longitude: spot.longitude,
        }
    }
}

/// A row of the `area_queimada` table.
#[derive(Debug, Clone, PartialEq)]
pub struct BurnedAreaRecord {
    /// State id.
    pub state_id: i32,
    /// Biome id.
    pub biome_id: i32,
    /// Satellite pass date.
    pub date: NaiveDate,
    /// Risk index.
    pub risk: Option<f64>,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

#[derive(Debug, Default)]
struct Tables {
    states: BTreeMap<i32, String>,
    biomes: BTreeMap<i32, String>,
    risk: Vec<RiskRecord>,
    heat_spots: Vec<HeatSpotRecord>,
    burned_areas: Vec<BurnedAreaRecord>,
}

/// Region id, date, and risk of any row, for the generic aggregations.
struct Sample {
    state_id: i32,
    biome_id: i32,
    date: NaiveDate,
    risk: Option<f64>,
}

impl Sample {
    fn region(&self, grouping: Grouping) -> i32 {
        match grouping {
            Grouping::State => self.state_id,
            Grouping::Biome => self.biome_id,
        }
    }
}

impl Tables {
    fn samples(&self, dataset: Dataset) -> Vec<Sample> {
        match dataset {
            Dataset::FireRisk => self
                .risk
                .iter()
                .map(|r| Sample {
                    state_id: r.state_id,
                    biome_id: r.biome_id,
                    date: r.date,
                    risk: r.risk,
                })
                .collect(),
            Dataset::HeatSpot => self
                .heat_spots
                .iter()
                .map(|r| Sample {
                    state_id: r.state_id,
                    biome_id: r.biome_id,
                    date: r.date,
                    risk: r.risk,
                })
                .collect(),
            Dataset::BurnedArea => self
                .burned_areas
                .iter()
                .map(|r| Sample {
                    state_id: r.state_id,
                    biome_id: r.biome_id,
                    date: r.date,
                    risk: r.risk,
                })
                .collect(),
        }
    }
}

/// Running `COUNT(*)` and `AVG(risk)` for one group.
#[derive(Default)]
struct Aggregate {
    count: i64,
    risk_sum: f64,
    risk_count: u32,
}

impl Aggregate {
    fn add(&mut self, risk: Option<f64>) {
        self.count += 1;
        if let Some(r) = risk {
            self.risk_sum += r;
            self.risk_count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.risk_count > 0).then(|| self.risk_sum / f64::from(self.risk_count))
    }
}

fn group<'a>(
    samples: impl Iterator<Item = &'a Sample>,
    grouping: Grouping,
) -> BTreeMap<i32, Aggregate> {
    let mut groups: BTreeMap<i32, Aggregate> = BTreeMap::new();
    for sample in samples {
        groups
            .entry(sample.region(grouping))
            .or_default()
            .add(sample.risk);
    }
    groups
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Store that keeps every table in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with the six biome names preloaded.
    pub fn new() -> Self {
        let biomes = (1..=6)
            .filter_map(|id| {
                let name = BiomeId::new(id).ok()?.name()?;
                Some((id, name.to_string()))
            })
            .collect();
        Self {
            tables: RwLock::new(Tables {
                biomes,
                ..Tables::default()
            }),
        }
    }

    /// Registers a state name (the `estados` lookup table).
    pub fn with_state(mut self, id: i32, name: impl Into<String>) -> Self {
        self.tables.get_mut().states.insert(id, name.into());
        self
    }

    /// Adds a risk row.
    pub fn with_risk(mut self, record: RiskRecord) -> Self {
        self.tables.get_mut().risk.push(record);
        self
    }

    /// Adds a heat spot row.
    pub fn with_heat_spot(mut self, record: HeatSpotRecord) -> Self {
        self.tables.get_mut().heat_spots.push(record);
        self
    }

    /// Adds a burned area row.
    pub fn with_burned_area(mut self, record: BurnedAreaRecord) -> Self {
        self.tables.get_mut().burned_areas.push(record);
        self
    }

    /// Number of heat spot rows.
    pub async fn heat_spot_count(&self) -> usize {
        self.tables.read().await.heat_spots.len()
    }
}

#[async_trait]
impl OccurrenceStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn risk_summary(
        &self,
        filter: &RegionFilter,
        date: NaiveDate,
        grouping: Grouping,
    ) -> Result<Vec<RegionSummary>> {
        let tables = self.tables.read().await;
        let samples = tables.samples(Dataset::FireRisk);
        let groups = group(
            samples
                .iter()
                .filter(|s| s.date == date && filter.matches(s.state_id, s.biome_id)),
            grouping,
        );
        Ok(groups
            .into_iter()
            .map(|(region, agg)| RegionSummary {
                estado: (grouping == Grouping::State).then_some(region),
                bioma: (grouping == Grouping::Biome).then_some(region),
                media: agg.mean().unwrap_or(0.0),
                total: agg.count,
            })
            .collect())
    }

    async fn risk_points(&self, filter: &RegionFilter) -> Result<Vec<RiskPoint>> {
        let tables = self.tables.read().await;
        Ok(tables
            .risk
            .iter()
            .filter(|r| filter.matches(r.state_id, r.biome_id))
            .map(|r| RiskPoint {
                id: r.id,
                risco_fogo: r.risk,
                estado_id: r.state_id,
                bioma_id: r.biome_id,
                data: r.date,
                longitude: r.longitude,
                latitude: r.latitude,
            })
            .collect())
    }

    async fn heat_spots(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
        limit: u32,
    ) -> Result<Vec<HeatSpot>> {
        let tables = self.tables.read().await;
        Ok(tables
            .heat_spots
            .iter()
            .filter(|r| range.contains(r.date) && filter.matches(r.state_id, r.biome_id))
            .filter_map(|r| {
                let estado = tables.states.get(&r.state_id)?;
                let bioma = tables.biomes.get(&r.biome_id)?;
                Some(HeatSpot {
                    latitude: r.latitude,
                    longitude: r.longitude,
                    estado: estado.clone(),
                    bioma: bioma.clone(),
                    risco_fogo: r.risk,
                    data: r.date,
                    dia_sem_chuva: r.days_without_rain,
                    precipitacao: r.precipitation,
                    frp: r.frp,
                })
            })
            .take(limit as usize)
            .collect())
    }

    async fn burned_areas(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
    ) -> Result<Vec<BurnedAreaPoint>> {
        let tables = self.tables.read().await;
        Ok(tables
            .burned_areas
            .iter()
            .filter(|r| range.contains(r.date) && filter.matches(r.state_id, r.biome_id))
            .map(|r| BurnedAreaPoint {
                latitude: r.latitude,
                longitude: r.longitude,
                estado: r.state_id,
                bioma: r.biome_id,
                risco_fogo: r.risk,
                data: r.date,
            })
            .collect())
    }

    async fn chart(&self, dataset: Dataset, query: &ChartQuery) -> Result<Vec<ChartBucket>> {
        let tables = self.tables.read().await;
        let samples = tables.samples(dataset);
        let groups = group(
            samples.iter().filter(|s| {
                query.range.contains(s.date) && query.filter.matches(s.state_id, s.biome_id)
            }),
            query.grouping,
        );
        let mut buckets: Vec<ChartBucket> = groups
            .into_iter()
            .map(|(local, agg)| ChartBucket {
                local,
                media: match dataset {
                    Dataset::FireRisk => agg.mean().map(round2),
                    Dataset::HeatSpot | Dataset::BurnedArea => None,
                },
                total: agg.count,
            })
            .collect();
        buckets.sort_by(|a, b| b.total.cmp(&a.total).then(a.local.cmp(&b.local)));
        Ok(buckets)
    }

    async fn available_dates(&self, dataset: Dataset) -> Result<Vec<String>> {
        let tables = self.tables.read().await;
        let format = if dataset.is_monthly() { "%m" } else { "%Y-%m-%d" };
        let mut values: Vec<String> = tables
            .samples(dataset)
            .iter()
            .map(|s| s.date.format(format).to_string())
            .collect();
        values.sort();
        values.dedup();
        Ok(values)
    }

    async fn insert_heat_spot(&self, spot: &NewHeatSpot) -> Result<()> {
        self.tables
            .write()
            .await
            .heat_spots
            .push(HeatSpotRecord::from(spot));
        Ok(())
    }

    async fn heat_spot_report(&self, range: &DateRange) -> Result<Vec<serde_json::Value>> {
        let tables = self.tables.read().await;
        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for record in tables.heat_spots.iter().filter(|r| range.contains(r.date)) {
            if let Some(name) = tables.states.get(&record.state_id) {
                *totals.entry(name.as_str()).or_default() += 1;
            }
        }
        let mut rows: Vec<(&str, i64)> = totals.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        Ok(rows
            .into_iter()
            .map(|(estado, total)| json!({ "estado": estado, "total_focos": total }))
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
