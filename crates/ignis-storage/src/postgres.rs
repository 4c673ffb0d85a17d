//! PostgreSQL/PostGIS store.

use async_trait::async_trait;
use chrono::NaiveDate;
use ignis_core::types::{
    BurnedAreaPoint, ChartBucket, ChartQuery, HeatSpot, NewHeatSpot, RegionSummary, RiskPoint,
};
use ignis_core::{DatabaseConfig, Dataset, DateRange, Grouping, RegionFilter};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPoolOptions};
use sqlx::{Arguments, FromRow, PgPool};
use std::str::FromStr;
use std::time::Duration;

use crate::sql::{self, SqlParam, SqlQuery};
use crate::store::OccurrenceStore;
use crate::{Error, Result};

/// Store backed by a sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects a pool using the database section of the configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opts = PgConnectOptions::from_str(&config.url)?;
        if let Some(ms) = config.statement_timeout_ms {
            opts = opts.options([("statement_timeout", ms.to_string())]);
        }

        log::info!(
            "Connecting to PostgreSQL at {} (max_connections={})",
            config.redacted_url(),
            config.max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch<T>(&self, query: SqlQuery) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        log::debug!("SQL: {} {:?}", query.sql, query.params);
        let args = arguments(&query.params)?;
        let rows = sqlx::query_as_with::<_, T, _>(&query.sql, args)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

/// Encodes parameters in placeholder order.
fn arguments(params: &[SqlParam]) -> Result<PgArguments> {
    let mut args = PgArguments::default();
    for param in params {
        let added = match *param {
            SqlParam::Int(v) => args.add(v),
            SqlParam::BigInt(v) => args.add(v),
            SqlParam::Float(v) => args.add(v),
            SqlParam::Date(v) => args.add(v),
        };
        added.map_err(|e| Error::Encode(e.to_string()))?;
    }
    Ok(args)
}

#[derive(FromRow)]
struct SummaryRow {
    agrupamento: i32,
    media_risco: Option<f64>,
    total_pontos: i64,
}

#[derive(FromRow)]
struct RiskPointRow {
    id: i64,
    risco_fogo: Option<f64>,
    estado_id: i32,
    bioma_id: i32,
    data: NaiveDate,
    longitude: f64,
    latitude: f64,
}

#[derive(FromRow)]
struct HeatSpotRow {
    latitude: f64,
    longitude: f64,
    estado: String,
    bioma: String,
    risco_fogo: Option<f64>,
    data: NaiveDate,
    dia_sem_chuva: Option<i32>,
    precipitacao: Option<f64>,
    frp: Option<f64>,
}

#[derive(FromRow)]
struct BurnedAreaRow {
    latitude: f64,
    longitude: f64,
    estado: i32,
    bioma: i32,
    risco_fogo: Option<f64>,
    data: NaiveDate,
}

#[derive(FromRow)]
struct ChartRow {
    local: i32,
    media: Option<f64>,
    total: i64,
}

#[derive(FromRow)]
struct DateRow {
    valor: String,
}

#[derive(FromRow)]
struct ReportRow {
    linha: serde_json::Value,
}

/// Applies the grouping to an aggregated row.
fn summary(row: SummaryRow, grouping: Grouping) -> RegionSummary {
    let (estado, bioma) = match grouping {
        Grouping::State => (Some(row.agrupamento), None),
        Grouping::Biome => (None, Some(row.agrupamento)),
    };
    RegionSummary {
        estado,
        bioma,
        media: row.media_risco.unwrap_or(0.0),
        total: row.total_pontos,
    }
}

#[async_trait]
impl OccurrenceStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn risk_summary(
        &self,
        filter: &RegionFilter,
        date: NaiveDate,
        grouping: Grouping,
    ) -> Result<Vec<RegionSummary>> {
        let rows: Vec<SummaryRow> = self
            .fetch(sql::risk_summary(filter, date, grouping))
            .await?;
        Ok(rows.into_iter().map(|r| summary(r, grouping)).collect())
    }

    async fn risk_points(&self, filter: &RegionFilter) -> Result<Vec<RiskPoint>> {
        let rows: Vec<RiskPointRow> = self.fetch(sql::risk_points(filter)).await?;
        Ok(rows
            .into_iter()
            .map(|r| RiskPoint {
                id: r.id,
                risco_fogo: r.risco_fogo,
                estado_id: r.estado_id,
                bioma_id: r.bioma_id,
                data: r.data,
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
        let rows: Vec<HeatSpotRow> = self.fetch(sql::heat_spots(filter, range, limit)).await?;
        Ok(rows
            .into_iter()
            .map(|r| HeatSpot {
                latitude: r.latitude,
                longitude: r.longitude,
                estado: r.estado,
                bioma: r.bioma,
                risco_fogo: r.risco_fogo,
                data: r.data,
                dia_sem_chuva: r.dia_sem_chuva,
                precipitacao: r.precipitacao,
                frp: r.frp,
            })
            .collect())
    }

    async fn burned_areas(
        &self,
        filter: &RegionFilter,
        range: &DateRange,
    ) -> Result<Vec<BurnedAreaPoint>> {
        let rows: Vec<BurnedAreaRow> = self.fetch(sql::burned_areas(filter, range)).await?;
        Ok(rows
            .into_iter()
            .map(|r| BurnedAreaPoint {
                latitude: r.latitude,
                longitude: r.longitude,
                estado: r.estado,
                bioma: r.bioma,
                risco_fogo: r.risco_fogo,
                data: r.data,
            })
            .collect())
    }

    async fn chart(&self, dataset: Dataset, query: &ChartQuery) -> Result<Vec<ChartBucket>> {
        let rows: Vec<ChartRow> = self.fetch(sql::chart(dataset, query)).await?;
        Ok(rows
            .into_iter()
            .map(|r| ChartBucket {
                local: r.local,
                media: r.media,
                total: r.total,
            })
            .collect())
    }

    async fn available_dates(&self, dataset: Dataset) -> Result<Vec<String>> {
        let rows: Vec<DateRow> = self.fetch(sql::available_dates(dataset)).await?;
        Ok(rows.into_iter().map(|r| r.valor).collect())
    }

    async fn insert_heat_spot(&self, spot: &NewHeatSpot) -> Result<()> {
        let query = sql::insert_heat_spot(spot);
        let args = arguments(&query.params)?;
        sqlx::query_with(&query.sql, args)
            .execute(&self.pool)
            .await?;
        log::info!(
            "Inserted heat spot for state {} on {}",
            spot.estado_id,
            spot.data
        );
        Ok(())
    }

    async fn heat_spot_report(&self, range: &DateRange) -> Result<Vec<serde_json::Value>> {
        let refresh = sql::refresh_heat_spot_report(range);
        let read = sql::read_heat_spot_report();

        // The procedure rewrites the report table; read it back in the same
        // transaction so concurrent refreshes cannot interleave.
        let mut tx = self.pool.begin().await?;
        sqlx::query_with(&refresh.sql, arguments(&refresh.params)?)
            .execute(&mut *tx)
            .await?;
        let rows: Vec<ReportRow> = sqlx::query_as(&read.sql).fetch_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(rows.into_iter().map(|r| r.linha).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
