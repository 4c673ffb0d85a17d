//! SQL text and bind parameters for every query the API runs.
//!
//! Builders only interpolate `&'static str` identifiers that come from
//! [`Dataset`] and [`Grouping`]; every request value travels as a bind
//! parameter. Placeholders are numbered from the running parameter count,
//! so `$n` always refers to `params[n - 1]`.

use chrono::NaiveDate;
use ignis_core::types::{ChartQuery, NewHeatSpot};
use ignis_core::{Dataset, DateRange, Grouping, RegionFilter};

/// A typed bind parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SqlParam {
    /// `int4`
    Int(i32),
    /// `int8`
    BigInt(i64),
    /// `float8`
    Float(f64),
    /// `date`
    Date(NaiveDate),
}

/// SQL text plus its parameters, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    /// Statement text with `$n` placeholders.
    pub sql: String,
    /// Values for `$1..$n`.
    pub params: Vec<SqlParam>,
}

/// Accumulates `AND`-joined conditions and their parameters.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    conditions: Vec<String>,
    params: Vec<SqlParam>,
}

impl WhereBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn placeholder(&mut self, value: SqlParam) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    /// `column = $n`
    pub fn eq(&mut self, column: &'static str, value: SqlParam) -> &mut Self {
        let p = self.placeholder(value);
        self.conditions.push(format!("{column} = {p}"));
        self
    }

    /// `column BETWEEN $n AND $n+1`
    pub fn between(&mut self, column: &'static str, range: &DateRange) -> &mut Self {
        let start = self.placeholder(SqlParam::Date(range.start()));
        let end = self.placeholder(SqlParam::Date(range.end()));
        self.conditions
            .push(format!("{column} BETWEEN {start} AND {end}"));
        self
    }

    /// Optional state and biome equality conditions.
    pub fn region(
        &mut self,
        state_column: &'static str,
        biome_column: &'static str,
        filter: &RegionFilter,
    ) -> &mut Self {
        if let Some(state) = filter.state {
            self.eq(state_column, SqlParam::Int(state.get()));
        }
        if let Some(biome) = filter.biome {
            self.eq(biome_column, SqlParam::Int(biome.get()));
        }
        self
    }

    /// `WHERE a AND b`, or an empty string when there are no conditions.
    pub fn clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Appends a bound parameter that is not part of the WHERE clause
    /// (a LIMIT, for instance) and returns its placeholder.
    pub fn bind_extra(&mut self, value: SqlParam) -> String {
        self.placeholder(value)
    }

    /// Finishes with the given statement text.
    pub fn into_query(self, sql: String) -> SqlQuery {
        SqlQuery {
            sql,
            params: self.params,
        }
    }
}

/// Average risk per state or biome on one day (`GET /api/risco`).
pub fn risk_summary(filter: &RegionFilter, date: NaiveDate, grouping: Grouping) -> SqlQuery {
    let group = grouping.column();
    let mut w = WhereBuilder::new();
    w.region("estado_id", "bioma_id", filter)
        .eq("data", SqlParam::Date(date));
    let sql = format!(
        "SELECT {group}::int4 AS agrupamento, \
         AVG(risco_fogo)::float8 AS media_risco, \
         COUNT(*) AS total_pontos \
         FROM risco {where_clause} \
         GROUP BY {group} \
         ORDER BY {group}",
        where_clause = w.clause()
    );
    w.into_query(sql)
}

/// Every risk sample with coordinates (`GET /api/risco/pontos`).
pub fn risk_points(filter: &RegionFilter) -> SqlQuery {
    let mut w = WhereBuilder::new();
    w.region("estado_id", "bioma_id", filter);
    let sql = format!(
        "SELECT id::int8 AS id, risco_fogo::float8 AS risco_fogo, \
         estado_id::int4 AS estado_id, bioma_id::int4 AS bioma_id, data, \
         ST_X(geometria) AS longitude, ST_Y(geometria) AS latitude \
         FROM risco {where_clause}",
        where_clause = w.clause()
    );
    w.into_query(sql)
}

/// Heat spots in a date range joined with state and biome names
/// (`GET /api/foco_calor`).
pub fn heat_spots(filter: &RegionFilter, range: &DateRange, limit: u32) -> SqlQuery {
    let mut w = WhereBuilder::new();
    w.between("f.data", range)
        .region("f.estado_id", "f.bioma_id", filter);
    let where_clause = w.clause();
    let limit = w.bind_extra(SqlParam::BigInt(i64::from(limit)));
    let sql = format!(
        "SELECT ST_Y(f.geometria) AS latitude, ST_X(f.geometria) AS longitude, \
         e.estado AS estado, b.bioma AS bioma, \
         f.risco_fogo::float8 AS risco_fogo, f.data AS data, \
         f.dia_sem_chuva::int4 AS dia_sem_chuva, \
         f.precipitacao::float8 AS precipitacao, f.frp::float8 AS frp \
         FROM foco_calor f \
         JOIN estados e ON f.estado_id = e.id_estado \
         JOIN bioma b ON f.bioma_id = b.id \
         {where_clause} \
         LIMIT {limit}"
    );
    w.into_query(sql)
}

/// Burned area observations in a date range (`GET /api/area_queimada`).
pub fn burned_areas(filter: &RegionFilter, range: &DateRange) -> SqlQuery {
    let mut w = WhereBuilder::new();
    w.region("estado_id", "bioma_id", filter)
        .between("data_pas", range);
    let sql = format!(
        "SELECT ST_Y(geom) AS latitude, ST_X(geom) AS longitude, \
         estado_id::int4 AS estado, bioma_id::int4 AS bioma, \
         risco::float8 AS risco_fogo, data_pas AS data \
         FROM area_queimada {where_clause}",
        where_clause = w.clause()
    );
    w.into_query(sql)
}

/// Bar chart buckets (`GET /api/grafico/{dataset}`).
///
/// The risk chart also reports the mean risk, rounded to two decimals.
pub fn chart(dataset: Dataset, query: &ChartQuery) -> SqlQuery {
    let group = query.grouping.column();
    let mut w = WhereBuilder::new();
    w.between(dataset.date_column(), &query.range)
        .region("estado_id", "bioma_id", &query.filter);
    let media = match dataset {
        Dataset::FireRisk => "ROUND(AVG(risco_fogo)::numeric, 2)::float8",
        Dataset::HeatSpot | Dataset::BurnedArea => "NULL::float8",
    };
    let sql = format!(
        "SELECT {group}::int4 AS local, {media} AS media, COUNT(*) AS total \
         FROM {table} {where_clause} \
         GROUP BY {group} \
         ORDER BY total DESC, local",
        table = dataset.table(),
        where_clause = w.clause()
    );
    w.into_query(sql)
}

/// Distinct days (or months, for burned area) with data
/// (`GET /api/datas_disponiveis`).
pub fn available_dates(dataset: Dataset) -> SqlQuery {
    let column = dataset.date_column();
    let pattern = if dataset.is_monthly() { "MM" } else { "YYYY-MM-DD" };
    let sql = format!(
        "SELECT DISTINCT TO_CHAR({column}, '{pattern}') AS valor \
         FROM {table} \
         WHERE {column} IS NOT NULL \
         ORDER BY valor",
        table = dataset.table()
    );
    SqlQuery {
        sql,
        params: Vec::new(),
    }
}

/// Stored procedure call that inserts a heat spot.
pub fn insert_heat_spot(spot: &NewHeatSpot) -> SqlQuery {
    SqlQuery {
        sql: "CALL inserir_foco_calor($1, $2, $3, $4, $5, $6, $7, $8, $9)".to_string(),
        params: vec![
            SqlParam::Int(spot.estado_id.get()),
            SqlParam::Int(spot.bioma_id.get()),
            SqlParam::Date(spot.data),
            SqlParam::Float(spot.risco_fogo),
            SqlParam::Int(spot.dia_sem_chuva),
            SqlParam::Float(spot.precipitacao),
            SqlParam::Float(spot.frp),
            SqlParam::Float(spot.latitude),
            SqlParam::Float(spot.longitude),
        ],
    }
}

/// Procedure call that refreshes `relatorio_focos_estado` for a range.
pub fn refresh_heat_spot_report(range: &DateRange) -> SqlQuery {
    SqlQuery {
        sql: "CALL gerar_relatorio_focos_estado($1, $2)".to_string(),
        params: vec![SqlParam::Date(range.start()), SqlParam::Date(range.end())],
    }
}

/// Reads the refreshed report as JSON objects, largest totals first.
pub fn read_heat_spot_report() -> SqlQuery {
    SqlQuery {
        sql: "SELECT row_to_json(r) AS linha \
              FROM relatorio_focos_estado r \
              ORDER BY r.total_focos DESC"
            .to_string(),
        params: Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ignis_core::types::{BiomeId, StateId};
    use proptest::prelude::*;

    fn day(s: &str) -> NaiveDate {
        ignis_core::types::parse_date("data", s).unwrap()
    }

    fn range() -> DateRange {
        DateRange::new(day("2024-09-01"), day("2024-09-30")).unwrap()
    }

    fn filter(state: Option<i32>, biome: Option<i32>) -> RegionFilter {
        RegionFilter {
            state: state.map(|s| StateId::new(s).unwrap()),
            biome: biome.map(|b| BiomeId::new(b).unwrap()),
        }
    }

    /// Highest `$n` referenced in the statement.
    fn max_placeholder(sql: &str) -> usize {
        let bytes = sql.as_bytes();
        let mut max = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let digits: String = sql[i + 1..]
                    .chars()
                    .take_while(|c| c.is_ascii_digit())
                    .collect();
                if let Ok(n) = digits.parse::<usize>() {
                    max = max.max(n);
                }
            }
            i += 1;
        }
        max
    }

    #[test]
    fn test_where_builder_empty() {
        let w = WhereBuilder::new();
        assert_eq!(w.clause(), "");
    }

    #[test]
    fn test_where_builder_numbering() {
        let mut w = WhereBuilder::new();
        w.eq("estado_id", SqlParam::Int(51)).between("data", &range());
        assert_eq!(
            w.clause(),
            "WHERE estado_id = $1 AND data BETWEEN $2 AND $3"
        );
        let q = w.into_query(String::new());
        assert_eq!(
            q.params,
            vec![
                SqlParam::Int(51),
                SqlParam::Date(day("2024-09-01")),
                SqlParam::Date(day("2024-09-30")),
            ]
        );
    }

    #[test]
    fn test_risk_summary_by_biome() {
        let q = risk_summary(&filter(Some(51), None), day("2024-09-05"), Grouping::Biome);
        assert!(q.sql.contains("SELECT bioma_id::int4 AS agrupamento"));
        assert!(q.sql.contains("WHERE estado_id = $1 AND data = $2"));
        assert!(q.sql.contains("GROUP BY bioma_id"));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn test_risk_summary_date_only() {
        let q = risk_summary(&RegionFilter::default(), day("2024-09-05"), Grouping::State);
        assert!(q.sql.contains("WHERE data = $1"));
        assert_eq!(q.params, vec![SqlParam::Date(day("2024-09-05"))]);
    }

    #[test]
    fn test_risk_points_without_filter_has_no_where() {
        let q = risk_points(&RegionFilter::default());
        assert!(!q.sql.contains("WHERE"));
        assert!(q.sql.contains("ST_X(geometria) AS longitude"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn test_heat_spots_joins_and_limit() {
        let q = heat_spots(&filter(Some(51), Some(3)), &range(), 10_000);
        assert!(q.sql.contains("JOIN estados e ON f.estado_id = e.id_estado"));
        assert!(q.sql.contains("JOIN bioma b ON f.bioma_id = b.id"));
        assert!(
            q.sql
                .contains("WHERE f.data BETWEEN $1 AND $2 AND f.estado_id = $3 AND f.bioma_id = $4")
        );
        assert!(q.sql.ends_with("LIMIT $5"));
        assert_eq!(q.params[4], SqlParam::BigInt(10_000));
    }

    #[test]
    fn test_burned_areas_uses_pass_date() {
        let q = burned_areas(&filter(None, Some(2)), &range());
        assert!(q.sql.contains("WHERE bioma_id = $1 AND data_pas BETWEEN $2 AND $3"));
        assert!(q.sql.contains("FROM area_queimada"));
    }

    #[test]
    fn test_chart_risk_has_rounded_mean() {
        let query = ChartQuery {
            range: range(),
            grouping: Grouping::State,
            filter: RegionFilter::default(),
        };
        let q = chart(Dataset::FireRisk, &query);
        assert!(q.sql.contains("ROUND(AVG(risco_fogo)::numeric, 2)"));
        assert!(q.sql.contains("FROM risco WHERE data BETWEEN $1 AND $2"));
        assert!(q.sql.contains("ORDER BY total DESC"));
    }

    #[test]
    fn test_chart_burned_area_counts_only() {
        let query = ChartQuery {
            range: range(),
            grouping: Grouping::Biome,
            filter: filter(Some(17), None),
        };
        let q = chart(Dataset::BurnedArea, &query);
        assert!(q.sql.contains("NULL::float8 AS media"));
        assert!(q.sql.contains("data_pas BETWEEN $1 AND $2 AND estado_id = $3"));
        assert!(q.sql.contains("GROUP BY bioma_id"));
    }

    #[test]
    fn test_available_dates_patterns() {
        let daily = available_dates(Dataset::HeatSpot);
        assert!(daily.sql.contains("TO_CHAR(data, 'YYYY-MM-DD')"));
        assert!(daily.sql.contains("FROM foco_calor"));
        let monthly = available_dates(Dataset::BurnedArea);
        assert!(monthly.sql.contains("TO_CHAR(data_pas, 'MM')"));
    }

    #[test]
    fn test_insert_heat_spot_param_order() {
        let spot: NewHeatSpot = serde_json::from_value(serde_json::json!({
            "estado_id": 51, "bioma_id": 3, "data": "2024-09-01",
            "risco_fogo": 0.8, "dia_sem_chuva": 12, "precipitacao": 0.0,
            "frp": 30.5, "latitude": -12.5, "longitude": -55.7
        }))
        .unwrap();
        let q = insert_heat_spot(&spot);
        assert_eq!(max_placeholder(&q.sql), 9);
        assert_eq!(q.params[0], SqlParam::Int(51));
        assert_eq!(q.params[4], SqlParam::Int(12));
        assert_eq!(q.params[8], SqlParam::Float(-55.7));
    }

    #[test]
    fn test_report_queries() {
        let refresh = refresh_heat_spot_report(&range());
        assert_eq!(refresh.params.len(), 2);
        assert!(read_heat_spot_report().sql.contains("ORDER BY r.total_focos DESC"));
    }

    proptest! {
        #[test]
        fn test_placeholders_match_params(
            state in proptest::option::of(1i32..100),
            biome in proptest::option::of(1i32..7),
            by_biome in any::<bool>(),
            limit in 1u32..50_000,
        ) {
            let f = filter(state, biome);
            let grouping = if by_biome { Grouping::Biome } else { Grouping::State };
            let chart_query = ChartQuery { range: range(), grouping, filter: f };
            let queries = vec![
                risk_summary(&f, day("2024-09-02"), grouping),
                risk_points(&f),
                heat_spots(&f, &range(), limit),
                burned_areas(&f, &range()),
                chart(Dataset::FireRisk, &chart_query),
                chart(Dataset::HeatSpot, &chart_query),
                chart(Dataset::BurnedArea, &chart_query),
            ];
            for q in queries {
                prop_assert_eq!(max_placeholder(&q.sql), q.params.len());
            }
        }
    }
}
