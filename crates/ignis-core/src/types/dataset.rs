//! Dataset and grouping selectors.
//!
//! Both enums map request strings onto fixed SQL identifiers. Table and
//! column names are only ever produced here, never copied from a request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// One of the three monitored datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dataset {
    /// Daily fire risk index samples.
    #[serde(rename = "risco")]
    FireRisk,
    /// Satellite heat spot detections.
    #[serde(rename = "foco_calor")]
    HeatSpot,
    /// Burned area observations.
    #[serde(rename = "area_queimada")]
    BurnedArea,
}

impl Dataset {
    /// All datasets, in display order.
    pub const ALL: [Dataset; 3] = [Dataset::FireRisk, Dataset::HeatSpot, Dataset::BurnedArea];

    /// Wire name used in query strings and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::FireRisk => "risco",
            Dataset::HeatSpot => "foco_calor",
            Dataset::BurnedArea => "area_queimada",
        }
    }

    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            Dataset::FireRisk => "risco",
            Dataset::HeatSpot => "foco_calor",
            Dataset::BurnedArea => "area_queimada",
        }
    }

    /// Column holding the observation date.
    pub fn date_column(&self) -> &'static str {
        match self {
            Dataset::BurnedArea => "data_pas",
            Dataset::FireRisk | Dataset::HeatSpot => "data",
        }
    }

    /// Whether available dates are reported as months rather than days.
    ///
    /// Burned area is published as monthly composites.
    pub fn is_monthly(&self) -> bool {
        matches!(self, Dataset::BurnedArea)
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "risco" => Ok(Dataset::FireRisk),
            "foco_calor" => Ok(Dataset::HeatSpot),
            "area_queimada" => Ok(Dataset::BurnedArea),
            other => Err(Error::validation_field(
                "tipo",
                format!("invalid tipo '{other}'; use risco, foco_calor or area_queimada"),
            )),
        }
    }
}

/// How aggregate results are bucketed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grouping {
    /// Group by Brazilian state.
    #[default]
    #[serde(rename = "estado")]
    State,
    /// Group by biome.
    #[serde(rename = "bioma")]
    Biome,
}

impl Grouping {
    /// Interprets the `local` request parameter.
    ///
    /// `bioma` selects biome grouping; anything else, including an absent
    /// value, falls back to state grouping.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("bioma") => Grouping::Biome,
            _ => Grouping::State,
        }
    }

    /// Region id column to group on.
    pub fn column(&self) -> &'static str {
        match self {
            Grouping::State => "estado_id",
            Grouping::Biome => "bioma_id",
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grouping::State => f.write_str("estado"),
            Grouping::Biome => f.write_str("bioma"),
        }
    }
}
