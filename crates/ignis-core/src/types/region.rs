//! State and biome identifiers and the optional region filter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Identifier of a Brazilian state (`estados.id_estado`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(i32);

/// Identifier of a biome (`bioma.id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeId(i32);

/// Known biomes with their display names.
const BIOMES: [(i32, &str); 6] = [
    (1, "Amazônia"),
    (2, "Caatinga"),
    (3, "Cerrado"),
    (4, "Mata Atlântica"),
    (5, "Pampa"),
    (6, "Pantanal"),
];

macro_rules! region_id {
    ($ty:ident, $what:literal) => {
        impl $ty {
            /// Creates an id, rejecting zero and negative values.
            pub fn new(id: i32) -> Result<Self> {
                if id > 0 {
                    Ok(Self(id))
                } else {
                    Err(Error::validation(format!(
                        "{} id must be positive, got {id}",
                        $what
                    )))
                }
            }

            /// Returns the raw database id.
            pub fn get(&self) -> i32 {
                self.0
            }

            /// Parses an id from a request parameter.
            pub fn parse(field: &str, value: &str) -> Result<Self> {
                let id = value.trim().parse::<i32>().map_err(|_| {
                    Error::validation_field(
                        field,
                        format!("{field} must be a numeric {} id, got '{value}'", $what),
                    )
                })?;
                Self::new(id).map_err(|e| match e {
                    Error::Validation { message, .. } => Error::validation_field(field, message),
                    other => other,
                })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

region_id!(StateId, "state");
region_id!(BiomeId, "biome");

impl BiomeId {
    /// Display name for the six mapped biomes.
    pub fn name(&self) -> Option<&'static str> {
        BIOMES
            .iter()
            .find(|(id, _)| *id == self.0)
            .map(|(_, name)| *name)
    }
}

/// Optional state/biome restriction shared by every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionFilter {
    /// Only rows in this state.
    pub state: Option<StateId>,
    /// Only rows in this biome.
    pub biome: Option<BiomeId>,
}

impl RegionFilter {
    /// Builds a filter from raw request parameters.
    ///
    /// Missing and blank values both mean "no restriction".
    pub fn from_params(state: Option<&str>, biome: Option<&str>) -> Result<Self> {
        let state = non_blank(state)
            .map(|v| StateId::parse("estado", v))
            .transpose()?;
        let biome = non_blank(biome)
            .map(|v| BiomeId::parse("bioma", v))
            .transpose()?;
        Ok(Self { state, biome })
    }

    /// Filter restricted to a single state.
    pub fn state(id: StateId) -> Self {
        Self {
            state: Some(id),
            biome: None,
        }
    }

    /// Whether a row with the given region ids passes the filter.
    pub fn matches(&self, state_id: i32, biome_id: i32) -> bool {
        self.state.is_none_or(|s| s.get() == state_id)
            && self.biome.is_none_or(|b| b.get() == biome_id)
    }

    /// True when no restriction is set.
    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.biome.is_none()
    }
}

/// Treats blank request values as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
