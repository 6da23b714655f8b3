//! Point-in-time energy figures used as model context.
//!
//! A snapshot is rebuilt for every chat request from three independently
//! fetched resources. Any field the upstream did not provide (or that could
//! not be fetched at all) is `None`; a snapshot is never an error.

use serde::{Deserialize, Serialize};

/// Latest installed capacity by source, in MW.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityFigures {
    pub thermal: Option<f64>,
    pub hydro: Option<f64>,
    pub nuclear: Option<f64>,
    pub renewable: Option<f64>,
}

impl CapacityFigures {
    pub fn is_empty(&self) -> bool {
        self.thermal.is_none()
            && self.hydro.is_none()
            && self.nuclear.is_none()
            && self.renewable.is_none()
    }
}

/// Latest annual generation by source, in GWh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationFigures {
    /// Financial-year label as published upstream (e.g. "2023-24").
    pub year: Option<String>,
    pub thermal: Option<f64>,
    pub hydro: Option<f64>,
    pub nuclear: Option<f64>,
    pub renewable: Option<f64>,
}

impl GenerationFigures {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.thermal.is_none()
            && self.hydro.is_none()
            && self.nuclear.is_none()
            && self.renewable.is_none()
    }
}

/// Live national totals from the map header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealtimeFigures {
    pub total_capacity: Option<f64>,
    pub online_capacity: Option<f64>,
    pub today_generation: Option<f64>,
}

impl RealtimeFigures {
    pub fn is_empty(&self) -> bool {
        self.total_capacity.is_none()
            && self.online_capacity.is_none()
            && self.today_generation.is_none()
    }
}

/// Aggregated figures for one chat request.
///
/// Serializes only the sections that carry at least one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySnapshot {
    #[serde(default, skip_serializing_if = "CapacityFigures::is_empty")]
    pub capacity: CapacityFigures,

    #[serde(default, skip_serializing_if = "GenerationFigures::is_empty")]
    pub generation: GenerationFigures,

    #[serde(default, skip_serializing_if = "RealtimeFigures::is_empty")]
    pub realtime: RealtimeFigures,
}

impl EnergySnapshot {
    /// True when no section produced a single value.
    pub fn is_empty(&self) -> bool {
        self.capacity.is_empty() && self.generation.is_empty() && self.realtime.is_empty()
    }
}
