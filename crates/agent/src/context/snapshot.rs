//! Pull the latest figures out of raw dashboard payloads.

use crate::persona::SNAPSHOT_HEADER;
use gargi_core::snapshot::{CapacityFigures, EnergySnapshot, GenerationFigures, RealtimeFigures};
use serde_json::Value;

/// Latest point of `linechartforCapacity`.
pub fn extract_capacity(payload: &Value) -> CapacityFigures {
    let Some(latest) = last_point(payload, "linechartforCapacity") else {
        return CapacityFigures::default();
    };
    CapacityFigures {
        thermal: number(&latest["installed_capacity_thermal"]),
        hydro: number(&latest["installed_capacity_hydro"]),
        nuclear: number(&latest["installed_capacity_nuclear"]),
        renewable: number(&latest["installed_capacity_res"]),
    }
}

/// Latest point of `linechartforGeneration`.
pub fn extract_generation(payload: &Value) -> GenerationFigures {
    let Some(latest) = last_point(payload, "linechartforGeneration") else {
        return GenerationFigures::default();
    };
    GenerationFigures {
        year: label(&latest["financial_year"]),
        thermal: number(&latest["thermal_total"]),
        hydro: number(&latest["hydro"]),
        nuclear: number(&latest["nuclear"]),
        renewable: number(&latest["renewable_energy_sources"]),
    }
}

/// National totals from the map payload's `headerMap`.
pub fn extract_realtime(payload: &Value) -> RealtimeFigures {
    let header = &payload["headerMap"];
    RealtimeFigures {
        total_capacity: number(&header["CP_OBJ"]["installed_capacity"]),
        online_capacity: number(&header["CP_OBJ"]["online_capacity"]),
        today_generation: number(&header["GN_OBJ"]["actual_generation"]),
    }
}

/// `"\n\nCurrent India Energy Data:\n"` plus pretty JSON, or `""` for an
/// empty snapshot.
pub fn render_snapshot(snapshot: &EnergySnapshot) -> String {
    if snapshot.is_empty() {
        return String::new();
    }
    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => format!("{SNAPSHOT_HEADER}{json}"),
        Err(_) => String::new(),
    }
}

fn last_point<'a>(payload: &'a Value, series: &str) -> Option<&'a Value> {
    payload.get(series)?.as_array()?.last()
}

/// Numbers arrive either as JSON numbers or as numeric strings, sometimes
/// with thousands separators.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
