//! Legend sidecar written next to each map image.

use precip_common::Variant;
use precip_map::ClassificationSpec;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Machine-readable description of a map's colour classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub variant: Variant,
    pub units: String,
    pub statistic: Option<f64>,
    pub bracket: usize,
    pub edges: Vec<f64>,
    pub labels: Vec<String>,
    /// Hex colour of each bin, `edges.len() - 1` entries
    pub colors: Vec<String>,
    /// Points drawn / points inside the boundary
    pub visible_points: usize,
    pub total_points: usize,
}

impl Legend {
    pub fn new(spec: &ClassificationSpec, visible_points: usize, total_points: usize) -> Self {
        Self {
            variant: spec.variant,
            units: spec.variant.units().to_string(),
            statistic: spec.statistic,
            bracket: spec.bracket,
            edges: spec.edges.clone(),
            labels: spec.labels.clone(),
            colors: spec.colors.iter().map(|c| c.to_hex()).collect(),
            visible_points,
            total_points,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precip_map::classify;

    #[test]
    fn test_legend_from_classification() {
        let spec = classify(&[3.0], Variant::Observed);
        let legend = Legend::new(&spec, 10, 12);
        assert_eq!(legend.edges.len(), 17);
        assert_eq!(legend.colors.len(), 16);
        assert_eq!(legend.colors[0], "#9a9a9a");
        assert_eq!(legend.colors[15], "#e1e1e1");
        assert_eq!(legend.statistic, Some(3.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let spec = classify(&[-3.0, 9.5], Variant::DepartureAbsolute);
        let legend = Legend::new(&spec, 0, 0);
        let json = legend.to_json().unwrap();
        assert!(json.contains("\"variant\": \"departure_absolute\""));
        assert_eq!(Legend::from_json(&json).unwrap(), legend);
    }
}
