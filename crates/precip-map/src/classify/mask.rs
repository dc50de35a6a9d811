//! Visibility masking.
//!
//! Masked values become NaN. The point stays in the set so the collection
//! keeps its shape, it just has nothing to draw.

use serde::{Deserialize, Serialize};

/// Display thresholds below which values are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskThresholds {
    /// Observed/normal values at or below this are hidden
    pub observed_floor: f64,
    /// Percent-of-normal values strictly inside `(low, high)` are hidden
    pub percent_window: (f64, f64),
    /// Absolute departure radius per bracket, coarse to fine
    pub absolute_radii: [f64; 3],
}

impl Default for MaskThresholds {
    fn default() -> Self {
        Self {
            observed_floor: 0.01,
            percent_window: (100.0, 110.0),
            absolute_radii: [2.0, 1.0, 0.5],
        }
    }
}

/// The masking rule chosen for one classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaskRule {
    /// Hide `v <= floor`
    AtOrBelow { floor: f64 },
    /// Hide `|v| <= radius`
    NearZero { radius: f64 },
    /// Hide `low < v < high`
    Window { low: f64, high: f64 },
}

impl MaskRule {
    /// Whether `value` is hidden by this rule. NaN is always hidden.
    pub fn hides(&self, value: f32) -> bool {
        if value.is_nan() {
            return true;
        }
        let v = value as f64;
        match *self {
            MaskRule::AtOrBelow { floor } => v <= floor,
            MaskRule::NearZero { radius } => v.abs() <= radius,
            MaskRule::Window { low, high } => low < v && v < high,
        }
    }

    /// Masked copy of `values`.
    pub fn apply(&self, values: &[f32]) -> Vec<f32> {
        values
            .iter()
            .map(|&v| if self.hides(v) { f32::NAN } else { v })
            .collect()
    }

    /// Mask `values` in place. Destructive: hidden entries are overwritten
    /// with NaN.
    pub fn apply_in_place(&self, values: &mut [f32]) {
        for v in values.iter_mut() {
            if self.hides(*v) {
                *v = f32::NAN;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_or_below() {
        let rule = MaskRule::AtOrBelow { floor: 0.01 };
        assert!(rule.hides(0.005));
        assert!(rule.hides(0.01));
        assert!(rule.hides(0.0));
        assert!(!rule.hides(0.02));
    }

    #[test]
    fn test_near_zero() {
        let rule = MaskRule::NearZero { radius: 1.0 };
        assert!(rule.hides(-1.0));
        assert!(rule.hides(0.3));
        assert!(!rule.hides(1.5));
        assert!(!rule.hides(-1.01));
    }

    #[test]
    fn test_open_window() {
        let rule = MaskRule::Window {
            low: 100.0,
            high: 110.0,
        };
        assert!(rule.hides(105.0));
        assert!(!rule.hides(100.0));
        assert!(!rule.hides(110.0));
        assert!(!rule.hides(99.0));
        assert!(!rule.hides(111.0));
    }

    #[test]
    fn test_apply_keeps_length() {
        let rule = MaskRule::AtOrBelow { floor: 0.01 };
        let masked = rule.apply(&[0.005, 0.02, f32::NAN, 3.0]);
        assert_eq!(masked.len(), 4);
        assert!(masked[0].is_nan());
        assert_eq!(masked[1], 0.02);
        assert!(masked[2].is_nan());
        assert_eq!(masked[3], 3.0);
    }

    #[test]
    fn test_apply_in_place() {
        let mut values = vec![105.0, 99.0];
        MaskRule::Window {
            low: 100.0,
            high: 110.0,
        }
        .apply_in_place(&mut values);
        assert!(values[0].is_nan());
        assert_eq!(values[1], 99.0);
    }

    #[test]
    fn test_thresholds_partial_defaults() {
        let thresholds: MaskThresholds = serde_json::from_str(r#"{"observed_floor": 0.05}"#).unwrap();
        assert_eq!(thresholds.observed_floor, 0.05);
        assert_eq!(thresholds.percent_window, (100.0, 110.0));
        assert_eq!(thresholds.absolute_radii, [2.0, 1.0, 0.5]);
    }
}
