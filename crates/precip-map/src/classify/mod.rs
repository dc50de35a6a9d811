//! Data-driven classification of precipitation values.
//!
//! Picks bin edges, tick labels, colours and a masking rule from the value
//! range actually present in the clipped data:
//!
//! | Variant              | Statistic     | Brackets            | Mask                 |
//! |----------------------|---------------|---------------------|----------------------|
//! | Observed, Normal     | `max(v)`      | >50, >20, >10, else | `v <= floor`         |
//! | DepartureAbsolute    | `max(\|v\|)`  | >16, >8, else       | `\|v\| <= radius`    |
//! | DeparturePercent     | `max(\|v\|)`  | single table        | `low < v < high`     |
//!
//! Bins are left-inclusive and right-exclusive: value `v` falls in bin `k`
//! when `edges[k] <= v < edges[k + 1]`.

mod mask;
pub mod tables;

pub use mask::{MaskRule, MaskThresholds};

use precip_common::{Color, Palette, Variant};
use serde::Serialize;
use tracing::info;

use tables::{
    Bracket, ABSOLUTE_BRACKETS, ACCUMULATION_BRACKETS, ACCUMULATION_COLORS, DEPARTURE_COLORS,
    PERCENT_BRACKETS,
};

/// Everything a renderer needs to colour one map.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationSpec {
    pub variant: Variant,
    /// Magnitude statistic the bracket was chosen from
    pub statistic: Option<f64>,
    /// Index of the chosen bracket, 0 = coarsest
    pub bracket: usize,
    pub edges: Vec<f64>,
    pub labels: Vec<String>,
    pub palette: Palette,
    /// One colour per bin, `edges.len() - 1` entries
    pub colors: Vec<Color>,
    pub mask: MaskRule,
}

impl ClassificationSpec {
    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Bin holding `value`, or `None` for NaN and values outside the edges.
    pub fn bin_index(&self, value: f32) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let v = value as f64;
        let at_or_below = self.edges.partition_point(|&edge| edge <= v);
        if at_or_below == 0 || at_or_below >= self.edges.len() {
            None
        } else {
            Some(at_or_below - 1)
        }
    }

    pub fn color_for(&self, value: f32) -> Option<Color> {
        self.bin_index(value).and_then(|bin| self.colors.get(bin).copied())
    }

    /// Masked copy of `values`.
    pub fn apply_mask(&self, values: &[f32]) -> Vec<f32> {
        self.mask.apply(values)
    }
}

/// Largest magnitude in `values`, ignoring NaN.
///
/// Departures use the absolute value so that dry and wet extremes weigh
/// the same. Returns `None` when no value is present.
pub fn magnitude_statistic(values: &[f32], variant: Variant) -> Option<f64> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .map(|&v| {
            let v = v as f64;
            if variant.is_departure() {
                v.abs()
            } else {
                v
            }
        })
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
}

/// Classify with the default display thresholds.
pub fn classify(values: &[f32], variant: Variant) -> ClassificationSpec {
    classify_with(values, variant, &MaskThresholds::default())
}

/// Classify `values` for `variant` using custom display thresholds.
pub fn classify_with(
    values: &[f32],
    variant: Variant,
    thresholds: &MaskThresholds,
) -> ClassificationSpec {
    let statistic = magnitude_statistic(values, variant);
    let brackets = brackets_for(variant);
    let bracket = select_bracket(brackets, statistic);
    let table = &brackets[bracket];

    let mask = match variant {
        Variant::Observed | Variant::Normal => MaskRule::AtOrBelow {
            floor: thresholds.observed_floor,
        },
        Variant::DepartureAbsolute => MaskRule::NearZero {
            radius: thresholds.absolute_radii[bracket.min(thresholds.absolute_radii.len() - 1)],
        },
        Variant::DeparturePercent => MaskRule::Window {
            low: thresholds.percent_window.0,
            high: thresholds.percent_window.1,
        },
    };

    let palette = palette_for(variant);
    let colors = palette.discretize(table.edges.len() - 1);

    info!(
        variant = %variant,
        statistic = ?statistic,
        bracket,
        bins = colors.len(),
        "Selected classification"
    );

    ClassificationSpec {
        variant,
        statistic,
        bracket,
        edges: table.edges.to_vec(),
        labels: table.labels.iter().map(|s| s.to_string()).collect(),
        palette,
        colors,
        mask,
    }
}

fn brackets_for(variant: Variant) -> &'static [Bracket] {
    match variant {
        Variant::Observed | Variant::Normal => &ACCUMULATION_BRACKETS,
        Variant::DepartureAbsolute => &ABSOLUTE_BRACKETS,
        Variant::DeparturePercent => &PERCENT_BRACKETS,
    }
}

fn palette_for(variant: Variant) -> Palette {
    let (name, colors) = if variant.is_departure() {
        ("departure", &DEPARTURE_COLORS)
    } else {
        ("accumulation", &ACCUMULATION_COLORS)
    };
    Palette {
        name: name.to_string(),
        colors: colors.to_vec(),
    }
}

/// First bracket whose threshold the statistic exceeds; the last (finest)
/// bracket when none does or there is no statistic.
fn select_bracket(brackets: &[Bracket], statistic: Option<f64>) -> usize {
    let last = brackets.len().saturating_sub(1);
    let Some(stat) = statistic else {
        return last;
    };
    brackets
        .iter()
        .position(|b| matches!(b.above, Some(threshold) if stat > threshold))
        .unwrap_or(last)
}
