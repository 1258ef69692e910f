//! Cumulative to stacked coverage conversion
//!
//! Coverage summaries report cumulative percentages ("% of target space
//! covered at >= depth"). Stacked bar rendering needs the portion unique to
//! each depth band, so each band subtracts the next-higher depth's
//! cumulative value.

use crate::summary::ValidatedSummary;
use serde::{Deserialize, Serialize};

/// Stacked coverage bands for one model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedModel {
    /// Display label, e.g. "H_GV-933124G-S.9017 (L3)"
    pub label: String,
    /// Per-band stacked percentages, rounded to 3 decimals (layout input)
    pub stacked: Vec<f64>,
    /// Unrounded cumulative percentages, parallel to `stacked` (tooltips)
    pub full: Vec<f64>,
}

/// Stacked coverage for all models, parallel to a descending depth order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedCoverage {
    /// Depth thresholds, highest first
    pub depths: Vec<u32>,
    /// One entry per model, in summary sort order
    pub models: Vec<StackedModel>,
}

/// Round to `places` decimal places
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Convert a validated summary's cumulative percentages to stacked bands.
///
/// band[0] is the cumulative coverage at the highest depth (the smallest
/// cumulative value); band[i] is cumulative[i] - cumulative[i-1]. The bands
/// telescope: their sum equals the cumulative coverage at the lowest depth.
pub fn stack_coverage(summary: &ValidatedSummary) -> StackedCoverage {
    let models = summary
        .models
        .iter()
        .enumerate()
        .map(|(index, model)| {
            let full = summary.cumulative_for(index);
            let stacked = full
                .iter()
                .enumerate()
                .map(|(i, &cumulative)| {
                    let band = if i == 0 {
                        cumulative
                    } else {
                        cumulative - full[i - 1]
                    };
                    round_to(band, 3)
                })
                .collect();
            StackedModel {
                label: model.display_name(),
                stacked,
                full,
            }
        })
        .collect();

    StackedCoverage {
        depths: summary.depths.clone(),
        models,
    }
}
