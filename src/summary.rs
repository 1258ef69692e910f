//! Coverage summary parsing and validation
//!
//! Parses the per-model coverage summary JSON (subject, lane, id, and a map
//! of depth threshold -> cumulative percentage of target space covered) and
//! validates it into an ordered, internally consistent form.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coverage data for a single genome model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCoverage {
    /// Sample subject name (primary sort key)
    pub subject_name: String,

    /// Flow cell lane
    pub lane: String,

    /// Model id (tie-break sort key)
    pub id: u64,

    /// Depth threshold -> cumulative % of target space covered at that depth.
    /// Keys arrive as JSON object keys, so they are strings here.
    pub pc_target_space_covered: HashMap<String, f64>,
}

impl ModelCoverage {
    /// Display label used in the chart, e.g. "H_GV-933124G-S.9017 (L3)"
    pub fn display_name(&self) -> String {
        format!("{} (L{})", self.subject_name, self.lane)
    }
}

/// Raw coverage summary as fetched: model identifier -> coverage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageSummary(pub HashMap<String, ModelCoverage>);

/// A validated summary: models sorted, depths ordered descending, and every
/// model known to carry exactly the canonical depth-key set.
#[derive(Debug, Clone)]
pub struct ValidatedSummary {
    /// Depth thresholds, highest first
    pub depths: Vec<u32>,
    /// Models sorted by subject_name then id
    pub models: Vec<ModelCoverage>,
}

impl CoverageSummary {
    /// Parse a coverage summary from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let summary: CoverageSummary =
            serde_json::from_str(content).context("Failed to parse coverage summary JSON")?;
        Ok(summary)
    }

    /// Validate the summary and fix an ordering for models and depths.
    ///
    /// The first model's depth-key set (sorted descending) is canonical;
    /// every other model must contain exactly that set. Percentages must be
    /// finite, within 0-100, and non-decreasing as depth decreases.
    pub fn validate(self) -> Result<ValidatedSummary> {
        if self.0.is_empty() {
            anyhow::bail!("coverage summary contains no models");
        }

        let mut models: Vec<ModelCoverage> = self.0.into_values().collect();
        models.sort_by(|a, b| {
            a.subject_name
                .cmp(&b.subject_name)
                .then(a.id.cmp(&b.id))
        });

        // Canonical depth set from the first model, highest depth first
        let mut depths: Vec<u32> = models[0]
            .pc_target_space_covered
            .keys()
            .map(|k| {
                k.parse::<u32>()
                    .with_context(|| format!("Invalid depth key '{}'", k))
            })
            .collect::<Result<_>>()?;
        depths.sort_unstable_by(|a, b| b.cmp(a));

        for model in &models {
            let covered = &model.pc_target_space_covered;
            if covered.len() != depths.len() {
                anyhow::bail!(
                    "Model {} has {} depth keys, expected {}",
                    model.display_name(),
                    covered.len(),
                    depths.len()
                );
            }

            let mut prev: Option<(u32, f64)> = None;
            for &depth in &depths {
                let pct = *covered.get(&depth.to_string()).ok_or_else(|| {
                    anyhow::anyhow!(
                        "Model {} is missing depth {}",
                        model.display_name(),
                        depth
                    )
                })?;

                if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                    anyhow::bail!(
                        "Model {} has coverage {} at depth {} (must be 0-100)",
                        model.display_name(),
                        pct,
                        depth
                    );
                }

                // Coverage is cumulative: lowering the depth threshold can
                // only include more positions, never fewer.
                if let Some((prev_depth, prev_pct)) = prev {
                    if pct < prev_pct {
                        anyhow::bail!(
                            "Model {}: coverage decreases from {:.3}% at depth {} to {:.3}% at depth {} (cumulative coverage must be non-decreasing as depth decreases)",
                            model.display_name(),
                            prev_pct,
                            prev_depth,
                            pct,
                            depth
                        );
                    }
                }
                prev = Some((depth, pct));
            }
        }

        Ok(ValidatedSummary { depths, models })
    }
}

impl ValidatedSummary {
    /// Cumulative coverage for the model at `index`, along the canonical
    /// depth order. Validation guarantees every model carries every depth
    /// key, so the lookups cannot miss.
    pub fn cumulative_for(&self, index: usize) -> Vec<f64> {
        let model = &self.models[index];
        self.depths
            .iter()
            .map(|d| model.pc_target_space_covered[&d.to_string()])
            .collect()
    }
}
