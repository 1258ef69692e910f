//! Chart scene construction
//!
//! Builds a renderable scene description (rows, segments, grid rules,
//! legend) from stacked coverage data. Pure data in, pure data out: the
//! renderer decides nothing about layout, and nothing here touches output.

use crate::stack::StackedCoverage;
use crate::style::ChartStyle;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One colored segment of a model's bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// X offset within the plot area, pixels
    pub x: f64,
    /// Segment width, pixels
    pub width: f64,
    /// Fill color (from the depth-band palette)
    pub color: String,
    /// Hover text: depth and the unrounded cumulative percentage
    pub tooltip: String,
    /// Numeric label shown on the first (highest-depth) segment only
    pub value_label: Option<String>,
}

/// One horizontal bar row per model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarRow {
    /// Model display name, drawn left of the plot area
    pub label: String,
    /// Y offset of the bar within the plot area, pixels
    pub y: f64,
    /// Bar height, pixels
    pub height: f64,
    pub segments: Vec<Segment>,
}

/// A vertical grid rule with its tick label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRule {
    /// Coverage percentage this rule marks
    pub pct: u32,
    /// X offset within the plot area, pixels
    pub x: f64,
    /// Stroke color
    pub color: String,
}

/// Legend entry: depth value and its swatch color
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendEntry {
    pub depth: u32,
    pub color: String,
}

/// Complete chart scene, ready for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartScene {
    /// Plot area width, pixels
    pub plot_width: u32,
    /// Plot area height: row_height * number of models
    pub plot_height: u32,
    /// Margins around the plot area (top, left, right, bottom)
    pub margin_top: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub rows: Vec<BarRow>,
    pub rules: Vec<GridRule>,
    pub legend: Vec<LegendEntry>,
    /// Axis title, e.g. "coverage (%)"
    pub axis_title: String,
}

impl ChartScene {
    /// Total rendered width including margins
    pub fn total_width(&self) -> u32 {
        self.margin_left + self.plot_width + self.margin_right
    }

    /// Total rendered height including margins
    pub fn total_height(&self) -> u32 {
        self.margin_top + self.plot_height + self.margin_bottom
    }
}

/// Map a percentage (0-100) to an x offset within the plot area.
/// The scale leaves 10px of headroom so the 100% rule stays inside.
fn x_scale(pct: f64, plot_width: u32) -> f64 {
    pct / 100.0 * (plot_width as f64 - 10.0)
}

/// Grid rule color: neutral at 0, highlighted at the domain threshold,
/// full-coverage marker at 100, faint elsewhere.
fn rule_color(pct: u32, highlight_pct: u32) -> String {
    if pct == highlight_pct {
        "#F00".to_string()
    } else {
        match pct {
            0 => "#AAA".to_string(),
            100 => "#CCC".to_string(),
            _ => "rgba(255,255,255,.3)".to_string(),
        }
    }
}

/// Build the chart scene for stacked coverage data.
///
/// One row per model in summary order, one segment per depth band in
/// descending-depth order. Segment widths come from the rounded stacked
/// values; tooltips carry the unrounded cumulative values.
pub fn build_scene(coverage: &StackedCoverage, style: &ChartStyle) -> Result<ChartScene> {
    if coverage.models.is_empty() {
        anyhow::bail!("cannot build chart scene without models");
    }

    let plot_width = style.width;
    let plot_height = style.row_height * coverage.models.len() as u32;
    let bar_height = style.row_height as f64 * 0.9;

    let rows = coverage
        .models
        .iter()
        .enumerate()
        .map(|(row_idx, model)| {
            let mut x = 0.0;
            let segments = model
                .stacked
                .iter()
                .enumerate()
                .map(|(band_idx, &band)| {
                    let width = x_scale(band, plot_width);
                    let segment = Segment {
                        x,
                        width,
                        color: style.color_for(band_idx).to_string(),
                        tooltip: format!(
                            "depth: {}; target space covered: {}%",
                            coverage.depths[band_idx], model.full[band_idx]
                        ),
                        value_label: if band_idx == 0 {
                            Some(format!("{:.1}", band))
                        } else {
                            None
                        },
                    };
                    x += width;
                    segment
                })
                .collect();

            BarRow {
                label: model.label.clone(),
                y: row_idx as f64 * style.row_height as f64,
                height: bar_height,
                segments,
            }
        })
        .collect();

    // Rules at every 20%, plus the highlight threshold if it falls between
    let mut rule_pcts: Vec<u32> = (0..=100).step_by(20).collect();
    if !rule_pcts.contains(&style.highlight_pct) {
        rule_pcts.push(style.highlight_pct);
        rule_pcts.sort_unstable();
    }
    let rules = rule_pcts
        .into_iter()
        .map(|pct| GridRule {
            pct,
            x: x_scale(pct as f64, plot_width),
            color: rule_color(pct, style.highlight_pct),
        })
        .collect();

    let legend = coverage
        .depths
        .iter()
        .enumerate()
        .map(|(idx, &depth)| LegendEntry {
            depth,
            color: style.color_for(idx).to_string(),
        })
        .collect();

    Ok(ChartScene {
        plot_width,
        plot_height,
        margin_top: style.margins.top,
        margin_left: style.margins.left,
        margin_right: style.margins.right,
        margin_bottom: style.margins.bottom,
        rows,
        rules,
        legend,
        axis_title: "coverage (%)".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{StackedCoverage, StackedModel};

    fn coverage(depths: Vec<u32>, models: Vec<(&str, Vec<f64>, Vec<f64>)>) -> StackedCoverage {
        StackedCoverage {
            depths,
            models: models
                .into_iter()
                .map(|(label, stacked, full)| StackedModel {
                    label: label.to_string(),
                    stacked,
                    full,
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_scene_rejected() {
        let cov = coverage(vec![10], vec![]);
        assert!(build_scene(&cov, &ChartStyle::default()).is_err());
    }

    #[test]
    fn test_single_model_single_depth() {
        let cov = coverage(vec![10], vec![("A (L1)", vec![50.0], vec![50.0])]);
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();

        assert_eq!(scene.rows.len(), 1);
        assert_eq!(scene.rows[0].segments.len(), 1);
        // 50% of the 215px usable width
        let seg = &scene.rows[0].segments[0];
        assert!((seg.width - 107.5).abs() < 1e-9);
        assert_eq!(seg.x, 0.0);
        assert_eq!(scene.plot_height, 16);
    }

    #[test]
    fn test_segments_stack_left_to_right() {
        let cov = coverage(
            vec![100, 50, 10],
            vec![("A (L1)", vec![10.0, 30.0, 50.0], vec![10.0, 40.0, 90.0])],
        );
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();
        let segs = &scene.rows[0].segments;

        assert_eq!(segs[0].x, 0.0);
        assert!((segs[1].x - segs[0].width).abs() < 1e-9);
        assert!((segs[2].x - (segs[0].width + segs[1].width)).abs() < 1e-9);
    }

    #[test]
    fn test_tooltip_reports_unrounded_cumulative() {
        let cov = coverage(
            vec![100, 10],
            vec![("A (L1)", vec![10.0, 80.0], vec![10.00049, 90.00049])],
        );
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();
        let segs = &scene.rows[0].segments;

        assert_eq!(segs[0].tooltip, "depth: 100; target space covered: 10.00049%");
        assert_eq!(segs[1].tooltip, "depth: 10; target space covered: 90.00049%");
    }

    #[test]
    fn test_value_label_on_first_segment_only() {
        let cov = coverage(
            vec![100, 10],
            vec![("A (L1)", vec![10.25, 80.0], vec![10.25, 90.25])],
        );
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();
        let segs = &scene.rows[0].segments;

        assert_eq!(segs[0].value_label.as_deref(), Some("10.2"));
        assert!(segs[1].value_label.is_none());
    }

    #[test]
    fn test_band_colors_deterministic() {
        let cov = coverage(
            vec![60, 50, 40, 30, 20, 10],
            vec![(
                "A (L1)",
                vec![5.0; 6],
                vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
            )],
        );
        let style = ChartStyle::default();
        let scene1 = build_scene(&cov, &style).unwrap();
        let scene2 = build_scene(&cov, &style).unwrap();

        let colors: Vec<&str> = scene1.rows[0]
            .segments
            .iter()
            .map(|s| s.color.as_str())
            .collect();
        // 6 bands, 5 palette colors: the sixth cycles back to the first
        assert_eq!(
            colors,
            vec!["#339900", "#66cc00", "#009999", "#33cccc", "#669999", "#339900"]
        );
        for (a, b) in scene1.rows[0].segments.iter().zip(&scene2.rows[0].segments) {
            assert_eq!(a.color, b.color);
        }
        // Legend colors match band colors by index
        for (entry, color) in scene1.legend.iter().zip(&colors) {
            assert_eq!(&entry.color, color);
        }
    }

    #[test]
    fn test_grid_rules() {
        let cov = coverage(vec![10], vec![("A (L1)", vec![50.0], vec![50.0])]);
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();

        let pcts: Vec<u32> = scene.rules.iter().map(|r| r.pct).collect();
        assert_eq!(pcts, vec![0, 20, 40, 60, 80, 100]);

        let by_pct = |p: u32| scene.rules.iter().find(|r| r.pct == p).unwrap();
        assert_eq!(by_pct(0).color, "#AAA");
        assert_eq!(by_pct(80).color, "#F00");
        assert_eq!(by_pct(100).color, "#CCC");
        assert_eq!(by_pct(40).color, "rgba(255,255,255,.3)");
    }

    #[test]
    fn test_geometry_matches_layout_contract() {
        let cov = coverage(
            vec![10],
            vec![
                ("A (L1)", vec![50.0], vec![50.0]),
                ("B (L2)", vec![60.0], vec![60.0]),
                ("C (L3)", vec![70.0], vec![70.0]),
            ],
        );
        let scene = build_scene(&cov, &ChartStyle::default()).unwrap();

        assert_eq!(scene.plot_width, 225);
        assert_eq!(scene.plot_height, 16 * 3);
        assert_eq!(scene.total_width(), 190 + 225 + 10);
        assert_eq!(scene.total_height(), 110 + 48);
        assert_eq!(scene.rows[1].y, 16.0);
    }
}
