//! SVG rendering of a chart scene
//!
//! String-built SVG, deterministic apart from the generated-at comment.

use crate::chart::ChartScene;

/// Escape text for use in XML content and attributes
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a chart scene to an SVG document
pub fn render_svg(scene: &ChartScene) -> String {
    let width = scene.total_width();
    let height = scene.total_height();
    let plot_x = scene.margin_left;
    let plot_y = scene.margin_top;

    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" style="font-family: Arial, sans-serif;">
  <!-- generated by covchart {} at {} -->
  <defs>
    <style>
      .axis-title {{ font-size: 14px; font-weight: bold; }}
      .row-label {{ font-size: 11px; }}
      .tick-label {{ font-size: 10px; fill: #666; }}
      .value-label {{ font-size: 10px; fill: #fff; }}
      .legend-label {{ font-size: 11px; }}
    </style>
  </defs>
  <rect width="100%" height="100%" fill="#fafafa"/>
"##,
        width,
        height,
        env!("CARGO_PKG_VERSION"),
        generated
    );

    // Axis title above the plot area
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"{}\" class=\"axis-title\">{}</text>\n",
        plot_x + 90,
        plot_y.saturating_sub(25),
        xml_escape(&scene.axis_title)
    ));

    // Grid rules with tick labels
    for rule in &scene.rules {
        let x = plot_x as f64 + rule.x;
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{}\" x2=\"{:.1}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            x,
            plot_y,
            x,
            plot_y + scene.plot_height,
            rule.color
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{}\" class=\"tick-label\" text-anchor=\"middle\">{}</text>\n",
            x,
            plot_y.saturating_sub(8),
            rule.pct
        ));
    }

    // One bar row per model
    for row in &scene.rows {
        let y = plot_y as f64 + row.y;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{:.1}\" class=\"row-label\" text-anchor=\"end\">{}</text>\n",
            plot_x.saturating_sub(5),
            y + row.height / 2.0 + 4.0,
            xml_escape(&row.label)
        ));

        for segment in &row.segments {
            if segment.width <= 0.0 {
                continue;
            }
            let x = plot_x as f64 + segment.x;
            svg.push_str(&format!(
                "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"><title>{}</title></rect>\n",
                x,
                y,
                segment.width,
                row.height,
                segment.color,
                xml_escape(&segment.tooltip)
            ));
        }

        // Value label anchored to the right edge of the first segment
        for segment in &row.segments {
            if let Some(ref label) = segment.value_label {
                let label_x = plot_x as f64 + segment.x + segment.width - 2.0;
                svg.push_str(&format!(
                    "  <text x=\"{:.1}\" y=\"{:.1}\" class=\"value-label\" text-anchor=\"end\">{}</text>\n",
                    label_x,
                    y + row.height / 2.0 + 3.0,
                    xml_escape(label)
                ));
            }
        }
    }

    // Legend in the top-left margin, same order as the depth bands
    let legend_x = 5u32;
    let legend_y = 10u32;
    for (idx, entry) in scene.legend.iter().enumerate() {
        let y = legend_y + idx as u32 * 15;
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"8\" height=\"8\" fill=\"{}\"/>\n",
            legend_x, y, entry.color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" class=\"legend-label\">depth {}</text>\n",
            legend_x + 12,
            y + 8,
            entry.depth
        ));
    }

    svg.push_str("</svg>\n");
    svg
}
