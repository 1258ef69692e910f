//! Web viewer for the coverage chart
//!
//! Serves the rendered SVG and the source summary JSON alongside a small
//! embedded HTML page. The page shows a fallback message if the chart
//! cannot be fetched.

use anyhow::Result;
use tiny_http::{Header, Response, Server};

const VIEWER_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <title>Coverage Summary</title>
  <style>
    body { font-family: Arial, sans-serif; background: #fafafa; margin: 24px; }
    h1 { font-size: 18px; }
    #chart { border: 1px solid #ddd; background: #fff; }
    .fallback { font-weight: bold; text-align: center; padding-top: 35px; }
    .links { margin-top: 12px; font-size: 12px; }
  </style>
</head>
<body>
  <h1>Coverage Summary</h1>
  <div id="chart-region"><img id="chart" src="/chart.svg" alt="Coverage chart"/></div>
  <div class="links">
    <a href="/chart.svg" download="coverage_chart.svg">coverage_chart.svg</a> |
    <a href="/summary.json">summary.json</a>
  </div>
  <script>
    document.getElementById('chart').onerror = function() {
      document.getElementById('chart-region').innerHTML =
        '<p class="fallback">Sorry, could not load the coverage chart.</p>';
    };
  </script>
</body>
</html>
"#;

/// Start the viewer server. Blocks until the process is interrupted.
pub fn start_server(svg: &str, summary_json: &str, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let server =
        Server::http(&addr).map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    let url = format!("http://localhost:{}", port);
    log::info!("Viewer running at {}", url);
    log::info!("Press Ctrl+C to stop");

    if webbrowser::open(&url).is_err() {
        log::warn!("Could not open browser automatically. Please visit: {}", url);
    }

    for request in server.incoming_requests() {
        let path = request.url().to_string();

        let response = match path.as_str() {
            "/" | "/index.html" => Response::from_string(VIEWER_HTML).with_header(
                Header::from_bytes("Content-Type", "text/html; charset=utf-8").unwrap(),
            ),
            "/chart.svg" => Response::from_string(svg)
                .with_header(Header::from_bytes("Content-Type", "image/svg+xml").unwrap()),
            "/summary.json" => Response::from_string(summary_json)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap()),
            _ => Response::from_string("Not found").with_status_code(404),
        };

        let _ = request.respond(response);
    }

    Ok(())
}
