use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use serde_json::{Value, json};
use tracing::info;

use crate::config::{Layout, Orientation};
use crate::model::OptionSide;
use crate::series::{self, ChartPoint};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const MAX_PAIN_COLOR: &str = "#9C27B0";

/// One chart panel: a single side of the chain, already prepared.
pub struct Panel<'a> {
    pub side: OptionSide,
    pub title: String,
    pub points: &'a [ChartPoint],
}

/// Document-wide rendering choices.
pub struct RenderOptions {
    pub title: String,
    pub layout: Layout,
    pub orientation: Orientation,
    /// Spot-equivalent max-pain price; `None` leaves the overlay out.
    pub max_pain_price: Option<f64>,
    pub generated_at: Option<String>,
}

/// Render a self-contained HTML page with one Plotly chart per panel,
/// stacked top to bottom.
pub fn render_html(panels: &[Panel<'_>], opts: &RenderOptions) -> anyhow::Result<String> {
    let mut sections = String::new();
    let mut scripts = String::new();

    for (i, panel) in panels.iter().enumerate() {
        let div_id = format!("panel-{i}");
        let figure = panel_figure(panel, opts);
        writeln!(
            &mut sections,
            "  <section class=\"panel\">\n    <h2>{}</h2>\n    <p class=\"note\">{}: {} strikes shown</p>\n    <div id=\"{div_id}\"></div>\n  </section>",
            escape_html(&panel.title),
            panel.side,
            panel.points.len(),
        )?;
        writeln!(
            &mut scripts,
            "    (function () {{ const fig = {}; Plotly.newPlot('{div_id}', fig.data, fig.layout, {{responsive: true}}); }})();",
            script_json(&figure)?,
        )?;
    }

    let footer = match &opts.generated_at {
        Some(ts) => format!("  <footer>Generated {}</footer>\n", escape_html(ts)),
        None => String::new(),
    };

    Ok(format!(
        r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <script src="{PLOTLY_CDN}"></script>
  <style>
    body {{
      margin: 0 auto;
      max-width: 1000px;
      padding: 16px;
      font-family: "Segoe UI", "PingFang SC", sans-serif;
      color: #212121;
    }}
    h1 {{ font-size: 20px; text-align: center; }}
    h2 {{ font-size: 15px; text-align: center; margin: 0 0 4px; }}
    .panel {{ display: block; width: 100%; clear: both; margin: 0 auto 30px; }}
    .note {{ text-align: center; color: #757575; font-size: 12px; margin: 0 0 8px; }}
    footer {{ color: #9e9e9e; font-size: 11px; text-align: right; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
{sections}{footer}  <script>
{scripts}  </script>
</body>
</html>
"#,
        title = escape_html(&opts.title),
    ))
}

/// Build the Plotly `{data, layout}` object for one panel.
fn panel_figure(panel: &Panel<'_>, opts: &RenderOptions) -> Value {
    let prices: Vec<f64> = panel.points.iter().map(|p| p.price).collect();
    let changes: Vec<f64> = panel.points.iter().map(|p| p.change).collect();
    let levels: Vec<f64> = panel.points.iter().map(|p| p.level).collect();
    let price_text: Vec<String> = prices.iter().map(|&p| series::format_price(p)).collect();
    let change_colors: Vec<&str> = changes.iter().map(|&c| series::bar_color(c)).collect();
    let vertical = opts.orientation == Orientation::Vertical;

    let data = match opts.layout {
        Layout::Combo => vec![
            bar_trace(
                "Change",
                &prices,
                &changes,
                json!({ "color": change_colors }),
                None,
                vertical,
            ),
            axis_pair(
                json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": "At Close",
                    "line": { "color": series::LEVEL_LINE_COLOR, "width": 2 },
                }),
                &prices,
                &levels,
                vertical,
            ),
        ],
        Layout::Change => vec![bar_trace(
            "Change",
            &prices,
            &changes,
            json!({ "color": change_colors }),
            Some(json!({ "size": 9 })),
            vertical,
        )],
        Layout::Level => vec![bar_trace(
            "At Close",
            &prices,
            &levels,
            json!({ "color": series::LEVEL_BAR_COLOR }),
            Some(json!({ "size": 9, "color": series::LEVEL_LABEL_COLOR })),
            vertical,
        )],
    };

    let price_axis = json!({
        "title": { "text": "Spot-equivalent price" },
        "tickmode": "array",
        "tickvals": prices,
        "ticktext": price_text,
        "tickfont": { "size": 10 },
    });
    let value_title = match opts.layout {
        Layout::Combo => "Value",
        Layout::Change => "Change",
        Layout::Level => "At Close",
    };
    let mut value_axis = json!({
        "title": { "text": value_title },
        "zeroline": true,
    });
    if opts.layout == Layout::Change {
        let (lo, hi) = series::value_axis_bounds(&changes);
        if lo < hi {
            value_axis["range"] = json!([lo, hi]);
        }
    }

    let (xaxis, yaxis) = if vertical {
        (value_axis, price_axis)
    } else {
        let mut price_axis = price_axis;
        price_axis["tickangle"] = json!(-45);
        (price_axis, value_axis)
    };

    let (width, height) = if vertical {
        (700, (panel.points.len() * 18 + 160).clamp(450, 2400))
    } else {
        (900, 450)
    };

    let mut layout = json!({
        "xaxis": xaxis,
        "yaxis": yaxis,
        "width": width,
        "height": height,
        "barmode": "overlay",
        "showlegend": opts.layout == Layout::Combo,
        "legend": { "orientation": "h", "yanchor": "bottom", "y": 1.02, "xanchor": "right", "x": 1 },
        "margin": { "l": 100, "r": 40, "t": 40, "b": 80 },
    });
    if let Some(price) = opts.max_pain_price {
        let (shape, note) = max_pain_overlay(price, vertical);
        layout["shapes"] = json!([shape]);
        layout["annotations"] = json!([note]);
    }

    json!({ "data": data, "layout": layout })
}

fn bar_trace(
    name: &str,
    prices: &[f64],
    values: &[f64],
    marker: Value,
    label_font: Option<Value>,
    vertical: bool,
) -> Value {
    let orientation = if vertical { "h" } else { "v" };
    let mut trace = json!({
        "type": "bar",
        "name": name,
        "marker": marker,
        "orientation": orientation,
    });
    if let Some(font) = label_font {
        let labels: Vec<String> = values.iter().map(|&v| series::format_value(v)).collect();
        trace["text"] = json!(labels);
        trace["textposition"] = json!("outside");
        trace["textfont"] = font;
    }
    axis_pair(trace, prices, values, vertical)
}

/// Place prices and values on the axes the orientation calls for.
fn axis_pair(mut trace: Value, prices: &[f64], values: &[f64], vertical: bool) -> Value {
    let (x, y) = if vertical { (values, prices) } else { (prices, values) };
    trace["x"] = json!(x);
    trace["y"] = json!(y);
    trace
}

/// Dashed line across the plot at the max-pain price, plus its label.
fn max_pain_overlay(price: f64, vertical: bool) -> (Value, Value) {
    let line = json!({ "color": MAX_PAIN_COLOR, "width": 2, "dash": "dash" });
    let text = format!("Max pain: {}", series::format_price(price));
    if vertical {
        (
            json!({ "type": "line", "xref": "paper", "x0": 0, "x1": 1, "yref": "y", "y0": price, "y1": price, "line": line }),
            json!({ "xref": "paper", "x": 1, "yref": "y", "y": price, "text": text, "showarrow": false, "xanchor": "right", "yanchor": "bottom", "font": { "color": MAX_PAIN_COLOR } }),
        )
    } else {
        (
            json!({ "type": "line", "yref": "paper", "y0": 0, "y1": 1, "xref": "x", "x0": price, "x1": price, "line": line }),
            json!({ "yref": "paper", "y": 1, "xref": "x", "x": price, "text": text, "showarrow": false, "xanchor": "left", "yanchor": "top", "font": { "color": MAX_PAIN_COLOR } }),
        )
    }
}

/// Serialize for inline `<script>` use; `</` would end the script block early.
fn script_json(value: &Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Escape text for HTML element content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write the rendered document, creating parent directories as needed.
pub fn write_output(content: &str, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "chart written");
    Ok(())
}
