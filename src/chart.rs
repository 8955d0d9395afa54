//! Render models for the result panels.
//!
//! Two outputs per chart: a Plotly figure (`PlotSpec`) for pages that load
//! the library, and plain bar/row data for the HTML and terminal fallbacks.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

/// Bar color for outcomes whose leading bit is 0.
pub const LEADING_ZERO_COLOR: &str = "#4CAF50";
/// Bar color for every other outcome, and the noise curve.
pub const DEFAULT_COLOR: &str = "#2196F3";

const MIN_BAR_HEIGHT_PX: f64 = 20.0;
const BAR_SCALE_PX: f64 = 150.0;

/// A Plotly figure: traces plus layout, ready for `Plotly.newPlot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl PlotSpec {
    pub fn to_json(&self) -> String {
        // Serializing a tree of `Value`s cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// One bar of the HTML measurement histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementBar {
    pub outcome: String,
    pub count: u64,
    /// Percentage with one decimal, without the `%` sign.
    pub percentage: String,
    pub height_px: f64,
    pub color: &'static str,
}

fn outcome_color(outcome: &str) -> &'static str {
    if outcome.starts_with('0') {
        LEADING_ZERO_COLOR
    } else {
        DEFAULT_COLOR
    }
}

/// Build the fallback histogram bars, one per outcome in `counts`.
pub fn measurement_bars(
    counts: &BTreeMap<String, u64>,
    probabilities: &BTreeMap<String, f64>,
) -> Vec<MeasurementBar> {
    counts
        .iter()
        .map(|(outcome, &count)| {
            let p = probabilities.get(outcome).copied().unwrap_or(0.0);
            MeasurementBar {
                outcome: outcome.clone(),
                count,
                percentage: format!("{:.1}", p * 100.0),
                height_px: (p * BAR_SCALE_PX).max(MIN_BAR_HEIGHT_PX),
                color: outcome_color(outcome),
            }
        })
        .collect()
}

/// Plotly bar chart of the measurement outcomes.
pub fn measurement_plot(
    counts: &BTreeMap<String, u64>,
    probabilities: &BTreeMap<String, f64>,
) -> PlotSpec {
    let bars = measurement_bars(counts, probabilities);
    let x: Vec<&str> = bars.iter().map(|b| b.outcome.as_str()).collect();
    let y: Vec<u64> = bars.iter().map(|b| b.count).collect();
    let text: Vec<String> = bars.iter().map(|b| format!("{}%", b.percentage)).collect();
    let colors: Vec<&str> = bars.iter().map(|b| b.color).collect();

    PlotSpec {
        data: vec![json!({
            "x": x,
            "y": y,
            "type": "bar",
            "text": text,
            "textposition": "auto",
            "marker": { "color": colors },
        })],
        layout: json!({
            "title": "Measurement Outcomes Distribution",
            "xaxis": {
                "title": "Measurement Outcome (q2 q1 q0)",
                "tickangle": -45,
            },
            "yaxis": { "title": "Count" },
            "showlegend": false,
            "height": 400,
        }),
    }
}

/// Plotly line chart of fidelity against noise level.
pub fn noise_plot(noise_levels: &[f64], fidelities: &[f64]) -> PlotSpec {
    PlotSpec {
        data: vec![json!({
            "x": noise_levels,
            "y": fidelities,
            "type": "scatter",
            "mode": "lines+markers",
            "line": { "color": DEFAULT_COLOR, "width": 3 },
            "marker": { "size": 8, "color": DEFAULT_COLOR },
            "name": "Fidelity",
        })],
        layout: json!({
            "title": "Noise Level vs Teleportation Fidelity",
            "xaxis": {
                "title": "Noise Level",
                "tickformat": ".0%",
                "range": [0, 0.5],
            },
            "yaxis": {
                "title": "Fidelity",
                "range": [0, 1.1],
                "tickformat": ".0%",
            },
            "showlegend": false,
            "height": 500,
        }),
    }
}

/// Rows of the noise table, pairing each level with its fidelity. Extra
/// entries in the longer sequence are dropped.
pub fn noise_rows(noise_levels: &[f64], fidelities: &[f64]) -> Vec<(String, String)> {
    noise_levels
        .iter()
        .zip(fidelities)
        .map(|(&n, &f)| (percent(n), percent(f)))
        .collect()
}

pub fn png_data_uri(base64: &str) -> String {
    format!("data:image/png;base64,{}", base64)
}

/// Fraction as a percentage with two decimals, e.g. `94.00%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Horizontal text histogram, one line per bar.
pub fn ascii_histogram(bars: &[MeasurementBar], width: usize) -> String {
    let max = bars.iter().map(|b| b.count).max().unwrap_or(0);
    let label_width = bars.iter().map(|b| b.outcome.len()).max().unwrap_or(0);

    bars.iter()
        .map(|bar| {
            let len = if max == 0 {
                0
            } else {
                (bar.count as f64 / max as f64 * width as f64).round() as usize
            };
            format!(
                "{:>lw$} | {:<width$} {} ({}%)",
                bar.outcome,
                "#".repeat(len),
                bar.count,
                bar.percentage,
                lw = label_width,
                width = width,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
