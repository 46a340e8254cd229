//! Bar chart of category totals.
//!
//! The chart is drawn as SVG: it needs no system fonts, and identical totals
//! always produce identical bytes.

use crate::aggregate::CategoryTotals;
use crate::error::RenderError;
use plotters::prelude::*;
use rust_decimal::prelude::ToPrimitive;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Caption drawn above the bars.
pub const CHART_TITLE: &str = "Spending by Category";

/// Axis label used for the blank-category bucket.
pub const UNCATEGORIZED_LABEL: &str = "(uncategorized)";

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Draw one bar per category to `output`, replacing whatever was there.
///
/// Returns the path written.
pub fn render_category_chart(
    totals: &CategoryTotals,
    output: &Path,
) -> Result<PathBuf, RenderError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !dir.is_dir() {
        return Err(RenderError::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    draw(totals, output).map_err(|message| RenderError::Draw {
        path: output.to_path_buf(),
        message,
    })?;

    debug!(path = %output.display(), bars = totals.len(), "rendered category chart");
    Ok(output.to_path_buf())
}

fn draw(totals: &CategoryTotals, output: &Path) -> Result<(), String> {
    let labels: Vec<String> = totals
        .keys()
        .map(|name| {
            if name.is_empty() {
                UNCATEGORIZED_LABEL.to_string()
            } else {
                name.clone()
            }
        })
        .collect();
    let heights: Vec<f64> = totals
        .values()
        .map(|v| v.to_f64().unwrap_or(0.0))
        .collect();
    let (y_min, y_max) = value_range(&heights);
    let slots = labels.len().max(1) as i32;

    let root = SVGBackend::new(output, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(56)
        .y_label_area_size(72)
        .build_cartesian_2d((0..slots).into_segmented(), y_min..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|value| match value {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Amount")
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(heights.iter().enumerate().map(|(i, height)| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *height),
                ],
                BAR_COLOR.filled(),
            );
            bar.set_margin(0, 0, 8, 8);
            bar
        }))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

/// Y range covering every bar and the zero line, with some headroom.
fn value_range(heights: &[f64]) -> (f64, f64) {
    let low = heights.iter().copied().fold(0.0_f64, f64::min);
    let high = heights.iter().copied().fold(0.0_f64, f64::max);
    let span = high - low;
    if span <= f64::EPSILON {
        return (0.0, 1.0);
    }
    let pad = span * 0.1;
    let low = if low < 0.0 { low - pad } else { 0.0 };
    let high = if high > 0.0 { high + pad } else { 0.0 };
    (low, high)
}
