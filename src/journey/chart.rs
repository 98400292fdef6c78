//! PNG line chart of the follower journey.

use super::series::{NetworkPoint, TimeSeries};
use crate::network::Network;
use anyhow::{anyhow, bail, Result};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::path::Path;
use std::sync::OnceLock;

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Headroom above the largest count on the shared y-axis.
const Y_HEADROOM: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

/// Top of the y-axis: `ceil(1.5 * max_count)`, never below 1.
pub fn y_axis_upper_bound(max_count: u64) -> u64 {
    ((max_count as f64) * Y_HEADROOM).ceil().max(1.0) as u64
}

fn line_color(network: Network) -> RGBColor {
    match network {
        Network::Twitter => RGBColor(29, 161, 242),
        Network::Tumblr => RGBColor(54, 70, 93),
        Network::Instagram => RGBColor(225, 48, 108),
    }
}

fn register_embedded_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, DEJAVU_SANS).is_ok());
    if !ok {
        bail!("Failed to load the embedded chart font");
    }
    Ok(())
}

/// One-day padding either side keeps a single-day series drawable.
fn date_range(points: &[NetworkPoint]) -> Option<std::ops::Range<NaiveDate>> {
    let first = points.iter().map(|p| p.date).min()?;
    let last = points.iter().map(|p| p.date).max()?;
    let start = first.checked_sub_days(Days::new(1)).unwrap_or(first);
    let end = last.checked_add_days(Days::new(1)).unwrap_or(last);
    Some(start..end)
}

/// One network's points in date order. Same-day rows keep insertion order.
fn network_line(points: &[NetworkPoint], network: Network) -> Vec<(NaiveDate, u64)> {
    let mut line: Vec<(NaiveDate, u64)> = points
        .iter()
        .filter(|p| p.network == network)
        .map(|p| (p.date, p.count))
        .collect();
    line.sort_by_key(|&(date, _)| date);
    line
}

/// Renders one line per network with the latest count labelled.
pub fn render_chart(series: &TimeSeries, path: &Path, settings: &ChartSettings) -> Result<()> {
    let points = series.points();
    let (Some(dates), Some(max_count)) = (date_range(&points), series.max_count()) else {
        bail!("Nothing to plot: the journey has no records yet");
    };
    register_embedded_font()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow!("Failed to create directory {}: {}", parent.display(), e))?;
    }

    let root = BitMapBackend::new(path, (settings.width, settings.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow!("Failed to draw chart background: {}", e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Follower journey", ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(dates, 0u64..y_axis_upper_bound(max_count))
        .map_err(|e| anyhow!("Failed to lay out chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Followers")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .draw()
        .map_err(|e| anyhow!("Failed to draw chart axes: {}", e))?;

    for network in Network::ALL {
        let color = line_color(network);
        let line = network_line(&points, network);
        let Some(&(last_date, last_count)) = line.last() else {
            continue;
        };

        chart
            .draw_series(LineSeries::new(line, color.stroke_width(2)))
            .map_err(|e| anyhow!("Failed to draw {} line: {}", network, e))?
            .label(network.display_name())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        chart
            .draw_series(std::iter::once(
                EmptyElement::at((last_date, last_count))
                    + Circle::new((0, 0), 4, color.filled())
                    + Text::new(
                        last_count.to_string(),
                        (6, -18),
                        ("sans-serif", 14).into_font().color(&color),
                    ),
            ))
            .map_err(|e| anyhow!("Failed to label {} line: {}", network, e))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| anyhow!("Failed to draw chart legend: {}", e))?;

    root.present()
        .map_err(|e| anyhow!("Failed to write chart to {}: {}", path.display(), e))?;
    tracing::info!("Wrote chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/chart_tests.rs"]
mod tests;
