/// Plain-text rendering of a `Snapshot` for the command line.
///
/// Mirrors the dashboard layout: risk banner, the two live metrics, then the
/// rainfall/level comparison against past events.

use std::fmt::Write;

use crate::engine::Snapshot;
use crate::model::{Category, MergedRow, SourceStatus};

pub fn render_report(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    match snapshot {
        Snapshot::Ready { tier, reading, dataset } => {
            let _ = writeln!(out, "{} {}", tier.indicator(), tier.headline());
            let _ = writeln!(out);
            let _ = writeln!(out, "   Level LIVE (m):   {}", format_value(reading.level_m, 2));
            let _ = writeln!(out, "   Rain 24h (mm):    {}", format_value(reading.rainfall_24h_mm, 1));
            let _ = writeln!(
                out,
                "   Source:           {} at {}",
                status_label(reading.source_status),
                reading.fetched_at.format("%Y-%m-%d %H:%M UTC")
            );
            let _ = writeln!(out);
            let _ = writeln!(out, "   {:<16} {:>10} {:>10}  {}", "Event", "Rain (mm)", "Level (m)", "Outcome");
            for row in &dataset.rows {
                let _ = writeln!(out, "{}", format_row(row));
            }
        }
        Snapshot::Unavailable { error, .. } => {
            let _ = writeln!(out, "⚪ LIVE DATA UNAVAILABLE");
            let _ = writeln!(out, "   {}", error);
            let _ = writeln!(out, "   Refresh to retry.");
        }
    }

    out
}

fn format_row(row: &MergedRow) -> String {
    let marker = if row.category == Category::Current { "▶" } else { " " };
    format!(
        "{}  {:<16} {:>10} {:>10}  {}",
        marker,
        row.label,
        format_value(row.rainfall_mm, 1),
        format_value(row.level_m, 2),
        category_label(row.category)
    )
}

fn format_value(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "—".to_string())
}

fn category_label(category: Category) -> &'static str {
    match category {
        Category::Flooded => "flooded",
        Category::Contained => "contained",
        Category::Current => "now",
    }
}

fn status_label(status: SourceStatus) -> &'static str {
    match status {
        SourceStatus::Live => "live",
        SourceStatus::Fallback => "OFFLINE CALIBRATION VALUES",
        SourceStatus::Unavailable => "unavailable",
    }
}
