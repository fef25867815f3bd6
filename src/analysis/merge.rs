/// Observation merging.
///
/// `merge` turns the catalog and the current `LiveReading` into the row
/// sequence the comparison chart plots: one row per historical event in
/// catalog order, followed by exactly one `Current` row for the live point.
/// Values are passed through verbatim.

use crate::catalog::HistoricalCatalog;
use crate::model::{Category, LiveReading, MergedDataset, MergedRow};

/// Label of the live point on the chart.
pub const CURRENT_LABEL: &str = "ORA";

/// Marker size hints for the chart layer. Colors come from `Category::color`.
pub const HISTORICAL_MARKER_SIZE: u8 = 15;
pub const CURRENT_MARKER_SIZE: u8 = 30;

/// Builds the merged dataset. Output length is always `catalog.len() + 1`.
pub fn merge(catalog: &HistoricalCatalog, live: &LiveReading) -> MergedDataset {
    let mut rows: Vec<MergedRow> = catalog
        .events()
        .iter()
        .map(|event| {
            let category = Category::from(event.outcome);
            MergedRow {
                label: event.label.to_string(),
                rainfall_mm: Some(event.rainfall_mm),
                level_m: Some(event.level_m),
                category,
                color: category.color(),
                marker_size: HISTORICAL_MARKER_SIZE,
            }
        })
        .collect();

    rows.push(MergedRow {
        label: CURRENT_LABEL.to_string(),
        rainfall_mm: live.rainfall_24h_mm,
        level_m: live.level_m,
        category: Category::Current,
        color: Category::Current.color(),
        marker_size: CURRENT_MARKER_SIZE,
    });

    MergedDataset { rows }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
