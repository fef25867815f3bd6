/// Data organization for the dashboard.
///
/// Submodules:
/// - `merge` - joins the historical catalog with the live reading into one
///   ordered dataset for the comparison chart.

pub mod merge;
