//! Risk evaluation against calibrated level thresholds.
//!
//! Decides the tier a presentation layer should show. No notification
//! delivery happens here.

pub mod risk;
