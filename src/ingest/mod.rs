/// Upstream data acquisition.
///
/// One file per provider, plus the transport seam they share:
/// - `transport`  - raw HTTP GET behind a trait (reqwest in production)
/// - `arpae`      - ARPAE hydrometric sensor: current river level
/// - `open_meteo` - Open-Meteo hourly precipitation: 24 h rainfall
/// - `fixtures` (test only) - representative response payloads

pub mod arpae;
pub mod open_meteo;
pub mod transport;

#[cfg(test)]
pub(crate) mod fixtures;
