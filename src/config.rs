//! Tunable solver parameters.
//!
//! Shaped like the teacher's `meta::Parameters` (a plain, serde-derived
//! struct carrying named constants), but with a `Default` impl supplying
//! the spec's defaults instead of requiring a YAML file — this crate has no
//! CLI to load one from.

use serde::{Deserialize, Serialize};

/// Parameters governing matcher exactness, instruction suppression, and the
/// time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Largest odd-vertex-set size for which the matcher enumerates exactly.
    /// Above this, the matcher falls back to the greedy approximation.
    pub k_exact: usize,
    /// Minimum accumulated distance, in meters, before a turn instruction is
    /// emitted; suppresses spam at densely subdivided OSM ways.
    pub min_turn_distance_m: f64,
    /// Assumed average travel speed, in km/h, used to derive
    /// `estimated_time_ms` from `total_distance`.
    pub v_avg_kmh: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            k_exact: 10,
            min_turn_distance_m: 20.0,
            v_avg_kmh: 30.0,
        }
    }
}

/// Derived convenience used by the external route-store; not part of the
/// algorithmic contract (§4.H).
pub fn estimated_time_ms(total_distance_m: f64, config: &SolverConfig) -> u64 {
    let hours = total_distance_m / 1000.0 / config.v_avg_kmh;
    (hours * 3_600_000.0).round() as u64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let c = SolverConfig::default();
        assert_eq!(c.k_exact, 10);
        assert_eq!(c.min_turn_distance_m, 20.0);
        assert_eq!(c.v_avg_kmh, 30.0);
    }

    #[test]
    fn estimated_time_for_30_km_at_30_kmh_is_one_hour() {
        let c = SolverConfig::default();
        assert_eq!(estimated_time_ms(30_000.0, &c), 3_600_000);
    }
}
