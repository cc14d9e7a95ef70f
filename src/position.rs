//! Position fixes pushed in by the location source.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    /// Radians.
    pub heading: f64,
}

impl PositionFix {
    pub fn new(timestamp: DateTime<Utc>, coord: Coordinate, heading: f64) -> Self {
        Self {
            timestamp,
            lat: coord.lat,
            lon: coord.lon,
            alt: 0.0,
            heading,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lon, self.lat)
    }

    /// Heading in degrees, normalized to `[0, 360)`.
    pub fn heading_degrees(&self) -> f64 {
        self.heading.to_degrees().rem_euclid(360.0)
    }

    /// True when the fix is older than `max_age` at `now`. Fixes stamped in
    /// the future are treated as fresh.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match (now - self.timestamp).to_std() {
            Ok(age) => age > max_age,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix_at(timestamp: DateTime<Utc>) -> PositionFix {
        PositionFix::new(timestamp, Coordinate::new(1.0, 2.0), 0.0)
    }

    #[test]
    fn test_staleness() {
        let now = Utc::now();
        let max_age = Duration::from_secs(10);
        assert!(!fix_at(now).is_stale(now, max_age));
        assert!(!fix_at(now - chrono::Duration::seconds(9)).is_stale(now, max_age));
        assert!(fix_at(now - chrono::Duration::seconds(11)).is_stale(now, max_age));
        assert!(!fix_at(now + chrono::Duration::seconds(5)).is_stale(now, max_age));
    }

    #[test]
    fn test_heading_degrees() {
        let mut fix = fix_at(Utc::now());
        fix.heading = std::f64::consts::FRAC_PI_2;
        assert!((fix.heading_degrees() - 90.0).abs() < 1e-9);
        fix.heading = -std::f64::consts::FRAC_PI_2;
        assert!((fix.heading_degrees() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_location_payload() {
        let body = r#"{"timestamp":"2025-01-01T12:00:00Z","lat":0.01,"lon":-0.02,"alt":3.5,"heading":1.0}"#;
        let fix: PositionFix = serde_json::from_str(body).unwrap();
        assert_eq!(fix.coordinate(), Coordinate::new(-0.02, 0.01));
        assert_eq!(fix.alt, 3.5);
    }
}
