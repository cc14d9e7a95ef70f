//! Great-circle distances for guidance readouts.
//!
//! Off-route detection uses the planar projector; these helpers only feed
//! the "distance to next maneuver" and "remaining distance" figures.

use crate::geo::{Coordinate, EARTH_RADIUS_M};

/// Haversine distance between two coordinates in meters.
pub fn distance_m(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Length of a coordinate path in meters.
pub fn path_length_m(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let p = Coordinate::new(-115.1, 36.1);
        let dist = distance_m(p, p);
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, roughly 370 km
        let dist = distance_m(Coordinate::new(-115.14, 36.17), Coordinate::new(-118.24, 34.05));
        assert!(
            dist > 350_000.0 && dist < 400_000.0,
            "LV to LA should be ~370km, got {}",
            dist
        );
    }

    #[test]
    fn test_path_length_sums_legs() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.01);
        let c = Coordinate::new(0.01, 0.01);
        let total = path_length_m(&[a, b, c]);
        let expected = distance_m(a, b) + distance_m(b, c);
        assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_path_length_short_inputs() {
        assert_eq!(path_length_m(&[]), 0.0);
        assert_eq!(path_length_m(&[Coordinate::new(1.0, 2.0)]), 0.0);
    }
}
