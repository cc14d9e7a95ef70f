//! Synthetic trips.
//!
//! Routes run due north along a meridian near the equator with points
//! `STEP` degrees apart (about 111 m), so progress along the route is
//! controlled by latitude and lateral deviation by longitude.

use chrono::Utc;

use route_progress::polyline::{PRECISION, encode};
use route_progress::trip::{Maneuver, ManeuverType, Trip, TripLeg, TripSummary};
use route_progress::{Coordinate, PositionFix};

pub const STEP: f64 = 0.001;

/// `count` points due north from `(lon, 0)`.
pub fn north_line(lon: f64, count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| Coordinate::new(lon, i as f64 * STEP))
        .collect()
}

pub fn leg(shape: &[Coordinate], maneuvers: Vec<Maneuver>) -> TripLeg {
    TripLeg {
        summary: None,
        shape: encode(shape, PRECISION).unwrap(),
        maneuvers,
    }
}

pub fn trip(legs: Vec<TripLeg>) -> Trip {
    Trip {
        status: 0,
        status_message: "Found route between points".to_string(),
        units: "kilometers".to_string(),
        language: "en-US".to_string(),
        summary: TripSummary::default(),
        legs,
    }
}

/// Five points, three maneuvers: start, a turn cue at index 2, arrival.
pub fn five_point_trip() -> Trip {
    trip(vec![leg(
        &north_line(0.0, 5),
        vec![
            Maneuver::new(ManeuverType::Start, "Head north.", 0, 2),
            Maneuver::new(ManeuverType::SlightRight, "Bear right.", 2, 4),
            Maneuver::new(ManeuverType::Destination, "You have arrived.", 4, 4),
        ],
    )])
}

/// A fresh fix at `(lon, lat)` heading north.
pub fn fix(lon: f64, lat: f64) -> PositionFix {
    PositionFix::new(Utc::now(), Coordinate::new(lon, lat), 0.0)
}

/// A fix on the route line at `steps` points from the start.
pub fn fix_at_step(steps: f64) -> PositionFix {
    fix(0.0, steps * STEP)
}

/// A fix far enough east of the route to count as off-route.
pub fn off_route_fix(steps: f64) -> PositionFix {
    fix(STEP, steps * STEP)
}
