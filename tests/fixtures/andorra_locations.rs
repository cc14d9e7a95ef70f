//! Real Andorra locations for the Valhalla integration test.
//!
//! Andorra's Geofabrik extract is a few megabytes, so a routing container
//! can build its tiles in a couple of minutes.

use route_progress::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

pub const GEOFABRIK_REGION: &str = "europe/andorra";

pub const TOWNS: &[Location] = &[
    Location::new("Andorra la Vella", 42.5078, 1.5211),
    Location::new("Escaldes-Engordany", 42.5089, 1.5382),
    Location::new("Encamp", 42.5345, 1.5801),
    Location::new("Sant Julià de Lòria", 42.4637, 1.4913),
    Location::new("La Massana", 42.5450, 1.5148),
    Location::new("Ordino", 42.5562, 1.5331),
];

pub fn town(name: &str) -> &'static Location {
    TOWNS
        .iter()
        .find(|location| location.name == name)
        .unwrap_or_else(|| panic!("unknown town {name}"))
}
