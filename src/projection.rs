//! Projection of a position onto a route segment.

use tracing::debug;

use crate::geo::{Coordinate, MercatorPoint, meters_per_unit};

/// Where a position falls relative to a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Fraction along the segment. Not clamped: below 0 means before the
    /// start, above 1 means past the end.
    pub percent: f64,
    /// Squared distance in meters between the position and `point`.
    pub distance_sq: f64,
    /// The nearest point on the segment's line.
    pub point: Coordinate,
}

impl Projection {
    pub fn distance_m(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Projects `position` onto the line through `start` and `end`.
///
/// Works in Web-Mercator units, which are locally flat enough for the short
/// segments of a road route, and rescales the result to meters at the
/// projected point's latitude. A zero-length segment projects everything
/// onto its start.
pub fn project(start: Coordinate, end: Coordinate, position: Coordinate) -> Projection {
    let start = MercatorPoint::from_coordinate(start);
    let end = MercatorPoint::from_coordinate(end);
    let position = MercatorPoint::from_coordinate(position);

    let seg = end - start;
    let pos = position - start;
    let seg_len_sq = seg.length_sq();

    let percent = if seg_len_sq == 0.0 {
        debug!("degenerate zero-length segment");
        0.0
    } else {
        seg.dot(pos) / seg_len_sq
    };

    let nearest = start + seg * percent;
    let point = nearest.to_coordinate();
    let scale = meters_per_unit(point.lat);
    let distance_sq = (position - nearest).length_sq() * scale * scale;

    Projection {
        percent,
        distance_sq,
        point,
    }
}
