//! The engine's working route: flattened geometry plus flattened maneuvers.

use crate::error::RouteError;
use crate::geo::Coordinate;
use crate::polyline::{self, Polyline};
use crate::trip::{Maneuver, Trip, TripLeg, TripSummary};

/// Flattens per-leg maneuver lists into one trip-wide sequence.
///
/// `leg_lengths[k]` is the decoded point count of leg `k`. Maneuvers of leg
/// `k` are offset by the total point count of the legs before it so their
/// shape indices address the concatenated geometry.
pub fn flatten_maneuvers(legs: &[TripLeg], leg_lengths: &[usize]) -> Vec<Maneuver> {
    let mut offset = 0;
    let mut flattened = Vec::with_capacity(legs.iter().map(|leg| leg.maneuvers.len()).sum());

    for (leg, len) in legs.iter().zip(leg_lengths) {
        flattened.extend(leg.maneuvers.iter().map(|maneuver| maneuver.offset_by(offset)));
        offset += len;
    }

    flattened
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    shape: Vec<Coordinate>,
    maneuvers: Vec<Maneuver>,
    summary: TripSummary,
}

impl Route {
    /// Builds a route from already flattened parts, checking that it can be
    /// navigated: at least one segment, and maneuver spans that are ordered
    /// and point inside the geometry.
    pub fn new(shape: Vec<Coordinate>, maneuvers: Vec<Maneuver>) -> Result<Self, RouteError> {
        if shape.len() < 2 {
            return Err(RouteError::TooShort { len: shape.len() });
        }

        let mut previous_begin = 0;
        for (index, maneuver) in maneuvers.iter().enumerate() {
            for shape_index in [maneuver.begin_shape_index, maneuver.end_shape_index] {
                if shape_index >= shape.len() {
                    return Err(RouteError::ManeuverOutOfRange {
                        maneuver: index,
                        shape_index,
                        len: shape.len(),
                    });
                }
            }
            if maneuver.begin_shape_index > maneuver.end_shape_index
                || maneuver.begin_shape_index < previous_begin
            {
                return Err(RouteError::ManeuverOrder { maneuver: index });
            }
            previous_begin = maneuver.begin_shape_index;
        }

        Ok(Self {
            shape,
            maneuvers,
            summary: TripSummary::default(),
        })
    }

    /// Decodes every leg and flattens the trip into one route.
    ///
    /// A single malformed leg rejects the whole trip.
    pub fn from_trip(trip: &Trip) -> Result<Self, RouteError> {
        if trip.legs.is_empty() {
            return Err(RouteError::NoLegs);
        }

        let shapes = trip
            .legs
            .iter()
            .enumerate()
            .map(|(leg, trip_leg)| {
                polyline::decode(&trip_leg.shape).map_err(|source| RouteError::Decode { leg, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let leg_lengths: Vec<usize> = shapes.iter().map(Polyline::len).collect();
        let maneuvers = flatten_maneuvers(&trip.legs, &leg_lengths);
        let shape = shapes.into_iter().flat_map(Polyline::into_points).collect();

        let mut route = Self::new(shape, maneuvers)?;
        route.summary = trip.summary.clone();
        Ok(route)
    }

    pub fn shape(&self) -> &[Coordinate] {
        &self.shape
    }

    pub fn maneuvers(&self) -> &[Maneuver] {
        &self.maneuvers
    }

    pub fn summary(&self) -> &TripSummary {
        &self.summary
    }

    /// Number of points in the geometry. Never below two.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    /// Endpoints of segment `index`, if it exists.
    pub fn segment(&self, index: usize) -> Option<(Coordinate, Coordinate)> {
        Some((*self.shape.get(index)?, *self.shape.get(index + 1)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polyline::{PRECISION, encode};
    use crate::trip::ManeuverType;

    fn points(n: usize, lon: f64) -> Vec<Coordinate> {
        (0..n)
            .map(|i| Coordinate::new(lon, i as f64 * 0.001))
            .collect()
    }

    fn leg(shape: &[Coordinate], maneuvers: Vec<Maneuver>) -> TripLeg {
        TripLeg {
            summary: None,
            shape: encode(shape, PRECISION).unwrap(),
            maneuvers,
        }
    }

    fn trip(legs: Vec<TripLeg>) -> Trip {
        Trip {
            status: 0,
            status_message: String::new(),
            units: "kilometers".to_string(),
            language: "en-US".to_string(),
            summary: TripSummary {
                length: 1.5,
                ..TripSummary::default()
            },
            legs,
        }
    }

    #[test]
    fn test_flatten_offsets_later_legs() {
        let legs = vec![
            leg(
                &points(3, 0.0),
                vec![
                    Maneuver::new(ManeuverType::Start, "Go.", 0, 2),
                    Maneuver::new(ManeuverType::Destination, "Stop.", 2, 2),
                ],
            ),
            leg(
                &points(4, 0.01),
                vec![
                    Maneuver::new(ManeuverType::Start, "Go again.", 0, 3),
                    Maneuver::new(ManeuverType::Destination, "Done.", 3, 3),
                ],
            ),
        ];

        let flattened = flatten_maneuvers(&legs, &[3, 4]);
        let spans: Vec<(usize, usize)> = flattened
            .iter()
            .map(|m| (m.begin_shape_index, m.end_shape_index))
            .collect();
        assert_eq!(spans, vec![(0, 2), (2, 2), (3, 6), (6, 6)]);
        assert_eq!(flattened[2].instruction, "Go again.");
    }

    #[test]
    fn test_from_trip_concatenates_legs() {
        let first = points(3, 0.0);
        let second = points(4, 0.01);
        let trip = trip(vec![
            leg(&first, vec![Maneuver::new(ManeuverType::Start, "Go.", 0, 2)]),
            leg(&second, vec![Maneuver::new(ManeuverType::Destination, "Done.", 3, 3)]),
        ]);

        let route = Route::from_trip(&trip).unwrap();
        assert_eq!(route.len(), 7);
        assert!(route.segment(5).is_some() && route.segment(6).is_none());
        assert_eq!(route.maneuvers()[1].begin_shape_index, 6);
        assert_eq!(route.summary().length, 1.5);

        let begins: Vec<usize> = route.maneuvers().iter().map(|m| m.begin_shape_index).collect();
        assert!(begins.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(route.maneuvers().iter().all(|m| m.end_shape_index < route.len()));
    }

    #[test]
    fn test_malformed_leg_rejects_trip() {
        let mut broken = leg(&points(3, 0.0), Vec::new());
        broken.shape.pop();
        let trip = trip(vec![leg(&points(2, 0.0), Vec::new()), broken]);

        match Route::from_trip(&trip) {
            Err(RouteError::Decode { leg, .. }) => assert_eq!(leg, 1),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_legs() {
        assert_eq!(Route::from_trip(&trip(Vec::new())), Err(RouteError::NoLegs));
    }

    #[test]
    fn test_single_point_is_too_short() {
        let result = Route::new(points(1, 0.0), Vec::new());
        assert_eq!(result, Err(RouteError::TooShort { len: 1 }));
    }

    #[test]
    fn test_maneuver_out_of_range() {
        let result = Route::new(
            points(3, 0.0),
            vec![Maneuver::new(ManeuverType::Destination, "Done.", 3, 3)],
        );
        assert_eq!(
            result,
            Err(RouteError::ManeuverOutOfRange {
                maneuver: 0,
                shape_index: 3,
                len: 3
            })
        );
    }

    #[test]
    fn test_maneuvers_must_not_go_backwards() {
        let result = Route::new(
            points(4, 0.0),
            vec![
                Maneuver::new(ManeuverType::Start, "Go.", 2, 3),
                Maneuver::new(ManeuverType::Right, "Right.", 1, 3),
            ],
        );
        assert_eq!(result, Err(RouteError::ManeuverOrder { maneuver: 1 }));
    }

    #[test]
    fn test_maneuver_span_must_not_end_before_it_begins() {
        let result = Route::new(
            points(4, 0.0),
            vec![Maneuver::new(ManeuverType::Right, "Right.", 3, 1)],
        );
        assert_eq!(result, Err(RouteError::ManeuverOrder { maneuver: 0 }));
    }

    #[test]
    fn test_segment_lookup() {
        let route = Route::new(points(3, 0.0), Vec::new()).unwrap();
        let (start, end) = route.segment(1).unwrap();
        assert_eq!(start, route.shape()[1]);
        assert_eq!(end, route.shape()[2]);
        assert!(route.segment(2).is_none());
    }
}
