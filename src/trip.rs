//! Wire types for the routing service's `/route` endpoint.
//!
//! Field names follow the Valhalla JSON documents. Only the parts the
//! engine reads are modelled; unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

macro_rules! maneuver_types {
    ($($name:ident = $value:literal,)+) => {
        /// Kind of guidance cue, as numbered by the routing service.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "u8", into = "u8")]
        pub enum ManeuverType {
            $($name,)+
            /// A kind this build does not know about yet.
            Unknown(u8),
        }

        impl From<u8> for ManeuverType {
            fn from(value: u8) -> Self {
                match value {
                    $($value => ManeuverType::$name,)+
                    other => ManeuverType::Unknown(other),
                }
            }
        }

        impl From<ManeuverType> for u8 {
            fn from(kind: ManeuverType) -> Self {
                match kind {
                    $(ManeuverType::$name => $value,)+
                    ManeuverType::Unknown(other) => other,
                }
            }
        }
    };
}

maneuver_types! {
    None = 0,
    Start = 1,
    StartRight = 2,
    StartLeft = 3,
    Destination = 4,
    DestinationRight = 5,
    DestinationLeft = 6,
    Becomes = 7,
    Continue = 8,
    SlightRight = 9,
    Right = 10,
    SharpRight = 11,
    UturnRight = 12,
    UturnLeft = 13,
    SharpLeft = 14,
    Left = 15,
    SlightLeft = 16,
    RampStraight = 17,
    RampRight = 18,
    RampLeft = 19,
    ExitRight = 20,
    ExitLeft = 21,
    StayStraight = 22,
    StayRight = 23,
    StayLeft = 24,
    Merge = 25,
    RoundaboutEnter = 26,
    RoundaboutExit = 27,
    FerryEnter = 28,
    FerryExit = 29,
    Transit = 30,
    TransitTransfer = 31,
    TransitRemainOn = 32,
    TransitConnectionStart = 33,
    TransitConnectionTransfer = 34,
    TransitConnectionDestination = 35,
    PostTransitConnectionDestination = 36,
    MergeRight = 37,
    MergeLeft = 38,
    ElevatorEnter = 39,
    StepsEnter = 40,
    EscalatorEnter = 41,
    BuildingEnter = 42,
    BuildingExit = 43,
}

impl ManeuverType {
    pub fn is_destination(self) -> bool {
        matches!(
            self,
            ManeuverType::Destination | ManeuverType::DestinationRight | ManeuverType::DestinationLeft
        )
    }
}

/// One guidance instruction covering a span of route geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    #[serde(rename = "type")]
    pub kind: ManeuverType,
    pub instruction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbal_transition_alert_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbal_pre_transition_instruction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbal_post_transition_instruction: Option<String>,
    #[serde(default)]
    pub street_names: Vec<String>,
    /// Seconds.
    #[serde(default)]
    pub time: f64,
    /// In the request's units.
    #[serde(default)]
    pub length: f64,
    pub begin_shape_index: usize,
    pub end_shape_index: usize,
    #[serde(default)]
    pub toll: bool,
    #[serde(default)]
    pub highway: bool,
    #[serde(default)]
    pub rough: bool,
    #[serde(default)]
    pub gate: bool,
    #[serde(default)]
    pub ferry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_mode: Option<String>,
}

impl Maneuver {
    pub fn new(
        kind: ManeuverType,
        instruction: impl Into<String>,
        begin_shape_index: usize,
        end_shape_index: usize,
    ) -> Self {
        Self {
            kind,
            instruction: instruction.into(),
            verbal_transition_alert_instruction: None,
            verbal_pre_transition_instruction: None,
            verbal_post_transition_instruction: None,
            street_names: Vec::new(),
            time: 0.0,
            length: 0.0,
            begin_shape_index,
            end_shape_index,
            toll: false,
            highway: false,
            rough: false,
            gate: false,
            ferry: false,
            travel_mode: None,
        }
    }

    /// Returns a copy with both shape indices moved forward by `offset`.
    pub fn offset_by(&self, offset: usize) -> Self {
        Self {
            begin_shape_index: self.begin_shape_index + offset,
            end_shape_index: self.end_shape_index + offset,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripSummary {
    pub time: f64,
    pub length: f64,
    pub has_toll: bool,
    pub has_highway: bool,
    pub has_ferry: bool,
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    #[serde(default)]
    pub summary: Option<TripSummary>,
    pub shape: String,
    #[serde(default)]
    pub maneuvers: Vec<Maneuver>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub summary: TripSummary,
    pub legs: Vec<TripLeg>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub trip: Trip,
}

/// Body returned by the service when it cannot produce a route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// A stop where u-turns are allowed and a maneuver is generated.
    Break,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: LocationType,
    /// Preferred direction of travel in degrees clockwise from north.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
}

impl Location {
    pub fn stop(coord: Coordinate) -> Self {
        Self {
            lat: coord.lat,
            lon: coord.lon,
            kind: LocationType::Break,
            heading: None,
        }
    }

    pub fn with_heading(mut self, heading: Option<f64>) -> Self {
        self.heading = heading;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsOptions {
    pub units: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    pub locations: Vec<Location>,
    pub costing: String,
    pub units: String,
    pub directions_options: DirectionsOptions,
    pub format: String,
}

impl DirectionsRequest {
    pub fn new(locations: Vec<Location>, costing: &str, units: &str) -> Self {
        Self {
            locations,
            costing: costing.to_string(),
            units: units.to_string(),
            directions_options: DirectionsOptions {
                units: units.to_string(),
            },
            format: "json".to_string(),
        }
    }
}
