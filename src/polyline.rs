//! Polyline representation for route geometries.
//!
//! Routing responses carry each leg's geometry as an encoded polyline
//! string: per-axis deltas, zig-zag folded, split into 5-bit chunks and
//! offset into printable ASCII. Decoding happens once when a response is
//! received; everything downstream works on decoded coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::geo::Coordinate;

/// Precision used by the routing service (six decimal places).
pub const PRECISION: u32 = 6;

const CHUNK_OFFSET: u8 = 63;
const CONTINUATION: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
/// Largest scaled magnitude `encode` accepts; keeps every delta inside `i64`.
const MAX_SCALED: f64 = (1u64 << 61) as f64;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Encodes the points at the given precision.
    pub fn encode(&self, precision: u32) -> Result<String, EncodeError> {
        encode(&self.points, precision)
    }
}

/// Decodes a shape at the routing service's precision.
pub fn decode(shape: &str) -> Result<Polyline, DecodeError> {
    decode_with_precision(shape, PRECISION)
}

/// Decodes a shape encoded with `precision` decimal places.
///
/// The whole string is consumed; a shape that stops inside a coordinate is
/// rejected rather than truncated to the last complete point.
pub fn decode_with_precision(shape: &str, precision: u32) -> Result<Polyline, DecodeError> {
    let factor = 10f64.powi(precision as i32);
    let bytes = shape.as_bytes();

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        lng = accumulate(lng, bytes, &mut index)?;
        points.push(Coordinate::new(lng as f64 / factor, lat as f64 / factor));
    }

    Ok(Polyline::new(points))
}

/// Adds the next delta to a running axis value.
fn accumulate(total: i64, bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let position = *index;
    let delta = read_delta(bytes, index)?;
    total
        .checked_add(delta)
        .ok_or(DecodeError::Overflow { position })
}

/// Reads one varint group and returns the zig-zag decoded delta.
fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift = 0u32;

    loop {
        let position = *index;
        let byte = *bytes.get(position).ok_or(DecodeError::Truncated { position })?;
        if !(CHUNK_OFFSET..=CHUNK_OFFSET + 63).contains(&byte) {
            return Err(DecodeError::InvalidCharacter { byte, position });
        }
        if shift >= 60 {
            return Err(DecodeError::Overflow { position });
        }

        let chunk = i64::from(byte - CHUNK_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        *index += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

/// Encodes coordinates with `precision` decimal places.
///
/// Non-finite coordinates, and ones too large to scale into an integer,
/// are rejected.
pub fn encode(points: &[Coordinate], precision: u32) -> Result<String, EncodeError> {
    let factor = 10f64.powi(precision as i32);
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for (index, point) in points.iter().enumerate() {
        let lat = scale(point.lat, factor).ok_or(EncodeError::OutOfRange { index })?;
        let lng = scale(point.lon, factor).ok_or(EncodeError::OutOfRange { index })?;
        write_delta(lat - prev_lat, &mut out);
        write_delta(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }

    Ok(out)
}

fn scale(value: f64, factor: f64) -> Option<i64> {
    let scaled = (value * factor).round();
    (scaled.is_finite() && scaled.abs() <= MAX_SCALED).then_some(scaled as i64)
}

fn write_delta(delta: i64, out: &mut String) {
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;
    while value >= CONTINUATION as u64 {
        let chunk = (CONTINUATION as u64 | (value & CHUNK_MASK as u64)) as u8;
        out.push(char::from(chunk + CHUNK_OFFSET));
        value >>= 5;
    }
    out.push(char::from(value as u8 + CHUNK_OFFSET));
}
