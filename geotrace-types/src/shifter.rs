//! Coordinate shifting applied by the [`GeoJsonCodec`](crate::GeoJsonCodec).
//!
//! A shifter transforms every position the codec decodes and reverts the transformation for every position it
//! encodes. It can be used, for example, to move coordinates into a local datum or to obfuscate a location.

use std::fmt::Debug;

use crate::position::Position;

/// Transformation applied to positions on decoding ([`CoordinateShifter::shift`]) and reverted on encoding
/// ([`CoordinateShifter::unshift`]).
///
/// `unshift(shift(p))` is expected to return `p`. Implementations must keep the missing altitude missing.
pub trait CoordinateShifter: Debug + Send + Sync {
    /// Transforms a position read from GeoJSON.
    fn shift(&self, position: Position) -> Position;

    /// Reverts [`CoordinateShifter::shift`] for a position that is about to be written as GeoJSON.
    fn unshift(&self, position: Position) -> Position;
}

/// Shifter that leaves positions unchanged. This is the default shifter of a codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdentityShifter;

impl CoordinateShifter for IdentityShifter {
    fn shift(&self, position: Position) -> Position {
        position
    }

    fn unshift(&self, position: Position) -> Position {
        position
    }
}

/// Shifter that adds a constant offset to every coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OffsetShifter {
    /// Added to longitude.
    pub d_lon: f64,
    /// Added to latitude.
    pub d_lat: f64,
    /// Added to altitude when the position has one.
    pub d_alt: f64,
}

impl OffsetShifter {
    /// Creates a new shifter.
    pub fn new(d_lon: f64, d_lat: f64, d_alt: f64) -> Self {
        Self { d_lon, d_lat, d_alt }
    }

    fn apply(&self, position: Position, sign: f64) -> Position {
        let lon = position.lon() + sign * self.d_lon;
        let lat = position.lat() + sign * self.d_lat;
        match position.altitude() {
            Some(alt) => Position::with_altitude(lon, lat, alt + sign * self.d_alt),
            None => Position::new(lon, lat),
        }
    }
}

impl CoordinateShifter for OffsetShifter {
    fn shift(&self, position: Position) -> Position {
        self.apply(position, 1.0)
    }

    fn unshift(&self, position: Position) -> Position {
        self.apply(position, -1.0)
    }
}
