//! See [`Position`].

use std::hash::{Hash, Hasher};

use crate::error::GeoJsonError;

/// A single coordinate: longitude, latitude and an optional altitude.
///
/// A missing altitude is stored as [`Position::NO_ALTITUDE`] (a NaN) instead of an `Option`, so code that combines
/// altitudes must check [`Position::has_altitude`] first. Longitude and latitude are not range checked.
///
/// Equality and hashing compare exact field values, except that the missing altitude is equal to itself and `0.0`
/// is equal to `-0.0`.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    lon: f64,
    lat: f64,
    alt: f64,
}

impl Position {
    /// Altitude value of a position that has no altitude.
    pub const NO_ALTITUDE: f64 = f64::NAN;

    /// Creates a 2d position.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            alt: Self::NO_ALTITUDE,
        }
    }

    /// Creates a position with the given altitude. Passing [`Position::NO_ALTITUDE`] is the same as calling
    /// [`Position::new`].
    pub const fn with_altitude(lon: f64, lat: f64, alt: f64) -> Self {
        Self { lon, lat, alt }
    }

    /// Creates a position from a GeoJSON coordinate array: `[lon, lat]` or `[lon, lat, alt, ...]`. Values after the
    /// third one are ignored.
    pub fn from_coordinates(coordinates: &[f64]) -> Result<Self, GeoJsonError> {
        match *coordinates {
            [lon, lat] => Ok(Self::new(lon, lat)),
            [lon, lat, alt, ..] => Ok(Self::with_altitude(lon, lat, alt)),
            _ => Err(GeoJsonError::InvalidPosition {
                len: coordinates.len(),
            }),
        }
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Altitude, or [`Position::NO_ALTITUDE`].
    pub fn alt(&self) -> f64 {
        self.alt
    }

    /// Altitude if the position has one.
    pub fn altitude(&self) -> Option<f64> {
        self.has_altitude().then_some(self.alt)
    }

    /// Returns false if the altitude is the missing-altitude sentinel.
    pub fn has_altitude(&self) -> bool {
        !self.alt.is_nan()
    }

    /// Coordinates in GeoJSON order. The altitude is only included when present.
    pub fn coordinates(&self) -> Vec<f64> {
        match self.altitude() {
            Some(alt) => vec![self.lon, self.lat, alt],
            None => vec![self.lon, self.lat],
        }
    }

    fn key(&self) -> [u64; 3] {
        [canonical_bits(self.lon), canonical_bits(self.lat), canonical_bits(self.alt)]
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0
    } else {
        value.to_bits()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<[f64; 2]> for Position {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self::new(lon, lat)
    }
}

impl From<[f64; 3]> for Position {
    fn from([lon, lat, alt]: [f64; 3]) -> Self {
        Self::with_altitude(lon, lat, alt)
    }
}

/// A point on the surface of the Earth given in degrees.
pub trait GeoPoint {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lon(&self) -> f64;

    /// Latitude in radians.
    fn lat_rad(&self) -> f64 {
        self.lat().to_radians()
    }

    /// Longitude in radians.
    fn lon_rad(&self) -> f64 {
        self.lon().to_radians()
    }
}

impl GeoPoint for Position {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn two_coordinates_have_no_altitude() {
        let position = Position::from_coordinates(&[10.0, 20.0]).unwrap();
        assert!(!position.has_altitude());
        assert!(position.alt().is_nan());
        assert_eq!(position.coordinates(), vec![10.0, 20.0]);
    }

    #[test]
    fn third_coordinate_is_altitude() {
        let position = Position::from_coordinates(&[10.0, 20.0, 30.5, 99.0]).unwrap();
        assert_eq!(position.altitude(), Some(30.5));
        assert_eq!(position.coordinates(), vec![10.0, 20.0, 30.5]);
    }

    #[test]
    fn too_short_coordinates_are_rejected() {
        assert_matches!(
            Position::from_coordinates(&[1.0]),
            Err(GeoJsonError::InvalidPosition { len: 1 })
        );
        assert_matches!(
            Position::from_coordinates(&[]),
            Err(GeoJsonError::InvalidPosition { len: 0 })
        );
    }

    #[test]
    fn missing_altitude_is_equal_to_itself() {
        assert_eq!(Position::new(1.0, 2.0), Position::new(1.0, 2.0));
        assert_ne!(Position::new(1.0, 2.0), Position::with_altitude(1.0, 2.0, 0.0));
        assert_eq!(Position::new(0.0, 2.0), Position::new(-0.0, 2.0));

        let set: HashSet<Position> = [Position::new(1.0, 2.0), Position::new(1.0, 2.0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
    }
}
