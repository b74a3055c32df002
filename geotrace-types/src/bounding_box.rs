//! See [`BoundingBox`].

use crate::error::GeoJsonError;
use crate::position::Position;

/// Extent of a GeoJSON object: `[west, south, east, north]` or `[west, south, min_alt, east, north, max_alt]`.
///
/// No ordering of the bounds is enforced: a box with `west > east` is how a box crossing the antimeridian is
/// written, but [`BoundingBox::contains`] does not treat it specially.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    southwest: Position,
    northeast: Position,
}

impl BoundingBox {
    /// Creates a 2d bounding box.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            southwest: Position::new(west, south),
            northeast: Position::new(east, north),
        }
    }

    /// Creates a bounding box with altitude bounds.
    pub fn with_altitude(
        west: f64,
        south: f64,
        min_altitude: f64,
        east: f64,
        north: f64,
        max_altitude: f64,
    ) -> Self {
        Self {
            southwest: Position::with_altitude(west, south, min_altitude),
            northeast: Position::with_altitude(east, north, max_altitude),
        }
    }

    /// Creates a bounding box from its GeoJSON array representation.
    pub fn from_coordinates(values: &[f64]) -> Result<Self, GeoJsonError> {
        match *values {
            [west, south, east, north] => Ok(Self::new(west, south, east, north)),
            [west, south, min_alt, east, north, max_alt] => {
                Ok(Self::with_altitude(west, south, min_alt, east, north, max_alt))
            }
            _ => Err(GeoJsonError::InvalidBoundingBox { len: values.len() }),
        }
    }

    /// Smallest box containing all the given positions. Altitude bounds are only set if every position has an
    /// altitude. Returns `None` for an empty iterator.
    pub fn from_positions<'a>(mut positions: impl Iterator<Item = &'a Position>) -> Option<Self> {
        let first = positions.next()?;
        let mut bbox = Self {
            southwest: *first,
            northeast: *first,
        };
        for p in positions {
            bbox = bbox.merge(Self {
                southwest: *p,
                northeast: *p,
            });
        }

        Some(bbox)
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: Self) -> Self {
        let west = self.west().min(other.west());
        let south = self.south().min(other.south());
        let east = self.east().max(other.east());
        let north = self.north().max(other.north());

        match (
            self.min_altitude().zip(self.max_altitude()),
            other.min_altitude().zip(other.max_altitude()),
        ) {
            (Some((min_a, max_a)), Some((min_b, max_b))) => {
                Self::with_altitude(west, south, min_a.min(min_b), east, north, max_a.max(max_b))
            }
            _ => Self::new(west, south, east, north),
        }
    }

    /// South-west corner.
    pub fn southwest(&self) -> Position {
        self.southwest
    }

    /// North-east corner.
    pub fn northeast(&self) -> Position {
        self.northeast
    }

    /// Minimum longitude.
    pub fn west(&self) -> f64 {
        self.southwest.lon()
    }

    /// Minimum latitude.
    pub fn south(&self) -> f64 {
        self.southwest.lat()
    }

    /// Maximum longitude.
    pub fn east(&self) -> f64 {
        self.northeast.lon()
    }

    /// Maximum latitude.
    pub fn north(&self) -> f64 {
        self.northeast.lat()
    }

    /// Lower altitude bound, if the box has altitude bounds.
    pub fn min_altitude(&self) -> Option<f64> {
        self.southwest.altitude()
    }

    /// Upper altitude bound, if the box has altitude bounds.
    pub fn max_altitude(&self) -> Option<f64> {
        self.northeast.altitude()
    }

    /// Returns true if every axis of the position is within the box bounds (inclusive). Altitude is only checked
    /// if both the box and the position have it.
    pub fn contains(&self, position: &Position) -> bool {
        let in_plane = self.west() <= position.lon()
            && self.east() >= position.lon()
            && self.south() <= position.lat()
            && self.north() >= position.lat();

        let in_altitude = match (self.min_altitude(), self.max_altitude(), position.altitude()) {
            (Some(min), Some(max), Some(alt)) => min <= alt && alt <= max,
            _ => true,
        };

        in_plane && in_altitude
    }

    /// GeoJSON array representation of the box.
    pub fn coordinates(&self) -> Vec<f64> {
        match (self.min_altitude(), self.max_altitude()) {
            (Some(min), Some(max)) => vec![
                self.west(),
                self.south(),
                min,
                self.east(),
                self.north(),
                max,
            ],
            _ => vec![self.west(), self.south(), self.east(), self.north()],
        }
    }
}
