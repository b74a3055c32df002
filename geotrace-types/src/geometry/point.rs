use crate::bounding_box::BoundingBox;
use crate::position::{GeoPoint, Position};

/// A single position.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coordinates: Position,
    bbox: Option<BoundingBox>,
}

impl Point {
    /// Creates a new point.
    pub fn new(coordinates: Position) -> Self {
        Self {
            coordinates,
            bbox: None,
        }
    }

    /// Creates a 2d point from longitude and latitude.
    pub fn from_lng_lat(lon: f64, lat: f64) -> Self {
        Self::new(Position::new(lon, lat))
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Position of the point.
    pub fn coordinates(&self) -> &Position {
        &self.coordinates
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}

impl GeoPoint for Point {
    fn lat(&self) -> f64 {
        self.coordinates.lat()
    }

    fn lon(&self) -> f64 {
        self.coordinates.lon()
    }
}

impl From<Position> for Point {
    fn from(value: Position) -> Self {
        Self::new(value)
    }
}
