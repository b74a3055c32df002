use crate::bounding_box::BoundingBox;
use crate::geometry::Point;
use crate::position::Position;

/// Unordered set of positions, stored in the order they were given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint {
    coordinates: Vec<Position>,
    bbox: Option<BoundingBox>,
}

impl MultiPoint {
    /// Creates a new multipoint.
    pub fn new(coordinates: Vec<Position>) -> Self {
        Self {
            coordinates,
            bbox: None,
        }
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Positions of the points.
    pub fn coordinates(&self) -> &[Position] {
        &self.coordinates
    }

    /// Iterates over the points of the geometry.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.coordinates.iter().map(|p| Point::new(*p))
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}

impl From<Vec<Position>> for MultiPoint {
    fn from(value: Vec<Position>) -> Self {
        Self::new(value)
    }
}
