use crate::bounding_box::BoundingBox;
use crate::position::Position;

/// Sequence of positions connected by straight segments.
///
/// A line string is closed when its first and last positions are equal. Polygon rings are closed line strings with
/// at least four positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    coordinates: Vec<Position>,
    bbox: Option<BoundingBox>,
}

impl LineString {
    /// Creates a new line string.
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

    /// Positions of the line.
    pub fn coordinates(&self) -> &[Position] {
        &self.coordinates
    }

    /// Consumes the line returning its positions.
    pub fn into_coordinates(self) -> Vec<Position> {
        self.coordinates
    }

    /// Whether the first and the last positions are the same.
    pub fn is_closed(&self) -> bool {
        match (self.coordinates.first(), self.coordinates.last()) {
            (Some(first), Some(last)) => self.coordinates.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}

impl From<Vec<Position>> for LineString {
    fn from(value: Vec<Position>) -> Self {
        Self::new(value)
    }
}
