use crate::bounding_box::BoundingBox;
use crate::geometry::LineString;
use crate::position::Position;

/// Collection of line strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString {
    coordinates: Vec<Vec<Position>>,
    bbox: Option<BoundingBox>,
}

impl MultiLineString {
    /// Creates a new geometry from the positions of each line.
    pub fn new(coordinates: Vec<Vec<Position>>) -> Self {
        Self {
            coordinates,
            bbox: None,
        }
    }

    /// Creates a new geometry from line strings. Bounding boxes of the lines are discarded.
    pub fn from_line_strings(lines: impl IntoIterator<Item = LineString>) -> Self {
        Self::new(lines.into_iter().map(LineString::into_coordinates).collect())
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Positions of every line.
    pub fn coordinates(&self) -> &[Vec<Position>] {
        &self.coordinates
    }

    /// Iterates over the lines of the geometry.
    pub fn line_strings(&self) -> impl Iterator<Item = LineString> + '_ {
        self.coordinates.iter().map(|l| LineString::new(l.clone()))
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}
