use crate::bounding_box::BoundingBox;
use crate::geometry::Polygon;
use crate::position::Position;

/// Collection of polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    coordinates: Vec<Vec<Vec<Position>>>,
    bbox: Option<BoundingBox>,
}

impl MultiPolygon {
    /// Creates a new geometry from the rings of each polygon.
    pub fn new(coordinates: Vec<Vec<Vec<Position>>>) -> Self {
        Self {
            coordinates,
            bbox: None,
        }
    }

    /// Creates a new geometry from polygons. Bounding boxes of the polygons are discarded.
    pub fn from_polygons(polygons: impl IntoIterator<Item = Polygon>) -> Self {
        Self::new(
            polygons
                .into_iter()
                .map(|p| p.coordinates().to_vec())
                .collect(),
        )
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Rings of every polygon.
    pub fn coordinates(&self) -> &[Vec<Vec<Position>>] {
        &self.coordinates
    }

    /// Iterates over the polygons of the geometry.
    pub fn polygons(&self) -> impl Iterator<Item = Polygon> + '_ {
        self.coordinates.iter().map(|p| Polygon::new(p.clone()))
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}
