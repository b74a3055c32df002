use crate::bounding_box::BoundingBox;
use crate::error::GeoJsonError;
use crate::geometry::LineString;
use crate::position::Position;

/// Polygon with an exterior ring and any number of holes.
///
/// Every ring is expected to be closed (the first and the last positions are equal) and to have at least four
/// positions. [`Polygon::new`] and the GeoJSON decoder accept rings as they are; [`Polygon::from_outer_inner`]
/// checks them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    coordinates: Vec<Vec<Position>>,
    bbox: Option<BoundingBox>,
}

impl Polygon {
    /// Creates a new polygon. The first ring is the exterior ring, the rest are holes.
    pub fn new(coordinates: Vec<Vec<Position>>) -> Self {
        Self {
            coordinates,
            bbox: None,
        }
    }

    /// Creates a polygon from an exterior ring and holes, checking that every ring is a valid linear ring.
    pub fn from_outer_inner(
        outer: LineString,
        inner: impl IntoIterator<Item = LineString>,
    ) -> Result<Self, GeoJsonError> {
        let rings = std::iter::once(outer)
            .chain(inner)
            .map(|ring| {
                validate_linear_ring(ring.coordinates())?;
                Ok(ring.into_coordinates())
            })
            .collect::<Result<Vec<_>, GeoJsonError>>()?;

        Ok(Self::new(rings))
    }

    /// Sets the bounding box of the geometry.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Positions of every ring, exterior ring first.
    pub fn coordinates(&self) -> &[Vec<Position>] {
        &self.coordinates
    }

    /// Exterior ring.
    pub fn outer(&self) -> Option<LineString> {
        self.coordinates.first().map(|r| LineString::new(r.clone()))
    }

    /// Holes.
    pub fn inner(&self) -> impl Iterator<Item = LineString> + '_ {
        self.coordinates
            .iter()
            .skip(1)
            .map(|r| LineString::new(r.clone()))
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }
}

/// Checks that the ring has at least 4 positions and that it is closed.
pub fn validate_linear_ring(ring: &[Position]) -> Result<(), GeoJsonError> {
    if ring.len() < 4 {
        return Err(GeoJsonError::InvalidLinearRing(format!(
            "ring must have at least 4 positions, got {}",
            ring.len()
        )));
    }

    if ring.first() != ring.last() {
        return Err(GeoJsonError::InvalidLinearRing(
            "first and last positions of a ring must be identical".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn square(size: f64) -> LineString {
        LineString::new(vec![
            Position::new(0.0, 0.0),
            Position::new(size, 0.0),
            Position::new(size, size),
            Position::new(0.0, size),
            Position::new(0.0, 0.0),
        ])
    }

    #[test]
    fn from_outer_inner_keeps_ring_order() {
        let polygon = Polygon::from_outer_inner(square(10.0), [square(1.0)]).unwrap();
        assert_eq!(polygon.coordinates().len(), 2);
        assert_eq!(polygon.outer(), Some(square(10.0)));
        assert_eq!(polygon.inner().collect::<Vec<_>>(), vec![square(1.0)]);
    }

    #[test]
    fn open_ring_is_rejected() {
        let open = LineString::new(vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(1.0, 1.0),
            Position::new(0.0, 1.0),
        ]);
        assert_matches!(
            Polygon::from_outer_inner(open, []),
            Err(GeoJsonError::InvalidLinearRing(_))
        );
    }

    #[test]
    fn short_ring_is_rejected() {
        let short = LineString::new(vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(0.0, 0.0),
        ]);
        assert_matches!(
            Polygon::from_outer_inner(square(10.0), [short]),
            Err(GeoJsonError::InvalidLinearRing(_))
        );
    }
}
