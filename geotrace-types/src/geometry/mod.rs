//! GeoJSON geometry types.
//!
//! [`Geometry`] is a closed set of the seven geometry types defined by RFC 7946. Each variant wraps a struct that
//! owns its coordinates and an optional bounding box.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::bounding_box::BoundingBox;
use crate::error::GeoJsonError;
use crate::position::Position;

mod collection;
mod line_string;
mod multi_line_string;
mod multi_point;
mod multi_polygon;
mod point;
mod polygon;

pub use collection::GeometryCollection;
pub use line_string::LineString;
pub use multi_line_string::MultiLineString;
pub use multi_point::MultiPoint;
pub use multi_polygon::MultiPolygon;
pub use point::Point;
pub use polygon::{validate_linear_ring, Polygon};

/// Any GeoJSON geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single position.
    Point(Point),
    /// Set of positions.
    MultiPoint(MultiPoint),
    /// Line.
    LineString(LineString),
    /// Set of lines.
    MultiLineString(MultiLineString),
    /// Polygon with optional holes.
    Polygon(Polygon),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
    /// Set of geometries of any type.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Type of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Bounding box stored with the geometry. This is not computed from the coordinates, see
    /// [`Geometry::extent`] for that.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        match self {
            Geometry::Point(v) => v.bbox(),
            Geometry::MultiPoint(v) => v.bbox(),
            Geometry::LineString(v) => v.bbox(),
            Geometry::MultiLineString(v) => v.bbox(),
            Geometry::Polygon(v) => v.bbox(),
            Geometry::MultiPolygon(v) => v.bbox(),
            Geometry::GeometryCollection(v) => v.bbox(),
        }
    }

    /// Iterates over all positions of the geometry in document order, descending into nested collections.
    pub fn positions(&self) -> Positions<'_> {
        Positions {
            stack: vec![self],
            current: Box::new(std::iter::empty()),
        }
    }

    /// Smallest box containing every position of the geometry. `None` if the geometry has no positions.
    pub fn extent(&self) -> Option<BoundingBox> {
        BoundingBox::from_positions(self.positions())
    }

    fn own_positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(v) => Box::new(std::iter::once(v.coordinates())),
            Geometry::MultiPoint(v) => Box::new(v.coordinates().iter()),
            Geometry::LineString(v) => Box::new(v.coordinates().iter()),
            Geometry::MultiLineString(v) => Box::new(v.coordinates().iter().flatten()),
            Geometry::Polygon(v) => Box::new(v.coordinates().iter().flatten()),
            Geometry::MultiPolygon(v) => Box::new(v.coordinates().iter().flatten().flatten()),
            Geometry::GeometryCollection(_) => Box::new(std::iter::empty()),
        }
    }
}

/// Iterator over positions of a geometry. See [`Geometry::positions`].
pub struct Positions<'a> {
    stack: Vec<&'a Geometry>,
    current: Box<dyn Iterator<Item = &'a Position> + 'a>,
}

impl<'a> Iterator for Positions<'a> {
    type Item = &'a Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(position) = self.current.next() {
                return Some(position);
            }

            match self.stack.pop()? {
                Geometry::GeometryCollection(collection) => {
                    self.stack.extend(collection.geometries().iter().rev());
                }
                geometry => self.current = geometry.own_positions(),
            }
        }
    }
}

/// Discriminator of the geometry types, as written in the `type` field of GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    /// `"Point"`
    Point,
    /// `"MultiPoint"`
    MultiPoint,
    /// `"LineString"`
    LineString,
    /// `"MultiLineString"`
    MultiLineString,
    /// `"Polygon"`
    Polygon,
    /// `"MultiPolygon"`
    MultiPolygon,
    /// `"GeometryCollection"`
    GeometryCollection,
}

impl GeometryType {
    /// Name of the type as written in GeoJSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }
}

impl FromStr for GeometryType {
    type Err = GeoJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Point" => GeometryType::Point,
            "MultiPoint" => GeometryType::MultiPoint,
            "LineString" => GeometryType::LineString,
            "MultiLineString" => GeometryType::MultiLineString,
            "Polygon" => GeometryType::Polygon,
            "MultiPolygon" => GeometryType::MultiPolygon,
            "GeometryCollection" => GeometryType::GeometryCollection,
            other => return Err(GeoJsonError::UnknownGeometryType(other.to_string())),
        })
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Self::MultiPoint(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Self::MultiLineString(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Self::GeometryCollection(value)
    }
}
