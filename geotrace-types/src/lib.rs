//! GeoJSON object model for GPS traces.
//!
//! The crate contains the [`Position`] and [`BoundingBox`] primitives, the seven RFC 7946 geometry types collected
//! in the [`Geometry`] enum, [`Feature`] and [`FeatureCollection`], and a [`codec`] that reads and writes them as
//! GeoJSON text.
//!
//! ```
//! use geotrace_types::{codec, Feature, Point};
//!
//! let mut feature = Feature::new(Point::from_lng_lat(13.4, 52.5));
//! feature.add_string_property("name", "Berlin");
//!
//! let json = codec::encode(&feature);
//! assert_eq!(codec::decode_feature(&json).unwrap(), feature);
//! ```

pub mod bounding_box;
pub mod codec;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod position;
pub mod shifter;

pub use bounding_box::BoundingBox;
pub use codec::{GeoJson, GeoJsonCodec, ToGeoJson};
pub use error::GeoJsonError;
pub use feature::{Feature, FeatureCollection, FeatureId};
pub use geometry::{
    Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
pub use position::{GeoPoint, Position};
pub use shifter::{CoordinateShifter, IdentityShifter, OffsetShifter};
