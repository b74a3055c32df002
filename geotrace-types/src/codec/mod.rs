//! Reading and writing GeoJSON text.
//!
//! All the functions go through a [`GeoJsonCodec`], which holds the [`CoordinateShifter`] applied to every
//! position. The free functions ([`decode_geometry`], [`encode`], ...) use a codec with the identity shifter.
//!
//! ```
//! use geotrace_types::codec::{decode_geometry, encode};
//! use geotrace_types::Geometry;
//!
//! let geometry = decode_geometry(r#"{"type":"Point","coordinates":[10.5,20.0]}"#).unwrap();
//! assert!(matches!(geometry, Geometry::Point(_)));
//! assert_eq!(encode(&geometry), r#"{"type":"Point","coordinates":[10.5,20.0]}"#);
//! ```

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::error::GeoJsonError;
use crate::feature::{Feature, FeatureCollection};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use crate::shifter::{CoordinateShifter, IdentityShifter};

mod decode;
mod encode;
mod path;

use decode::Decoder;
pub use encode::Encoder;
use path::JsonPath;

/// Any top-level GeoJSON object.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    /// One of the geometry types.
    Geometry(Geometry),
    /// A feature.
    Feature(Feature),
    /// A feature collection.
    FeatureCollection(FeatureCollection),
}

/// Values that can be written as GeoJSON.
pub trait ToGeoJson {
    /// Appends GeoJSON representation of the value to the encoder output.
    #[doc(hidden)]
    fn write_geojson(&self, encoder: &mut Encoder<'_>);
}

impl ToGeoJson for Geometry {
    fn write_geojson(&self, encoder: &mut Encoder<'_>) {
        encoder.geometry(self);
    }
}

impl ToGeoJson for Feature {
    fn write_geojson(&self, encoder: &mut Encoder<'_>) {
        encoder.feature(self);
    }
}

impl ToGeoJson for FeatureCollection {
    fn write_geojson(&self, encoder: &mut Encoder<'_>) {
        encoder.feature_collection(self);
    }
}

impl ToGeoJson for GeoJson {
    fn write_geojson(&self, encoder: &mut Encoder<'_>) {
        match self {
            GeoJson::Geometry(v) => encoder.geometry(v),
            GeoJson::Feature(v) => encoder.feature(v),
            GeoJson::FeatureCollection(v) => encoder.feature_collection(v),
        }
    }
}

macro_rules! impl_to_geojson_for_variant {
    ($($ty:ident),*) => {
        $(
            impl ToGeoJson for $ty {
                fn write_geojson(&self, encoder: &mut Encoder<'_>) {
                    encoder.geometry(&Geometry::from(self.clone()));
                }
            }
        )*
    };
}

impl_to_geojson_for_variant!(
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection
);

/// Decoder and encoder of GeoJSON text with a configurable [`CoordinateShifter`].
///
/// Replacing the shifter requires `&mut self`, so a codec shared between threads always uses the same shifter for
/// the whole duration of a call.
#[derive(Debug, Clone)]
pub struct GeoJsonCodec {
    shifter: Option<Arc<dyn CoordinateShifter>>,
}

impl Default for GeoJsonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl GeoJsonCodec {
    /// Creates a codec with the identity shifter.
    pub const fn new() -> Self {
        Self { shifter: None }
    }

    /// Creates a codec with the given shifter.
    pub fn with_shifter(shifter: impl CoordinateShifter + 'static) -> Self {
        Self {
            shifter: Some(Arc::new(shifter)),
        }
    }

    /// Replaces the shifter. `None` restores the identity shifter.
    pub fn install(&mut self, shifter: Option<Arc<dyn CoordinateShifter>>) {
        log::trace!("Installing coordinate shifter: {shifter:?}");
        self.shifter = shifter;
    }

    /// Returns true if no shifter is installed.
    pub fn is_using_default_shifter(&self) -> bool {
        self.shifter.is_none()
    }

    /// Shifter applied by the codec.
    pub fn shifter(&self) -> &dyn CoordinateShifter {
        match &self.shifter {
            Some(shifter) => shifter.as_ref(),
            None => &IdentityShifter,
        }
    }

    /// Decodes any GeoJSON object, dispatching on its `type`.
    pub fn decode(&self, json: &str) -> Result<GeoJson, GeoJsonError> {
        let document = parse(json)?;
        let value = &document.0;
        let root = JsonPath::root("$");
        match decode::object_type(value, &root)? {
            "Feature" => Ok(GeoJson::Feature(self.decoder().feature(value, &root)?)),
            "FeatureCollection" => Ok(GeoJson::FeatureCollection(
                self.decoder().feature_collection(value, &root)?,
            )),
            _ => Ok(GeoJson::Geometry(self.decoder().geometry(value, "$")?)),
        }
    }

    /// Decodes a geometry.
    pub fn decode_geometry(&self, json: &str) -> Result<Geometry, GeoJsonError> {
        let document = parse(json)?;
        self.decoder().geometry(&document.0, "$")
    }

    /// Decodes a geometry that can be `null`.
    pub fn decode_optional_geometry(&self, json: &str) -> Result<Option<Geometry>, GeoJsonError> {
        let document = parse(json)?;
        self.decoder()
            .optional_geometry(&document.0, &JsonPath::root("$"))
    }

    /// Decodes a feature.
    pub fn decode_feature(&self, json: &str) -> Result<Feature, GeoJsonError> {
        let document = parse(json)?;
        self.decoder().feature(&document.0, &JsonPath::root("$"))
    }

    /// Decodes a feature collection.
    pub fn decode_feature_collection(&self, json: &str) -> Result<FeatureCollection, GeoJsonError> {
        let document = parse(json)?;
        self.decoder()
            .feature_collection(&document.0, &JsonPath::root("$"))
    }

    /// Writes the value as compact GeoJSON text.
    pub fn encode(&self, value: &impl ToGeoJson) -> String {
        let mut encoder = Encoder {
            shifter: self.shifter(),
            out: String::new(),
        };
        value.write_geojson(&mut encoder);
        encoder.out
    }

    fn decoder(&self) -> Decoder<'_> {
        Decoder {
            shifter: self.shifter(),
        }
    }
}

/// Parsed JSON text.
///
/// Nesting depth of the input is not limited: the parser grows its stack on the heap when it runs low, and the
/// parsed value is released iteratively.
struct Document(Value);

impl Drop for Document {
    fn drop(&mut self) {
        let mut stack = vec![self.0.take()];
        while let Some(value) = stack.pop() {
            match value {
                Value::Array(items) => stack.extend(items),
                Value::Object(fields) => stack.extend(fields.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

fn parse(json: &str) -> Result<Document, GeoJsonError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();

    let document = Document(Value::deserialize(serde_stacker::Deserializer::new(
        &mut deserializer,
    ))?);
    deserializer.end()?;

    Ok(document)
}

static DEFAULT_CODEC: GeoJsonCodec = GeoJsonCodec::new();

/// Decodes any GeoJSON object using the identity shifter.
pub fn decode(json: &str) -> Result<GeoJson, GeoJsonError> {
    DEFAULT_CODEC.decode(json)
}

/// Decodes a geometry using the identity shifter.
pub fn decode_geometry(json: &str) -> Result<Geometry, GeoJsonError> {
    DEFAULT_CODEC.decode_geometry(json)
}

/// Decodes a geometry that can be `null` using the identity shifter.
pub fn decode_optional_geometry(json: &str) -> Result<Option<Geometry>, GeoJsonError> {
    DEFAULT_CODEC.decode_optional_geometry(json)
}

/// Decodes a feature using the identity shifter.
pub fn decode_feature(json: &str) -> Result<Feature, GeoJsonError> {
    DEFAULT_CODEC.decode_feature(json)
}

/// Decodes a feature collection using the identity shifter.
pub fn decode_feature_collection(json: &str) -> Result<FeatureCollection, GeoJsonError> {
    DEFAULT_CODEC.decode_feature_collection(json)
}

/// Writes the value as GeoJSON using the identity shifter.
pub fn encode(value: &impl ToGeoJson) -> String {
    DEFAULT_CODEC.encode(value)
}

#[cfg(test)]
mod tests;
