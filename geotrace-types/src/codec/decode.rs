//! Conversion of parsed JSON values into the object model.

use serde_json::{Map, Value};

use crate::bounding_box::BoundingBox;
use crate::codec::path::JsonPath;
use crate::error::GeoJsonError;
use crate::feature::{Feature, FeatureCollection, FeatureId};
use crate::geometry::{
    Geometry, GeometryCollection, GeometryType, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon,
};
use crate::position::Position;
use crate::shifter::CoordinateShifter;

pub(crate) struct Decoder<'s> {
    pub(crate) shifter: &'s dyn CoordinateShifter,
}

/// Collection whose members are being decoded.
struct PendingCollection<'v> {
    members: &'v [Value],
    bbox: Option<BoundingBox>,
    decoded: Vec<Geometry>,
}

impl<'v> PendingCollection<'v> {
    fn next_member(&self) -> Option<&'v Value> {
        self.members.get(self.decoded.len())
    }

    fn finish(self) -> Geometry {
        GeometryCollection::new(self.decoded)
            .with_bbox(self.bbox)
            .into()
    }
}

enum Visited<'v> {
    Simple(Geometry),
    Collection(PendingCollection<'v>),
}

impl Decoder<'_> {
    pub(crate) fn feature_collection(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Result<FeatureCollection, GeoJsonError> {
        let object = as_object(value, path)?;
        expect_type(object, "FeatureCollection", path)?;

        let features_path = path.key("features");
        let features = match object.get("features") {
            Some(Value::Array(features)) => features,
            Some(_) => return Err(GeoJsonError::parse(features_path.to_string(), "expected an array")),
            None => return Err(missing_field("features", path)),
        };

        let features = features
            .iter()
            .enumerate()
            .map(|(i, f)| self.feature(f, &features_path.index(i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection::new(features).with_bbox(bbox(object, path)?))
    }

    pub(crate) fn feature(&self, value: &Value, path: &JsonPath) -> Result<Feature, GeoJsonError> {
        let object = as_object(value, path)?;
        expect_type(object, "Feature", path)?;

        let geometry = match object.get("geometry") {
            Some(geometry) => self.optional_geometry(geometry, &path.key("geometry"))?,
            None => None,
        };

        let properties = match object.get("properties") {
            Some(Value::Object(properties)) => properties.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(GeoJsonError::parse(
                    path.key("properties").to_string(),
                    "expected an object or null",
                ))
            }
        };

        let id = match object.get("id") {
            Some(Value::String(id)) => Some(FeatureId::String(id.clone())),
            Some(Value::Number(id)) => Some(FeatureId::Number(id.clone())),
            Some(Value::Null) | None => None,
            Some(_) => {
                return Err(GeoJsonError::parse(
                    path.key("id").to_string(),
                    "expected a string or a number",
                ))
            }
        };

        Ok(Feature::from_parts(geometry, properties)
            .with_id(id)
            .with_bbox(bbox(object, path)?))
    }

    pub(crate) fn optional_geometry(
        &self,
        value: &Value,
        path: &JsonPath,
    ) -> Result<Option<Geometry>, GeoJsonError> {
        match value {
            Value::Null => Ok(None),
            value => self.geometry(value, &path.to_string()).map(Some),
        }
    }

    /// Decodes a geometry. Members of geometry collections are decoded using an explicit stack instead of
    /// recursion.
    pub(crate) fn geometry(&self, value: &Value, path: &str) -> Result<Geometry, GeoJsonError> {
        let mut pending: Vec<PendingCollection> = vec![];
        let mut current = value;

        loop {
            let visited = self
                .visit(current)
                .map_err(|err| locate(err, path, &pending))?;

            let mut finished = match visited {
                Visited::Simple(geometry) => geometry,
                Visited::Collection(collection) => match collection.next_member() {
                    Some(member) => {
                        current = member;
                        pending.push(collection);
                        continue;
                    }
                    None => collection.finish(),
                },
            };

            loop {
                let Some(mut collection) = pending.pop() else {
                    return Ok(finished);
                };

                collection.decoded.push(finished);
                if let Some(member) = collection.next_member() {
                    current = member;
                    pending.push(collection);
                    break;
                }

                finished = collection.finish();
            }
        }
    }

    /// Decodes a simple geometry, or reads the header of a collection. Error paths are relative to `value`.
    fn visit<'v>(&self, value: &'v Value) -> Result<Visited<'v>, GeoJsonError> {
        let path = JsonPath::root("");
        let object = as_object(value, &path)?;
        let geometry_type = geometry_type(object, &path)?;
        if geometry_type != GeometryType::GeometryCollection {
            return self
                .simple_geometry(object, geometry_type, &path)
                .map(Visited::Simple);
        }

        let members = match object.get("geometries") {
            Some(Value::Array(members)) => members,
            Some(_) => {
                return Err(GeoJsonError::parse(
                    path.key("geometries").to_string(),
                    "expected an array",
                ))
            }
            None => return Err(missing_field("geometries", &path)),
        };

        Ok(Visited::Collection(PendingCollection {
            members,
            bbox: bbox(object, &path)?,
            decoded: Vec::with_capacity(members.len()),
        }))
    }

    fn simple_geometry(
        &self,
        object: &Map<String, Value>,
        geometry_type: GeometryType,
        path: &JsonPath,
    ) -> Result<Geometry, GeoJsonError> {
        let coordinates_path = path.key("coordinates");
        let coordinates = object
            .get("coordinates")
            .ok_or_else(|| missing_field("coordinates", path))?;
        let bbox = bbox(object, path)?;

        let geometry = match geometry_type {
            GeometryType::Point => {
                Point::new(self.position(coordinates, &coordinates_path)?).with_bbox(bbox).into()
            }
            GeometryType::MultiPoint => {
                MultiPoint::new(self.positions(coordinates, &coordinates_path)?)
                    .with_bbox(bbox)
                    .into()
            }
            GeometryType::LineString => {
                LineString::new(self.positions(coordinates, &coordinates_path)?)
                    .with_bbox(bbox)
                    .into()
            }
            GeometryType::MultiLineString => {
                MultiLineString::new(self.rings(coordinates, &coordinates_path)?)
                    .with_bbox(bbox)
                    .into()
            }
            GeometryType::Polygon => Polygon::new(self.rings(coordinates, &coordinates_path)?)
                .with_bbox(bbox)
                .into(),
            GeometryType::MultiPolygon => {
                let polygons = as_array(coordinates, &coordinates_path)?
                    .iter()
                    .enumerate()
                    .map(|(i, p)| self.rings(p, &coordinates_path.index(i)))
                    .collect::<Result<Vec<_>, _>>()?;
                MultiPolygon::new(polygons).with_bbox(bbox).into()
            }
            GeometryType::GeometryCollection => {
                return Err(GeoJsonError::parse(
                    path.to_string(),
                    "geometry collection has no coordinates",
                ))
            }
        };

        Ok(geometry)
    }

    fn rings(&self, value: &Value, path: &JsonPath) -> Result<Vec<Vec<Position>>, GeoJsonError> {
        as_array(value, path)?
            .iter()
            .enumerate()
            .map(|(i, ring)| self.positions(ring, &path.index(i)))
            .collect()
    }

    fn positions(&self, value: &Value, path: &JsonPath) -> Result<Vec<Position>, GeoJsonError> {
        as_array(value, path)?
            .iter()
            .enumerate()
            .map(|(i, p)| self.position(p, &path.index(i)))
            .collect()
    }

    fn position(&self, value: &Value, path: &JsonPath) -> Result<Position, GeoJsonError> {
        let numbers = numbers(value, path)?;
        let position = Position::from_coordinates(&numbers)
            .map_err(|err| GeoJsonError::parse(path.to_string(), err.to_string()))?;
        Ok(self.shifter.shift(position))
    }
}

/// Prefixes the relative path of a parse error with the location of the collection member being decoded. The full
/// path is only built when decoding fails, since its length grows with the nesting depth.
fn locate(error: GeoJsonError, root: &str, pending: &[PendingCollection]) -> GeoJsonError {
    match error {
        GeoJsonError::Parse { path, message } => {
            let mut located = root.to_string();
            for collection in pending {
                located.push_str(&format!(".geometries[{}]", collection.decoded.len()));
            }
            located.push_str(&path);
            GeoJsonError::Parse {
                path: located,
                message,
            }
        }
        other => other,
    }
}

fn as_object<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v Map<String, Value>, GeoJsonError> {
    value
        .as_object()
        .ok_or_else(|| GeoJsonError::parse(path.to_string(), format!("expected an object, got {}", kind(value))))
}

fn as_array<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v Vec<Value>, GeoJsonError> {
    value
        .as_array()
        .ok_or_else(|| GeoJsonError::parse(path.to_string(), format!("expected an array, got {}", kind(value))))
}

fn numbers(value: &Value, path: &JsonPath) -> Result<Vec<f64>, GeoJsonError> {
    as_array(value, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64().ok_or_else(|| {
                GeoJsonError::parse(
                    path.index(i).to_string(),
                    format!("expected a number, got {}", kind(v)),
                )
            })
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn missing_field(field: &str, path: &JsonPath) -> GeoJsonError {
    GeoJsonError::parse(path.to_string(), format!("missing field `{field}`"))
}

fn type_name<'v>(object: &'v Map<String, Value>, path: &JsonPath) -> Result<&'v str, GeoJsonError> {
    match object.get("type") {
        Some(Value::String(name)) => Ok(name),
        Some(other) => Err(GeoJsonError::parse(
            path.key("type").to_string(),
            format!("expected a string, got {}", kind(other)),
        )),
        None => Err(missing_field("type", path)),
    }
}

pub(crate) fn object_type<'v>(value: &'v Value, path: &JsonPath) -> Result<&'v str, GeoJsonError> {
    type_name(as_object(value, path)?, path)
}

fn geometry_type(object: &Map<String, Value>, path: &JsonPath) -> Result<GeometryType, GeoJsonError> {
    type_name(object, path)?.parse()
}

fn expect_type(object: &Map<String, Value>, expected: &str, path: &JsonPath) -> Result<(), GeoJsonError> {
    let name = type_name(object, path)?;
    if name != expected {
        return Err(GeoJsonError::parse(
            path.key("type").to_string(),
            format!("expected `{expected}`, got `{name}`"),
        ));
    }

    Ok(())
}

fn bbox(object: &Map<String, Value>, path: &JsonPath) -> Result<Option<BoundingBox>, GeoJsonError> {
    match object.get("bbox") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let values = numbers(value, &path.key("bbox"))?;
            BoundingBox::from_coordinates(&values).map(Some)
        }
    }
}
