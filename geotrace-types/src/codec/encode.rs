//! Writing of the object model as GeoJSON text.

use serde_json::{Map, Number, Value};

use crate::bounding_box::BoundingBox;
use crate::feature::{Feature, FeatureCollection, FeatureId};
use crate::geometry::{Geometry, GeometryCollection};
use crate::position::Position;
use crate::shifter::CoordinateShifter;

/// Output buffer of [`GeoJsonCodec::encode`](super::GeoJsonCodec::encode).
pub struct Encoder<'s> {
    pub(crate) shifter: &'s dyn CoordinateShifter,
    pub(crate) out: String,
}

impl Encoder<'_> {
    pub(crate) fn feature_collection(&mut self, collection: &FeatureCollection) {
        self.out.push_str(r#"{"type":"FeatureCollection""#);
        self.bbox(collection.bbox());
        self.out.push_str(r#","features":["#);
        for (i, feature) in collection.features().iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.feature(feature);
        }
        self.out.push_str("]}");
    }

    pub(crate) fn feature(&mut self, feature: &Feature) {
        self.out.push_str(r#"{"type":"Feature""#);
        if let Some(id) = feature.id() {
            self.out.push_str(r#","id":"#);
            let id = match id {
                FeatureId::String(id) => Value::String(id.clone()),
                FeatureId::Number(id) => Value::Number(id.clone()),
            };
            self.value(&id);
        }
        self.bbox(feature.bbox());

        self.out.push_str(r#","geometry":"#);
        match feature.geometry() {
            Some(geometry) => self.geometry(geometry),
            None => self.out.push_str("null"),
        }

        self.out.push_str(r#","properties":"#);
        self.value(&Value::Object(feature.properties().clone()));
        self.out.push('}');
    }

    /// Writes a geometry. Nested geometry collections are written using an explicit stack instead of recursion.
    pub(crate) fn geometry(&mut self, geometry: &Geometry) {
        let mut pending: Vec<(std::slice::Iter<Geometry>, bool)> = vec![];
        let mut current = geometry;

        loop {
            match current {
                Geometry::GeometryCollection(collection) => {
                    self.collection_start(collection);
                    pending.push((collection.geometries().iter(), false));
                }
                simple => {
                    let value = self.simple_geometry(simple);
                    self.value(&Value::Object(value));
                }
            }

            loop {
                let Some((members, has_written)) = pending.last_mut() else {
                    return;
                };

                match members.next() {
                    Some(member) => {
                        if *has_written {
                            self.out.push(',');
                        }
                        *has_written = true;
                        current = member;
                        break;
                    }
                    None => {
                        self.out.push_str("]}");
                        pending.pop();
                    }
                }
            }
        }
    }

    fn collection_start(&mut self, collection: &GeometryCollection) {
        self.out.push_str(r#"{"type":"GeometryCollection""#);
        self.bbox(collection.bbox());
        self.out.push_str(r#","geometries":["#);
    }

    fn simple_geometry(&self, geometry: &Geometry) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert(
            "type".to_string(),
            Value::String(geometry.geometry_type().as_str().to_string()),
        );
        if let Some(bbox) = geometry.bbox() {
            object.insert("bbox".to_string(), numbers(&bbox.coordinates()));
        }

        let coordinates = match geometry {
            Geometry::Point(v) => self.position(v.coordinates()),
            Geometry::MultiPoint(v) => self.positions(v.coordinates()),
            Geometry::LineString(v) => self.positions(v.coordinates()),
            Geometry::MultiLineString(v) => self.rings(v.coordinates()),
            Geometry::Polygon(v) => self.rings(v.coordinates()),
            Geometry::MultiPolygon(v) => Value::Array(
                v.coordinates()
                    .iter()
                    .map(|polygon| self.rings(polygon))
                    .collect(),
            ),
            Geometry::GeometryCollection(_) => Value::Null,
        };
        object.insert("coordinates".to_string(), coordinates);

        object
    }

    fn rings(&self, rings: &[Vec<Position>]) -> Value {
        Value::Array(rings.iter().map(|r| self.positions(r)).collect())
    }

    fn positions(&self, positions: &[Position]) -> Value {
        Value::Array(positions.iter().map(|p| self.position(p)).collect())
    }

    fn position(&self, position: &Position) -> Value {
        numbers(&self.shifter.unshift(*position).coordinates())
    }

    fn bbox(&mut self, bbox: Option<&BoundingBox>) {
        if let Some(bbox) = bbox {
            self.out.push_str(r#","bbox":"#);
            self.value(&numbers(&bbox.coordinates()));
        }
    }

    fn value(&mut self, value: &Value) {
        self.out.push_str(&value.to_string());
    }
}

/// Non-finite numbers cannot be represented in JSON and are written as `null`.
fn numbers(values: &[f64]) -> Value {
    Value::Array(
        values
            .iter()
            .map(|v| Number::from_f64(*v).map_or(Value::Null, Value::Number))
            .collect(),
    )
}
