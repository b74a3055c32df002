//! [`Feature`] and [`FeatureCollection`].

use serde_json::{Map, Number, Value};

use crate::bounding_box::BoundingBox;
use crate::geometry::Geometry;

/// Identifier of a feature. GeoJSON allows either a string or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureId {
    /// String identifier.
    String(String),
    /// Numeric identifier.
    Number(Number),
}

impl From<String> for FeatureId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FeatureId {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FeatureId {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for FeatureId {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

/// A geometry (or no geometry) together with arbitrary JSON properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    geometry: Option<Geometry>,
    properties: Map<String, Value>,
    id: Option<FeatureId>,
    bbox: Option<BoundingBox>,
}

impl Feature {
    /// Creates a feature with the given geometry and no properties.
    pub fn new(geometry: impl Into<Geometry>) -> Self {
        Self {
            geometry: Some(geometry.into()),
            ..Default::default()
        }
    }

    /// Creates a feature with optional geometry and the given properties.
    pub fn from_parts(geometry: Option<Geometry>, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
            ..Default::default()
        }
    }

    /// Sets the id of the feature.
    pub fn with_id(mut self, id: Option<FeatureId>) -> Self {
        self.id = id;
        self
    }

    /// Sets the bounding box of the feature.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Geometry of the feature. `None` for unlocated features.
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// All properties of the feature, in insertion order.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Mutable access to the properties.
    pub fn properties_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.properties
    }

    /// Id of the feature.
    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Sets a property to an arbitrary JSON value, replacing the old value.
    pub fn add_property(&mut self, key: impl Into<String>, value: Value) {
        self.properties.insert(key.into(), value);
    }

    /// Sets a string property.
    pub fn add_string_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.add_property(key, Value::String(value.into()));
    }

    /// Sets a numeric property. Non-finite values are stored as `null`, since JSON cannot represent them.
    pub fn add_number_property(&mut self, key: impl Into<String>, value: f64) {
        let value = Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.add_property(key, value);
    }

    /// Sets a boolean property.
    pub fn add_boolean_property(&mut self, key: impl Into<String>, value: bool) {
        self.add_property(key, Value::Bool(value));
    }

    /// Value of a property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Value of a property if it is a string.
    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    /// Value of a property if it is a number.
    pub fn number_property(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(Value::as_f64)
    }

    /// Value of a property if it is a boolean.
    pub fn boolean_property(&self, key: &str) -> Option<bool> {
        self.property(key).and_then(Value::as_bool)
    }

    /// Removes a property returning its value.
    pub fn remove_property(&mut self, key: &str) -> Option<Value> {
        self.properties.shift_remove(key)
    }

    /// Whether the property is set, even if to `null`.
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Whether the property is set to anything other than `null`.
    pub fn has_non_null_property(&self, key: &str) -> bool {
        self.property(key).is_some_and(|v| !v.is_null())
    }
}

/// Ordered list of features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    bbox: Option<BoundingBox>,
}

impl FeatureCollection {
    /// Creates a new collection.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            bbox: None,
        }
    }

    /// Sets the bounding box of the collection.
    pub fn with_bbox(mut self, bbox: Option<BoundingBox>) -> Self {
        self.bbox = bbox;
        self
    }

    /// Features of the collection in order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Consumes the collection returning its features.
    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Bounding box, if one was set.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Smallest box containing the positions of every feature's geometry.
    pub fn extent(&self) -> Option<BoundingBox> {
        BoundingBox::from_positions(
            self.features
                .iter()
                .filter_map(Feature::geometry)
                .flat_map(Geometry::positions),
        )
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
