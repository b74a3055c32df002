use std::sync::Arc;

use assert_matches::assert_matches;
use insta::assert_snapshot;
use serde_json::json;

use super::*;
use crate::bounding_box::BoundingBox;
use crate::feature::FeatureId;
use crate::position::Position;
use crate::shifter::OffsetShifter;

fn ring(offset: f64, size: f64) -> Vec<Position> {
    vec![
        Position::new(offset, offset),
        Position::new(offset + size, offset),
        Position::new(offset + size, offset + size),
        Position::new(offset, offset + size),
        Position::new(offset, offset),
    ]
}

fn all_geometries() -> Vec<Geometry> {
    let polygon_with_hole = Polygon::new(vec![ring(0.0, 10.0), ring(2.0, 1.0), ring(5.0, 2.0)]);

    vec![
        Point::from_lng_lat(100.0, 0.5).into(),
        Point::new(Position::with_altitude(-12.25, 45.0, 120.5))
            .with_bbox(Some(BoundingBox::new(-12.25, 45.0, -12.25, 45.0)))
            .into(),
        MultiPoint::new(vec![Position::new(1.0, 2.0), Position::new(3.0, 4.0)]).into(),
        LineString::new(vec![
            Position::new(0.1, 0.2),
            Position::with_altitude(0.3, 0.4, 0.1 + 0.2),
        ])
        .into(),
        MultiLineString::new(vec![ring(0.0, 1.0), vec![Position::new(5.0, 5.0)]]).into(),
        polygon_with_hole.clone().into(),
        MultiPolygon::from_polygons([polygon_with_hole, Polygon::new(vec![ring(20.0, 3.0)])])
            .with_bbox(Some(BoundingBox::with_altitude(0.0, 0.0, -1.0, 23.0, 23.0, 1.0)))
            .into(),
        GeometryCollection::new(vec![
            Point::from_lng_lat(1.0, 1.0).into(),
            GeometryCollection::new(vec![
                LineString::new(ring(0.0, 2.0)).into(),
                GeometryCollection::new(vec![]).into(),
            ])
            .into(),
        ])
        .into(),
    ]
}

#[test]
fn every_geometry_round_trips() {
    for geometry in all_geometries() {
        let json = encode(&geometry);
        let decoded = decode_geometry(&json).unwrap();
        assert_eq!(decoded, geometry, "{json}");
    }
}

#[test]
fn point_encoding() {
    assert_snapshot!(encode(&Point::from_lng_lat(100.0, 0.5)), @r#"{"type":"Point","coordinates":[100.0,0.5]}"#);
    assert_snapshot!(
        encode(&Point::new(Position::with_altitude(1.5, 2.0, 3.25))),
        @r#"{"type":"Point","coordinates":[1.5,2.0,3.25]}"#
    );
}

#[test]
fn missing_altitude_is_not_written() {
    let point = decode_geometry(r#"{"type":"Point","coordinates":[1,2]}"#).unwrap();
    let Geometry::Point(point) = &point else {
        panic!("invalid geometry type");
    };
    assert!(!point.coordinates().has_altitude());

    let json = encode(point);
    assert!(!json.contains("NaN"));
    assert!(!json.contains("null"));
    assert_eq!(json, r#"{"type":"Point","coordinates":[1.0,2.0]}"#);
}

#[test]
fn numbers_keep_their_bits() {
    let values = [0.1 + 0.2, 1e-7, 179.99999999999997, 5e-324, 1.7976931348623157e308];
    for value in values {
        let geometry: Geometry = Point::new(Position::with_altitude(value, value, value)).into();
        let decoded = decode_geometry(&encode(&geometry)).unwrap();
        let Geometry::Point(point) = decoded else {
            panic!("invalid geometry type");
        };
        assert_eq!(point.coordinates().lon().to_bits(), value.to_bits());
        assert_eq!(point.coordinates().alt().to_bits(), value.to_bits());
    }
}

#[test]
fn extra_coordinate_values_are_ignored() {
    let geometry = decode_geometry(r#"{"type":"Point","coordinates":[1,2,3,4]}"#).unwrap();
    assert_eq!(geometry, Geometry::from(Point::new(Position::with_altitude(1.0, 2.0, 3.0))));
}

#[test]
fn unknown_geometry_type() {
    assert_matches!(
        decode_geometry(r#"{"type":"Circle","coordinates":[0,0]}"#),
        Err(GeoJsonError::UnknownGeometryType(name)) if name == "Circle"
    );
    assert_matches!(
        decode(r#"{"type":"Circle","coordinates":[0,0]}"#),
        Err(GeoJsonError::UnknownGeometryType(name)) if name == "Circle"
    );
}

#[test]
fn invalid_bbox_length() {
    for len in [1, 2, 3, 5, 7] {
        let bbox = vec![0.0; len];
        let json = json!({"type": "Point", "coordinates": [0, 0], "bbox": bbox}).to_string();
        assert_matches!(
            decode_geometry(&json),
            Err(GeoJsonError::InvalidBoundingBox { len: l }) if l == len
        );
    }

    let json = r#"{"type":"FeatureCollection","features":[],"bbox":[1,2,3,4,5,6]}"#;
    let collection = decode_feature_collection(json).unwrap();
    assert_eq!(
        collection.bbox(),
        Some(&BoundingBox::with_altitude(1.0, 2.0, 3.0, 4.0, 5.0, 6.0))
    );
}

#[test]
fn missing_fields() {
    assert_matches!(
        decode_geometry(r#"{"coordinates":[0,0]}"#),
        Err(GeoJsonError::Parse { path, message }) if path == "$" && message.contains("type")
    );
    assert_matches!(
        decode_geometry(r#"{"type":"LineString"}"#),
        Err(GeoJsonError::Parse { path, message }) if path == "$" && message.contains("coordinates")
    );
    assert_matches!(
        decode_geometry(r#"{"type":"GeometryCollection"}"#),
        Err(GeoJsonError::Parse { message, .. }) if message.contains("geometries")
    );
    assert_matches!(
        decode_feature_collection(r#"{"type":"FeatureCollection"}"#),
        Err(GeoJsonError::Parse { message, .. }) if message.contains("features")
    );
}

#[test]
fn parse_errors_carry_path() {
    let json = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": null, "properties": {}},
            {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[1, 2], [3, "4"]]}, "properties": {}}
        ]
    }"#;

    assert_matches!(
        decode_feature_collection(json),
        Err(GeoJsonError::Parse { path, .. }) if path == "$.features[1].geometry.coordinates[1][1]"
    );

    let json = r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1,2]},{"type":"Point","coordinates":[1]}]}"#;
    assert_matches!(
        decode_geometry(json),
        Err(GeoJsonError::Parse { path, .. }) if path == "$.geometries[1].coordinates"
    );
}

#[test]
fn non_object_is_rejected() {
    assert_matches!(decode_geometry("[1, 2]"), Err(GeoJsonError::Parse { .. }));
    assert_matches!(decode_feature("42"), Err(GeoJsonError::Parse { .. }));
    assert_matches!(decode_geometry("{\"type\": "), Err(GeoJsonError::Parse { .. }));
    assert_matches!(
        decode_feature(r#"{"type":"Point","coordinates":[0,0]}"#),
        Err(GeoJsonError::Parse { path, .. }) if path == "$.type"
    );
}

#[test]
fn null_geometry() {
    assert_eq!(decode_optional_geometry("null").unwrap(), None);
    assert!(decode_optional_geometry(r#"{"type":"Point","coordinates":[0,0]}"#)
        .unwrap()
        .is_some());

    let feature = decode_feature(r#"{"type":"Feature","geometry":null,"properties":null}"#).unwrap();
    assert_eq!(feature.geometry(), None);
    assert!(feature.properties().is_empty());
    assert_snapshot!(encode(&feature), @r#"{"type":"Feature","geometry":null,"properties":{}}"#);
}

#[test]
fn feature_encoding() {
    let mut feature = Feature::new(Point::from_lng_lat(1.0, 2.0)).with_id(Some("a1".into()));
    feature.add_string_property("name", "x");
    feature.add_property("tags", json!([1, "two", null]));
    assert_snapshot!(
        encode(&feature),
        @r#"{"type":"Feature","id":"a1","geometry":{"type":"Point","coordinates":[1.0,2.0]},"properties":{"name":"x","tags":[1,"two",null]}}"#
    );

    let feature = decode_feature(&encode(&feature)).unwrap();
    assert_eq!(feature.id(), Some(&FeatureId::String("a1".to_string())));
}

#[test]
fn numeric_feature_id() {
    let feature = decode_feature(r#"{"type":"Feature","id":42,"geometry":null,"properties":{}}"#).unwrap();
    assert_eq!(feature.id(), Some(&FeatureId::from(42u64)));
    assert!(encode(&feature).contains(r#""id":42"#));

    assert_matches!(
        decode_feature(r#"{"type":"Feature","id":[1],"geometry":null}"#),
        Err(GeoJsonError::Parse { path, .. }) if path == "$.id"
    );
}

#[test]
fn feature_collection_round_trip() {
    let mut located = Feature::new(LineString::new(ring(0.0, 1.0)))
        .with_bbox(Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0)));
    located.add_number_property("length", 4.0);
    let unlocated = Feature::default().with_id(Some(7i64.into()));

    let collection = FeatureCollection::new(vec![located, unlocated])
        .with_bbox(Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0)));
    let decoded = decode_feature_collection(&encode(&collection)).unwrap();
    assert_eq!(decoded, collection);
}

#[test]
fn decode_dispatches_on_type() {
    assert_matches!(
        decode(r#"{"type":"Feature","geometry":null,"properties":{}}"#),
        Ok(GeoJson::Feature(_))
    );
    assert_matches!(
        decode(r#"{"type":"FeatureCollection","features":[]}"#),
        Ok(GeoJson::FeatureCollection(c)) if c.is_empty()
    );
    assert_matches!(
        decode(r#"{"type":"MultiPoint","coordinates":[]}"#),
        Ok(GeoJson::Geometry(Geometry::MultiPoint(_)))
    );
}

#[test]
fn shifter_is_applied_on_decode_and_reverted_on_encode() {
    let mut codec = GeoJsonCodec::with_shifter(OffsetShifter::new(3.0, 5.0, 8.0));
    assert!(!codec.is_using_default_shifter());

    let json = r#"{"type":"LineString","coordinates":[[1.0,2.0],[1.0,2.0,3.0]]}"#;
    let geometry = codec.decode_geometry(json).unwrap();
    assert_eq!(
        geometry,
        Geometry::from(LineString::new(vec![
            Position::new(4.0, 7.0),
            Position::with_altitude(4.0, 7.0, 11.0)
        ]))
    );
    assert_eq!(codec.encode(&geometry), json);

    codec.install(None);
    assert!(codec.is_using_default_shifter());
    assert_eq!(
        codec.decode_geometry(json).unwrap(),
        decode_geometry(json).unwrap()
    );

    codec.install(Some(Arc::new(OffsetShifter::new(1.0, 1.0, 0.0))));
    assert_eq!(
        codec.decode_geometry(r#"{"type":"Point","coordinates":[0,0]}"#).unwrap(),
        Geometry::from(Point::from_lng_lat(1.0, 1.0))
    );
}

#[test]
fn shifter_does_not_touch_bbox() {
    let codec = GeoJsonCodec::with_shifter(OffsetShifter::new(3.0, 5.0, 0.0));
    let geometry = codec
        .decode_geometry(r#"{"type":"Point","bbox":[0,0,1,1],"coordinates":[0,0]}"#)
        .unwrap();
    assert_eq!(geometry.bbox(), Some(&BoundingBox::new(0.0, 0.0, 1.0, 1.0)));
}

fn nested_collection(depth: usize) -> String {
    let mut json = String::new();
    for _ in 0..depth {
        json.push_str(r#"{"type":"GeometryCollection","geometries":["#);
    }
    json.push_str(r#"{"type":"Point","coordinates":[1.0,2.0]}"#);
    for _ in 0..depth {
        json.push_str("]}");
    }
    json
}

#[test]
fn nested_collections_round_trip() {
    let json = nested_collection(40);
    let geometry = decode_geometry(&json).unwrap();
    assert_eq!(geometry.positions().count(), 1);
    assert_eq!(encode(&geometry), json);
}

#[test]
fn deeply_nested_collections_round_trip() {
    let json = nested_collection(10_000);
    let geometry = decode_geometry(&json).unwrap();
    assert_eq!(geometry.positions().count(), 1);
    assert_eq!(encode(&geometry), json);
}

#[test]
fn deeply_nested_collection_in_feature() {
    let json = format!(
        r#"{{"type":"Feature","geometry":{},"properties":{{"name":"deep"}}}}"#,
        nested_collection(5_000)
    );
    let feature = decode_feature(&json).unwrap();
    assert_eq!(feature.string_property("name"), Some("deep"));
    assert_eq!(encode(&feature), json);
}

#[test]
fn error_path_inside_nested_collections() {
    let json = r#"{"type":"GeometryCollection","geometries":[
        {"type":"Point","coordinates":[0,0]},
        {"type":"GeometryCollection","geometries":[
            {"type":"GeometryCollection","geometries":[]},
            {"type":"LineString","coordinates":[[0,0],[1,"a"]]}
        ]}
    ]}"#;

    assert_matches!(
        decode_geometry(json),
        Err(GeoJsonError::Parse { path, .. })
            if path == "$.geometries[1].geometries[1].coordinates[1][1]"
    );
}

#[test]
fn deep_in_memory_collection_is_encoded() {
    let mut geometry: Geometry = Point::from_lng_lat(1.0, 2.0).into();
    for _ in 0..10_000 {
        geometry = GeometryCollection::new(vec![geometry]).into();
    }

    assert_eq!(encode(&geometry), nested_collection(10_000));
}
