//! Spatial relations between points and polygons.

use geotrace_types::{FeatureCollection, GeoPoint, Geometry, MultiPolygon, Polygon, Position};

/// Returns true if the point lies inside the polygon and outside all of its holes.
///
/// The test uses planar ray casting in longitude/latitude degrees, so the polygon can be concave. Points exactly on
/// a ring boundary may land on either side.
pub fn inside(point: &impl GeoPoint, polygon: &Polygon) -> bool {
    in_polygon(point, polygon.coordinates())
}

/// Returns true if the point lies inside any polygon of the multipolygon. See [`inside`].
pub fn inside_multi_polygon(point: &impl GeoPoint, multi_polygon: &MultiPolygon) -> bool {
    multi_polygon
        .coordinates()
        .iter()
        .any(|rings| in_polygon(point, rings))
}

/// Returns the point features that lie inside at least one of the polygons.
///
/// Features of `points` with a `Point` geometry are tested against the `Polygon` and `MultiPolygon` features of
/// `polygons`; features with other geometries are skipped. Matching features are returned once each, in input
/// order, with their properties and ids.
pub fn points_within_polygon(points: &FeatureCollection, polygons: &FeatureCollection) -> FeatureCollection {
    let areas: Vec<&Geometry> = polygons
        .features()
        .iter()
        .filter_map(|feature| feature.geometry())
        .filter(|geometry| matches!(geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_)))
        .collect();

    points
        .features()
        .iter()
        .filter(|feature| {
            let Some(Geometry::Point(point)) = feature.geometry() else {
                return false;
            };

            areas.iter().any(|area| match area {
                Geometry::Polygon(polygon) => inside(point.coordinates(), polygon),
                Geometry::MultiPolygon(multi_polygon) => {
                    inside_multi_polygon(point.coordinates(), multi_polygon)
                }
                _ => false,
            })
        })
        .cloned()
        .collect()
}

fn in_polygon(point: &impl GeoPoint, rings: &[Vec<Position>]) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };

    in_ring(point, outer) && !holes.iter().any(|hole| in_ring(point, hole))
}

/// Even-odd rule. The ring does not need to be closed.
fn in_ring(point: &impl GeoPoint, ring: &[Position]) -> bool {
    let (x, y) = (point.lon(), point.lat());
    let mut is_inside = false;

    let previous = ring.iter().cycle().skip(ring.len().saturating_sub(1));
    for (current, previous) in ring.iter().zip(previous) {
        let (xi, yi) = (current.lon(), current.lat());
        let (xj, yj) = (previous.lon(), previous.lat());

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            is_inside = !is_inside;
        }
    }

    is_inside
}

#[cfg(test)]
mod tests {
    use geotrace_types::{Feature, LineString, Point};

    use super::*;

    fn p(lon: f64, lat: f64) -> Position {
        Position::new(lon, lat)
    }

    fn square(west: f64, south: f64, east: f64, north: f64) -> Vec<Position> {
        vec![
            p(west, south),
            p(east, south),
            p(east, north),
            p(west, north),
            p(west, south),
        ]
    }

    #[test]
    fn point_in_concave_polygon() {
        // U shape open to the north.
        let polygon = Polygon::new(vec![vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 3.0),
            p(2.0, 3.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
            p(0.0, 0.0),
        ]]);

        assert!(inside(&p(0.5, 2.0), &polygon));
        assert!(inside(&p(1.5, 0.5), &polygon));
        assert!(!inside(&p(1.5, 2.0), &polygon));
        assert!(!inside(&p(4.0, 1.0), &polygon));
    }

    #[test]
    fn holes_are_excluded() {
        let polygon = Polygon::new(vec![
            square(0.0, 0.0, 10.0, 10.0),
            square(2.0, 2.0, 4.0, 4.0),
            square(6.0, 6.0, 8.0, 8.0),
        ]);

        assert!(inside(&p(1.0, 1.0), &polygon));
        assert!(inside(&p(5.0, 5.0), &polygon));
        assert!(!inside(&p(3.0, 3.0), &polygon));
        assert!(!inside(&p(7.0, 7.0), &polygon));
    }

    #[test]
    fn unclosed_and_empty_rings() {
        let open = Polygon::new(vec![vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)]]);
        assert!(inside(&p(1.0, 1.0), &open));

        assert!(!inside(&p(1.0, 1.0), &Polygon::new(vec![])));
        assert!(!inside(&p(1.0, 1.0), &Polygon::new(vec![vec![]])));
    }

    #[test]
    fn point_in_multi_polygon() {
        let multi_polygon = MultiPolygon::new(vec![
            vec![square(0.0, 0.0, 1.0, 1.0)],
            vec![square(5.0, 5.0, 9.0, 9.0), square(6.0, 6.0, 8.0, 8.0)],
        ]);

        assert!(inside_multi_polygon(&p(0.5, 0.5), &multi_polygon));
        assert!(inside_multi_polygon(&p(5.5, 5.5), &multi_polygon));
        assert!(!inside_multi_polygon(&p(7.0, 7.0), &multi_polygon));
        assert!(!inside_multi_polygon(&p(3.0, 3.0), &multi_polygon));
        assert!(!inside_multi_polygon(&p(0.5, 0.5), &MultiPolygon::new(vec![])));
    }

    #[test]
    fn points_within_polygons() {
        let mut first = Feature::new(Point::from_lng_lat(0.5, 0.5));
        first.add_string_property("name", "first");
        let points = FeatureCollection::new(vec![
            first,
            Feature::new(Point::from_lng_lat(20.0, 20.0)),
            Feature::new(LineString::new(vec![p(0.5, 0.5), p(0.6, 0.6)])),
            Feature::new(Point::from_lng_lat(5.5, 5.5)),
        ]);

        let polygons = FeatureCollection::new(vec![
            Feature::new(Polygon::new(vec![square(0.0, 0.0, 1.0, 1.0)])),
            Feature::new(Polygon::new(vec![square(0.0, 0.0, 10.0, 10.0)])),
            Feature::new(Point::from_lng_lat(20.0, 20.0)),
        ]);

        let within = points_within_polygon(&points, &polygons);
        assert_eq!(within.len(), 2);
        assert_eq!(within.features()[0].string_property("name"), Some("first"));
        assert_eq!(
            within.features()[1].geometry(),
            Some(&Geometry::from(Point::from_lng_lat(5.5, 5.5)))
        );

        let none = points_within_polygon(&points, &FeatureCollection::default());
        assert!(none.is_empty());
    }
}
