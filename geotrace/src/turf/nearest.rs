use geotrace_types::Position;

use crate::error::TurfError;
use crate::turf::line_intersects::line_intersects;
use crate::turf::measurement::{bearing, destination, distance};
use crate::turf::units::Units;

/// Result of [`nearest_point_on_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    /// The closest position on the line.
    pub position: Position,
    /// Distance from the query point to `position`.
    pub distance: f64,
    /// Index of the line segment containing `position`. Segment `i` connects positions `i` and `i + 1`.
    pub index: usize,
}

/// Finds the position on the line closest to the given point.
///
/// For every segment the candidates are its two ends and the foot of the great circle through `point`
/// perpendicular to the segment, if it falls within the segment. Distances are returned in `units`.
pub fn nearest_point_on_line(
    point: &Position,
    line: &[Position],
    units: Units,
) -> Result<NearestPoint, TurfError> {
    if line.len() < 2 {
        return Err(TurfError::InvalidInput(format!(
            "line must have at least 2 positions, got {}",
            line.len()
        )));
    }

    let mut closest = NearestPoint {
        position: line[0],
        distance: f64::INFINITY,
        index: 0,
    };

    for (index, segment) in line.windows(2).enumerate() {
        let (start, stop) = (&segment[0], &segment[1]);
        let start_distance = distance(point, start, units);
        let stop_distance = distance(point, stop, units);

        let height = start_distance.max(stop_distance);
        let direction = bearing(start, stop);
        let normal_start = destination(point, height, direction + 90.0, units);
        let normal_end = destination(point, height, direction - 90.0, units);

        let intersection = line_intersects(&normal_start, &normal_end, start, stop);
        let foot = intersection
            .point()
            .filter(|_| intersection.intersects())
            .map(|foot| (foot, distance(point, &foot, units)));

        let candidates = [(*start, start_distance), (*stop, stop_distance)]
            .into_iter()
            .chain(foot);
        for (position, distance) in candidates {
            if distance < closest.distance {
                closest = NearestPoint {
                    position,
                    distance,
                    index,
                };
            }
        }
    }

    Ok(closest)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn p(lon: f64, lat: f64) -> Position {
        Position::new(lon, lat)
    }

    #[test]
    fn foot_of_perpendicular() {
        let nearest =
            nearest_point_on_line(&p(1.0, 1.0), &[p(0.0, 0.0), p(2.0, 0.0)], Units::Kilometers)
                .unwrap();

        assert_relative_eq!(nearest.position.lon(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(nearest.position.lat(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(nearest.distance, 6373.0_f64 * 1.0_f64.to_radians(), epsilon = 1e-3);
        assert_eq!(nearest.index, 0);
    }

    #[test]
    fn end_of_line() {
        let nearest =
            nearest_point_on_line(&p(3.0, 0.5), &[p(0.0, 0.0), p(1.0, 0.0)], Units::Kilometers)
                .unwrap();
        assert_eq!(nearest.position, p(1.0, 0.0));
        assert_eq!(nearest.index, 0);
        assert_relative_eq!(
            nearest.distance,
            distance(&p(3.0, 0.5), &p(1.0, 0.0), Units::Kilometers)
        );
    }

    #[test]
    fn later_segment() {
        let line = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        let nearest = nearest_point_on_line(&p(1.5, 0.5), &line, Units::Kilometers).unwrap();

        assert_eq!(nearest.index, 1);
        assert_relative_eq!(nearest.position.lon(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(nearest.position.lat(), 0.5, epsilon = 1e-3);
        assert!(nearest.distance < distance(&p(1.5, 0.5), &p(1.0, 0.0), Units::Kilometers));
    }

    #[test]
    fn point_on_vertex() {
        let line = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)];
        let nearest = nearest_point_on_line(&p(1.0, 0.0), &line, Units::Meters).unwrap();
        assert_eq!(nearest.position, p(1.0, 0.0));
        assert_eq!(nearest.distance, 0.0);
        assert_eq!(nearest.index, 0);
    }

    #[test]
    fn short_line() {
        assert_matches!(
            nearest_point_on_line(&p(0.0, 0.0), &[p(1.0, 1.0)], Units::Kilometers),
            Err(TurfError::InvalidInput(_))
        );
        assert_matches!(
            nearest_point_on_line(&p(0.0, 0.0), &[], Units::Kilometers),
            Err(TurfError::InvalidInput(_))
        );
    }
}
