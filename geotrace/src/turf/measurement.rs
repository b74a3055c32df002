//! Distances, directions and extents on a spherical Earth.

use geotrace_types::{BoundingBox, GeoPoint, Geometry, Position};

use crate::error::TurfError;
use crate::turf::units::{length_to_radians, radians_to_length, Units};

/// Great circle distance between two points calculated with the haversine formula.
pub fn distance(from: &impl GeoPoint, to: &impl GeoPoint, units: Units) -> f64 {
    let d_lat = to.lat_rad() - from.lat_rad();
    let d_lon = to.lon_rad() - from.lon_rad();
    let a = (d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * from.lat_rad().cos() * to.lat_rad().cos();

    radians_to_length(2.0 * a.sqrt().atan2((1.0 - a).sqrt()), units)
}

/// Initial bearing from one point to another in degrees, between -180 and 180. North is 0, east is 90.
pub fn bearing(from: &impl GeoPoint, to: &impl GeoPoint) -> f64 {
    let lat1 = from.lat_rad();
    let lat2 = to.lat_rad();
    let d_lon = to.lon_rad() - from.lon_rad();

    let a = d_lon.sin() * lat2.cos();
    let b = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    a.atan2(b).to_degrees()
}

/// Point at the given distance from the origin, moving along a great circle with the given initial bearing.
///
/// The altitude of the origin is not carried over.
pub fn destination(origin: &impl GeoPoint, distance: f64, bearing: f64, units: Units) -> Position {
    let lon1 = origin.lon_rad();
    let lat1 = origin.lat_rad();
    let bearing = bearing.to_radians();
    let radians = length_to_radians(distance, units);

    let lat2 = (lat1.sin() * radians.cos() + lat1.cos() * radians.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * radians.sin() * lat1.cos())
            .atan2(radians.cos() - lat1.sin() * lat2.sin());

    Position::new(lon2.to_degrees(), lat2.to_degrees())
}

/// Point halfway between two points along the great circle connecting them.
pub fn midpoint(from: &impl GeoPoint, to: &impl GeoPoint) -> Position {
    let dist = distance(from, to, Units::Miles);
    let heading = bearing(from, to);
    destination(from, dist / 2.0, heading, Units::Miles)
}

/// Point at the given distance along the line.
///
/// Distances past the end of the line return the last position, and distances that are not positive (including
/// NaN) return the first one. Returns `None` for an empty line.
pub fn along(line: &[Position], distance: f64, units: Units) -> Option<Position> {
    let last = line.last()?;
    if distance.is_nan() || distance <= 0.0 {
        return line.first().copied();
    }

    let mut travelled = 0.0;
    for (i, position) in line.iter().enumerate() {
        if distance >= travelled && i == line.len() - 1 {
            break;
        }

        if travelled >= distance {
            let overshot = distance - travelled;
            if overshot == 0.0 {
                return Some(*position);
            }

            let direction = bearing(position, &line[i - 1]) - 180.0;
            return Some(destination(position, overshot, direction, units));
        }

        travelled += self::distance(position, &line[i + 1], units);
    }

    Some(*last)
}

/// Total length of the path through the positions.
pub fn length(positions: &[Position], units: Units) -> f64 {
    positions
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1], units))
        .sum()
}

/// Length of a line, or the sum of the lengths of lines or polygon rings.
///
/// Points and geometry collections have no length and return [`TurfError::InvalidInput`].
pub fn line_distance(geometry: &Geometry, units: Units) -> Result<f64, TurfError> {
    let lines: &[Vec<Position>] = match geometry {
        Geometry::LineString(line) => return Ok(length(line.coordinates(), units)),
        Geometry::MultiLineString(lines) => lines.coordinates(),
        Geometry::Polygon(polygon) => polygon.coordinates(),
        Geometry::MultiPolygon(polygons) => {
            return Ok(polygons
                .coordinates()
                .iter()
                .flatten()
                .map(|ring| length(ring, units))
                .sum())
        }
        other => {
            return Err(TurfError::InvalidInput(format!(
                "line distance is not defined for {}",
                other.geometry_type()
            )))
        }
    };

    Ok(lines.iter().map(|line| length(line, units)).sum())
}

/// Two dimensional extent of the geometry. Altitude is ignored. `None` if the geometry has no positions.
pub fn bbox(geometry: &Geometry) -> Option<BoundingBox> {
    let mut positions = geometry.positions();
    let first = positions.next()?;
    let init = (first.lon(), first.lat(), first.lon(), first.lat());

    let (west, south, east, north) = positions.fold(init, |(w, s, e, n), p| {
        (w.min(p.lon()), s.min(p.lat()), e.max(p.lon()), n.max(p.lat()))
    });

    Some(BoundingBox::new(west, south, east, north))
}
