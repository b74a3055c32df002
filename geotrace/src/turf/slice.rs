//! Sections of a line.

use geotrace_types::{LineString, Position};

use crate::error::TurfError;
use crate::turf::measurement::{bearing, destination, distance};
use crate::turf::nearest::{nearest_point_on_line, NearestPoint};
use crate::turf::units::Units;

/// Part of the line between the positions on it closest to `start` and `stop`.
///
/// The returned line starts and ends with the projected positions and contains all the vertices of `line` between
/// them. The order of `start` and `stop` does not matter: the section always follows the direction of `line`.
pub fn line_slice(start: &Position, stop: &Position, line: &[Position]) -> Result<LineString, TurfError> {
    if line.len() < 2 {
        return Err(TurfError::InvalidInput(format!(
            "line must have at least 2 positions, got {}",
            line.len()
        )));
    }
    if start == stop {
        return Err(TurfError::InvalidInput(
            "start and stop positions must differ".into(),
        ));
    }

    let from = nearest_point_on_line(start, line, Units::Kilometers)?;
    let to = nearest_point_on_line(stop, line, Units::Kilometers)?;
    let (from, to) = if along_order(&from, line) <= along_order(&to, line) {
        (from, to)
    } else {
        (to, from)
    };

    let mut positions = Vec::with_capacity(to.index - from.index + 2);
    positions.push(from.position);
    positions.extend_from_slice(&line[from.index + 1..=to.index]);
    positions.push(to.position);

    Ok(LineString::new(positions))
}

/// Sorting key of a projected position along the line: the segment, then the distance from the segment start.
fn along_order(point: &NearestPoint, line: &[Position]) -> (usize, f64) {
    (
        point.index,
        distance(&line[point.index], &point.position, Units::Kilometers),
    )
}

/// Part of the line between two distances measured from its start.
///
/// A `stop` past the end of the line ends the section at the last position. Distances must satisfy
/// `0 <= start < stop`, and `start` must not be past the end of the line.
pub fn line_slice_along(
    line: &[Position],
    start: f64,
    stop: f64,
    units: Units,
) -> Result<LineString, TurfError> {
    if line.len() < 2 {
        return Err(TurfError::InvalidInput(format!(
            "line must have at least 2 positions, got {}",
            line.len()
        )));
    }
    if start.is_nan() || stop.is_nan() || start < 0.0 || start >= stop {
        return Err(TurfError::InvalidInput(format!(
            "slice distances must satisfy 0 <= start < stop, got {start} and {stop}"
        )));
    }

    let mut slice = vec![];
    let mut travelled = 0.0;
    for (i, position) in line.iter().enumerate() {
        if start >= travelled && i == line.len() - 1 {
            break;
        }

        // `travelled` is positive in both branches below, so `i >= 1`.
        if travelled > start && slice.is_empty() {
            slice.push(interpolate(position, &line[i - 1], start - travelled, units));
        }

        if travelled >= stop {
            let overshot = stop - travelled;
            slice.push(if overshot == 0.0 {
                *position
            } else {
                interpolate(position, &line[i - 1], overshot, units)
            });
            return Ok(LineString::new(slice));
        }

        if travelled >= start {
            slice.push(*position);
        }

        if i == line.len() - 1 {
            break;
        }

        travelled += distance(position, &line[i + 1], units);
    }

    if slice.is_empty() {
        return Err(TurfError::InvalidInput(format!(
            "start distance {start} is beyond the end of the line"
        )));
    }

    Ok(LineString::new(slice))
}

/// Moves from `position` towards `previous` by `-overshot`.
fn interpolate(position: &Position, previous: &Position, overshot: f64, units: Units) -> Position {
    let direction = bearing(position, previous) - 180.0;
    destination(position, overshot, direction, units)
}
