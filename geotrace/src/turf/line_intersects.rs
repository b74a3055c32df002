use geotrace_types::Position;

/// Intersection of two lines, see [`line_intersects`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersectsResult {
    /// Longitude of the intersection point of the infinite lines.
    pub x: Option<f64>,
    /// Latitude of the intersection point of the infinite lines.
    pub y: Option<f64>,
    /// The point lies within the first segment, ends included.
    pub on_line1: bool,
    /// The point lies within the second segment, ends included.
    pub on_line2: bool,
}

impl LineIntersectsResult {
    const NONE: Self = Self {
        x: None,
        y: None,
        on_line1: false,
        on_line2: false,
    };

    /// Returns true if the segments themselves have a common point.
    pub fn intersects(&self) -> bool {
        self.on_line1 && self.on_line2
    }

    /// Intersection point of the infinite lines, if they are not parallel.
    pub fn point(&self) -> Option<Position> {
        Some(Position::new(self.x?, self.y?))
    }
}

/// Intersects the line through `p1` and `p2` with the line through `p3` and `p4`, treating coordinates as planar.
///
/// When the lines are not parallel, the result always contains the intersection point, and the flags tell whether
/// the point lies within each of the segments. Parallel and coincident lines, as well as zero length segments,
/// produce no point and both flags unset.
///
/// ```
/// use geotrace::turf::line_intersects;
/// use geotrace_types::Position;
///
/// let result = line_intersects(
///     &Position::new(0.0, 0.0),
///     &Position::new(2.0, 2.0),
///     &Position::new(0.0, 2.0),
///     &Position::new(2.0, 0.0),
/// );
/// assert_eq!(result.point(), Some(Position::new(1.0, 1.0)));
/// assert!(result.intersects());
/// ```
pub fn line_intersects(
    p1: &Position,
    p2: &Position,
    p3: &Position,
    p4: &Position,
) -> LineIntersectsResult {
    let (x1, y1, x2, y2) = (p1.lon(), p1.lat(), p2.lon(), p2.lat());
    let (x3, y3, x4, y4) = (p3.lon(), p3.lat(), p4.lon(), p4.lat());

    let denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);
    if denom == 0.0 {
        return LineIntersectsResult::NONE;
    }

    let ua = ((y1 - y3) * (x4 - x3) - (x1 - x3) * (y4 - y3)) / denom;
    let ub = ((y1 - y3) * (x2 - x1) - (x1 - x3) * (y2 - y1)) / denom;

    LineIntersectsResult {
        x: Some(x1 + ua * (x2 - x1)),
        y: Some(y1 + ua * (y2 - y1)),
        on_line1: (0.0..=1.0).contains(&ua),
        on_line2: (0.0..=1.0).contains(&ub),
    }
}
