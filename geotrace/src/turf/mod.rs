//! Geometric algorithms on a spherical Earth, following the Turf library.

mod joins;
pub use joins::{inside, inside_multi_polygon, points_within_polygon};

mod line_intersects;
pub use line_intersects::{line_intersects, LineIntersectsResult};

pub mod measurement;
pub use measurement::{along, bbox, bearing, destination, distance, length, line_distance, midpoint};

mod nearest;
pub use nearest::{nearest_point_on_line, NearestPoint};

mod slice;
pub use slice::{line_slice, line_slice_along};

pub mod units;
pub use units::{
    convert_length, degrees_to_radians, length_to_degrees, length_to_radians, radians_to_degrees,
    radians_to_length, Units,
};
