//! Algorithms for GPS traces stored as GeoJSON.
//!
//! * [`turf`] has distance, bearing, intersection, point-in-polygon and line slicing calculations on the sphere.
//! * [`tidy`] resamples noisy traces.
//! * [`polyline`] reads and writes the encoded polyline format.
//!
//! The GeoJSON model is defined in the [`geotrace_types`] crate, which is re-exported.
//!
//! ```
//! use geotrace::tidy::{tidy, TidyOptions};
//! use geotrace::geotrace_types::{codec, Feature, FeatureCollection, LineString, Position};
//!
//! let trace = FeatureCollection::new(vec![Feature::new(LineString::new(vec![
//!     Position::new(13.4, 52.5),
//!     Position::new(13.40001, 52.5),
//!     Position::new(13.41, 52.5),
//! ]))]);
//!
//! let tidied = tidy(&trace, &TidyOptions::default()).unwrap();
//! assert_eq!(tidied.len(), 2);
//! println!("{}", codec::encode(&tidied));
//! ```

pub use geotrace_types;

pub mod error;
pub mod polyline;
pub mod tidy;
pub mod turf;

pub use error::TurfError;
