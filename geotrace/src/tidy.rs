//! Resampling of noisy GPS traces.
//!
//! [`tidy`] turns the positions of a feature collection into a shorter sequence of fixes, dropping fixes that are
//! both too close in space and too close in time to the previously kept one, and then limits the number of fixes
//! to [`TidyOptions::maximum_points`].
//!
//! Timestamps of positions are read from the `coordTimes` property of the features, which is an array of RFC 3339
//! strings paired with the positions of the geometry by index.

use chrono::{DateTime, FixedOffset};
use geotrace_types::{Feature, FeatureCollection, Point, Position};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TurfError;
use crate::turf::{distance, Units};

/// Name of the feature property with the timestamps of the positions.
pub const COORD_TIMES: &str = "coordTimes";

/// Parameters of [`tidy`].
///
/// Can be read from JSON configuration, all fields are optional:
///
/// ```
/// use geotrace::tidy::TidyOptions;
///
/// let options: TidyOptions = serde_json::from_str(r#"{"minimumDistanceMeters": 25}"#).unwrap();
/// assert_eq!(options, TidyOptions::default().with_minimum_distance(25.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TidyOptions {
    /// Fixes closer than this to the previous kept fix are candidates for removal.
    pub minimum_distance_meters: f64,
    /// Fixes recorded sooner than this after the previous kept fix are candidates for removal.
    pub minimum_time_millis: f64,
    /// Upper bound of the number of fixes in the output.
    pub maximum_points: usize,
}

impl Default for TidyOptions {
    fn default() -> Self {
        Self {
            minimum_distance_meters: 10.0,
            minimum_time_millis: 5000.0,
            maximum_points: 100,
        }
    }
}

impl TidyOptions {
    /// Sets minimum distance between kept fixes in meters.
    pub fn with_minimum_distance(mut self, meters: f64) -> Self {
        self.minimum_distance_meters = meters;
        self
    }

    /// Sets minimum time between kept fixes in milliseconds.
    pub fn with_minimum_time(mut self, millis: f64) -> Self {
        self.minimum_time_millis = millis;
        self
    }

    /// Sets maximum number of fixes in the output.
    pub fn with_maximum_points(mut self, maximum_points: usize) -> Self {
        self.maximum_points = maximum_points;
        self
    }

    /// Checks that the thresholds are finite and not negative.
    pub fn validate(&self) -> Result<(), TurfError> {
        for (name, value) in [
            ("minimum distance", self.minimum_distance_meters),
            ("minimum time", self.minimum_time_millis),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TurfError::InvalidConfiguration(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Position of the trace with its timestamp and the feature it came from.
#[derive(Debug)]
struct Fix<'a> {
    position: Position,
    time: Option<Timestamp<'a>>,
    feature: &'a Feature,
}

#[derive(Debug, Clone, Copy)]
struct Timestamp<'a> {
    raw: &'a str,
    parsed: DateTime<FixedOffset>,
}

/// Resamples the trace formed by all positions of the collection.
///
/// The positions of all features are joined into one sequence in document order. The first and the last fix are
/// always kept. Walking from the start, a fix is dropped if it is closer than
/// [`TidyOptions::minimum_distance_meters`] to the last kept fix and it either has no timestamp (or the last kept fix
/// has none) or it was recorded sooner than [`TidyOptions::minimum_time_millis`] after it. If more fixes than
/// [`TidyOptions::maximum_points`] remain, they are subsampled with an even stride.
///
/// Each kept fix becomes a `Point` feature with the properties of its source feature. The `coordTimes` property is
/// replaced with a single element array with the timestamp of the fix, or removed if the fix had no timestamp.
pub fn tidy(
    collection: &FeatureCollection,
    options: &TidyOptions,
) -> Result<FeatureCollection, TurfError> {
    options.validate()?;

    let fixes = fixes(collection)?;
    log::debug!(
        "Tidying {} fixes from {} features",
        fixes.len(),
        collection.len()
    );

    if fixes.is_empty() {
        return Ok(FeatureCollection::default().with_bbox(collection.bbox().copied()));
    }

    if fixes.len() < 2 {
        return Ok(fixes.iter().map(to_feature).collect());
    }

    if options.maximum_points < 2 {
        return Err(TurfError::InvalidConfiguration(format!(
            "maximum points must be at least 2, got {}",
            options.maximum_points
        )));
    }

    let kept = filter(&fixes, options);
    log::debug!("{} of {} fixes passed the filter", kept.len(), fixes.len());

    let kept = subsample(kept, options.maximum_points);

    Ok(kept.into_iter().map(|i| to_feature(&fixes[i])).collect())
}

fn fixes(collection: &FeatureCollection) -> Result<Vec<Fix<'_>>, TurfError> {
    let mut fixes = vec![];
    for (index, feature) in collection.features().iter().enumerate() {
        let Some(geometry) = feature.geometry() else {
            return Err(TurfError::UnprocessableFeature {
                index,
                reason: "feature has no geometry".into(),
            });
        };

        let times = coord_times(feature, index)?;
        for (i, position) in geometry.positions().enumerate() {
            fixes.push(Fix {
                position: *position,
                time: times.get(i).copied().flatten(),
                feature,
            });
        }
    }

    Ok(fixes)
}

fn coord_times(feature: &Feature, index: usize) -> Result<Vec<Option<Timestamp<'_>>>, TurfError> {
    let unprocessable = |reason: String| TurfError::UnprocessableFeature { index, reason };

    match feature.property(COORD_TIMES) {
        None | Some(Value::Null) => Ok(vec![]),
        Some(Value::String(raw)) => Ok(vec![Some(parse_time(raw).map_err(unprocessable)?)]),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| match value {
                Value::Null => Ok(None),
                Value::String(raw) => parse_time(raw).map(Some).map_err(unprocessable),
                other => Err(unprocessable(format!("invalid timestamp {other}"))),
            })
            .collect(),
        Some(other) => Err(unprocessable(format!(
            "{COORD_TIMES} must be an array of timestamps, got {other}"
        ))),
    }
}

fn parse_time(raw: &str) -> Result<Timestamp<'_>, String> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|err| format!("invalid timestamp {raw:?}: {err}"))?;
    Ok(Timestamp { raw, parsed })
}

fn filter(fixes: &[Fix], options: &TidyOptions) -> Vec<usize> {
    let last = fixes.len() - 1;
    let mut kept = vec![0];

    for (i, candidate) in fixes.iter().enumerate().take(last).skip(1) {
        let previous = &fixes[kept[kept.len() - 1]];

        let distance = distance(&previous.position, &candidate.position, Units::Meters);
        let elapsed = match (previous.time, candidate.time) {
            (Some(from), Some(to)) => Some((to.parsed - from.parsed).num_milliseconds() as f64),
            _ => None,
        };

        let too_close = distance < options.minimum_distance_meters;
        let too_soon = elapsed.map_or(true, |elapsed| elapsed < options.minimum_time_millis);
        if too_close && too_soon {
            log::trace!("Dropping fix {i}: {distance:.2} m, {elapsed:?} ms");
            continue;
        }

        kept.push(i);
    }

    kept.push(last);
    kept
}

/// Picks exactly `maximum` of the indices with an even stride, keeping the first and the last.
fn subsample(indices: Vec<usize>, maximum: usize) -> Vec<usize> {
    let n = indices.len();
    if n <= maximum {
        return indices;
    }

    log::debug!("Subsampling {n} fixes to {maximum}");

    // round(i * (n - 1) / (m - 1)) in integers, halves rounded up
    let m = maximum - 1;
    (0..maximum)
        .map(|i| indices[(2 * i * (n - 1) + m) / (2 * m)])
        .collect()
}

fn to_feature(fix: &Fix) -> Feature {
    let mut properties: Map<String, Value> = fix.feature.properties().clone();
    properties.shift_remove(COORD_TIMES);
    if let Some(time) = fix.time {
        properties.insert(
            COORD_TIMES.to_string(),
            Value::Array(vec![Value::String(time.raw.to_string())]),
        );
    }

    Feature::from_parts(Some(Point::new(fix.position).into()), properties)
}
