//! Encoded polyline format.
//!
//! A path is stored as a string of printable ASCII characters. Each coordinate is rounded to `precision` decimal
//! digits, delta encoded against the previous position and written as a variable length integer, latitude first.

use geotrace_types::Position;

use crate::error::TurfError;

/// Precision of the Google polyline format.
pub const PRECISION_5: u32 = 5;
/// Precision used by OSRM and Mapbox directions.
pub const PRECISION_6: u32 = 6;

/// Encodes the path. Altitude is dropped.
///
/// Coordinates are not range checked. Values that do not fit into 64 bits after scaling are saturated, and deltas
/// between them wrap around the same way [`decode`] accumulates them.
pub fn encode(path: &[Position], precision: u32) -> String {
    let factor = factor(precision);
    let mut out = String::new();
    let (mut last_lat, mut last_lon) = (0i64, 0i64);

    for position in path {
        let lat = (position.lat() * factor).round() as i64;
        let lon = (position.lon() * factor).round() as i64;

        encode_value(lat.wrapping_sub(last_lat), &mut out);
        encode_value(lon.wrapping_sub(last_lon), &mut out);

        last_lat = lat;
        last_lon = lon;
    }

    out
}

/// Decodes a path encoded with the given precision.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Position>, TurfError> {
    let factor = factor(precision);
    let mut bytes = encoded.bytes().peekable();
    let mut path = vec![];
    let (mut lat, mut lon) = (0i64, 0i64);

    while bytes.peek().is_some() {
        lat = lat.wrapping_add(decode_value(&mut bytes)?);
        lon = lon.wrapping_add(decode_value(&mut bytes)?);
        path.push(Position::new(lon as f64 / factor, lat as f64 / factor));
    }

    Ok(path)
}

fn factor(precision: u32) -> f64 {
    10f64.powi(precision as i32)
}

fn encode_value(value: i64, out: &mut String) {
    let mut value = ((value << 1) ^ (value >> 63)) as u64;
    while value >= 0x20 {
        out.push(char::from(((0x20 | (value & 0x1f)) + 63) as u8));
        value >>= 5;
    }
    out.push(char::from((value + 63) as u8));
}

fn decode_value(bytes: &mut impl Iterator<Item = u8>) -> Result<i64, TurfError> {
    let mut result = 0i64;
    let mut shift = 0;

    loop {
        let Some(byte) = bytes.next() else {
            return Err(TurfError::InvalidInput("polyline is truncated".into()));
        };
        if !(63..127).contains(&byte) {
            return Err(TurfError::InvalidInput(format!(
                "invalid polyline character {:?}",
                char::from(byte)
            )));
        }
        if shift > 60 {
            return Err(TurfError::InvalidInput("polyline value is too long".into()));
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    let result = result as u64;
    Ok(((result >> 1) as i64) ^ -((result & 1) as i64))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_matches::assert_matches;

    use super::*;

    fn path() -> Vec<Position> {
        vec![
            Position::new(-120.2, 38.5),
            Position::new(-120.95, 40.7),
            Position::new(-126.453, 43.252),
        ]
    }

    #[test]
    fn encode_path() {
        assert_eq!(encode(&path(), PRECISION_5), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        assert_eq!(encode(&[], PRECISION_5), "");
    }

    #[test]
    fn decode_path() {
        assert_eq!(decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", PRECISION_5).unwrap(), path());
        assert!(decode("", PRECISION_5).unwrap().is_empty());
    }

    #[test]
    fn precision_6() {
        let path = vec![
            Position::new(13.388_86, 52.517_037),
            Position::new(13.397_634, 52.529_407),
            Position::with_altitude(-0.000_001, -0.5, 10.0),
        ];

        let decoded = decode(&encode(&path, PRECISION_6), PRECISION_6).unwrap();
        assert_eq!(decoded.len(), path.len());
        for (decoded, expected) in decoded.iter().zip(&path) {
            assert_relative_eq!(decoded.lon(), expected.lon(), epsilon = 1e-9);
            assert_relative_eq!(decoded.lat(), expected.lat(), epsilon = 1e-9);
            assert!(!decoded.has_altitude());
        }
    }

    #[test]
    fn extreme_coordinates_saturate() {
        let path = [
            Position::new(0.0, 1e300),
            Position::new(-1e300, -1e300),
            Position::new(0.0, 0.0),
        ];

        let encoded = encode(&path, PRECISION_5);
        assert!(encoded.bytes().all(|b| (63..127).contains(&b)));

        let decoded = decode(&encoded, PRECISION_5).unwrap();
        assert_eq!(decoded[0], Position::new(0.0, i64::MAX as f64 / 1e5));
        assert_eq!(decoded[1], Position::new(i64::MIN as f64 / 1e5, i64::MIN as f64 / 1e5));
        assert_eq!(decoded[2], Position::new(0.0, 0.0));
    }

    #[test]
    fn invalid_input() {
        assert_matches!(decode("_p~iF~ps|", PRECISION_5), Err(TurfError::InvalidInput(_)));
        assert_matches!(decode("_p~iF", PRECISION_5), Err(TurfError::InvalidInput(_)));
        assert_matches!(decode("_p~iF ~ps|U", PRECISION_5), Err(TurfError::InvalidInput(_)));
        assert_matches!(decode("~~~~~~~~~~~~~~?", PRECISION_5), Err(TurfError::InvalidInput(_)));
    }
}
