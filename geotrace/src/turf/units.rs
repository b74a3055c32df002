//! Units of length on a spherical Earth and conversion between them.

use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TurfError;

/// Unit of length.
///
/// Every unit is defined by its Earth radius factor: the length of one radian of a great circle of a sphere with
/// the radius of 6,373 km.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Statute miles.
    Miles,
    /// Nautical miles.
    NauticalMiles,
    /// Degrees of arc.
    Degrees,
    /// Radians of arc.
    Radians,
    /// Inches.
    Inches,
    /// Yards.
    Yards,
    /// Meters.
    #[serde(alias = "metres")]
    Meters,
    /// Centimeters.
    #[serde(alias = "centimetres")]
    Centimeters,
    /// Kilometers.
    #[default]
    #[serde(alias = "kilometres")]
    Kilometers,
    /// Feet.
    Feet,
}

impl Units {
    /// Length of one radian of arc in these units.
    pub fn factor(&self) -> f64 {
        match self {
            Units::Miles => 3960.0,
            Units::NauticalMiles => 3441.145,
            Units::Degrees => 57.2957795,
            Units::Radians => 1.0,
            Units::Inches => 250_905_600.0,
            Units::Yards => 6_969_600.0,
            Units::Meters => 6_373_000.0,
            Units::Centimeters => 6.373e8,
            Units::Kilometers => 6373.0,
            Units::Feet => 20_908_792.65,
        }
    }

    /// Name of the unit as it appears in serialized values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Miles => "miles",
            Units::NauticalMiles => "nauticalmiles",
            Units::Degrees => "degrees",
            Units::Radians => "radians",
            Units::Inches => "inches",
            Units::Yards => "yards",
            Units::Meters => "meters",
            Units::Centimeters => "centimeters",
            Units::Kilometers => "kilometers",
            Units::Feet => "feet",
        }
    }
}

impl FromStr for Units {
    type Err = TurfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let units = match s {
            "miles" => Units::Miles,
            "nauticalmiles" => Units::NauticalMiles,
            "degrees" => Units::Degrees,
            "radians" => Units::Radians,
            "inches" => Units::Inches,
            "yards" => Units::Yards,
            "meters" | "metres" => Units::Meters,
            "centimeters" | "centimetres" => Units::Centimeters,
            "kilometers" | "kilometres" => Units::Kilometers,
            "feet" => Units::Feet,
            other => return Err(TurfError::InvalidInput(format!("unknown units: {other}"))),
        };

        Ok(units)
    }
}

impl Display for Units {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts an angle in radians to degrees, wrapping it into `(-360, 360)`.
pub fn radians_to_degrees(radians: f64) -> f64 {
    (radians % (2.0 * PI)) * 180.0 / PI
}

/// Converts an angle in degrees to radians, wrapping it into `(-2π, 2π)`.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    (degrees % 360.0) * PI / 180.0
}

/// Converts a great circle arc in radians into length.
pub fn radians_to_length(radians: f64, units: Units) -> f64 {
    radians * units.factor()
}

/// Converts length into a great circle arc in radians.
pub fn length_to_radians(distance: f64, units: Units) -> f64 {
    distance / units.factor()
}

/// Converts length into a great circle arc in degrees.
pub fn length_to_degrees(distance: f64, units: Units) -> f64 {
    radians_to_degrees(length_to_radians(distance, units))
}

/// Converts length from one unit to another.
pub fn convert_length(distance: f64, from: Units, to: Units) -> f64 {
    radians_to_length(length_to_radians(distance, from), to)
}
