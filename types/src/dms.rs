//! Bidirectional conversion between a decimal degrees value
//! and the degree-minute-second (DMS) textual notation.
//!
//! The grammar accepted by the decoding half and the layout produced by the
//! encoding half follow the conventional geodesic notation:
//! components in the `degree -> minute -> second` order, marked with
//! the `d`, `'`, `"` delimiters (or their Unicode equivalents) or separated
//! with colons, with an optional sign and an optional
//! hemisphere letter (N, S, E, W).
//! <https://en.wikipedia.org/wiki/Degree_(angle)#Subdivisions>

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::{
    decode::{decode, decode_angle, decode_azimuth, decode_bytes, decode_lat_lon},
    encode::{encode, encode_auto, split_dm, split_dms},
    errors::ParseDmsError,
};

mod consts;
mod decode;
mod encode;
mod errors;

/// The classification of a decoded or encoded angle,
/// driving the validation and formatting policy.
///
/// Decoding only ever produces the first three variants;
/// encoding consumes all five.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleKind {
    /// No hemisphere letter present: a plain signed angle
    None,
    /// The N/S hemisphere letter present (S negates)
    Latitude,
    /// The E/W hemisphere letter present (W negates)
    Longitude,
    /// Encode-only: wrap into [0°, 360°), no sign, no letter
    Azimuth,
    /// Encode-only: bypass the DMS layout and emit a fixed-decimal number
    Number,
}

/// The smallest unit explicitly rendered in a DMS string.
///
/// Only this trailing component may carry a fractional part.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Component {
    /// Whole angular degrees
    Degree,
    /// Arc minutes, 1/60 of a degree
    Minute,
    /// Arc seconds, 1/60 of an arc minute
    Second,
}

impl Component {
    pub(crate) const ALL: [Self; 3] = [Self::Degree, Self::Minute, Self::Second];

    /// The canonical single-character delimiter following the component
    pub(crate) const fn delimiter(self) -> char {
        match self {
            Self::Degree => 'd',
            Self::Minute => '\'',
            Self::Second => '"',
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Degree => "degrees",
            Self::Minute => "minutes",
            Self::Second => "seconds",
        };
        write!(f, "{name}")
    }
}

/// Combine the degree, arc minute and arc second components
/// into a single decimal degrees value.
///
/// The sign of `d` is not propagated to the other components:
/// `-3d20'` is `-from_dms(3.0, 20.0, 0.0)` or `from_dms(-3.0, -20.0, 0.0)`,
/// not `from_dms(-3.0, 20.0, 0.0)`.
pub fn from_dms(d: f64, m: f64, s: f64) -> f64 {
    d + (m + s / 60.0) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_ordered_coarse_to_fine() {
        assert!(Component::Degree < Component::Minute);
        assert!(Component::Minute < Component::Second);
    }

    #[test]
    fn component_names() {
        let names: Vec<_> = Component::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["degrees", "minutes", "seconds"]);
    }

    #[test]
    fn combine_all_components() {
        assert!((from_dms(20.0, 30.0, 40.5) - 20.511_25).abs() < 1e-12);
    }

    #[test]
    fn combine_does_not_spread_the_sign() {
        assert!((from_dms(-3.0, -20.0, 0.0) + 3.333_333_333_333_333_5).abs() < 1e-12);
        // the minutes pull the result back towards zero
        assert!((from_dms(-3.0, 20.0, 0.0) + 2.666_666_666_666_666_5).abs() < 1e-12);
    }
}
