//! The fixed symbol tables of the DMS notation.
//!
//! All of the lookup data here is constant: built once, never mutated,
//! safe to share between threads.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{AngleKind, Component};

/// The component separator of the colon notation (`50:30:10.3`)
pub(super) const COLON: char = ':';

lazy_static! {
    /// Alternative spellings of the DMS delimiters, the minus sign
    /// and the superscript digits, keyed to the canonical ASCII
    /// character every one of them turns into before scanning.
    ///
    /// The two-byte UTF-8 symbols (U+00B0 and friends) double as their
    /// single-byte Latin-1 forms, see [`decode_bytes`][super::decode_bytes].
    pub(super) static ref GLYPHS: HashMap<char, char> = {
        let mut map = HashMap::new();
        // degrees: upper-case letter, degree sign, masculine ordinal,
        // superscript zero, ring above
        for ch in ['D', '\u{b0}', '\u{ba}', '\u{2070}', '\u{2da}'] {
            let _ = map.insert(ch, 'd');
        }
        // minutes: prime, acute accent, right single quote
        for ch in ['\u{2032}', '\u{b4}', '\u{2019}'] {
            let _ = map.insert(ch, '\'');
        }
        // seconds: double prime, right double quote
        for ch in ['\u{2033}', '\u{201d}'] {
            let _ = map.insert(ch, '"');
        }
        // minus sign
        let _ = map.insert('\u{2212}', '-');
        // superscript digits (except the zero which marks degrees)
        let _ = map.insert('\u{b9}', '1');
        let _ = map.insert('\u{b2}', '2');
        let _ = map.insert('\u{b3}', '3');
        let _ = map.insert('\u{2074}', '4');
        let _ = map.insert('\u{2075}', '5');
        let _ = map.insert('\u{2076}', '6');
        let _ = map.insert('\u{2077}', '7');
        let _ = map.insert('\u{2078}', '8');
        let _ = map.insert('\u{2079}', '9');
        map
    };
}

/// Classify a hemisphere letter (case-insensitive).
/// The boolean is false for the negative directions (S, W).
pub(super) fn hemisphere(ch: char) -> Option<(AngleKind, bool)> {
    match ch.to_ascii_uppercase() {
        'N' => Some((AngleKind::Latitude, true)),
        'S' => Some((AngleKind::Latitude, false)),
        'E' => Some((AngleKind::Longitude, true)),
        'W' => Some((AngleKind::Longitude, false)),
        _ => None,
    }
}

/// Classify a sign character. The boolean is false for `-`.
pub(super) fn sign(ch: char) -> Option<bool> {
    match ch {
        '+' => Some(true),
        '-' => Some(false),
        _ => None,
    }
}

/// The component marked by a canonical (already normalized) delimiter
pub(super) fn indicator(ch: char) -> Option<Component> {
    Component::ALL.into_iter().find(|c| c.delimiter() == ch)
}
