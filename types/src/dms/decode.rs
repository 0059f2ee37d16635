//! Decoding of the DMS text into a decimal degrees value.
//!
//! The accepted notation is flexible:
//! up to three components in the degree-minute-second order,
//! marked with delimiter glyphs (`50d30'10.3"`) or separated
//! with colons (`50:30:10.3`), an optional single sign
//! and an optional hemisphere letter at either end of the string.
//! Any component may be omitted, and the one that closes the string
//! may omit its delimiter: `33d10` means `33d10'`.
//! Only the last component may carry a decimal fraction.

use super::{
    consts::{hemisphere, indicator, sign, COLON, GLYPHS},
    errors::ParseDmsError,
    from_dms, AngleKind, Component,
};

/// Decode a DMS string into degrees.
///
/// Alongside the value, report which kind of coordinate the text
/// spelled out: [`AngleKind::Latitude`] if an N/S letter was present,
/// [`AngleKind::Longitude`] for E/W, [`AngleKind::None`] otherwise.
/// The letters S and W negate the result.
///
/// The special values `nan`, `inf` and `infinity`
/// (case-insensitive, optionally signed) decode
/// into the corresponding IEEE values with [`AngleKind::None`].
///
/// No check is performed on the range of the result.
///
/// # Errors
/// A malformed string is rejected with the description
/// of the violated rule, e.g.:
/// - `4d5"4'` — minutes follow seconds;
/// - `4::5`, `:4:5`, `4:5:` — a colon with no number on one of its sides;
/// - `4d4.5'4"` — a fraction on a non-terminal component;
/// - `4:60` — minutes out of `[0, 60)`;
/// - `-N20.5`, `N-20.5`, `4d-5'` — a misplaced sign or hemisphere letter.
pub fn decode(text: &str) -> Result<(f64, AngleKind), ParseDmsError> {
    let normalized = normalize(text);
    let full = normalized.trim();

    if let Some(value) = special_value(full) {
        return Ok((value, AngleKind::None));
    }

    scan(full)
}

/// Decode a DMS string supplied as raw 8-bit text.
///
/// Valid UTF-8 is decoded as is. Anything else is taken to be Latin-1,
/// so the historical single-byte forms of the delimiter symbols
/// (`0xB0` for the degree sign, `0xBA` for the masculine ordinal,
/// `0xB4` for the acute accent) keep working.
///
/// # Errors
/// The same as in [`decode`]
pub fn decode_bytes(text: &[u8]) -> Result<(f64, AngleKind), ParseDmsError> {
    match std::str::from_utf8(text) {
        Ok(utf8) => decode(utf8),
        // Latin-1 bytes map straight onto the first 256 code points
        Err(_) => decode(&text.iter().map(|&b| char::from(b)).collect::<String>()),
    }
}

/// Decode a pair of strings into a latitude and a longitude (degrees).
///
/// A hemisphere letter in either string pins it to its axis regardless
/// of the argument order, so `("40N", "75W")` and `("75W", "40N")` resolve
/// to the same point. When neither string carries a letter, `dmsa` is taken
/// as the latitude, unless `swap_default` asks for the opposite.
///
/// The longitude of the result is reduced to the range [-180d, 180d).
///
/// # Errors
/// - either string is malformed (see [`decode`]);
/// - both strings carry a letter of the same axis;
/// - the latitude is outside of [-90d, 90d];
/// - the longitude is outside of [-540d, 540d).
pub fn decode_lat_lon(
    dmsa: &str,
    dmsb: &str,
    swap_default: bool,
) -> Result<(f64, f64), ParseDmsError> {
    let (a, kind_a) = decode(dmsa)?;
    let (b, kind_b) = decode(dmsb)?;

    let kind_a = match (kind_a, kind_b) {
        (AngleKind::None, AngleKind::None) => {
            if swap_default {
                AngleKind::Longitude
            } else {
                AngleKind::Latitude
            }
        }
        (AngleKind::None, hinted) => cross_axis(hinted),
        (hinted, other) => {
            if hinted == other {
                let axis = if hinted == AngleKind::Latitude {
                    "latitudes"
                } else {
                    "longitudes"
                };
                return Err(ParseDmsError::Ambiguity(format!(
                    "Both {dmsa:?} and {dmsb:?} interpreted as {axis}"
                )));
            }
            hinted
        }
    };

    let (lat, lon) = if kind_a == AngleKind::Latitude {
        (a, b)
    } else {
        (b, a)
    };
    if lat.abs() > 90.0 {
        return Err(ParseDmsError::Range(format!(
            "Latitude {lat}d not in [-90d, 90d]"
        )));
    }
    if lon < -540.0 || lon >= 540.0 {
        return Err(ParseDmsError::Range(format!(
            "Longitude {lon}d not in [-540d, 540d)"
        )));
    }
    Ok((lat, reduce_half_turn(lon)))
}

/// Decode a string into a plain angle (degrees).
///
/// # Errors
/// - the string is malformed (see [`decode`]);
/// - a hemisphere letter is present.
pub fn decode_angle(text: &str) -> Result<f64, ParseDmsError> {
    let (value, kind) = decode(text)?;
    if kind == AngleKind::None {
        Ok(value)
    } else {
        Err(ParseDmsError::SignOrHemisphere(format!(
            "Arc angle {text:?} includes a hemisphere letter"
        )))
    }
}

/// Decode a string into an azimuth (degrees), reduced to [-180d, 180d).
///
/// An E/W hemisphere letter is accepted and W negates, but N/S is illegal.
///
/// # Errors
/// - the string is malformed (see [`decode`]);
/// - an N/S letter is present;
/// - the decoded value is outside of [-540d, 540d).
pub fn decode_azimuth(text: &str) -> Result<f64, ParseDmsError> {
    let (value, kind) = decode(text)?;
    if kind == AngleKind::Latitude {
        return Err(ParseDmsError::SignOrHemisphere(format!(
            "Azimuth {text:?} has a latitude hemisphere letter, N/S"
        )));
    }
    if value < -540.0 || value >= 540.0 {
        return Err(ParseDmsError::Range(format!(
            "Azimuth {value}d not in [-540d, 540d)"
        )));
    }
    Ok(reduce_half_turn(value))
}

/// The other axis of the coordinate pair
fn cross_axis(kind: AngleKind) -> AngleKind {
    match kind {
        AngleKind::Latitude => AngleKind::Longitude,
        AngleKind::Longitude => AngleKind::Latitude,
        other => other,
    }
}

/// Reduce an angle from [-540d, 540d) into [-180d, 180d)
fn reduce_half_turn(angle: f64) -> f64 {
    if angle >= 180.0 {
        angle - 360.0
    } else if angle < -180.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Bring every known spelling of the delimiters, the minus sign and
/// the digits down to its canonical ASCII character,
/// then let a doubled minute mark stand for the seconds mark.
fn normalize(text: &str) -> String {
    let canonical: String = text
        .chars()
        .map(|ch| GLYPHS.get(&ch).copied().unwrap_or(ch))
        .collect();
    canonical.replace("''", "\"")
}

/// Exact literal match for the IEEE special values,
/// independent of any locale
fn special_value(text: &str) -> Option<f64> {
    let (body, negative) = if let Some(stripped) = text.strip_prefix('-') {
        (stripped, true)
    } else if let Some(stripped) = text.strip_prefix('+') {
        (stripped, false)
    } else {
        (text, false)
    };

    let magnitude = if body.eq_ignore_ascii_case("nan") {
        f64::NAN
    } else if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
        f64::INFINITY
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// The scanner position inside the numeric body
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Scan {
    /// at the start of a component, no digits of it consumed yet
    ComponentStart,
    /// inside the integer digits of a component
    IntegerPart,
    /// past the decimal point of a component
    FractionPart,
}

/// Single left-to-right pass over a normalized, trimmed string,
/// no backtracking.
#[allow(clippy::too_many_lines)]
fn scan(full: &str) -> Result<(f64, AngleKind), ParseDmsError> {
    let mut kind = AngleKind::None;
    let mut non_negative = true;
    let mut body = full;

    // a hemisphere letter may open or close the string, but not both
    let mut leading_letter = None;
    if let Some(head) = body.chars().next() {
        if let Some((axis, positive)) = hemisphere(head) {
            kind = axis;
            non_negative = positive;
            leading_letter = Some(head);
            body = &body[head.len_utf8()..];
        }
    }
    if let Some(tail) = body.chars().next_back() {
        if let Some((axis, positive)) = hemisphere(tail) {
            match leading_letter {
                Some(first) if first.eq_ignore_ascii_case(&tail) => {
                    return Err(ParseDmsError::SignOrHemisphere(format!(
                        "Repeated hemisphere letter {first:?} in {full:?}"
                    )));
                }
                Some(first) => {
                    return Err(ParseDmsError::SignOrHemisphere(format!(
                        "Contradictory hemisphere letters {first:?} and {tail:?} in {full:?}"
                    )));
                }
                None => {
                    kind = axis;
                    non_negative = positive;
                    body = &body[..body.len() - tail.len_utf8()];
                }
            }
        }
    }

    // a single sign composes with a trailing letter ("-20.5S" points north),
    // but cannot follow a leading one
    if let Some(head) = body.chars().next() {
        if let Some(positive) = sign(head) {
            if leading_letter.is_some() {
                return Err(ParseDmsError::SignOrHemisphere(format!(
                    "Sign {head:?} immediately follows the hemisphere letter in {full:?}"
                )));
            }
            if !positive {
                non_negative = !non_negative;
            }
            body = &body[head.len_utf8()..];
        }
    }

    let chars: Vec<char> = body.chars().collect();
    if chars.is_empty() {
        return Err(ParseDmsError::MalformedNumber(format!(
            "Empty or incomplete angle string {full:?}"
        )));
    }

    // integer parts are tracked separately: the range rule
    // for minutes/seconds binds their integer part only
    let mut int_pieces = [0.0_f64; 3];
    let mut pieces = [0.0_f64; 3];
    // the slot the currently scanned component lands in
    let mut next_piece = 0_usize;

    let mut state = Scan::ComponentStart;
    let mut int_part = 0.0_f64;
    let mut fraction = String::new();
    let mut digits = 0_usize;
    let mut closed_by_delimiter = false;

    let mut pos = 0_usize;
    while pos < chars.len() {
        let ch = chars[pos];
        pos += 1;

        if let Some(digit) = ch.to_digit(10) {
            digits += 1;
            if state == Scan::FractionPart {
                fraction.push(ch);
            } else {
                state = Scan::IntegerPart;
                int_part = int_part * 10.0 + f64::from(digit);
            }
        } else if ch == '.' {
            if state == Scan::FractionPart {
                return Err(ParseDmsError::MalformedNumber(format!(
                    "Multiple decimal points in {body:?}"
                )));
            }
            state = Scan::FractionPart;
        } else if ch == COLON || indicator(ch).is_some() {
            let at_end = pos == chars.len();
            let slot = if ch == COLON {
                // a colon advances to the next smaller unit, silently
                if at_end {
                    return Err(ParseDmsError::MalformedNumber(format!(
                        "Illegal for {COLON:?} to appear at the end of {body:?}"
                    )));
                }
                next_piece
            } else {
                indicator(ch).expect("checked in the branch condition") as usize
            };
            if slot >= Component::ALL.len() {
                return Err(ParseDmsError::TrailingGarbage(format!(
                    "Extra text following the {} component in {body:?}",
                    Component::Second
                )));
            }
            // an explicit delimiter may skip forward ("4d9\""),
            // but never backward and never repeats
            if next_piece > 0 && slot + 1 == next_piece {
                return Err(ParseDmsError::UnitOrder(format!(
                    "Repeated {} component in {body:?}",
                    Component::ALL[slot]
                )));
            }
            if slot < next_piece {
                return Err(ParseDmsError::UnitOrder(format!(
                    "The {} component follows the {} component in {body:?}",
                    Component::ALL[slot],
                    Component::ALL[next_piece - 1]
                )));
            }
            if state == Scan::FractionPart && !at_end {
                return Err(ParseDmsError::UnitOrder(format!(
                    "Decimal point in a non-terminal component of {body:?}"
                )));
            }
            if digits == 0 {
                return Err(ParseDmsError::MalformedNumber(format!(
                    "Missing numbers in the {} component of {body:?}",
                    Component::ALL[slot]
                )));
            }
            if state == Scan::FractionPart && fraction.is_empty() {
                return Err(ParseDmsError::MalformedNumber(format!(
                    "Decimal point with no fraction digits in {body:?}"
                )));
            }
            int_pieces[slot] = int_part;
            pieces[slot] = int_part + parse_fraction(&fraction)?;
            next_piece = slot + 1;
            int_part = 0.0;
            fraction.clear();
            digits = 0;
            state = Scan::ComponentStart;
            closed_by_delimiter = at_end;
        } else if sign(ch).is_some() {
            return Err(ParseDmsError::MalformedNumber(format!(
                "Sign {ch:?} inside the numeric body of {body:?}"
            )));
        } else if hemisphere(ch).is_some() {
            return Err(ParseDmsError::SignOrHemisphere(format!(
                "Misplaced hemisphere letter {ch:?} in {body:?}"
            )));
        } else {
            return Err(ParseDmsError::MalformedNumber(format!(
                "Illegal character {ch:?} in {body:?}"
            )));
        }
    }

    if !closed_by_delimiter {
        // the trailing component carries no delimiter:
        // its unit is one step smaller than the previous one
        if next_piece >= Component::ALL.len() {
            return Err(ParseDmsError::TrailingGarbage(format!(
                "Extra text following the {} component in {body:?}",
                Component::Second
            )));
        }
        if digits == 0 {
            return Err(ParseDmsError::MalformedNumber(format!(
                "Missing numbers in the trailing component of {body:?}"
            )));
        }
        if state == Scan::FractionPart && fraction.is_empty() {
            return Err(ParseDmsError::MalformedNumber(format!(
                "Decimal point with no fraction digits in {body:?}"
            )));
        }
        int_pieces[next_piece] = int_part;
        pieces[next_piece] = int_part + parse_fraction(&fraction)?;
    }

    for component in [Component::Minute, Component::Second] {
        let slot = component as usize;
        // 59.999... is fine even though it may round up to 60 later
        if int_pieces[slot] >= 60.0 || pieces[slot] > 60.0 {
            return Err(ParseDmsError::Range(format!(
                "The {component} value {} not in range [0, 60)",
                pieces[slot]
            )));
        }
    }

    let magnitude = from_dms(pieces[0], pieces[1], pieces[2]);
    let value = if non_negative { magnitude } else { -magnitude };
    Ok((value, kind))
}

/// The fraction digits were validated by the scanner, so the parse
/// is infallible for any input short enough to be sane
fn parse_fraction(digits: &str) -> Result<f64, ParseDmsError> {
    if digits.is_empty() {
        Ok(0.0)
    } else {
        Ok(format!("0.{digits}").parse::<f64>()?)
    }
}


#[cfg(test)]
mod pair_tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn positional_defaults() {
        let (lat, lon) = decode_lat_lon("40.5", "-75.3", false).unwrap();
        assert!(close(lat, 40.5));
        assert!(close(lon, -75.3));
    }

    #[test]
    fn positional_defaults_swapped() {
        let (lat, lon) = decode_lat_lon("40.5", "-75.3", true).unwrap();
        assert!(close(lat, -75.3));
        assert!(close(lon, 40.5));
    }

    #[test]
    fn letters_override_the_order() {
        for (a, b) in [("40N", "75W"), ("75W", "40N")] {
            let (lat, lon) = decode_lat_lon(a, b, false).unwrap();
            assert!(close(lat, 40.0));
            assert!(close(lon, -75.0));
        }
    }

    #[test]
    fn letters_override_the_swap_too() {
        let (lat, lon) = decode_lat_lon("40N", "75W", true).unwrap();
        assert!(close(lat, 40.0));
        assert!(close(lon, -75.0));
    }

    #[test]
    fn single_letter_pins_the_other() {
        let (lat, lon) = decode_lat_lon("75W", "40.5", false).unwrap();
        assert!(close(lat, 40.5));
        assert!(close(lon, -75.0));
    }

    #[test]
    #[should_panic(expected = "interpreted as latitudes")]
    fn both_latitudes() {
        let _v = decode_lat_lon("40N", "50N", false).unwrap();
    }

    #[test]
    #[should_panic(expected = "interpreted as longitudes")]
    fn both_longitudes() {
        let _v = decode_lat_lon("40E", "50W", false).unwrap();
    }

    #[test]
    #[should_panic(expected = "Latitude 95d not in [-90d, 90d]")]
    fn latitude_out_of_range() {
        let _v = decode_lat_lon("95", "10", false).unwrap();
    }

    #[test]
    fn longitude_reduced() {
        let (_, lon) = decode_lat_lon("40", "200", false).unwrap();
        assert!(close(lon, -160.0));

        let (_, lon) = decode_lat_lon("40", "-540", false).unwrap();
        assert!(close(lon, -180.0));
    }

    #[test]
    #[should_panic(expected = "not in [-540d, 540d)")]
    fn longitude_out_of_range() {
        let _v = decode_lat_lon("40", "600", false).unwrap();
    }

    #[test]
    fn poles_are_valid() {
        let (lat, _) = decode_lat_lon("90S", "75.3", false).unwrap();
        assert!(close(lat, -90.0));
    }
}

#[cfg(test)]
mod validator_tests {
    use super::*;

    #[test]
    fn angle_accepts_any_range() {
        let value = decode_angle("-400:30").unwrap();
        assert!((value + 400.5).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "includes a hemisphere letter")]
    fn angle_rejects_letters() {
        let _v = decode_angle("20N").unwrap();
    }

    #[test]
    fn azimuth_reduces() {
        assert!((decode_azimuth("195").unwrap() + 165.0).abs() < 1e-9);
        assert!((decode_azimuth("-10").unwrap() + 10.0).abs() < 1e-9);
    }

    #[test]
    fn azimuth_takes_east_west() {
        assert!((decode_azimuth("75W").unwrap() + 75.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "latitude hemisphere letter")]
    fn azimuth_rejects_north_south() {
        let _v = decode_azimuth("40N").unwrap();
    }

    #[test]
    #[should_panic(expected = "not in [-540d, 540d)")]
    fn azimuth_out_of_range() {
        let _v = decode_azimuth("600").unwrap();
    }
}
