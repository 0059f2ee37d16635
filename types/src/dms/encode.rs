//! Formatting of a decimal degrees value as DMS text,
//! and the pure-arithmetic component splitters.

use num_traits::Float;

use crate::utils::SignSplit;

use super::{AngleKind, Component};

// how many decimal digits of an f64 are worth printing
const SIGNIFICANT_DECIMAL_DIGITS: usize = 15;

/// Format an angle (degrees) as a DMS string.
///
/// The string ends with the `trailing` component, which alone carries
/// a fraction of exactly `prec` digits (no decimal point when `prec` is 0);
/// the value is correctly rounded at that digit, carrying over into
/// the coarser components when needed. The non-terminal minute and second
/// fields are zero-padded to 2 digits.
///
/// The `kind` selects the surrounding policy:
/// - [`AngleKind::None`]: signed result, no letter and no padding
///   of the degree field, e.g. `-8d03'`;
/// - [`AngleKind::Latitude`]: trailing N/S letter, no sign,
///   degrees padded to 2 digits, e.g. `08d03'S`;
/// - [`AngleKind::Longitude`]: trailing E/W letter, no sign,
///   degrees padded to 3 digits, e.g. `008d03'W`;
/// - [`AngleKind::Azimuth`]: reduced to [0d, 360d), no sign and no letter,
///   degrees padded to 3 digits, e.g. `351d57'`;
/// - [`AngleKind::Number`]: no DMS layout at all, just the fixed-point
///   value with `prec` fraction digits.
///
/// The components are marked with `d`, `'` and `"`, except that the
/// trailing degree mark is left out (`20.5`, not `20.5d`). A custom
/// `separator` character replaces all of the marks between the components
/// and drops the trailing one, producing the colon-style text:
/// `encode(-20.51125, Second, 1, None, Some(':'))` is `-20:30:40.5`.
///
/// The non-finite values turn into `nan`, `inf` and `-inf`.
pub fn encode(
    angle: f64,
    trailing: Component,
    prec: usize,
    kind: AngleKind,
    separator: Option<char>,
) -> String {
    if kind == AngleKind::Number {
        return fixed(angle, prec);
    }
    if !angle.is_finite() {
        return fixed(angle, 0);
    }

    // keep the fraction inside the reliable digits of an f64
    let prec = prec.min(SIGNIFICANT_DECIMAL_DIGITS - 2 * trailing as usize);

    let angle = if kind == AngleKind::Azimuth {
        angle - (angle / 360.0).floor() * 360.0
    } else {
        angle
    };
    let (magnitude, non_negative) = angle.abs_sign();

    // the finest printed digit, as a fraction of one degree
    let mut scale = 1.0;
    for _ in 0..trailing as usize {
        scale *= 60.0;
    }
    for _ in 0..prec {
        scale *= 10.0;
    }

    // split off the whole degrees before manipulating the fraction,
    // so the rounding works on the full f64 precision
    let mut whole = magnitude.floor();
    let mut fraction = {
        let scaled = (magnitude - whole) * scale;
        let up = (scaled + 0.5).floor();
        // round the ties to even
        if up == scaled + 0.5 && up % 2.0 == 1.0 {
            up - 1.0
        } else {
            up
        }
    } / scale;
    if fraction >= 1.0 {
        whole += 1.0;
        fraction -= 1.0;
    }

    let mut pieces = [fraction, 0.0, 0.0];
    for i in 1..=trailing as usize {
        let int_part = pieces[i - 1].floor();
        pieces[i] = (pieces[i - 1] - int_part) * 60.0;
        pieces[i - 1] = int_part;
    }
    pieces[0] += whole;

    let degree_width = match kind {
        AngleKind::Latitude => 2,
        AngleKind::Longitude | AngleKind::Azimuth => 3,
        AngleKind::None | AngleKind::Number => 1,
    };
    let trailing_width = |base: usize| base + prec + usize::from(prec > 0);

    let mut out = String::new();
    if kind == AngleKind::None && !non_negative {
        out.push('-');
    }
    match trailing {
        Component::Degree => {
            // the trailing degree field carries the fraction itself
            out.push_str(&padded(pieces[0], prec, trailing_width(degree_width)));
        }
        Component::Minute => {
            out.push_str(&padded(pieces[0], 0, degree_width));
            out.push(separator.unwrap_or_else(|| Component::Degree.delimiter()));
            out.push_str(&padded(pieces[1], prec, trailing_width(2)));
            if separator.is_none() {
                out.push(Component::Minute.delimiter());
            }
        }
        Component::Second => {
            out.push_str(&padded(pieces[0], 0, degree_width));
            out.push(separator.unwrap_or_else(|| Component::Degree.delimiter()));
            out.push_str(&padded(pieces[1], 0, 2));
            out.push(separator.unwrap_or_else(|| Component::Minute.delimiter()));
            out.push_str(&padded(pieces[2], prec, trailing_width(2)));
            if separator.is_none() {
                out.push(Component::Second.delimiter());
            }
        }
    }
    match kind {
        AngleKind::Latitude => out.push(if non_negative { 'N' } else { 'S' }),
        AngleKind::Longitude => out.push(if non_negative { 'E' } else { 'W' }),
        _ => {}
    }
    out
}

/// Format an angle (degrees) as a DMS string, choosing the trailing
/// component from a single precision relative to 1 degree.
///
/// `prec = 3` gives a result accurate to 0.1', `prec = 4` to 1",
/// `prec = 5` to 0.1" and so on:
/// below 2 the string ends with degrees, below 4 with minutes,
/// otherwise with seconds.
///
/// With [`AngleKind::Number`] the unit selection does not apply and
/// the value is emitted as a plain fixed-point number
/// with `prec` fraction digits.
pub fn encode_auto(angle: f64, prec: usize, kind: AngleKind, separator: Option<char>) -> String {
    if kind == AngleKind::Number {
        return fixed(angle, prec);
    }
    let (trailing, prec) = match prec {
        0 | 1 => (Component::Degree, prec),
        2 | 3 => (Component::Minute, prec - 2),
        _ => (Component::Second, prec - 4),
    };
    encode(angle, trailing, prec, kind, separator)
}

/// Split an angle into whole degrees and arc minutes.
///
/// No range checks and no sign handling: a negative angle
/// yields a non-positive minutes value, e.g. `(-4.0, -30.0)` for `-4.5`.
pub fn split_dm<F: Float>(angle: F) -> (F, F) {
    let sixty = F::from(60).expect("sixty is exactly representable in any float");
    let d = angle.trunc();
    (d, sixty * (angle - d))
}

/// Split an angle into whole degrees, whole arc minutes and arc seconds.
///
/// The same conventions as in [`split_dm`].
pub fn split_dms<F: Float>(angle: F) -> (F, F, F) {
    let sixty = F::from(60).expect("sixty is exactly representable in any float");
    let d = angle.trunc();
    let residual = sixty * (angle - d);
    let m = residual.trunc();
    (d, m, sixty * (residual - m))
}

/// Fixed-point value with the given number of fraction digits,
/// spelling the non-finite values the C way
fn fixed(value: f64, prec: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}inf")
    } else {
        format!("{value:.prec$}")
    }
}

/// Fixed-point value zero-padded to the given total width
/// (the decimal point counts towards the width)
fn padded(value: f64, prec: usize, width: usize) -> String {
    format!("{value:0width$.prec$}")
}
