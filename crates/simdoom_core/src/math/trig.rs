//! # Table-Driven Trigonometry
//!
//! A 90-entry quarter-wave table mirrored to the full circle. Values are
//! Q8: [`TRIG_ONE`] (256) is 1.0.
//!
//! Angles are whole degrees. Any `i32` is accepted and normalized with
//! `rem_euclid(360)`, so `sin(-90) == sin(270)`.
//!
//! Heading convention: 0° points east (+x), 90° south (+y).

/// Q8 representation of 1.0.
pub const TRIG_ONE: i32 = 256;

/// Degrees in a full turn.
pub const FULL_TURN: i32 = 360;

/// `floor(256 * sin(d))` for `d` in `0..90`.
#[rustfmt::skip]
const QUARTER_SINE: [u8; 90] = [
    0, 4, 8, 13, 17, 22, 26, 31, 35, 40,
    44, 48, 53, 57, 61, 66, 70, 74, 79, 83,
    87, 91, 95, 100, 104, 108, 112, 116, 120, 124,
    128, 131, 135, 139, 143, 146, 150, 154, 157, 161,
    164, 167, 171, 174, 177, 181, 184, 187, 190, 193,
    196, 198, 201, 204, 207, 209, 212, 214, 217, 219,
    221, 223, 226, 228, 230, 232, 233, 235, 237, 238,
    240, 242, 243, 244, 246, 247, 248, 249, 250, 251,
    252, 252, 253, 254, 254, 255, 255, 255, 255, 255,
];

/// Normalizes any angle into `0..360`.
#[inline]
#[must_use]
pub const fn normalize(angle: i32) -> i32 {
    angle.rem_euclid(FULL_TURN)
}

/// Quarter-wave lookup for `0..=90`; 90 is exact.
#[inline]
const fn quarter(angle: i32) -> i32 {
    if angle >= 90 {
        TRIG_ONE
    } else {
        QUARTER_SINE[angle as usize] as i32
    }
}

/// Sine of `angle` degrees in Q8, in `-256..=256`.
#[must_use]
pub const fn sin(angle: i32) -> i32 {
    let a = normalize(angle);
    match a {
        0..=89 => quarter(a),
        90..=179 => quarter(180 - a),
        180..=269 => -quarter(a - 180),
        _ => -quarter(360 - a),
    }
}

/// Cosine of `angle` degrees in Q8: `sin(angle + 90)`.
#[inline]
#[must_use]
pub const fn cos(angle: i32) -> i32 {
    sin(normalize(angle) + 90)
}
