//! International Morse code for letters and digits.

use super::timing::Unit;

const DOT: Unit = Unit::Dot;
const DASH: Unit = Unit::Dash;

static LETTERS: [&[Unit]; 26] = [
    &[DOT, DASH],             // A
    &[DASH, DOT, DOT, DOT],   // B
    &[DASH, DOT, DASH, DOT],  // C
    &[DASH, DOT, DOT],        // D
    &[DOT],                   // E
    &[DOT, DOT, DASH, DOT],   // F
    &[DASH, DASH, DOT],       // G
    &[DOT, DOT, DOT, DOT],    // H
    &[DOT, DOT],              // I
    &[DOT, DASH, DASH, DASH], // J
    &[DASH, DOT, DASH],       // K
    &[DOT, DASH, DOT, DOT],   // L
    &[DASH, DASH],            // M
    &[DASH, DOT],             // N
    &[DASH, DASH, DASH],      // O
    &[DOT, DASH, DASH, DOT],  // P
    &[DASH, DASH, DOT, DASH], // Q
    &[DOT, DASH, DOT],        // R
    &[DOT, DOT, DOT],         // S
    &[DASH],                  // T
    &[DOT, DOT, DASH],        // U
    &[DOT, DOT, DOT, DASH],   // V
    &[DOT, DASH, DASH],       // W
    &[DASH, DOT, DOT, DASH],  // X
    &[DASH, DOT, DASH, DASH], // Y
    &[DASH, DASH, DOT, DOT],  // Z
];

static DIGITS: [&[Unit]; 10] = [
    &[DASH, DASH, DASH, DASH, DASH], // 0
    &[DOT, DASH, DASH, DASH, DASH],  // 1
    &[DOT, DOT, DASH, DASH, DASH],   // 2
    &[DOT, DOT, DOT, DASH, DASH],    // 3
    &[DOT, DOT, DOT, DOT, DASH],     // 4
    &[DOT, DOT, DOT, DOT, DOT],      // 5
    &[DASH, DOT, DOT, DOT, DOT],     // 6
    &[DASH, DASH, DOT, DOT, DOT],    // 7
    &[DASH, DASH, DASH, DOT, DOT],   // 8
    &[DASH, DASH, DASH, DASH, DOT],  // 9
];

/// Marks for an ASCII letter (either case) or digit.
pub fn glyph(c: u8) -> Option<&'static [Unit]> {
    match c {
        b'a'..=b'z' => Some(LETTERS[(c - b'a') as usize]),
        b'A'..=b'Z' => Some(LETTERS[(c - b'A') as usize]),
        b'0'..=b'9' => Some(DIGITS[(c - b'0') as usize]),
        _ => None,
    }
}
