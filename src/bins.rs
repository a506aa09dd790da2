//! Residual symbol binning
//!
//! Folds signed 8-bit residuals into a compact alphabet so the Huffman
//! stage sees at most 20 distinct byte values. Magnitudes up to 4 are kept
//! exact; larger magnitudes fall into logarithmic bins reconstructed at
//! their midpoint:
//!
//! | magnitude | symbol index | reconstructed |
//! |-----------|--------------|---------------|
//! | 0         | 0            | 0             |
//! | 1..=4     | magnitude    | exact         |
//! | 5..=7     | 5            | 6             |
//! | 8..=15    | 6            | 11            |
//! | 16..=31   | 7            | 23            |
//! | 32..=63   | 8            | 47            |
//! | 64..=127  | 9            | 95            |
//!
//! The sign lives in bit 7. Small residuals dominate voiced speech, so this
//! keeps most frames audibly lossless while the tiny alphabet lets the
//! entropy stage concentrate hard.

/// Sign flag on binned symbols.
const SIGN_BIT: u8 = 0x80;

/// Bin each residual of `input` into `out`.
pub fn bin(input: &[i8], out: &mut [u8]) {
    debug_assert_eq!(input.len(), out.len());

    for (o, &v) in out.iter_mut().zip(input) {
        if v == 0 {
            *o = 0;
            continue;
        }

        let m = (v as i32).unsigned_abs().min(127);
        let idx = match m {
            0..=4 => m as u8,
            5..=7 => 5,
            8..=15 => 6,
            16..=31 => 7,
            32..=63 => 8,
            _ => 9,
        };

        *o = if v < 0 { idx | SIGN_BIT } else { idx };
    }
}

/// Reverse [`bin`]: exact for |v| <= 4, midpoint of the bin otherwise.
///
/// Symbols whose low 7 bits fall outside the alphabet decode to 0; a
/// conforming encoder never emits them.
pub fn unbin(input: &[u8], out: &mut [i8]) {
    debug_assert_eq!(input.len(), out.len());

    for (o, &code) in out.iter_mut().zip(input) {
        let mag: i8 = match code & 0x7f {
            m @ 0..=4 => m as i8,
            5 => 6,
            6 => 11,
            7 => 23,
            8 => 47,
            9 => 95,
            _ => {
                *o = 0;
                continue;
            }
        };

        *o = if code & SIGN_BIT != 0 { -mag } else { mag };
    }
}
