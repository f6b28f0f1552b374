//! Fixed-point quantization with saturation and two's-complement
//! reinterpretation.
//!
//! A word with `bits = W` and `frac_bits = F` denotes `word / 2^F`.

use crate::error::{Dct8Error, Result};

/// Widest word the codec accepts. Unsigned words of this width still fit in
/// an `i64`.
pub const MAX_BITS: u32 = 63;
pub const MAX_FRAC_BITS: u32 = 63;

/// Interpretation of a fixed-point word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedFormat {
    bits: u32,
    frac_bits: u32,
    signed: bool,
    saturate: bool,
}

impl FixedFormat {
    pub fn new(bits: u32, frac_bits: u32, signed: bool) -> Result<Self> {
        if bits == 0 {
            return Err(Dct8Error::invalid("bits must be >= 1, got 0"));
        }
        if bits > MAX_BITS {
            return Err(Dct8Error::invalid(format!(
                "bits must be <= {MAX_BITS}, got {bits}"
            )));
        }
        if frac_bits > MAX_FRAC_BITS {
            return Err(Dct8Error::invalid(format!(
                "frac_bits must be <= {MAX_FRAC_BITS}, got {frac_bits}"
            )));
        }
        Ok(Self {
            bits,
            frac_bits,
            signed,
            saturate: true,
        })
    }

    /// Signed Q1.15 in a 16-bit word, saturating.
    pub const fn q1_15() -> Self {
        Self {
            bits: 16,
            frac_bits: 15,
            signed: true,
            saturate: true,
        }
    }

    pub const fn with_saturate(self, saturate: bool) -> Self {
        Self { saturate, ..self }
    }

    pub const fn bits(&self) -> u32 {
        self.bits
    }

    pub const fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    pub const fn signed(&self) -> bool {
        self.signed
    }

    pub const fn saturate(&self) -> bool {
        self.saturate
    }

    pub const fn min_value(&self) -> i64 {
        if self.signed {
            -(1i64 << (self.bits - 1))
        } else {
            0
        }
    }

    pub const fn max_value(&self) -> i64 {
        if self.signed {
            (1i64 << (self.bits - 1)) - 1
        } else {
            ((1u64 << self.bits) - 1) as i64
        }
    }

    /// Real step between adjacent words, `2^-F`.
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale()
    }

    fn scale(&self) -> f64 {
        2f64.powi(self.frac_bits as i32)
    }
}

impl Default for FixedFormat {
    fn default() -> Self {
        Self::q1_15()
    }
}

/// Rounds to nearest, ties away from zero.
pub fn round_half_away_from_zero(x: f64) -> f64 {
    // f64::round already breaks ties away from zero.
    x.round()
}

pub fn saturate(value: i64, format: &FixedFormat) -> i64 {
    value.clamp(format.min_value(), format.max_value())
}

/// Real to fixed-point word. Out-of-range values are clamped when the format
/// saturates and returned unclamped otherwise. NaN maps to 0.
pub fn float_to_fixed(x: f64, format: &FixedFormat) -> i64 {
    let scaled = round_half_away_from_zero(x * format.scale()) as i64;
    if format.saturate {
        saturate(scaled, format)
    } else {
        scaled
    }
}

/// Fixed-point word to real. Signed formats reinterpret the low `bits` of
/// `word` as two's complement first.
pub fn fixed_to_float(word: i64, format: &FixedFormat) -> f64 {
    let value = if format.signed {
        let bits = format.bits;
        let mask = (1i128 << bits) - 1;
        let masked = word as i128 & mask;
        if masked & (1i128 << (bits - 1)) != 0 {
            masked - (1i128 << bits)
        } else {
            masked
        }
    } else {
        word as i128
    };
    value as f64 / format.scale()
}

/// Saturating element-wise quantization.
pub fn quantize_vector(values: &[f64], format: &FixedFormat) -> Vec<i64> {
    let format = format.with_saturate(true);
    values.iter().map(|&v| float_to_fixed(v, &format)).collect()
}

pub fn dequantize_vector(words: &[i64], format: &FixedFormat) -> Vec<f64> {
    words.iter().map(|&w| fixed_to_float(w, format)).collect()
}
