#![forbid(unsafe_code)]

pub mod dct;
pub mod error;
pub mod fixed;
pub mod vectors;

pub use dct::{Block, N, dct_1d, dct_2d, dct8_1d, dct8_2d};
pub use error::{Dct8Error, Result};
pub use fixed::{FixedFormat, dequantize_vector, fixed_to_float, float_to_fixed, quantize_vector};
pub use vectors::{GenerateConfig, TestVector, VectorGenerator};

/// Converts reals to fixed-point words of `bits` total and `frac_bits`
/// fractional bits.
pub fn quantize(
    reals: &[f64],
    bits: u32,
    frac_bits: u32,
    signed: bool,
    saturate: bool,
) -> Result<Vec<i64>> {
    let format = FixedFormat::new(bits, frac_bits, signed)?.with_saturate(saturate);
    Ok(reals.iter().map(|&x| float_to_fixed(x, &format)).collect())
}

pub fn dequantize(words: &[i64], bits: u32, frac_bits: u32, signed: bool) -> Result<Vec<f64>> {
    let format = FixedFormat::new(bits, frac_bits, signed)?;
    Ok(dequantize_vector(words, &format))
}
