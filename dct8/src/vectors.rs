//! Random test-vector generation for checking a hardware DCT against the
//! floating-point reference.
//!
//! Inputs and golden outputs are written as text, one vector per line, eight
//! space-separated integers per line.

use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::dct::{N, dct8_1d};
use crate::error::{Dct8Error, Result};
use crate::fixed::round_half_away_from_zero;

pub const DEFAULT_SEED: u64 = 0xDC78;
pub const DEFAULT_COUNT: usize = 32;
pub const DEFAULT_MIN_SAMPLE: i32 = -128;
pub const DEFAULT_MAX_SAMPLE: i32 = 127;

pub const INPUTS_FILE: &str = "vec_inputs.txt";
pub const OUTPUTS_FILE: &str = "vec_outputs.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub count: usize,
    pub seed: u64,
    pub min_sample: i32,
    pub max_sample: i32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            seed: DEFAULT_SEED,
            min_sample: DEFAULT_MIN_SAMPLE,
            max_sample: DEFAULT_MAX_SAMPLE,
        }
    }
}

impl GenerateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(Dct8Error::invalid("count must be >= 1"));
        }
        if self.min_sample > self.max_sample {
            return Err(Dct8Error::invalid(format!(
                "sample range is empty: min {} > max {}",
                self.min_sample, self.max_sample
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestVector {
    pub input: [i32; N],
    /// DCT of `input`, rounded half away from zero.
    pub output: [i64; N],
}

impl TestVector {
    pub fn from_input(input: [i32; N]) -> Self {
        let coeffs = dct8_1d(&input.map(f64::from));
        Self {
            input,
            output: round_coefficients(&coeffs),
        }
    }
}

pub fn round_coefficients(coeffs: &[f64; N]) -> [i64; N] {
    coeffs.map(|c| round_half_away_from_zero(c) as i64)
}

pub struct VectorGenerator {
    rng: StdRng,
    min_sample: i32,
    max_sample: i32,
}

impl VectorGenerator {
    pub fn new(config: &GenerateConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            seed = config.seed,
            min = config.min_sample,
            max = config.max_sample,
            "seeding vector generator"
        );
        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed),
            min_sample: config.min_sample,
            max_sample: config.max_sample,
        })
    }

    pub fn next_input(&mut self) -> [i32; N] {
        let mut input = [0i32; N];
        for v in input.iter_mut() {
            *v = self.rng.gen_range(self.min_sample..=self.max_sample);
        }
        input
    }

    pub fn next_vector(&mut self) -> TestVector {
        TestVector::from_input(self.next_input())
    }
}

/// Generates `config.count` vectors from `config.seed`. The same config always
/// yields the same vectors.
pub fn generate(config: &GenerateConfig) -> Result<Vec<TestVector>> {
    let mut generator = VectorGenerator::new(config)?;
    let vectors: Vec<_> = (0..config.count)
        .map(|_| generator.next_vector())
        .collect();
    debug!(count = vectors.len(), "generated test vectors");
    Ok(vectors)
}

fn write_line<W: Write, T: std::fmt::Display>(w: &mut W, values: &[T]) -> std::io::Result<()> {
    let mut first = true;
    for v in values {
        if !first {
            w.write_all(b" ")?;
        }
        write!(w, "{}", v)?;
        first = false;
    }
    w.write_all(b"\n")
}

pub fn write_vectors<I: Write, O: Write>(
    inputs: &mut I,
    outputs: &mut O,
    vectors: &[TestVector],
) -> Result<()> {
    for v in vectors {
        write_line(inputs, &v.input)?;
        write_line(outputs, &v.output)?;
    }
    inputs.flush()?;
    outputs.flush()?;
    Ok(())
}

/// Parses one line of a vector file. Blank-separated, exactly eight integers.
pub fn parse_vector_line(line: &str) -> Result<[i64; N]> {
    let values = line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<i64>()
                .map_err(|_| Dct8Error::invalid(format!("not an integer: {tok}")))
        })
        .collect::<Result<Vec<_>>>()?;
    let got = values.len();
    values
        .try_into()
        .map_err(|_| Dct8Error::shape("values per line", N, got))
}
