//! Orthonormal 8-point DCT-II, one- and two-dimensional.
//!
//! `X[k] = α(k) · Σ x[n] · cos((π/16)(2n+1)k)` with `α(0) = √(1/8)` and
//! `α(k) = √(2/8)` otherwise. The 2D transform runs rows first, then columns.

use std::f64::consts::PI;

use crate::error::{Dct8Error, Result};

/// Transform length.
pub const N: usize = 8;

/// Row-major 8x8 block, `block[row][col]`.
pub type Block = [[f64; N]; N];

/// Orthonormal scale factor for frequency index `k`.
pub fn alpha(k: usize) -> f64 {
    if k == 0 {
        (1.0 / N as f64).sqrt()
    } else {
        (2.0 / N as f64).sqrt()
    }
}

fn cos_term(n: usize, k: usize) -> f64 {
    let angle = (PI / 16.0) * (2.0 * n as f64 + 1.0) * k as f64;
    angle.cos()
}

/// Transform matrix `M[k][n] = α(k) · cos((π/16)(2n+1)k)`.
pub fn basis_matrix() -> Block {
    let mut m = [[0.0; N]; N];
    for (k, row) in m.iter_mut().enumerate() {
        let a = alpha(k);
        for (n, v) in row.iter_mut().enumerate() {
            *v = a * cos_term(n, k);
        }
    }
    m
}

pub fn dct8_1d(x: &[f64; N]) -> [f64; N] {
    let mut out = [0.0; N];
    for (k, coeff) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (n, &sample) in x.iter().enumerate() {
            acc += sample * cos_term(n, k);
        }
        *coeff = alpha(k) * acc;
    }
    out
}

/// Checked 1D transform over an arbitrary slice; anything but 8 samples is
/// rejected.
pub fn dct_1d(samples: &[f64]) -> Result<[f64; N]> {
    let x: &[f64; N] = samples
        .try_into()
        .map_err(|_| Dct8Error::shape("samples", N, samples.len()))?;
    Ok(dct8_1d(x))
}

pub fn transpose_8x8(block: &Block) -> Block {
    let mut out = [[0.0; N]; N];
    for (r, row) in block.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            out[c][r] = v;
        }
    }
    out
}

pub fn dct8_2d(block: &Block) -> Block {
    let mut rows = [[0.0; N]; N];
    for (dst, src) in rows.iter_mut().zip(block.iter()) {
        *dst = dct8_1d(src);
    }

    let cols_in = transpose_8x8(&rows);
    let mut cols = [[0.0; N]; N];
    for (dst, src) in cols.iter_mut().zip(cols_in.iter()) {
        *dst = dct8_1d(src);
    }

    transpose_8x8(&cols)
}

/// Checked 2D transform over a row-major sequence of rows. Requires exactly
/// 8 rows of exactly 8 columns.
pub fn dct_2d<R: AsRef<[f64]>>(block: &[R]) -> Result<Block> {
    if block.len() != N {
        return Err(Dct8Error::shape("rows", N, block.len()));
    }
    let mut fixed = [[0.0; N]; N];
    for (dst, row) in fixed.iter_mut().zip(block.iter()) {
        let row = row.as_ref();
        *dst = row
            .try_into()
            .map_err(|_| Dct8Error::shape("columns", N, row.len()))?;
    }
    Ok(dct8_2d(&fixed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const GOLDEN_RAMP: [f64; N] = [
        5.656854249492381,
        1.2814577238707536,
        -3.1543220298989505,
        -0.44998811156820806,
        0.0,
        0.30067244346752153,
        -0.22417076458398394,
        -0.2548977895520772,
    ];

    fn random_vector(rng: &mut StdRng) -> [f64; N] {
        let mut x = [0.0; N];
        for v in x.iter_mut() {
            *v = rng.gen_range(-255.0..255.0);
        }
        x
    }

    fn apply_transpose(m: &Block, coeffs: &[f64; N]) -> [f64; N] {
        let mut out = [0.0; N];
        for (n, v) in out.iter_mut().enumerate() {
            *v = (0..N).map(|k| m[k][n] * coeffs[k]).sum();
        }
        out
    }

    #[test]
    fn alpha_is_orthonormal_scaling() {
        assert_abs_diff_eq!(alpha(0), 0.125f64.sqrt(), epsilon = 1e-15);
        for k in 1..N {
            assert_abs_diff_eq!(alpha(k), 0.5, epsilon = 1e-15);
        }
    }

    #[test]
    fn ramp_matches_golden_vector() {
        let out = dct_1d(&[1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(out[0], 5.657, epsilon = 1e-3);
        for (k, (&got, &want)) in out.iter().zip(GOLDEN_RAMP.iter()).enumerate() {
            assert!(
                (got - want).abs() < 1e-12,
                "coefficient {} differs: got={}, want={}",
                k,
                got,
                want
            );
        }
    }

    #[test]
    fn constant_input_is_dc_only() {
        let out = dct8_1d(&[50.0; N]);
        assert_abs_diff_eq!(out[0], 50.0 * 8.0 * alpha(0), epsilon = 1e-9);
        for (k, &c) in out.iter().enumerate().skip(1) {
            assert!(c.abs() < 1e-9, "AC coefficient {} should vanish: {}", k, c);
        }
    }

    #[test]
    fn zero_input_is_zero() {
        assert_eq!(dct8_1d(&[0.0; N]), [0.0; N]);
    }

    #[test]
    fn basis_matrix_is_orthonormal() {
        let m = basis_matrix();
        for i in 0..N {
            for j in 0..N {
                let dot: f64 = (0..N).map(|n| m[i][n] * m[j][n]).sum();
                let want = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(dot, want, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn basis_matrix_rows_match_transform() {
        let m = basis_matrix();
        for n in 0..N {
            let mut impulse = [0.0; N];
            impulse[n] = 1.0;
            let out = dct8_1d(&impulse);
            for k in 0..N {
                assert_abs_diff_eq!(out[k], m[k][n], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn transpose_application_inverts() {
        let m = basis_matrix();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..32 {
            let x = random_vector(&mut rng);
            let back = apply_transpose(&m, &dct8_1d(&x));
            for n in 0..N {
                assert_abs_diff_eq!(back[n], x[n], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn parseval_energy_preserved() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let x = random_vector(&mut rng).map(|v| v / 255.0);
            let energy_in: f64 = x.iter().map(|v| v * v).sum();
            let energy_out: f64 = dct8_1d(&x).iter().map(|v| v * v).sum();
            assert_abs_diff_eq!(energy_in, energy_out, epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_wrong_lengths() {
        for len in [0, 7, 9, 16] {
            let samples = vec![1.0; len];
            let err = dct_1d(&samples).unwrap_err();
            assert!(
                matches!(err, Dct8Error::Shape { expected: 8, got, .. } if got == len),
                "unexpected error for length {}: {:?}",
                len,
                err
            );
        }
    }

    #[test]
    fn transpose_swaps_indices() {
        let mut b = [[0.0; N]; N];
        for (r, row) in b.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = (r * N + c) as f64;
            }
        }
        let t = transpose_8x8(&b);
        assert_eq!(t[2][5], b[5][2]);
        assert_eq!(transpose_8x8(&t), b);
    }

    #[test]
    fn ramp_block_2d_golden() {
        let block: Vec<Vec<f64>> = (0..N)
            .map(|r| (0..N).map(|c| (r * N + c) as f64).collect())
            .collect();
        let out = dct_2d(&block).unwrap();
        assert_abs_diff_eq!(out[0][0], 252.0, epsilon = 1e-9);
        assert_abs_diff_eq!(out[0][1], -18.221641184, epsilon = 1e-8);
        assert_abs_diff_eq!(out[1][0], -145.77312947, epsilon = 1e-7);
        assert_abs_diff_eq!(out[3][0], -15.238542609, epsilon = 1e-8);
        assert_abs_diff_eq!(out[1][1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn constant_block_is_dc_only() {
        let out = dct8_2d(&[[10.0; N]; N]);
        assert_abs_diff_eq!(out[0][0], 80.0, epsilon = 1e-9);
        for r in 0..N {
            for c in 0..N {
                if r != 0 || c != 0 {
                    assert!(out[r][c].abs() < 1e-9, "({}, {}) = {}", r, c, out[r][c]);
                }
            }
        }
    }

    #[test]
    fn row_then_column_matches_column_then_row() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut block = [[0.0; N]; N];
        for row in block.iter_mut() {
            *row = random_vector(&mut rng);
        }
        let forward = dct8_2d(&block);

        let t = transpose_8x8(&block);
        let mut cols = [[0.0; N]; N];
        for (dst, src) in cols.iter_mut().zip(t.iter()) {
            *dst = dct8_1d(src);
        }
        let mut rows = [[0.0; N]; N];
        for (dst, src) in rows.iter_mut().zip(transpose_8x8(&cols).iter()) {
            *dst = dct8_1d(src);
        }

        for r in 0..N {
            for c in 0..N {
                assert_abs_diff_eq!(forward[r][c], rows[r][c], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn block_energy_preserved() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut block = [[0.0; N]; N];
        for row in block.iter_mut() {
            *row = random_vector(&mut rng).map(|v| v / 255.0);
        }
        let energy_in: f64 = block.iter().flatten().map(|v| v * v).sum();
        let energy_out: f64 = dct8_2d(&block).iter().flatten().map(|v| v * v).sum();
        assert_abs_diff_eq!(energy_in, energy_out, epsilon = 1e-9);
    }

    #[test]
    fn rejects_wrong_block_shapes() {
        let seven_rows = vec![vec![0.0; N]; 7];
        let err = dct_2d(&seven_rows).unwrap_err();
        assert!(matches!(err, Dct8Error::Shape { what: "rows", got: 7, .. }));

        let mut short_row = vec![vec![0.0; N]; N];
        short_row[4].pop();
        let err = dct_2d(&short_row).unwrap_err();
        assert!(matches!(err, Dct8Error::Shape { what: "columns", got: 7, .. }));

        let nine_rows = vec![[0.0; N]; 9];
        assert!(dct_2d(&nine_rows).unwrap_err().is_shape());
    }
}
