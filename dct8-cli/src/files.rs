use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dct8::TestVector;
use dct8::vectors::{INPUTS_FILE, OUTPUTS_FILE, write_vectors};

/// Writes `vec_inputs.txt` and `vec_outputs.txt` into `dir`, creating it if
/// needed. Returns both paths.
pub fn write_vector_files(dir: &Path, vectors: &[TestVector]) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let inputs_path = dir.join(INPUTS_FILE);
    let outputs_path = dir.join(OUTPUTS_FILE);
    let inputs = File::create(&inputs_path)
        .with_context(|| format!("creating {}", inputs_path.display()))?;
    let outputs = File::create(&outputs_path)
        .with_context(|| format!("creating {}", outputs_path.display()))?;

    write_vectors(
        &mut BufWriter::new(inputs),
        &mut BufWriter::new(outputs),
        vectors,
    )
    .context("writing test vectors")?;

    Ok((inputs_path, outputs_path))
}
