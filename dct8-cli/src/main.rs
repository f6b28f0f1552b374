#![forbid(unsafe_code)]

mod files;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use dct8::vectors::{self, DEFAULT_COUNT, DEFAULT_MAX_SAMPLE, DEFAULT_MIN_SAMPLE, DEFAULT_SEED};
use dct8::{FixedFormat, GenerateConfig, dct_1d, fixed_to_float, float_to_fixed};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const SELFTEST_INPUT: [f64; 8] = [1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0];
const SELFTEST_DC: f64 = 5.656854249492381;
const SELFTEST_VALUE: f64 = 0.75;

#[derive(Parser)]
#[command(name = "dct8")]
#[command(about = "Golden-model 8-point DCT-II and fixed-point toolkit", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random input vectors and their rounded golden DCT outputs
    Generate {
        /// Number of vectors
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// PRNG seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Smallest sample value
        #[arg(long, default_value_t = DEFAULT_MIN_SAMPLE, allow_negative_numbers = true)]
        min: i32,

        /// Largest sample value
        #[arg(long, default_value_t = DEFAULT_MAX_SAMPLE, allow_negative_numbers = true)]
        max: i32,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Run the reference transform and codec on known inputs
    Selftest,

    /// Transform exactly eight samples
    Transform {
        #[arg(required = true, allow_negative_numbers = true)]
        samples: Vec<f64>,
    },

    /// Convert reals to fixed-point words
    Quantize {
        #[command(flatten)]
        format: FormatArgs,

        /// Return unclamped words for out-of-range values
        #[arg(long)]
        no_saturate: bool,

        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Convert fixed-point words to reals
    Dequantize {
        #[command(flatten)]
        format: FormatArgs,

        #[arg(required = true, allow_negative_numbers = true)]
        words: Vec<i64>,
    },
}

#[derive(Args)]
struct FormatArgs {
    /// Total word width
    #[arg(long, default_value_t = 16)]
    bits: u32,

    /// Fractional bits
    #[arg(long, default_value_t = 15)]
    frac_bits: u32,

    /// Treat words as unsigned
    #[arg(long)]
    unsigned: bool,
}

impl FormatArgs {
    fn to_format(&self) -> Result<FixedFormat> {
        Ok(FixedFormat::new(self.bits, self.frac_bits, !self.unsigned)?)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<W: Write>(command: Commands, out: &mut W) -> Result<()> {
    match command {
        Commands::Generate {
            count,
            seed,
            min,
            max,
            output,
        } => {
            let config = GenerateConfig {
                count,
                seed,
                min_sample: min,
                max_sample: max,
            };
            let generated = vectors::generate(&config)?;
            let (inputs, outputs) = files::write_vector_files(&output, &generated)?;
            info!(
                count = generated.len(),
                inputs = %inputs.display(),
                outputs = %outputs.display(),
                "wrote test vectors"
            );
            writeln!(
                out,
                "Generated {} vectors -> {} and {}",
                generated.len(),
                inputs.display(),
                outputs.display()
            )?;
        }
        Commands::Selftest => selftest(out)?,
        Commands::Transform { samples } => {
            let coeffs = dct_1d(&samples)?;
            for c in coeffs {
                writeln!(out, "{c}")?;
            }
        }
        Commands::Quantize {
            format,
            no_saturate,
            values,
        } => {
            let format = format.to_format()?.with_saturate(!no_saturate);
            debug!(?format, count = values.len(), "quantizing");
            for v in values {
                writeln!(out, "{}", float_to_fixed(v, &format))?;
            }
        }
        Commands::Dequantize { format, words } => {
            let format = format.to_format()?;
            debug!(?format, count = words.len(), "dequantizing");
            for w in words {
                writeln!(out, "{}", fixed_to_float(w, &format))?;
            }
        }
    }
    Ok(())
}

fn selftest<W: Write>(out: &mut W) -> Result<()> {
    let coeffs = dct_1d(&SELFTEST_INPUT)?;
    let formatted: Vec<String> = coeffs.iter().map(|c| format!("{c:.4}")).collect();
    writeln!(out, "Input x: {:?}", SELFTEST_INPUT)?;
    writeln!(out, "DCT X: [{}]", formatted.join(", "))?;
    if (coeffs[0] - SELFTEST_DC).abs() > 1e-9 {
        bail!("DC coefficient {} differs from {}", coeffs[0], SELFTEST_DC);
    }

    let format = FixedFormat::q1_15();
    let word = float_to_fixed(SELFTEST_VALUE, &format);
    let back = fixed_to_float(word, &format);
    writeln!(out, "val={SELFTEST_VALUE}, fi={word}, back={back}")?;
    if back != SELFTEST_VALUE {
        bail!("Q1.15 round trip of {} returned {}", SELFTEST_VALUE, back);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = io::stdout();
    run(cli.command, &mut stdout.lock())
}
