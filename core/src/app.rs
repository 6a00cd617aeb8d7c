//! Application related stuff

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;

/// Returns the global application options, parsed from the command line on
/// first use.
pub fn options() -> &'static Options {
    static OPTIONS: OnceLock<Options> = OnceLock::new();
    OPTIONS.get_or_init(Options::parse)
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Draws random points distributed like a density grid.", long_about = None)]
pub struct Options {
    /// Number of columns in the density grid.
    #[arg(long, value_name = "NUM", default_value_t = 1, help = "Number of columns in the density grid.")]
    pub width: usize,

    /// Number of rows in the density grid.
    #[arg(long, value_name = "NUM", default_value_t = 1, help = "Number of rows in the density grid.")]
    pub height: usize,

    /// Path to the density file.
    #[arg(
        long,
        value_name = "FILE",
        help = "Read row-major density weights from the given file. Uses a uniform grid if omitted."
    )]
    pub density: Option<String>,

    /// Number of samples to draw.
    #[arg(
        long = "samples",
        short = 'n',
        value_name = "NUM",
        default_value_t = 10000,
        help = "Number of samples to draw."
    )]
    pub n_samples: usize,

    /// Random seed.
    #[arg(long, value_name = "NUM", help = "Seed for the random streams. Uses the clock if omitted.")]
    pub seed: Option<u64>,

    /// Number of threads to use for sampling.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for sampling."
    )]
    n_threads: usize,

    /// Path to the output file.
    #[arg(
        long = "outfile",
        short = 'o',
        value_name = "FILE",
        help = "Write the samples to the given filename instead of standard output."
    )]
    pub outfile: Option<String>,

    /// Reject invalid density input instead of sampling a uniform 1x1 grid.
    #[arg(long, help = "Fail on invalid density input instead of sampling the uniform distribution.")]
    pub strict: bool,

    /// Log a chi-squared comparison of the samples against the density.
    #[arg(long, help = "Log a chi-squared comparison of the samples against the density grid.")]
    pub histogram: bool,

    /// Suppress the progress bar.
    #[arg(long, help = "Suppress the progress bar.")]
    pub quiet: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }
}

/// Returns a progress bar for `len` steps; hidden if `quiet` is set.
///
/// * `len`   - Number of steps.
/// * `quiet` - Don't draw the progress bar.
pub fn create_progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>9}/{len:9} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len).with_style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::try_parse_from(["sampler2d"]).unwrap();
        assert_eq!(opts.width, 1);
        assert_eq!(opts.height, 1);
        assert_eq!(opts.n_samples, 10000);
        assert_eq!(opts.threads(), 1);
        assert!(opts.density.is_none());
        assert!(opts.seed.is_none());
        assert!(!opts.strict && !opts.histogram && !opts.quiet);
    }

    #[test]
    fn parses_arguments() {
        let opts = Options::try_parse_from([
            "sampler2d",
            "--width",
            "4",
            "--height",
            "3",
            "--density",
            "weights.txt",
            "-n",
            "500",
            "--seed",
            "42",
            "-o",
            "out.txt",
            "--strict",
            "--histogram",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(opts.width, 4);
        assert_eq!(opts.height, 3);
        assert_eq!(opts.density.as_deref(), Some("weights.txt"));
        assert_eq!(opts.n_samples, 500);
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.outfile.as_deref(), Some("out.txt"));
        assert!(opts.strict && opts.histogram && opts.quiet);
    }

    #[test]
    fn zero_threads_falls_back_to_one() {
        let opts = Options::try_parse_from(["sampler2d", "-t", "0"]).unwrap();
        assert_eq!(opts.threads(), 1);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(Options::try_parse_from(["sampler2d", "--width", "-2"]).is_err());
        assert!(Options::try_parse_from(["sampler2d", "-n", "many"]).is_err());
    }

    #[test]
    fn quiet_progress_bar_is_hidden() {
        assert!(create_progress_bar(10, true).is_hidden());
    }
}
