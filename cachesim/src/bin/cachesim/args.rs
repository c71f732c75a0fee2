//! Arguments

// Imports
use {
	cachesim::{cache::ReplacementPolicy, report::OutputFormat},
	std::{num::NonZeroU32, path::PathBuf},
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
#[clap(about = "Simulates a set-associative cache over an address trace")]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Number of sets
	pub num_sets: NonZeroU32,

	/// Block size, in bytes
	pub block_size: NonZeroU32,

	/// Associativity
	pub associativity: NonZeroU32,

	/// Replacement policy
	///
	/// One of `R` (random), `F` (FIFO) or `L` (LRU)
	pub policy: ReplacementPolicy,

	/// Output flag
	///
	/// `0` for labeled text, `1` for a single numeric line
	pub output_format: OutputFormat,

	/// Trace file
	pub trace_file: PathBuf,

	/// Output file
	///
	/// Writes the configuration and statistics as json.
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,

	/// Debug output period (in seconds)
	#[clap(long = "debug-output-period-secs", default_value_t = 1.0)]
	pub debug_output_period_secs: f64,
}
