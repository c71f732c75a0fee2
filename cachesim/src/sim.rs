//! Simulator

// Imports
use {
	crate::{cache::AccessOutcome, trace::TraceReader},
	anyhow::Context,
	std::{
		fmt,
		io,
		time::{Duration, Instant},
	},
};

/// Simulator
#[derive(Debug)]
pub struct Simulator {
	/// Debug output period
	///
	/// Interval in which to output debug output for the model
	debug_output_period: Duration,
}

impl Simulator {
	/// Creates a new simulator
	pub fn new(debug_output_period: Duration) -> Self {
		Self { debug_output_period }
	}

	/// Runs the simulator on all addresses from `trace_reader` with model `model`
	pub fn run<M: Model>(
		&mut self,
		trace_reader: &mut TraceReader<impl io::Read>,
		model: &mut M,
	) -> Result<RunOutput, anyhow::Error> {
		// Note: `None` means we haven't output yet, so we output right away at the start
		let mut last_debug_time = None::<Instant>;

		// Create the record iterator
		let total_records = trace_reader.records_remaining();
		let record_it = std::iter::from_fn(|| trace_reader.read_next().transpose());

		// Go through all records
		let mut records = 0;
		for (record_idx, record_res) in record_it.enumerate() {
			let address = record_res.with_context(|| format!("Unable to read record #{record_idx}"))?;

			let outcome = model.handle_access(address);
			tracing::trace!(target: "cachesim::sim::access", record_idx, address, ?outcome);
			records += 1;

			// Then show debug output, if it's been long enough
			let cur_time = Instant::now();
			let should_output = last_debug_time
				.map_or(true, |last_debug_time| cur_time.duration_since(last_debug_time) >= self.debug_output_period);
			if should_output {
				let records_processed_percentage = 100.0 * (record_idx as f64 / total_records as f64);
				tracing::info!(
					"[{records_processed_percentage:.2}%] Debug: {}",
					cachesim_util::DisplayWrapper::new(|f| model.fmt_debug(f))
				);
				last_debug_time = Some(cur_time);
			}
		}

		Ok(RunOutput { records })
	}
}

/// Output for [`Simulator::run`]
#[derive(Clone, Debug)]
pub struct RunOutput {
	/// Number of records processed
	pub records: u64,
}

/// Model being simulated
pub trait Model {
	/// Handles an access to `address`
	fn handle_access(&mut self, address: u32) -> AccessOutcome;

	/// Formats debug output to `f`.
	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error>;
}
