//! Set-associative cache simulator (`cachesim`)

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	cachesim::{cache, data, Cache, Report, Simulator, TraceReader},
	cachesim_util::logger,
	clap::Parser,
	std::{fs, io::BufReader, time::Duration},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Validate the config
	let config = cache::Config {
		num_sets:      args.num_sets,
		block_size:    args.block_size,
		associativity: args.associativity,
		policy:        args.policy,
	};
	config.validate().context("Invalid cache configuration")?;
	tracing::debug!(?config, "Cache configuration");

	let debug_output_period =
		Duration::try_from_secs_f64(args.debug_output_period_secs).context("Invalid debug output period")?;

	// Open the trace file
	let trace_file = fs::File::open(&args.trace_file)
		.with_context(|| format!("Unable to open trace file {:?}", args.trace_file))?;
	let mut trace_reader =
		TraceReader::from_reader(BufReader::new(trace_file)).context("Unable to parse trace file")?;

	// Run the simulator
	let mut sim = Simulator::new(debug_output_period);
	let mut cache = Cache::new(config);
	let run_output = sim
		.run(&mut trace_reader, &mut cache)
		.context("Unable to run simulator")?;
	tracing::debug!(?run_output, "Finished simulation");

	if let Some(output_path) = &args.output_file {
		let data = data::Data::from_cache(&cache);
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &data).context("Unable to write to output file")?;
	}

	print!("{}", Report::new(cache.statistics(), args.output_format));

	Ok(())
}
