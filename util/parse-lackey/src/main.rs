//! Parses `valgrind`'s `lackey` tool output from stdin,
//! converting it to an address trace.

// Imports
use {
	anyhow::Context,
	cachesim::TraceWriter,
	cachesim_util::logger,
	clap::Parser,
	std::{
		fs,
		io::{BufRead, BufWriter},
		path::PathBuf,
	},
};

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
struct Args {
	/// Log file
	#[clap(long = "log-file")]
	log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	log_file_append: bool,

	/// Output trace file
	#[clap(long = "output", default_value = "output.trace")]
	output_file: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Create the writer
	let file = fs::File::create(&args.output_file).context("Unable to create output file")?;
	let mut trace_writer = TraceWriter::new(BufWriter::new(file));

	// Start reading the output
	let mut stdin = std::io::stdin().lock();
	let mut line = String::new();
	let mut skipped_addresses = 0_usize;
	while let Ok(1..) = {
		line.clear();
		stdin.read_line(&mut line)
	} {
		let Some((kind, addr)) = self::parse_line(&line) else {
			continue;
		};

		// Note: We only simulate data accesses
		if kind == Kind::Inst {
			continue;
		}

		// Parse the address
		let addr = u64::from_str_radix(addr, 16).with_context(|| format!("Unable to parse address {addr:?}"))?;
		let addr = match u32::try_from(addr) {
			Ok(addr) => addr,
			Err(_) => {
				tracing::warn!("Skipping address {addr:#x}, which doesn't fit in 32 bits");
				skipped_addresses += 1;
				continue;
			},
		};

		trace_writer.write(addr).context("Unable to write record")?;
	}

	// Finally finish writing the trace
	let records = trace_writer.records_written();
	trace_writer.finish().context("Unable to finish writing trace")?;
	tracing::info!(records, skipped_addresses, "Wrote trace");

	Ok(())
}

/// Parses a line of `lackey` output into its kind and (hex) address.
///
/// Returns `None` for non-access lines.
fn parse_line(line: &str) -> Option<(Kind, &str)> {
	let line = line.trim_end_matches(|ch: char| ch == '\n' || ch == '\r');

	// Note: Data accesses are indented by a space, instructions aren't
	let (kind, rest) = [("I ", Kind::Inst), (" L ", Kind::Read), (" S ", Kind::Write), (" M ", Kind::Modify)]
		.into_iter()
		.find_map(|(prefix, kind)| line.strip_prefix(prefix).map(|rest| (kind, rest)))?;

	// Note: Each access is `<addr>,<size>`
	let addr = rest.trim_start().split(',').next()?;
	Some((kind, addr))
}

/// Record kind
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Kind {
	Inst,
	Read,
	Write,
	Modify,
}
