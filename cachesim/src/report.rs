//! Report

// Imports
use {
	crate::cache::Statistics,
	itertools::Itertools,
	std::{fmt, str::FromStr},
};

/// Output format
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum OutputFormat {
	/// One labeled line per value
	Text,

	/// All values in a single space-separated line
	Numeric,
}

impl FromStr for OutputFormat {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"0" => Ok(Self::Text),
			"1" => Ok(Self::Numeric),
			_ => anyhow::bail!("Output flag must be `0` or `1`, found {s:?}"),
		}
	}
}

/// Report of a run's statistics
#[derive(Clone, Copy, Debug)]
pub struct Report<'a> {
	/// Statistics
	statistics: &'a Statistics,

	/// Format
	format: OutputFormat,
}

impl<'a> Report<'a> {
	/// Creates a new report
	pub fn new(statistics: &'a Statistics, format: OutputFormat) -> Self {
		Self { statistics, format }
	}
}

impl fmt::Display for Report<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let total_accesses = self.statistics.total_accesses();
		let rates = self.statistics.rates();

		match self.format {
			OutputFormat::Text => {
				writeln!(f, "Total de acessos: {total_accesses}")?;
				writeln!(f, "Taxa de hits: {:.4}", rates.hit)?;
				writeln!(f, "Taxa de misses: {:.4}", rates.miss)?;
				writeln!(f, "Taxa de miss compulsório: {:.4}", rates.compulsory)?;
				writeln!(f, "Taxa de miss de capacidade: {:.4}", rates.capacity)?;
				writeln!(f, "Taxa de miss de conflito: {:.4}", rates.conflict)?;
			},
			OutputFormat::Numeric => {
				let rates = rates.to_array().into_iter().map(|rate| format!("{rate:.4}"));
				writeln!(f, "{total_accesses} {}", rates.format(" "))?;
			},
		}

		Ok(())
	}
}
