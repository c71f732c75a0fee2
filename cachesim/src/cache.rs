//! Set-associative cache

// Modules
pub mod classifier;
pub mod policy;
pub mod set;
pub mod statistics;

// Exports
pub use self::{
	classifier::{MissClassifier, MissKind},
	policy::ReplacementPolicy,
	set::{CacheLine, CacheSet},
	statistics::{Rates, Statistics},
};

// Imports
use {
	crate::{
		address::{AddressDecoder, DecodedAddress},
		sim,
	},
	rand::{rngs::StdRng, Rng, SeedableRng},
	std::{fmt, num::NonZeroU32},
};

/// Set-associative cache.
///
/// Owns all sets, the miss classifier and the statistics of a single run.
#[derive(Debug)]
pub struct Cache<R = StdRng> {
	/// Config
	config: Config,

	/// Address decoder
	decoder: AddressDecoder,

	/// Sets
	sets: Vec<CacheSet>,

	/// Miss classifier
	classifier: MissClassifier,

	/// Statistics
	statistics: Statistics,

	/// Number of lines currently occupied across all sets
	occupied_lines: usize,

	/// Access clock.
	///
	/// Incremented on each access, used as the order key of lines.
	clock: u64,

	/// Random number generator for the random policy
	rng: R,
}

impl Cache<StdRng> {
	/// Creates an empty cache, with an entropy-seeded random number generator.
	///
	/// # Panics
	/// Panics if `config` is invalid, e.g. if the number of sets isn't a power of two.
	pub fn new(config: Config) -> Self {
		Self::with_rng(config, StdRng::from_entropy())
	}
}

impl<R: Rng> Cache<R> {
	/// Creates an empty cache using `rng` for random replacement.
	///
	/// # Panics
	/// Panics if `config` is invalid, e.g. if the number of sets isn't a power of two.
	pub fn with_rng(config: Config, rng: R) -> Self {
		if let Err(err) = config.validate() {
			panic!("Invalid cache config {config:?}: {err:?}");
		}

		let decoder = AddressDecoder::new(config.block_size, config.num_sets);
		tracing::debug!(
			offset_bits = decoder.offset_bits(),
			index_bits = decoder.index_bits(),
			tag_bits = decoder.tag_bits(),
			"Address layout"
		);

		let associativity = config.associativity();
		Self {
			config,
			decoder,
			sets: (0..config.num_sets.get())
				.map(|_| CacheSet::new(associativity))
				.collect(),
			classifier: MissClassifier::new(),
			statistics: Statistics::new(),
			occupied_lines: 0,
			clock: 0,
			rng,
		}
	}

	/// Accesses `address`, returning whether it hit or how it missed
	pub fn access(&mut self, address: u32) -> AccessOutcome {
		self.clock += 1;
		let now = self.clock;
		let policy = self.config.policy;
		let DecodedAddress { tag, index } = self.decoder.decode(address);

		// Note: Fullness must be measured before we install anything
		let cache_full = self.is_full();
		let set = &mut self.sets[index as usize];

		if set.lookup(tag, policy, now) {
			self.statistics.register_hit();
			tracing::trace!(address, tag, index, "Hit");
			return AccessOutcome::Hit;
		}

		let set_full = set.is_full();
		let kind = self.classifier.classify(tag, index, set_full, cache_full);
		self.statistics.register_miss(kind);
		tracing::trace!(address, tag, index, set_full, cache_full, ?kind, "Miss");

		if set.install(tag, policy, now, &mut self.rng).is_none() {
			self.occupied_lines += 1;
		}

		AccessOutcome::Miss(kind)
	}
}

impl<R> Cache<R> {
	/// Returns the config
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Returns the address decoder
	pub fn decoder(&self) -> &AddressDecoder {
		&self.decoder
	}

	/// Returns the statistics
	pub fn statistics(&self) -> &Statistics {
		&self.statistics
	}

	/// Returns all sets
	pub fn sets(&self) -> &[CacheSet] {
		&self.sets
	}

	/// Returns the miss classifier
	pub fn classifier(&self) -> &MissClassifier {
		&self.classifier
	}

	/// Returns the number of occupied lines
	pub fn occupied_lines(&self) -> usize {
		self.occupied_lines
	}

	/// Returns if every line of every set is occupied
	pub fn is_full(&self) -> bool {
		self.occupied_lines >= self.config.capacity_lines()
	}
}

impl<R: Rng> sim::Model for Cache<R> {
	fn handle_access(&mut self, address: u32) -> AccessOutcome {
		self.access(address)
	}

	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		// Note: Start with a newline, since we're a multi-line output
		f.pad("\n")?;

		let len = self.occupied_lines;
		let capacity = self.config.capacity_lines();
		let occupancy_percentage = 100.0 * (len as f64 / capacity as f64);
		writeln!(f, "Occupied lines: {len} / {capacity} ({occupancy_percentage:.2}%)")?;

		let set_occupancy = self
			.sets
			.iter()
			.map(|set| set.len() as f64)
			.collect::<average::Variance>();
		writeln!(
			f,
			"Average set occupancy: {:.4} ± {:.4} (of {})",
			set_occupancy.mean(),
			set_occupancy.error(),
			self.config.associativity
		)?;

		let statistics = &self.statistics;
		writeln!(
			f,
			"Accesses: {} ({} hits, {} misses: {} compulsory, {} capacity, {} conflict)",
			statistics.total_accesses(),
			statistics.hits(),
			statistics.misses(),
			statistics.compulsory_misses(),
			statistics.capacity_misses(),
			statistics.conflict_misses()
		)?;

		Ok(())
	}
}

/// Outcome of a single access
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum AccessOutcome {
	/// The block was resident
	Hit,

	/// The block wasn't resident and was installed
	Miss(MissKind),
}

impl AccessOutcome {
	/// Returns if this outcome is a hit
	pub fn is_hit(self) -> bool {
		matches!(self, Self::Hit)
	}

	/// Returns the miss kind, if a miss
	pub fn miss_kind(self) -> Option<MissKind> {
		match self {
			Self::Hit => None,
			Self::Miss(kind) => Some(kind),
		}
	}
}

/// Configuration
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Config {
	/// Number of sets
	pub num_sets: NonZeroU32,

	/// Block size, in bytes
	pub block_size: NonZeroU32,

	/// Lines per set
	pub associativity: NonZeroU32,

	/// Replacement policy
	pub policy: ReplacementPolicy,
}

impl Config {
	/// Validates this configuration.
	///
	/// # Errors
	/// Returns an error if the number of sets isn't a power of two, since then some
	/// indices would name non-existing sets, or if the total number of lines doesn't fit
	/// in memory.
	pub fn validate(&self) -> Result<(), anyhow::Error> {
		anyhow::ensure!(
			self.num_sets.is_power_of_two(),
			"Number of sets must be a power of two, found {}",
			self.num_sets
		);

		let lines = u64::from(self.num_sets.get()) * u64::from(self.associativity.get());
		anyhow::ensure!(
			usize::try_from(lines).is_ok(),
			"Cache has too many lines ({lines}) for this platform"
		);

		Ok(())
	}

	/// Returns the associativity as a `usize`
	pub fn associativity(&self) -> usize {
		self.associativity.get() as usize
	}

	/// Returns the total number of lines in the cache
	pub fn capacity_lines(&self) -> usize {
		self.num_sets.get() as usize * self.associativity()
	}
}
