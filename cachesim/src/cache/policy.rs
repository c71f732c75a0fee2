//! Replacement policies

// Imports
use {
	super::set::CacheLine,
	rand::Rng,
	std::{fmt, str::FromStr},
};

/// Replacement policy.
///
/// Chooses which line of a full set is evicted to make room for a new one.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum ReplacementPolicy {
	/// Evicts a uniformly random line
	Random,

	/// Evicts the line that was installed the earliest.
	///
	/// Hits don't affect the eviction order.
	Fifo,

	/// Evicts the least recently used line
	Lru,
}

impl ReplacementPolicy {
	/// All policies
	pub const ALL: [Self; 3] = [Self::Random, Self::Fifo, Self::Lru];

	/// Returns the single-character token for this policy
	pub fn token(self) -> char {
		match self {
			Self::Random => 'R',
			Self::Fifo => 'F',
			Self::Lru => 'L',
		}
	}

	/// Returns whether a hit refreshes a line's order key
	pub fn refreshes_on_hit(self) -> bool {
		match self {
			Self::Lru => true,
			Self::Random | Self::Fifo => false,
		}
	}

	/// Selects the position of the victim within the (full) set `lines`.
	///
	/// For FIFO and LRU the victim is the line with the smallest order key,
	/// with ties going to the lowest position.
	///
	/// # Panics
	/// Panics if `lines` is empty.
	pub fn select_victim<R: Rng>(self, lines: &[CacheLine], rng: &mut R) -> usize {
		assert!(!lines.is_empty(), "Cannot select a victim from an empty set");

		match self {
			Self::Random => rng.gen_range(0..lines.len()),
			Self::Fifo | Self::Lru => lines
				.iter()
				.enumerate()
				.min_by_key(|(_, line)| line.order_key())
				.map(|(pos, _)| pos)
				.expect("Set was non-empty"),
		}
	}
}

impl FromStr for ReplacementPolicy {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let policy = match s.to_ascii_lowercase().as_str() {
			"r" | "random" => Self::Random,
			"f" | "fifo" => Self::Fifo,
			"l" | "lru" => Self::Lru,
			_ => anyhow::bail!("Unknown replacement policy {s:?}, expected one of `R`, `F` or `L`"),
		};

		Ok(policy)
	}
}

impl fmt::Display for ReplacementPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Random => "Random",
			Self::Fifo => "FIFO",
			Self::Lru => "LRU",
		};

		f.pad(name)
	}
}
