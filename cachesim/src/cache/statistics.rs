//! Statistics

// Imports
use super::MissKind;

/// Access statistics.
///
/// Every access is registered as either a hit or a miss of some kind, so
/// `hits + misses == total_accesses` and `compulsory + capacity + conflict == misses`
/// always hold.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Statistics {
	total_accesses:    u64,
	hits:              u64,
	misses:            u64,
	compulsory_misses: u64,
	capacity_misses:   u64,
	conflict_misses:   u64,
}

impl Statistics {
	/// Creates new, empty, statistics
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a hit
	pub fn register_hit(&mut self) {
		self.total_accesses += 1;
		self.hits += 1;
	}

	/// Registers a miss of kind `kind`
	pub fn register_miss(&mut self, kind: MissKind) {
		self.total_accesses += 1;
		self.misses += 1;
		match kind {
			MissKind::Compulsory => self.compulsory_misses += 1,
			MissKind::Capacity => self.capacity_misses += 1,
			MissKind::Conflict => self.conflict_misses += 1,
		}
	}

	/// Returns the total number of accesses
	pub fn total_accesses(&self) -> u64 {
		self.total_accesses
	}

	/// Returns the number of hits
	pub fn hits(&self) -> u64 {
		self.hits
	}

	/// Returns the number of misses
	pub fn misses(&self) -> u64 {
		self.misses
	}

	/// Returns the number of compulsory misses
	pub fn compulsory_misses(&self) -> u64 {
		self.compulsory_misses
	}

	/// Returns the number of capacity misses
	pub fn capacity_misses(&self) -> u64 {
		self.capacity_misses
	}

	/// Returns the number of conflict misses
	pub fn conflict_misses(&self) -> u64 {
		self.conflict_misses
	}

	/// Returns the number of misses of kind `kind`
	pub fn misses_of(&self, kind: MissKind) -> u64 {
		match kind {
			MissKind::Compulsory => self.compulsory_misses,
			MissKind::Capacity => self.capacity_misses,
			MissKind::Conflict => self.conflict_misses,
		}
	}

	/// Returns the rates derived from these statistics
	pub fn rates(&self) -> Rates {
		Rates {
			hit:        self::ratio(self.hits, self.total_accesses),
			miss:       self::ratio(self.misses, self.total_accesses),
			compulsory: self::ratio(self.compulsory_misses, self.misses),
			capacity:   self::ratio(self.capacity_misses, self.misses),
			conflict:   self::ratio(self.conflict_misses, self.misses),
		}
	}
}

/// Rates.
///
/// Hit and miss rates are over all accesses, while the per-kind
/// miss rates are over all misses.
#[derive(PartialEq, Clone, Copy, Default, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Rates {
	pub hit:        f64,
	pub miss:       f64,
	pub compulsory: f64,
	pub capacity:   f64,
	pub conflict:   f64,
}

impl Rates {
	/// Returns all rates, in report order
	pub fn to_array(self) -> [f64; 5] {
		[self.hit, self.miss, self.compulsory, self.capacity, self.conflict]
	}
}

/// Returns `count / total`, or `0` if `total` is `0`
fn ratio(count: u64, total: u64) -> f64 {
	match total {
		0 => 0.0,
		_ => count as f64 / total as f64,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_statistics_have_zero_rates() {
		let statistics = Statistics::new();
		assert_eq!(statistics.rates(), Rates::default());
	}

	#[test]
	fn counters_stay_consistent() {
		let mut statistics = Statistics::new();
		statistics.register_hit();
		statistics.register_miss(MissKind::Compulsory);
		statistics.register_miss(MissKind::Compulsory);
		statistics.register_miss(MissKind::Capacity);
		statistics.register_miss(MissKind::Conflict);
		statistics.register_hit();

		assert_eq!(statistics.total_accesses(), 6);
		assert_eq!(statistics.hits() + statistics.misses(), statistics.total_accesses());
		assert_eq!(
			statistics.compulsory_misses() + statistics.capacity_misses() + statistics.conflict_misses(),
			statistics.misses()
		);
		assert_eq!(statistics.misses_of(MissKind::Compulsory), 2);
	}

	#[test]
	fn miss_kind_rates_are_over_misses() {
		let mut statistics = Statistics::new();
		statistics.register_hit();
		statistics.register_hit();
		statistics.register_miss(MissKind::Compulsory);
		statistics.register_miss(MissKind::Capacity);

		let rates = statistics.rates();
		assert_eq!(rates.hit, 0.5);
		assert_eq!(rates.miss, 0.5);
		assert_eq!(rates.compulsory, 0.5);
		assert_eq!(rates.capacity, 0.5);
		assert_eq!(rates.conflict, 0.0);
	}

	#[test]
	fn only_hits_have_zero_miss_kind_rates() {
		let mut statistics = Statistics::new();
		statistics.register_hit();

		let rates = statistics.rates();
		assert_eq!(rates.hit, 1.0);
		assert_eq!(rates.compulsory + rates.capacity + rates.conflict, 0.0);
	}
}
