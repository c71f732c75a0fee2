//! Cache set

// Imports
use {super::ReplacementPolicy, rand::Rng};

/// Cache set.
///
/// Holds up to `associativity` lines, appended in install order until full.
#[derive(Clone, Debug)]
pub struct CacheSet {
	/// Lines
	lines: Vec<CacheLine>,

	/// Associativity
	associativity: usize,
}

impl CacheSet {
	/// Creates an empty set with `associativity` ways
	pub fn new(associativity: usize) -> Self {
		Self {
			lines: vec![],
			associativity,
		}
	}

	/// Looks up `tag` in this set, returning whether it hit.
	///
	/// On a hit, policies that track recency have the line's order key set to `now`.
	pub fn lookup(&mut self, tag: u32, policy: ReplacementPolicy, now: u64) -> bool {
		let Some(line) = self.lines.iter_mut().find(|line| line.valid && line.tag == tag) else {
			return false;
		};

		if policy.refreshes_on_hit() {
			line.order_key = now;
		}

		true
	}

	/// Installs `tag` in this set with order key `now`.
	///
	/// If the set is full, a victim is chosen by `policy` and overwritten, and
	/// the evicted line is returned.
	pub fn install<R: Rng>(&mut self, tag: u32, policy: ReplacementPolicy, now: u64, rng: &mut R) -> Option<CacheLine> {
		let line = CacheLine::new(tag, now);
		if !self.is_full() {
			self.lines.push(line);
			return None;
		}

		let victim_pos = policy.select_victim(&self.lines, rng);
		let victim = std::mem::replace(&mut self.lines[victim_pos], line);
		tracing::trace!(?victim, victim_pos, ?line, "Evicted line");

		Some(victim)
	}

	/// Returns if `tag` is resident in this set
	pub fn contains(&self, tag: u32) -> bool {
		self.lines.iter().any(|line| line.valid && line.tag == tag)
	}

	/// Returns all resident lines
	pub fn lines(&self) -> &[CacheLine] {
		&self.lines
	}

	/// Returns the number of resident lines
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Returns if this set has no resident lines
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	/// Returns the associativity of this set
	pub fn associativity(&self) -> usize {
		self.associativity
	}

	/// Returns if this set is full
	pub fn is_full(&self) -> bool {
		self.lines.len() >= self.associativity
	}
}

/// Cache line
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct CacheLine {
	/// Tag
	tag: u32,

	/// Whether the line holds data
	valid: bool,

	/// Order key.
	///
	/// The access that installed this line under FIFO, or the
	/// last access that touched it under LRU.
	order_key: u64,
}

impl CacheLine {
	/// Creates a new valid line
	pub fn new(tag: u32, order_key: u64) -> Self {
		Self {
			tag,
			valid: true,
			order_key,
		}
	}

	/// Returns the tag of this line
	pub fn tag(&self) -> u32 {
		self.tag
	}

	/// Returns if this line is valid
	pub fn is_valid(&self) -> bool {
		self.valid
	}

	/// Returns the order key of this line
	pub fn order_key(&self) -> u64 {
		self.order_key
	}
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		rand::{rngs::StdRng, SeedableRng},
	};

	/// Runs `tags` through a single set, returning the tags evicted on each access
	fn run(policy: ReplacementPolicy, associativity: usize, tags: &[u32]) -> (CacheSet, Vec<Option<u32>>) {
		let mut rng = StdRng::seed_from_u64(0);
		let mut set = CacheSet::new(associativity);
		let evictions = tags
			.iter()
			.zip(1..)
			.map(|(&tag, now)| match set.lookup(tag, policy, now) {
				true => None,
				false => set.install(tag, policy, now, &mut rng).map(|line| line.tag()),
			})
			.collect();

		(set, evictions)
	}

	#[test]
	fn starts_empty() {
		let set = CacheSet::new(4);
		assert!(set.is_empty());
		assert!(!set.is_full());
		assert_eq!(set.associativity(), 4);
	}

	#[test]
	fn fills_before_evicting() {
		let (set, evictions) = self::run(ReplacementPolicy::Fifo, 3, &[1, 2, 3]);
		assert_eq!(evictions, [None, None, None]);
		assert!(set.is_full());
		assert_eq!(set.len(), 3);
		assert!(set.lines().iter().all(CacheLine::is_valid));
	}

	#[test]
	fn fifo_evicts_first_installed_despite_hits() {
		// `1` is hit repeatedly, but was still installed first
		let (set, evictions) = self::run(ReplacementPolicy::Fifo, 3, &[1, 2, 3, 1, 1, 2, 4]);
		assert_eq!(evictions.last(), Some(&Some(1)));
		assert!(!set.contains(1));
		assert!(set.contains(2) && set.contains(3) && set.contains(4));
	}

	#[test]
	fn fifo_keeps_evicting_in_install_order() {
		let (_, evictions) = self::run(ReplacementPolicy::Fifo, 2, &[1, 2, 3, 4, 5]);
		assert_eq!(evictions, [None, None, Some(1), Some(2), Some(3)]);
	}

	#[test]
	fn lru_evicts_least_recently_used() {
		let (set, evictions) = self::run(ReplacementPolicy::Lru, 2, &[1, 2, 1, 3]);
		assert_eq!(evictions, [None, None, None, Some(2)]);
		assert!(set.contains(1) && set.contains(3));
	}

	#[test]
	fn lru_replaces_in_place() {
		let (set, _) = self::run(ReplacementPolicy::Lru, 3, &[1, 2, 3, 2, 3, 4]);
		let tags = set.lines().iter().map(CacheLine::tag).collect::<Vec<_>>();
		assert_eq!(tags, [4, 2, 3]);
	}

	#[test]
	fn lru_hit_refreshes_order_key() {
		let (set, _) = self::run(ReplacementPolicy::Lru, 2, &[1, 2, 1]);
		assert_eq!(set.lines()[0].order_key(), 3);

		let (set, _) = self::run(ReplacementPolicy::Fifo, 2, &[1, 2, 1]);
		assert_eq!(set.lines()[0].order_key(), 1);
	}

	#[test]
	fn random_never_overfills() {
		let tags = (0..100).map(|tag| tag % 7).collect::<Vec<_>>();
		let (set, evictions) = self::run(ReplacementPolicy::Random, 4, &tags);
		assert_eq!(set.len(), 4);
		assert!(evictions.iter().flatten().all(|tag| *tag < 7));
	}
}
