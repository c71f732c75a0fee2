//! Miss classifier

// Imports
use std::collections::HashSet;

/// Miss classifier.
///
/// Attributes each miss to one of the 3C categories, remembering every
/// `(tag, index)` pair that has missed so far.
#[derive(Clone, Default, Debug)]
pub struct MissClassifier {
	/// All `(tag, index)` pairs that have missed
	seen: HashSet<(u32, u32)>,
}

impl MissClassifier {
	/// Creates a new classifier
	pub fn new() -> Self {
		Self { seen: HashSet::new() }
	}

	/// Classifies a miss on `tag` in set `index`.
	///
	/// `set_full` and `cache_full` must describe the cache *before* the
	/// missing line is installed.
	pub fn classify(&mut self, tag: u32, index: u32, set_full: bool, cache_full: bool) -> MissKind {
		let first_miss = self.seen.insert((tag, index));

		match (first_miss, set_full, cache_full) {
			(true, ..) => MissKind::Compulsory,
			(false, true, true) => MissKind::Capacity,
			(false, true, false) => MissKind::Conflict,

			// Note: A set with free lines never evicts, so a repeated miss can't
			//       land here, but if it does we count it as compulsory.
			(false, false, _) => MissKind::Compulsory,
		}
	}

	/// Returns if `(tag, index)` has missed before
	pub fn has_seen(&self, tag: u32, index: u32) -> bool {
		self.seen.contains(&(tag, index))
	}

	/// Returns the number of distinct `(tag, index)` pairs that have missed
	pub fn seen_len(&self) -> usize {
		self.seen.len()
	}
}

/// Miss kind
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum MissKind {
	/// First reference to a block
	Compulsory,

	/// The whole cache was full
	Capacity,

	/// The set was full, but the cache had free lines elsewhere
	Conflict,
}
