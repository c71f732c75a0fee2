//! Utilities

// Modules
pub mod logger;

// Imports
use std::{cell::RefCell, fmt, num::NonZeroU32};

/// Extension trait for `NonZeroU32` to get the number of bits needed to select one of `n` choices
#[extend::ext(name = CeilLog2)]
pub impl NonZeroU32 {
	/// Returns the number of bits needed to address `self` distinct values.
	///
	/// This is `ceil(log2(self))`, which is `0` for `1`.
	fn ceil_log2(self) -> u32 {
		u32::BITS - (self.get() - 1).leading_zeros()
	}
}

/// [`fmt::Display`] helper to display using a `FnMut(&mut fmt::Formatter)`
pub struct DisplayWrapper<F: FnMut(&mut fmt::Formatter) -> fmt::Result>(RefCell<F>);

impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> DisplayWrapper<F> {
	/// Creates a new display wrapper
	#[must_use]
	pub const fn new(func: F) -> Self {
		Self(RefCell::new(func))
	}
}


impl<F: FnMut(&mut fmt::Formatter) -> fmt::Result> fmt::Display for DisplayWrapper<F> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Note: `f` cannot be re-entrant, so this cannot fail
		self.0.borrow_mut()(f)
	}
}
