//! Set-associative cache simulator (`cachesim`)
//!
//! Replays a trace of 32-bit addresses against a single-level cache and
//! classifies every miss as compulsory, capacity or conflict.

// Modules
pub mod address;
pub mod cache;
pub mod data;
pub mod report;
pub mod sim;
pub mod trace;

// Exports
pub use self::{
	address::AddressDecoder,
	cache::Cache,
	report::Report,
	sim::{Model, Simulator},
	trace::{TraceReader, TraceWriter},
};
