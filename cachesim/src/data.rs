//! Output data

// Imports
use crate::cache::{self, Cache, Rates, Statistics};

/// Output data
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Data {
	pub config:        cache::Config,
	pub geometry:      Geometry,
	pub statistics:    Statistics,
	pub rates:         Rates,
	pub set_occupancy: Vec<usize>,
}

impl Data {
	/// Gathers the output data of `cache`
	pub fn from_cache<R>(cache: &Cache<R>) -> Self {
		let decoder = cache.decoder();
		Self {
			config:        *cache.config(),
			geometry:      Geometry {
				offset_bits: decoder.offset_bits(),
				index_bits:  decoder.index_bits(),
				tag_bits:    decoder.tag_bits(),
			},
			statistics:    *cache.statistics(),
			rates:         cache.statistics().rates(),
			set_occupancy: cache.sets().iter().map(|set| set.len()).collect(),
		}
	}
}

/// Address geometry
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Geometry {
	pub offset_bits: u32,
	pub index_bits:  u32,
	pub tag_bits:    u32,
}

#[cfg(test)]
mod tests {
	use {
		super::*,
		crate::cache::ReplacementPolicy,
		std::num::NonZeroU32,
	};

	#[test]
	fn serializes_run_summary() {
		let mut cache = Cache::new(cache::Config {
			num_sets:      NonZeroU32::new(2).expect("Zero sets"),
			block_size:    NonZeroU32::new(4).expect("Zero block size"),
			associativity: NonZeroU32::new(2).expect("Zero associativity"),
			policy:        ReplacementPolicy::Fifo,
		});
		for address in [0, 4, 0, 8] {
			let _ = cache.access(address);
		}

		let data = Data::from_cache(&cache);
		assert_eq!(data.set_occupancy, [2, 1]);

		let json = serde_json::to_value(&data).expect("Unable to serialize");
		assert_eq!(json["config"]["policy"], "Fifo");
		assert_eq!(json["config"]["num_sets"], 2);
		assert_eq!(json["geometry"]["offset_bits"], 2);
		assert_eq!(json["geometry"]["index_bits"], 1);
		assert_eq!(json["geometry"]["tag_bits"], 29);
		assert_eq!(json["statistics"]["total_accesses"], 4);
		assert_eq!(json["statistics"]["hits"], 1);
		assert_eq!(json["rates"]["hit"], 0.25);

		let parsed = serde_json::from_value::<Data>(json).expect("Unable to deserialize");
		assert_eq!(parsed.statistics, data.statistics);
		assert_eq!(parsed.config, data.config);
	}
}
