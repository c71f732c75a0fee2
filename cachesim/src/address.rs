//! Address decoding

// Imports
use {cachesim_util::CeilLog2, std::num::NonZeroU32};

/// Address decoder.
///
/// Splits a 32-bit address into `tag | index | offset`, from the most
/// significant bits to the least significant ones.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct AddressDecoder {
	/// Offset bits
	offset_bits: u32,

	/// Index bits
	index_bits: u32,
}

impl AddressDecoder {
	/// Number of bits in an address
	pub const ADDRESS_BITS: u32 = u32::BITS;

	/// Creates a decoder for a cache with `num_sets` sets of `block_size`-byte blocks
	pub fn new(block_size: NonZeroU32, num_sets: NonZeroU32) -> Self {
		Self {
			offset_bits: block_size.ceil_log2(),
			index_bits:  num_sets.ceil_log2(),
		}
	}

	/// Decodes an address into its tag and index
	pub fn decode(&self, address: u32) -> DecodedAddress {
		// Note: Both widths may be up to 32 bits each, so any shift may
		//       push out the whole address.
		let index_mask = match 1u32.checked_shl(self.index_bits) {
			Some(bit) => bit - 1,
			None => u32::MAX,
		};
		let index = address.checked_shr(self.offset_bits).unwrap_or(0) & index_mask;
		let tag = address.checked_shr(self.offset_bits + self.index_bits).unwrap_or(0);

		DecodedAddress { tag, index }
	}

	/// Returns the number of offset bits
	pub fn offset_bits(&self) -> u32 {
		self.offset_bits
	}

	/// Returns the number of index bits
	pub fn index_bits(&self) -> u32 {
		self.index_bits
	}

	/// Returns the number of tag bits
	pub fn tag_bits(&self) -> u32 {
		Self::ADDRESS_BITS.saturating_sub(self.offset_bits + self.index_bits)
	}
}

/// Decodes `address` for a cache with `num_sets` sets of `block_size`-byte blocks
pub fn decode(address: u32, block_size: NonZeroU32, num_sets: NonZeroU32) -> DecodedAddress {
	AddressDecoder::new(block_size, num_sets).decode(address)
}

/// A decoded address
#[derive(PartialEq, Eq, Clone, Copy, Hash, Debug)]
pub struct DecodedAddress {
	/// Tag
	pub tag: u32,

	/// Set index
	pub index: u32,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn nz(value: u32) -> NonZeroU32 {
		NonZeroU32::new(value).expect("Value was zero")
	}

	#[test]
	fn single_set_single_byte_blocks_use_whole_address_as_tag() {
		let decoder = AddressDecoder::new(nz(1), nz(1));
		assert_eq!(decoder.offset_bits(), 0);
		assert_eq!(decoder.index_bits(), 0);
		assert_eq!(decoder.tag_bits(), 32);

		for address in [0, 1, 2, 0xdead_beef, u32::MAX] {
			assert_eq!(decoder.decode(address), DecodedAddress { tag: address, index: 0 });
		}
	}

	#[test]
	fn splits_tag_index_and_offset() {
		// 16-byte blocks, 64 sets: 4 offset bits, 6 index bits, 22 tag bits
		let decoder = AddressDecoder::new(nz(16), nz(64));
		assert_eq!(decoder.offset_bits(), 4);
		assert_eq!(decoder.index_bits(), 6);
		assert_eq!(decoder.tag_bits(), 22);

		assert_eq!(decoder.decode(0x1234_5678), DecodedAddress {
			tag:   0x48d15,
			index: 39,
		});
	}

	#[test]
	fn power_of_two_geometry_uses_exact_widths() {
		for (size, bits) in [(2, 1), (4, 2), (8, 3), (4096, 12)] {
			let decoder = AddressDecoder::new(nz(size), nz(size));
			assert_eq!(decoder.offset_bits(), bits);
			assert_eq!(decoder.index_bits(), bits);
			assert_eq!(decoder.tag_bits(), 32 - 2 * bits);
		}
	}

	#[test]
	fn offset_bits_are_ignored() {
		let decoder = AddressDecoder::new(nz(8), nz(4));
		for offset in 0..8 {
			assert_eq!(decoder.decode(0x100 + offset), decoder.decode(0x100));
		}
		assert_ne!(decoder.decode(0x108), decoder.decode(0x100));
	}

	#[test]
	fn non_power_of_two_block_size_rounds_up() {
		// 3-byte blocks still take 2 offset bits
		let decoder = AddressDecoder::new(nz(3), nz(2));
		assert_eq!(decoder.offset_bits(), 2);
		assert_eq!(decoder.decode(0b1_0_11), DecodedAddress { tag: 1, index: 0 });
		assert_eq!(decoder.decode(0b1_1_00), DecodedAddress { tag: 1, index: 1 });
	}

	#[test]
	fn wide_fields_shift_out_the_whole_address() {
		let decoder = AddressDecoder::new(nz(1 << 31), nz(4));
		assert_eq!(decoder.tag_bits(), 0);
		assert_eq!(decoder.decode(u32::MAX), DecodedAddress { tag: 0, index: 1 });

		let decoder = AddressDecoder::new(nz(u32::MAX), nz(u32::MAX));
		assert_eq!(decoder.decode(u32::MAX), DecodedAddress { tag: 0, index: 0 });
	}

	#[test]
	fn decoding_is_pure() {
		let block_size = nz(32);
		let num_sets = nz(128);
		for address in [0, 0x40, 0xffff_0000, 0x8765_4321] {
			let first = self::decode(address, block_size, num_sets);
			let second = self::decode(address, block_size, num_sets);
			assert_eq!(first, second);
		}
	}
}
