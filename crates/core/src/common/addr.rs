//! Address decoding.
//!
//! This module splits a raw 32-bit address into the three fields the cache needs:
//! 1. **Block address:** The address with the block-offset bits removed; the key of the access history.
//! 2. **Set index:** The block address modulo the number of sets.
//! 3. **Tag:** The address with both offset and index bits removed.
//!
//! The index width used for the tag is `log2(num_blocks)` for every organization,
//! including set-associative and fully associative caches. Distinct block addresses
//! that land in one set may therefore share a tag.

/// The fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Address with the block-offset bits removed.
    pub block_address: u32,
    /// Set the block maps to.
    pub set_index: usize,
    /// High-order bits compared against block tags.
    pub tag: u32,
}

/// Pure address-to-block mapping for one cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressDecoder {
    line_bits: u32,
    index_bits: u32,
    num_sets: u32,
}

impl AddressDecoder {
    /// Creates a decoder for the given bit widths and set count.
    ///
    /// # Arguments
    ///
    /// * `line_bits` - `log2(block_size)`.
    /// * `index_bits` - `log2(num_blocks)`.
    /// * `num_sets` - Number of sets; must be non-zero.
    #[inline]
    pub const fn new(line_bits: u32, index_bits: u32, num_sets: u32) -> Self {
        Self {
            line_bits,
            index_bits,
            num_sets,
        }
    }

    /// Decodes `address` into block address, set index, and tag.
    #[inline]
    pub const fn decode(&self, address: u32) -> DecodedAddress {
        let block_address = shr(address, self.line_bits);
        DecodedAddress {
            block_address,
            set_index: (block_address % self.num_sets) as usize,
            tag: shr(address, self.line_bits + self.index_bits),
        }
    }

    /// Number of block-offset bits.
    #[inline]
    pub const fn line_bits(&self) -> u32 {
        self.line_bits
    }

    /// Number of index bits removed before the tag.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Number of sets addressed by this decoder.
    #[inline]
    pub const fn num_sets(&self) -> u32 {
        self.num_sets
    }
}

/// Logical right shift that yields 0 once every bit has been shifted out.
#[inline]
const fn shr(value: u32, bits: u32) -> u32 {
    if bits >= u32::BITS { 0 } else { value >> bits }
}
