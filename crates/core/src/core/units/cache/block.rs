//! Cache blocks and sets.
//!
//! A set is a fixed-size, exclusively owned sequence of blocks. The position of a block
//! within its set is meaningful: true LRU keeps the least recently used block at the
//! front and the most recently used at the back.

use serde::Serialize;

/// One cache line: tag, validity, and dirty bits.
///
/// Block contents are not simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Block {
    /// High-order address bits of the resident block.
    pub tag: u32,
    /// Whether the block holds data. Never cleared once set.
    pub valid: bool,
    /// Whether the block was written since it was filled or last written back.
    pub dirty: bool,
}

/// Result of searching a set for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// A valid block with the tag lives in this way.
    Hit(usize),
    /// No match; this is the first invalid way.
    Fill(usize),
    /// No match and every way is valid.
    Evict,
}

/// The ways of one set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSet {
    blocks: Vec<Block>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid blocks.
    pub fn new(ways: usize) -> Self {
        Self {
            blocks: vec![Block::default(); ways],
        }
    }

    /// Number of ways in the set.
    #[inline]
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }

    /// The blocks in storage order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block stored in `way`.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    #[inline]
    pub fn block(&self, way: usize) -> &Block {
        &self.blocks[way]
    }

    #[inline]
    pub(crate) fn block_mut(&mut self, way: usize) -> &mut Block {
        &mut self.blocks[way]
    }

    /// Scans the ways in order for a valid block tagged `tag`.
    ///
    /// The first invalid way seen is remembered and returned as `Lookup::Fill` when no
    /// valid block matches. The scan stops at the first match.
    pub fn lookup(&self, tag: u32) -> Lookup {
        let mut empty = None;
        for (way, block) in self.blocks.iter().enumerate() {
            if !block.valid {
                if empty.is_none() {
                    empty = Some(way);
                }
            } else if block.tag == tag {
                return Lookup::Hit(way);
            }
        }
        empty.map_or(Lookup::Evict, Lookup::Fill)
    }

    /// Moves the block in `way` to the back of the set, shifting later blocks forward.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    pub(crate) fn move_to_back(&mut self, way: usize) {
        let block = self.blocks.remove(way);
        self.blocks.push(block);
    }
}
