use crate::data::*;
use crate::error::Error;
use log::warn;

/// Blocks of a universe that are not known to be good.
///
/// Held as maximal ranges, so a universe of billions of blocks costs memory
/// proportional to the number of gaps in the good set, never to its size.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct BadBlocks {
    total_blocks: u64,
    ranges: Vec<BlockRange>,
}

/// Complement of `good` within `[0, total_blocks)`.
///
/// Good blocks at or past `total_blocks` cannot shadow anything and are
/// ignored.
pub fn invert(good: &GoodBlocks, total_blocks: u64) -> Result<BadBlocks, Error> {
    if total_blocks == 0 {
        return Err(Error::EmptyUniverse);
    }
    let mut ranges = vec![];
    // First block not yet classified.
    let mut next = 0u64;
    for Block(b) in good.iter() {
        if b >= total_blocks {
            break;
        }
        if b > next {
            ranges.push(Range::new(Block(next), Block(b - 1)));
        }
        next = b + 1;
    }
    if next < total_blocks {
        ranges.push(Range::new(Block(next), Block(total_blocks - 1)));
    }
    let ignored = good.out_of_range(total_blocks);
    if ignored > 0 {
        warn!(
            "ignoring {} good blocks beyond the last block {}",
            ignored,
            total_blocks - 1
        );
    }
    Ok(BadBlocks {
        total_blocks,
        ranges,
    })
}

impl BadBlocks {
    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }
    /// Number of bad blocks.
    pub fn len(&self) -> u64 {
        self.ranges.iter().map(|r| r.len()).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
    /// The bad blocks as a minimal list of ascending, non-adjacent ranges.
    pub fn ranges(&self) -> &[BlockRange] {
        &self.ranges
    }
    /// Every bad block in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.ranges.iter().flat_map(|r| r.blocks())
    }
    pub fn contains(&self, block: Block) -> bool {
        let idx = self.ranges.partition_point(|r| r.end < block);
        idx < self.ranges.len() && self.ranges[idx].contains(block)
    }
}
