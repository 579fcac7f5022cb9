use crate::data::Block;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A universe of zero blocks has nothing to invert or scale.
    #[error("total block count must be greater than zero")]
    EmptyUniverse,

    /// Fewer sectors than blocks: every block would map to zero sectors.
    #[error("{total_sectors} sectors cannot be split into {total_blocks} blocks (less than one sector per block)")]
    DegenerateScale {
        total_sectors: u64,
        total_blocks: u64,
    },

    #[error("block sequence is not strictly ascending: {next} follows {previous}")]
    NotSorted { previous: Block, next: Block },

    #[error("sectors of block {0} do not fit in a 64-bit sector number")]
    SectorOverflow(Block),
}
