use crate::data::*;
use crate::error::Error;
use std::num::NonZeroU64;

/// Bytes per physical sector assumed for size reporting.
pub const SECTOR_SIZE: u64 = 512;

/// Whole sectors per block; never zero.
#[derive(Debug, PartialEq, Eq, Ord, PartialOrd, Clone, Copy, Hash)]
pub struct Scale(NonZeroU64);

impl Scale {
    pub fn new(sectors_per_block: u64) -> Option<Scale> {
        NonZeroU64::new(sectors_per_block).map(Scale)
    }

    /// Floor of `total_sectors / total_blocks`. Sectors past the last full
    /// block are left unmapped.
    pub fn from_totals(total_sectors: u64, total_blocks: u64) -> Result<Scale, Error> {
        if total_blocks == 0 {
            return Err(Error::EmptyUniverse);
        }
        Scale::new(total_sectors / total_blocks).ok_or(Error::DegenerateScale {
            total_sectors,
            total_blocks,
        })
    }

    pub fn sectors_per_block(self) -> u64 {
        self.0.get()
    }

    /// Sectors covered by `blocks` whole blocks, saturating at `u64::MAX`.
    pub fn sector_count(self, blocks: u64) -> u64 {
        blocks.saturating_mul(self.0.get())
    }

    pub fn sectors(self, block: Block) -> Result<SectorRange, Error> {
        self.span(Range::singleton(block))
    }

    /// One contiguous sector span for a whole block range.
    pub fn span(self, blocks: BlockRange) -> Result<SectorRange, Error> {
        let per_block = self.0.get();
        let start = blocks
            .start
            .0
            .checked_mul(per_block)
            .ok_or(Error::SectorOverflow(blocks.start))?;
        let end = blocks
            .end
            .0
            .checked_add(1)
            .and_then(|next| next.checked_mul(per_block))
            .ok_or(Error::SectorOverflow(blocks.end))?;
        Ok(Range::new(Sector(start), Sector(end - 1)))
    }
}

/// One sector range per block, contiguous blocks included. Lazy, so a
/// caller can stream millions of ranges straight to a file.
pub fn map_to_sectors<I: IntoIterator<Item = Block>>(
    blocks: I,
    scale: Scale,
) -> impl Iterator<Item = Result<SectorRange, Error>> {
    blocks.into_iter().map(move |b| scale.sectors(b))
}

/// One sector range per block range, for tools that accept long spans.
pub fn merge_to_sectors(
    ranges: &[BlockRange],
    scale: Scale,
) -> impl Iterator<Item = Result<SectorRange, Error>> + '_ {
    ranges.iter().map(move |&r| scale.span(r))
}

/// Drive size as given by the user, and the block grid the scan laid over it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Geometry {
    total_sectors: u64,
    total_blocks: u64,
    scale: Scale,
}

impl Geometry {
    pub fn new(total_sectors: u64, total_blocks: u64) -> Result<Geometry, Error> {
        let scale = Scale::from_totals(total_sectors, total_blocks)?;
        Ok(Geometry {
            total_sectors,
            total_blocks,
            scale,
        })
    }
    pub fn total_sectors(&self) -> u64 {
        self.total_sectors
    }
    pub fn total_blocks(&self) -> u64 {
        self.total_blocks
    }
    pub fn scale(&self) -> Scale {
        self.scale
    }
    pub fn size_bytes(&self) -> u128 {
        self.total_sectors as u128 * SECTOR_SIZE as u128
    }
    pub fn block_size_bytes(&self) -> u128 {
        self.scale.sectors_per_block() as u128 * SECTOR_SIZE as u128
    }
}
