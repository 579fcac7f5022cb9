use std::fmt;

#[derive(Debug, PartialEq, Eq, Ord, PartialOrd, Clone, Copy, Hash)]
pub struct Block(pub u64);
#[derive(Debug, PartialEq, Eq, Ord, PartialOrd, Clone, Copy, Hash)]
pub struct Sector(pub u64);

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed interval `[start, end]`, always with `start <= end`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Range<T> {
    pub start: T,
    pub end: T,
}

pub type BlockRange = Range<Block>;
pub type SectorRange = Range<Sector>;

impl<T: Copy + Ord> Range<T> {
    pub fn new(start: T, end: T) -> Range<T> {
        debug_assert!(start <= end);
        Range { start, end }
    }
    pub fn singleton(at: T) -> Range<T> {
        Range { start: at, end: at }
    }
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }
    pub fn contains(&self, value: T) -> bool {
        self.start <= value && value <= self.end
    }
}

impl Range<Block> {
    /// Number of blocks covered. Saturates for the full `u64` domain.
    pub fn len(&self) -> u64 {
        (self.end.0 - self.start.0).saturating_add(1)
    }
    pub fn blocks(&self) -> impl Iterator<Item = Block> {
        (self.start.0..=self.end.0).map(Block)
    }
}

impl Range<Sector> {
    pub fn len(&self) -> u64 {
        (self.end.0 - self.start.0).saturating_add(1)
    }
    pub fn sectors(&self) -> impl Iterator<Item = Sector> {
        (self.start.0..=self.end.0).map(Sector)
    }
}

/// `12` for a singleton, `12-15` otherwise.
impl<T: fmt::Display + Copy + Ord> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_singleton() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Deduplicated, ascending set of blocks a surface scan reported as healthy.
#[derive(Debug, PartialEq, Eq, Clone, Default, Hash)]
pub struct GoodBlocks {
    blocks: Vec<Block>,
}

impl GoodBlocks {
    pub fn from_unsorted(mut blocks: Vec<Block>) -> GoodBlocks {
        blocks.sort_unstable();
        blocks.dedup();
        GoodBlocks { blocks }
    }
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }
    pub fn iter(&self) -> impl Iterator<Item = Block> + '_ {
        self.blocks.iter().copied()
    }
    pub fn contains(&self, block: Block) -> bool {
        self.blocks.binary_search(&block).is_ok()
    }
    /// Blocks at or past `total_blocks`, which no universe of that size can hold.
    pub fn out_of_range(&self, total_blocks: u64) -> usize {
        let inside = self.blocks.partition_point(|b| b.0 < total_blocks);
        self.blocks.len() - inside
    }
}

impl std::iter::FromIterator<Block> for GoodBlocks {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> GoodBlocks {
        GoodBlocks::from_unsorted(iter.into_iter().collect())
    }
}
