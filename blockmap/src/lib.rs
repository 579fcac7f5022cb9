//! Turns the good blocks of a surface scan into the bad blocks and bad
//! sector ranges of the drive.
//!
//! The pipeline is `parse_blocks` -> `invert` -> `compress` / `map_to_sectors`,
//! with a [`Geometry`] tying the block grid to the physical sector count.

mod compress;
mod data;
mod error;
mod invert;
mod parse;
mod sector;

pub use compress::{compress, render};
pub use data::*;
pub use error::Error;
pub use invert::{invert, BadBlocks};
pub use parse::parse_blocks;
pub use sector::{map_to_sectors, merge_to_sectors, Geometry, Scale, SECTOR_SIZE};
