use super::data::*;
use log::{debug, trace};
use nom::{
    bytes::complete::{take_till1, take_while},
    character::complete::digit1,
    combinator::{all_consuming, map, map_parser, map_res},
    error::ErrorKind,
    sequence::preceded,
    IResult,
};

fn from_dec(input: &str) -> Result<u64, std::num::ParseIntError> {
    u64::from_str_radix(input, 10)
}

/// First whitespace-delimited token of a line.
fn token(input: &str) -> IResult<&str, &str> {
    preceded(
        take_while(char::is_whitespace),
        take_till1(char::is_whitespace),
    )(input)
}

fn block(input: &str) -> IResult<&str, Block> {
    map(
        map_res(map_parser(token, all_consuming(digit1)), from_dec),
        Block,
    )(input)
}

/// Collects the leading block number of every line in a scan report.
///
/// Lines without a purely numeric first token are skipped, never rejected:
/// pasted reports carry headers, separators and status columns.
pub fn parse_blocks(data: &str) -> GoodBlocks {
    let mut blocks = vec![];
    for line in data.lines() {
        match block(line) {
            Ok((_, b)) => blocks.push(b),
            Err(nom::Err::Error((_, ErrorKind::MapRes))) => {
                debug!("block number out of range, skipping line {:?}", line)
            }
            Err(_) => trace!("no block number, skipping line {:?}", line),
        }
    }
    GoodBlocks::from_unsorted(blocks)
}
