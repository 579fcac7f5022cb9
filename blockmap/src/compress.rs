use crate::data::*;
use crate::error::Error;
use std::fmt;

/// Run-length encodes a strictly ascending block sequence into maximal ranges.
pub fn compress<I: IntoIterator<Item = Block>>(blocks: I) -> Result<Vec<BlockRange>, Error> {
    let mut blocks = blocks.into_iter();
    let mut current = match blocks.next() {
        Some(first) => Range::singleton(first),
        None => return Ok(vec![]),
    };
    let mut ranges = vec![];
    for block in blocks {
        if block <= current.end {
            return Err(Error::NotSorted {
                previous: current.end,
                next: block,
            });
        }
        if block.0 == current.end.0 + 1 {
            current.end = block;
        } else {
            ranges.push(current);
            current = Range::singleton(block);
        }
    }
    ranges.push(current);
    Ok(ranges)
}

/// Comma separated, e.g. `0-1, 3-4, 7`.
pub fn render<T: fmt::Display + Copy + Ord>(ranges: &[Range<T>]) -> String {
    ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(v: &[u64]) -> Vec<Block> {
        v.iter().map(|&b| Block(b)).collect()
    }

    #[test]
    fn test_compress() {
        let ranges = compress(blocks(&[0, 1, 3, 4, 6, 7, 8])).unwrap();
        assert_eq!(
            ranges,
            vec![
                Range::new(Block(0), Block(1)),
                Range::new(Block(3), Block(4)),
                Range::new(Block(6), Block(8)),
            ]
        );
        assert_eq!(render(&ranges), "0-1, 3-4, 6-8");
    }

    #[test]
    fn test_singletons() {
        let ranges = compress(blocks(&[1, 3, 4, 9])).unwrap();
        assert_eq!(render(&ranges), "1, 3-4, 9");
        assert_eq!(render(&compress(blocks(&[5])).unwrap()), "5");
    }

    #[test]
    fn test_empty() {
        assert_eq!(compress(Vec::<Block>::new()), Ok(vec![]));
        assert_eq!(render::<Block>(&[]), "");
    }

    #[test]
    fn test_top_of_domain() {
        let ranges = compress(blocks(&[u64::MAX - 1, u64::MAX])).unwrap();
        assert_eq!(ranges, vec![Range::new(Block(u64::MAX - 1), Block(u64::MAX))]);
    }

    #[test]
    fn test_not_sorted() {
        assert_eq!(
            compress(blocks(&[1, 2, 2])),
            Err(Error::NotSorted {
                previous: Block(2),
                next: Block(2)
            })
        );
        assert_eq!(
            compress(blocks(&[4, 1])),
            Err(Error::NotSorted {
                previous: Block(4),
                next: Block(1)
            })
        );
    }
}
