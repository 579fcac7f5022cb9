use crate::error::Error;
use blockmap::{compress, invert, parse_blocks, render, BadBlocks, BlockRange, Geometry, SECTOR_SIZE};
use log::info;

/// How a scan report ended up.
#[derive(Debug)]
pub enum Outcome {
    /// No line of the input started with a block number.
    EmptyGoodSet,
    /// Every block of the drive was reported good.
    Healthy { good_blocks: usize },
    Marked(Report),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Severity {
    Deteriorating,
    Severe,
}

#[derive(Debug)]
pub struct Report {
    pub geometry: Geometry,
    pub good_blocks: usize,
    pub bad: BadBlocks,
    /// `bad`, run-length encoded.
    pub ranges: Vec<BlockRange>,
}

pub fn analyze(geometry: Geometry, text: &str) -> Result<Outcome, Error> {
    let good = parse_blocks(text);
    if good.is_empty() {
        return Ok(Outcome::EmptyGoodSet);
    }
    info!("parsed {} good blocks", good.len());
    let bad = invert(&good, geometry.total_blocks())?;
    if bad.is_empty() {
        return Ok(Outcome::Healthy {
            good_blocks: good.len(),
        });
    }
    let ranges = compress(bad.iter())?;
    info!("{} bad blocks in {} ranges", bad.len(), ranges.len());
    Ok(Outcome::Marked(Report {
        geometry,
        good_blocks: good.len(),
        bad,
        ranges,
    }))
}

impl Report {
    pub fn bad_blocks(&self) -> u64 {
        self.bad.len()
    }
    pub fn bad_sectors(&self) -> u64 {
        self.geometry.scale().sector_count(self.bad.len())
    }
    pub fn lost_mb(&self) -> f64 {
        self.bad_sectors() as f64 * SECTOR_SIZE as f64 / 1024.0 / 1024.0
    }
    pub fn lost_gb(&self) -> f64 {
        self.lost_mb() / 1024.0
    }
    pub fn usable_percent(&self) -> f64 {
        100.0 * (1.0 - self.bad.len() as f64 / self.geometry.total_blocks() as f64)
    }
    /// Human readable block ranges, e.g. `0-1, 3-4, 7`.
    pub fn block_ranges(&self) -> String {
        render(&self.ranges)
    }
    pub fn severity(&self) -> Option<Severity> {
        match self.bad.len() {
            n if n > 2000 => Some(Severity::Severe),
            n if n > 500 => Some(Severity::Deteriorating),
            _ => None,
        }
    }
}

/// `1953525168` as `1,953,525,168`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Decimal gigabytes, as drive vendors count them.
pub fn drive_gb(geometry: &Geometry) -> f64 {
    geometry.size_bytes() as f64 / 1e9
}

pub fn block_mb(geometry: &Geometry) -> f64 {
    geometry.block_size_bytes() as f64 / 1024.0 / 1024.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked(total_sectors: u64, total_blocks: u64, text: &str) -> Report {
        let geometry = Geometry::new(total_sectors, total_blocks).unwrap();
        match analyze(geometry, text).unwrap() {
            Outcome::Marked(report) => report,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_marked() {
        let report = marked(1000, 10, "0\n1\n2\n5\n6\n7\n8\n9");
        assert_eq!(report.good_blocks, 8);
        assert_eq!(report.bad_blocks(), 2);
        assert_eq!(report.bad_sectors(), 200);
        assert_eq!(report.block_ranges(), "3-4");
        assert_eq!(report.ranges.as_slice(), report.bad.ranges());
        assert!((report.usable_percent() - 80.0).abs() < 1e-9);
        assert!((report.lost_mb() - 200.0 * 512.0 / 1048576.0).abs() < 1e-9);
        assert_eq!(report.severity(), None);
    }

    #[test]
    fn test_healthy() {
        let geometry = Geometry::new(1000, 5).unwrap();
        match analyze(geometry, "0\n1\n2\n3\n4\n").unwrap() {
            Outcome::Healthy { good_blocks } => assert_eq!(good_blocks, 5),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_good_set() {
        let geometry = Geometry::new(1000, 5).unwrap();
        assert!(matches!(
            analyze(geometry, "").unwrap(),
            Outcome::EmptyGoodSet
        ));
        assert!(matches!(
            analyze(geometry, "Block Status\nnone\n").unwrap(),
            Outcome::EmptyGoodSet
        ));
    }

    #[test]
    fn test_severity() {
        assert_eq!(marked(100_000, 10_000, "0").severity(), Some(Severity::Severe));
        assert_eq!(marked(10_000, 1_000, "0").severity(), Some(Severity::Deteriorating));
        assert_eq!(marked(10_000, 501, "0").severity(), None);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1_953_525_168), "1,953,525,168");
        assert_eq!(thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_sizes() {
        let geometry = Geometry::new(1_953_525_168, 10_000).unwrap();
        assert!((drive_gb(&geometry) - 1000.204886016).abs() < 1e-6);
        assert!((block_mb(&geometry) - 95.3867).abs() < 1e-3);
    }
}
