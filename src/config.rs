use crate::error::Error;
use blockmap::Geometry;
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

/// Block count of a default HDSentinel surface scan.
pub const DEFAULT_TOTAL_BLOCKS: u64 = 10000;

pub fn app() -> App<'static, 'static> {
    App::new("hdsentinel_markbad")
        .version("0.1.0")
        .about("Turn the GOOD blocks of an HDSentinel surface scan into BAD sector ranges for NTFSMARKBAD.")
        .author("Ruben Lapauw")
        .after_help("Set RUST_LOG to control logging (trace, debug, info, warn, error).")
        .arg(
            Arg::with_name("total-sectors")
                .short("s")
                .long("total-sectors")
                .help("Total physical sectors of the drive, e.g. 1953525168")
                .allow_hyphen_values(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("total-blocks")
                .short("b")
                .long("total-blocks")
                .help("Total blocks of the surface scan [default: 10000]")
                .allow_hyphen_values(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .help("Scan report with one good block per line; read from stdin when absent")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output-dir")
                .short("o")
                .long("output-dir")
                .help("Directory for the generated files")
                .default_value(".")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("ext4")
                .long("ext4")
                .help("Also write badblocks_ext4.txt, one sector per line (can be several GB)"),
        )
        .arg(
            Arg::with_name("merge")
                .long("merge")
                .help("Write one sector range per run of adjacent bad blocks instead of one per block"),
        )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub geometry: Geometry,
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub ext4: bool,
    pub merge: bool,
}

impl Config {
    /// Validates the drive totals; nothing has been read or written yet when
    /// this fails.
    pub fn from_matches(m: &ArgMatches) -> Result<Config, Error> {
        let total_sectors = parse_total("total sectors", m.value_of("total-sectors"))?
            .ok_or(Error::MissingInput("total sectors"))?;
        let total_blocks = parse_total("total blocks", m.value_of("total-blocks"))?
            .unwrap_or(DEFAULT_TOTAL_BLOCKS);
        Ok(Config {
            geometry: Geometry::new(total_sectors, total_blocks)?,
            input: m.value_of("input").map(PathBuf::from),
            output_dir: PathBuf::from(m.value_of("output-dir").unwrap_or(".")),
            ext4: m.is_present("ext4"),
            merge: m.is_present("merge"),
        })
    }
}

/// A blank value counts as absent.
fn parse_total(what: &'static str, value: Option<&str>) -> Result<Option<u64>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| Error::InvalidNumber {
            what,
            value: v.to_owned(),
        }),
    }
}
