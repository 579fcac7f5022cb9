mod artifacts;
mod config;
mod error;
mod report;
use config::Config;
use error::Error;
use log::{debug, info};
use report::{block_mb, drive_gb, thousands, Outcome, Report, Severity};
use std::fs;
use std::io::{self, Read};

const RULE: &str = "======================================================================";

fn read_input(config: &Config) -> Result<String, Error> {
    let mut data = String::new();
    match &config.input {
        Some(path) => {
            info!("reading good blocks from {}", path.display());
            data = fs::read_to_string(path)?;
        }
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!("Paste HDSentinel GOOD blocks data, then press Ctrl+Z and Enter (Windows) or Ctrl+D (Linux/Mac)");
            }
            io::stdin().read_to_string(&mut data)?;
        }
    }
    Ok(data)
}

fn print_statistics(report: &Report) {
    println!("{}", RULE);
    println!("STATISTICS");
    println!("{}", RULE);
    println!("Bad blocks:  {}", thousands(report.bad_blocks()));
    println!("Bad sectors: {}", thousands(report.bad_sectors()));
    println!(
        "Space lost:  {:.2} MB ({:.2} GB)",
        report.lost_mb(),
        report.lost_gb()
    );
    println!("Usable:      {:.2}% of drive", report.usable_percent());
    println!("Ranges:      {}", report.block_ranges());
    println!();
}

fn run() -> Result<(), Error> {
    let m = config::app().get_matches();
    let config = Config::from_matches(&m)?;
    let geometry = config.geometry;

    println!(
        "Drive size: {} sectors ({:.2} GB)",
        thousands(geometry.total_sectors()),
        drive_gb(&geometry)
    );
    println!("HDSentinel blocks: {}", thousands(geometry.total_blocks()));
    println!(
        "Sectors per block: {} ({:.2} MB)",
        thousands(geometry.scale().sectors_per_block()),
        block_mb(&geometry)
    );
    println!();

    let data = read_input(&config)?;
    let report = match report::analyze(geometry, &data)? {
        Outcome::EmptyGoodSet => {
            println!("No valid blocks found in input, nothing to do.");
            return Ok(());
        }
        Outcome::Healthy { good_blocks } => {
            println!("Parsed {} GOOD blocks", thousands(good_blocks as u64));
            println!("SUCCESS: No bad blocks found!");
            println!("Your drive appears healthy in the scanned area.");
            return Ok(());
        }
        Outcome::Marked(report) => report,
    };
    println!("Parsed {} GOOD blocks", thousands(report.good_blocks as u64));
    println!("Calculated {} BAD blocks to mark", thousands(report.bad_blocks()));
    println!();
    print_statistics(&report);

    for path in artifacts::emit(&report, &config)? {
        println!("wrote {}", path.display());
    }
    if !config.ext4 {
        println!(
            "Skipped {} (pass --ext4 to write it, or use {} on Linux)",
            artifacts::EXT4_FILE,
            artifacts::SECTORS_FILE
        );
    }
    println!();
    println!("NEXT STEPS:");
    println!("  Run {} as Administrator, or manually:", artifacts::SCRIPT_FILE);
    println!("    FORMAT D: /FS:NTFS /Q");
    println!("    NTFSMARKBAD.EXE D: /B {}", artifacts::SECTORS_FILE);
    println!("    CHKDSK D: /F");
    println!();

    match report.severity() {
        Some(Severity::Severe) => {
            println!("WARNING: Over 2000 bad blocks detected!");
            println!("  This drive is severely degraded.");
            println!("  Recommend: Use only for truly expendable data.");
        }
        Some(Severity::Deteriorating) => {
            println!("CAUTION: Over 500 bad blocks.");
            println!("  Drive is deteriorating. Monitor closely.");
        }
        None => {}
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(e) = run() {
        debug!("{:?}", e);
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
