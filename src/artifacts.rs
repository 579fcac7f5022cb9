use crate::config::Config;
use crate::error::Error;
use crate::report::{thousands, Report};
use blockmap::{map_to_sectors, merge_to_sectors, SectorRange};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SECTORS_FILE: &str = "ntfsmarkbad_sectors.txt";
pub const RANGES_FILE: &str = "bad_block_ranges.txt";
pub const EXT4_FILE: &str = "badblocks_ext4.txt";
pub const SCRIPT_FILE: &str = "mark_bad_sectors.bat";
pub const README_FILE: &str = "README.txt";

const NTFSMARKBAD_RELEASES: &str = "https://github.com/jamersonpro/ntfsmarkbad/releases";
const RULE: &str = "====================================================================";

/// `<start> <end>` per line, the NTFSMARKBAD `/B` batch format.
pub fn write_sector_ranges<W: Write>(report: &Report, out: W, merge: bool) -> Result<(), Error> {
    let scale = report.geometry.scale();
    if merge {
        write_pairs(merge_to_sectors(&report.ranges, scale), out)
    } else {
        write_pairs(map_to_sectors(report.bad.iter(), scale), out)
    }
}

fn write_pairs<I, W>(sectors: I, mut out: W) -> Result<(), Error>
where
    I: Iterator<Item = Result<SectorRange, blockmap::Error>>,
    W: Write,
{
    for sectors in sectors {
        let sectors = sectors?;
        writeln!(out, "{} {}", sectors.start, sectors.end)?;
    }
    Ok(())
}

pub fn write_block_ranges<W: Write>(report: &Report, mut out: W) -> Result<(), Error> {
    writeln!(out, "Bad blocks: {}", report.block_ranges())?;
    writeln!(out)?;
    writeln!(out, "Total: {} bad blocks", report.bad_blocks())?;
    Ok(())
}

/// Every bad sector on its own line, as `mkfs.ext4 -l` reads it.
pub fn write_sector_list<W: Write>(report: &Report, mut out: W) -> Result<(), Error> {
    for sectors in merge_to_sectors(&report.ranges, report.geometry.scale()) {
        for sector in sectors?.sectors() {
            writeln!(out, "{}", sector)?;
        }
    }
    Ok(())
}

const SCRIPT: &str = r#"@echo off
REM NTFSMARKBAD Batch Script
REM https://github.com/jamersonpro/ntfsmarkbad
echo.
echo {rule}
echo NTFSMARKBAD - Mark Bad Sectors on NTFS
echo {rule}
echo.
echo This will mark {blocks} bad blocks ({gb} GB) as unusable
echo.
echo REQUIREMENTS:
echo   1. NTFSMARKBAD.EXE in same folder
echo   2. Drive must be formatted as NTFS
echo   3. Run as Administrator
echo.
set /p DRIVE="Enter drive letter (e.g., D): "
echo.
echo Checking if NTFSMARKBAD.EXE exists...
if not exist "NTFSMARKBAD.EXE" (
    echo ERROR: NTFSMARKBAD.EXE not found!
    echo Download from: {releases}
    pause
    exit /b 1
)
echo.
echo {rule}
echo Step 1: Format drive (WARNING: Erases all data!)
echo {rule}
set /p CONFIRM="Format %DRIVE%: as NTFS? (yes/no): "
if /i not "%CONFIRM%"=="yes" (
    echo Skipping format. Make sure drive is already formatted as NTFS!
    goto skip_format
)
echo.
echo Formatting %DRIVE%: ...
format %DRIVE%: /FS:NTFS /Q /V:BadSectorDrive
if errorlevel 1 (
    echo ERROR: Format failed!
    pause
    exit /b 1
)
:skip_format
echo.
echo {rule}
echo Step 2: Mark bad sectors
echo {rule}
echo.
echo Marking {blocks} bad blocks...
echo This may take a few minutes...
echo.
NTFSMARKBAD.EXE %DRIVE%: /B {sectors_file}
if errorlevel 1 (
    echo.
    echo ERROR: NTFSMARKBAD failed!
    echo Check the output above for details.
    pause
    exit /b 1
)
echo.
echo {rule}
echo Step 3: Verify file system
echo {rule}
echo.
echo Running CHKDSK to verify...
CHKDSK %DRIVE%: /F
echo.
echo {rule}
echo SUCCESS!
echo {rule}
echo Marked {blocks} bad blocks as unusable
echo Lost space: {gb} GB
echo Your drive is now ready for use (games/cache/non-critical data)
echo.
pause
"#;

/// Windows script that formats the drive, marks the sectors and runs CHKDSK.
pub fn write_script<W: Write>(report: &Report, mut out: W) -> Result<(), Error> {
    let script = SCRIPT
        .replace("{rule}", RULE)
        .replace("{blocks}", &report.bad_blocks().to_string())
        .replace("{gb}", &format!("{:.2}", report.lost_gb()))
        .replace("{releases}", NTFSMARKBAD_RELEASES)
        .replace("{sectors_file}", SECTORS_FILE);
    // Batch files want CRLF.
    for line in script.lines() {
        write!(out, "{}\r\n", line)?;
    }
    Ok(())
}

pub fn write_readme<W: Write>(report: &Report, mut out: W, ext4: bool) -> Result<(), Error> {
    let geometry = &report.geometry;
    let dashes = "-".repeat(70);
    writeln!(out, "NTFSMARKBAD Bad Sector Marking")?;
    writeln!(out, "{}", "=".repeat(70))?;
    writeln!(out)?;
    writeln!(
        out,
        "Drive:           {} sectors ({:.2} GB)",
        thousands(geometry.total_sectors()),
        crate::report::drive_gb(geometry)
    )?;
    writeln!(out, "Bad blocks:      {}", thousands(report.bad_blocks()))?;
    writeln!(out, "Bad sectors:     {}", thousands(report.bad_sectors()))?;
    writeln!(out, "Space lost:      {:.2} GB", report.lost_gb())?;
    writeln!(out, "Usable space:    {:.2}%", report.usable_percent())?;
    writeln!(out)?;
    writeln!(out, "QUICK START (Windows):")?;
    writeln!(out, "{}", dashes)?;
    writeln!(out, "1. Download NTFSMARKBAD.EXE:")?;
    writeln!(out, "   {}", NTFSMARKBAD_RELEASES)?;
    writeln!(out, "   (Get NTFSMARKBAD.EXE for 64-bit or NTFSMARKBAD32.EXE for 32-bit)")?;
    writeln!(out)?;
    writeln!(out, "2. Put NTFSMARKBAD.EXE in this folder")?;
    writeln!(out)?;
    writeln!(out, "3. Right-click {} -> Run as Administrator", SCRIPT_FILE)?;
    writeln!(out)?;
    writeln!(out, "4. Follow the prompts")?;
    writeln!(out)?;
    writeln!(out, "MANUAL METHOD:")?;
    writeln!(out, "{}", dashes)?;
    writeln!(out, "1. FORMAT D: /FS:NTFS /Q")?;
    writeln!(out, "2. NTFSMARKBAD.EXE D: /B {}", SECTORS_FILE)?;
    writeln!(out, "3. CHKDSK D: /F")?;
    writeln!(out)?;
    writeln!(out, "LINUX (ext4):")?;
    writeln!(out, "{}", dashes)?;
    writeln!(out, "Option 1 (if you created {}):", EXT4_FILE)?;
    writeln!(out, "  mkfs.ext4 -l {} /dev/sdX", EXT4_FILE)?;
    writeln!(out)?;
    writeln!(out, "Option 2 (convert from range format - faster):")?;
    writeln!(out, "  # Create badblocks.txt from {}:", SECTORS_FILE)?;
    writeln!(
        out,
        "  awk '{{for(i=$1;i<=$2;i++)print i}}' {} > badblocks.txt",
        SECTORS_FILE
    )?;
    writeln!(out, "  mkfs.ext4 -l badblocks.txt /dev/sdX")?;
    writeln!(out)?;
    writeln!(out, "FILES:")?;
    writeln!(out, "{}", dashes)?;
    writeln!(out, "- {:<24}: Input file for NTFSMARKBAD /B", SECTORS_FILE)?;
    writeln!(out, "- {:<24}: Automated Windows script", SCRIPT_FILE)?;
    writeln!(out, "- {:<24}: Human-readable ranges", RANGES_FILE)?;
    writeln!(out, "- {:<24}: This file", README_FILE)?;
    if ext4 {
        writeln!(out, "- {:<24}: For Linux ext4 (large file!)", EXT4_FILE)?;
    }
    writeln!(out)?;
    writeln!(out, "NOTES:")?;
    writeln!(out, "{}", dashes)?;
    writeln!(out, "- NTFSMARKBAD uses PHYSICAL sector numbers (whole disk)")?;
    writeln!(out, "- No partition offset needed!")?;
    writeln!(out, "- Only unused clusters are marked as bad")?;
    writeln!(out, "- Safe for drives with full G-list (no write attempts)")?;
    writeln!(out)?;
    writeln!(out, "For ST1000DM003 drives:")?;
    writeln!(out, "- This is perfect for games/cache (non-critical data)")?;
    writeln!(out, "- NTFS will avoid these sectors automatically")?;
    writeln!(out, "- No reallocation attempts = no SATA hangs")?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<BufWriter<File>, Error> {
    let path = dir.join(name);
    info!("writing {}", path.display());
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes every artifact of `report` into the configured directory and
/// returns the paths written, in order.
pub fn emit(report: &Report, config: &Config) -> Result<Vec<PathBuf>, Error> {
    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir)?;

    let mut out = create(dir, SECTORS_FILE)?;
    write_sector_ranges(report, &mut out, config.merge)?;
    out.flush()?;

    let mut out = create(dir, RANGES_FILE)?;
    write_block_ranges(report, &mut out)?;
    out.flush()?;

    let mut names = vec![SECTORS_FILE, RANGES_FILE];
    if config.ext4 {
        let mut out = create(dir, EXT4_FILE)?;
        write_sector_list(report, &mut out)?;
        out.flush()?;
        names.push(EXT4_FILE);
    }

    let mut out = create(dir, SCRIPT_FILE)?;
    write_script(report, &mut out)?;
    out.flush()?;

    let mut out = create(dir, README_FILE)?;
    write_readme(report, &mut out, config.ext4)?;
    out.flush()?;

    names.push(SCRIPT_FILE);
    names.push(README_FILE);
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}
