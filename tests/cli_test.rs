use assert_cmd::Command; // Run programs, feeding stdin
use predicates::prelude::*; // Used for writing assertions
use std::fs;

const GAP_SCAN: &str = "Block  Status
-----  ------
0      Good
1      Good
2      Good
5      Good
6      Good
7      Good
8      Good
9      Good
";

#[test]
fn writes_all_artifacts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["-s", "1000", "-b", "10", "-o"])
        .arg(dir.path())
        .write_stdin(GAP_SCAN)
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculated 2 BAD blocks"))
        .stdout(predicate::str::contains("Ranges:      3-4"));
    assert_eq!(
        fs::read_to_string(dir.path().join("ntfsmarkbad_sectors.txt"))?,
        "300 399\n400 499\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("bad_block_ranges.txt"))?,
        "Bad blocks: 3-4\n\nTotal: 2 bad blocks\n"
    );
    assert!(dir.path().join("mark_bad_sectors.bat").exists());
    assert!(dir.path().join("README.txt").exists());
    assert!(!dir.path().join("badblocks_ext4.txt").exists());
    Ok(())
}

#[test]
fn ext4_and_merge_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("scan.txt");
    fs::write(&input, "5\n2\n2\n5\n9\n")?;
    let out = dir.path().join("out");
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["--total-sectors", "20", "--total-blocks", "10", "--ext4", "--merge"])
        .arg("--input")
        .arg(&input)
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(out.join("ntfsmarkbad_sectors.txt"))?,
        "0 3\n6 9\n12 17\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("badblocks_ext4.txt"))?,
        "0\n1\n2\n3\n6\n7\n8\n9\n12\n13\n14\n15\n16\n17\n"
    );
    assert!(fs::read_to_string(out.join("README.txt"))?.contains("badblocks_ext4.txt      : For Linux ext4"));
    Ok(())
}

#[test]
fn healthy_drive_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["-s", "1000", "-b", "5", "-o"])
        .arg(dir.path())
        .write_stdin("0\n1\n2\n3\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No bad blocks found"));
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn no_blocks_in_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["-s", "1000", "-b", "5", "-o"])
        .arg(dir.path())
        .write_stdin("nothing useful\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid blocks found"));
    assert_eq!(fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[test]
fn degenerate_scale_aborts() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out");
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["-s", "5", "-b", "10", "-o"])
        .arg(&out)
        .write_stdin(GAP_SCAN)
        .assert()
        .failure()
        .stderr(predicate::str::contains("less than one sector per block"));
    assert!(!out.exists());
    Ok(())
}

#[test]
fn missing_total_sectors() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.write_stdin(GAP_SCAN)
        .assert()
        .failure()
        .stderr(predicate::str::contains("total sectors required"));
    Ok(())
}

#[test]
fn invalid_total_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("hdsentinel_markbad")?;
    cmd.args(&["-s", "1000", "-b", "lots"])
        .write_stdin(GAP_SCAN)
        .assert()
        .failure()
        .stderr(predicate::str::contains("total blocks"))
        .stderr(predicate::str::contains("lots"));
    Ok(())
}
