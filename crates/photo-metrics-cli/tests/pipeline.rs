//! End-to-end pipeline tests: files in, JSONL records out.

use assert_cmd::Command;
use photo_metrics_test_support::SyntheticImageBuilder;
use tempfile::TempDir;

fn write_image(dir: &TempDir, name: &str, info: &photo_metrics_core::ImageInfo) {
    info.image.save(dir.path().join(name)).expect("save image");
}

fn parse_jsonl(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect()
}

#[test]
fn test_analyze_emits_one_record_per_image() {
    let dir = TempDir::new().expect("tempdir");
    write_image(&dir, "flat.png", &SyntheticImageBuilder::well_exposed(64, 64));
    write_image(&dir, "sharp.png", &SyntheticImageBuilder::checkerboard(64, 64));

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    assert!(output.status.success());
    let records = parse_jsonl(&output.stdout);
    assert_eq!(records.len(), 2);

    for record in &records {
        assert!(record["source"].is_string());
        assert!(record["timestamp"].is_string());
        assert!(record["report"]["basic_info"]["width"].is_u64());
        assert!(record["report"]["exposure"]["mean_brightness"].is_f64());
        assert!(record["report"]["composition"]["primary_interest"].is_string());
        assert!(record["report"]["composition"]["follows_rule_of_thirds"].is_boolean());
    }
}

#[test]
fn test_underexposed_image_is_flagged() {
    let dir = TempDir::new().expect("tempdir");
    write_image(&dir, "dark.png", &SyntheticImageBuilder::underexposed(48, 48));

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    let records = parse_jsonl(&output.stdout);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["report"]["exposure"]["is_underexposed"], true);
    assert_eq!(records[0]["report"]["exposure"]["is_overexposed"], false);
}

#[test]
fn test_overexposed_image_is_flagged() {
    let dir = TempDir::new().expect("tempdir");
    write_image(&dir, "white.png", &SyntheticImageBuilder::overexposed(48, 48));

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    let records = parse_jsonl(&output.stdout);
    assert_eq!(records[0]["report"]["exposure"]["is_overexposed"], true);
}

#[test]
fn test_horizon_image_reports_horizon() {
    let dir = TempDir::new().expect("tempdir");
    write_image(
        &dir,
        "horizon.png",
        &SyntheticImageBuilder::sky_over_ground(120, 80),
    );

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    let records = parse_jsonl(&output.stdout);
    assert_eq!(records[0]["report"]["composition"]["has_horizon"], true);
    assert_eq!(
        records[0]["report"]["lighting"]["light_direction"],
        "top"
    );
}

#[test]
fn test_warm_image_color_temperature() {
    let dir = TempDir::new().expect("tempdir");
    write_image(&dir, "warm.png", &SyntheticImageBuilder::warm_image(40, 40));

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    let records = parse_jsonl(&output.stdout);
    assert_eq!(
        records[0]["report"]["lighting"]["color_temperature"],
        "warm"
    );
    assert!(records[0]["report"]["color"]["dominant_colors"].is_array());
}

#[test]
fn test_undecodable_file_is_skipped_not_fatal() {
    let dir = TempDir::new().expect("tempdir");
    write_image(&dir, "ok.png", &SyntheticImageBuilder::well_exposed(32, 32));
    std::fs::write(dir.path().join("broken.png"), b"not a png").expect("write");

    let output = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");

    assert!(output.status.success());
    let records = parse_jsonl(&output.stdout);
    assert_eq!(records.len(), 1);
}

#[test]
fn test_recursive_flag_descends() {
    let dir = TempDir::new().expect("tempdir");
    let nested = dir.path().join("nested");
    std::fs::create_dir(&nested).expect("mkdir");
    SyntheticImageBuilder::well_exposed(24, 24)
        .image
        .save(nested.join("deep.png"))
        .expect("save");

    let flat = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--quiet")
        .output()
        .expect("run");
    assert_eq!(parse_jsonl(&flat.stdout).len(), 0);

    let recursive = Command::cargo_bin("photo-metrics")
        .expect("binary")
        .arg(dir.path())
        .arg("--recursive")
        .arg("--quiet")
        .output()
        .expect("run");
    assert_eq!(parse_jsonl(&recursive.stdout).len(), 1);
}
