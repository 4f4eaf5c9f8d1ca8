use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

mod common;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,name,price,image_url").unwrap();
    writeln!(file, "p1,Poster,1000,").unwrap();
    // Decimal price instead of cents
    writeln!(file, "p2,Mug,25.00,").unwrap();
    // Text in price field
    writeln!(file, "p3,Frame,free,").unwrap();
    writeln!(file, "p4,Print,500,").unwrap();

    let mut cmd = Command::new(cargo_bin!("printbeat"));
    cmd.arg(file.path())
        .arg("--config")
        .arg("tests/fixtures/fixed_fee.toml");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading product"))
        .stdout(predicate::str::contains("$15.00,$1.50,$0.00,$16.50,succeeded"));
}

#[test]
fn test_negative_price_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,name,price,image_url").unwrap();
    writeln!(file, "p1,Poster,1000,").unwrap();
    writeln!(file, "p2,Refund,-5000,").unwrap();

    let mut cmd = Command::new(cargo_bin!("printbeat"));
    cmd.arg(file.path())
        .arg("--config")
        .arg("tests/fixtures/fixed_fee.toml");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("must not be negative"))
        .stdout(predicate::str::contains("$10.00,$1.50,$0.00,$11.50,succeeded"));
}

#[test]
fn test_empty_cart_is_not_charged() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,name,price,image_url").unwrap();

    let mut cmd = Command::new(cargo_bin!("printbeat"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$0.00,$0.00,$0.00,$0.00,empty"));
}

#[test]
fn test_missing_config_file() {
    let mut cmd = Command::new(cargo_bin!("printbeat"));
    cmd.arg("tests/fixtures/cart.csv")
        .arg("--config")
        .arg("tests/fixtures/does_not_exist.toml");

    cmd.assert().failure();
}

#[test]
fn test_generated_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.csv");
    common::generate_cart_csv(&path, 25).unwrap();

    let mut cmd = Command::new(cargo_bin!("printbeat"));
    cmd.arg(&path)
        .arg("--config")
        .arg("tests/fixtures/fixed_fee.toml");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("$25.00,$1.50,$0.00,$26.50,succeeded"));
}
