#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;
use common::actions_csv;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: request a bike lease
    let csv1 = actions_csv(&["request, u1, bike-leasing, 3000"]).unwrap();

    let mut cmd1 = Command::new(cargo_bin!("total-rewards"));
    cmd1.arg("--db-path").arg(&db_path).arg("apply").arg(csv1.path());

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("u1,bike-leasing,REQUESTED,3000,108,64.8,43.2"));

    // 2. Second run: activate it using the same DB path
    let csv2 = actions_csv(&["activate, u1, bike-leasing"]).unwrap();

    let mut cmd2 = Command::new(cargo_bin!("total-rewards"));
    cmd2.arg("--db-path").arg(&db_path).arg("apply").arg(csv2.path());

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // The request from the first run was recovered
    assert!(stdout2.contains("u1,bike-leasing,ACTIVE,3000,108,64.8,43.2"));
}
