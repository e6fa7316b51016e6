use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

#[test]
fn det_command_reads_matrix_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let matrix_path = temp.path().join("matrix.json");
    write_file(
        &matrix_path,
        "[[0.0, 2.0, 1.0], [1.0, -2.0, -3.0], [2.0, 3.0, 1.0]]\n",
    );

    let output = run_det(&[
        "--input",
        path_arg(&matrix_path),
        "--threads",
        "2",
        "--expect",
        "-7",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("size: 3"), "stdout: {stdout}");
    assert!(stdout.contains("threads: 2"), "stdout: {stdout}");
    assert!(stdout.contains("status: PASS"), "stdout: {stdout}");
}

#[test]
fn det_command_builds_samples() {
    let output = run_det(&[
        "--sample", "diagonal", "--size", "5", "--value", "2", "--threads", "3", "--expect", "32",
    ]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("determinant: 3.200000000000000E1"),
        "stdout: {stdout}"
    );
}

#[test]
fn det_command_hilbert_sample_meets_default_tolerance() {
    let output = run_det(&[
        "--sample",
        "hilbert",
        "--size",
        "2",
        "--expect",
        "0.0833333333333333",
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("status: PASS"));
}

#[test]
fn det_command_reports_expectation_failure() {
    let output = run_det(&[
        "--sample", "triangle", "--size", "4", "--value", "3", "--expect", "80",
    ]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("determinant: 8.100000000000000E1"),
        "stdout: {stdout}"
    );
    assert!(stdout.contains("status: FAIL"), "stdout: {stdout}");
}

#[test]
fn det_command_rejects_ragged_matrix_file() {
    let temp = TempDir::new().expect("tempdir should be created");
    let matrix_path = temp.path().join("ragged.json");
    write_file(&matrix_path, "[[1.0, 2.0], [3.0]]");

    let output = run_det(&["--input", path_arg(&matrix_path)]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [INPUT.MATRIX_FILE]"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("FATAL EXIT CODE: 2"), "stderr: {stderr}");
}

#[test]
fn det_command_reports_missing_file_as_io_error() {
    let temp = TempDir::new().expect("tempdir should be created");
    let missing = temp.path().join("missing.json");

    let output = run_det(&["--input", path_arg(&missing)]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: [IO.MATRIX_FILE]"), "stderr: {stderr}");
    assert!(stderr.contains("FATAL EXIT CODE: 3"), "stderr: {stderr}");
}

#[test]
fn det_command_reports_overflowing_determinant_as_computation_error() {
    let output = run_det(&[
        "--sample", "diagonal", "--size", "3", "--value", "1e200", "--threads", "2",
    ]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR: [COMPUTE.DETERMINANT_RANGE]"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("FATAL EXIT CODE: 4"), "stderr: {stderr}");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("determinant:"));
}

#[test]
fn det_command_requires_size_for_samples() {
    let output = run_det(&["--sample", "constant"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR: [INPUT.CLI_USAGE]"));
}

#[test]
fn det_command_rejects_unknown_sample() {
    let output = run_det(&["--sample", "magic", "--size", "3"]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn empty_matrix_file_has_zero_determinant() {
    let temp = TempDir::new().expect("tempdir should be created");
    let matrix_path = temp.path().join("empty.json");
    write_file(&matrix_path, "[]");

    let output = run_det(&["--input", path_arg(&matrix_path), "--expect", "0"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("size: 0"), "stdout: {stdout}");
    assert!(
        stdout.contains("determinant: 0.000000000000000E0"),
        "stdout: {stdout}"
    );
}

fn run_det(extra_args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pardet"))
        .arg("det")
        .args(extra_args)
        .env_remove("RUST_LOG")
        .output()
        .expect("pardet binary should run")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("tempdir path should be utf-8")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent dir should be created");
    }
    fs::write(path, content).expect("file should be written");
}
