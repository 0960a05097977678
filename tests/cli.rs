use std::fs;
use std::process::Command;

/// The bootstrap creates the log directory, the LOGS directory, and a log
/// file carrying the startup line; the stderr handler mirrors it.
#[test]
fn bootstrap_configures_file_and_stderr_logging() {
    let dir = tempfile::tempdir().unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_logsetup"))
        .current_dir(dir.path())
        .args(["logs", "INFO"])
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Running logsetup"));

    let log_file = dir.path().join("logs").join("logsetup.log");
    assert!(log_file.is_file());
    let contents = fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Running logsetup"));

    assert!(dir.path().join("LOGS").is_dir());
}

/// A log directory path occupied by a file terminates the process with a
/// diagnostic naming the path.
#[test]
fn unusable_log_dir_terminates_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("occupied"), "not a directory").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_logsetup"))
        .current_dir(dir.path())
        .arg("occupied")
        .output()
        .unwrap();

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.is_empty());
    assert!(stderr.contains("occupied"));
}

/// Default invocation stays quiet on stderr at WARNING but still prepares
/// the directory and file.
#[test]
fn default_level_suppresses_the_startup_line() {
    let dir = tempfile::tempdir().unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_logsetup"))
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("Running logsetup"));
    assert!(dir.path().join("logs").join("logsetup.log").is_file());
}
