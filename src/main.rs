use std::path::Path;
use std::process;

use anyhow::Result;
use log::info;

use logsetup::{
    backup_if_exists, ensure_log_dir, ensure_log_file, install, setup_multiprocess_logger,
    LoggerHandle, STDERR_SENTINEL,
};

const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LEVEL: &str = "WARNING";
const LOG_FORMAT: &str = "{time} {name} {level} {message}";
const DATE_FORMAT: &str = "%m-%d %H:%M";

fn script_name() -> String {
    let argv0 = std::env::args().next().unwrap_or_default();
    Path::new(&argv0)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("logsetup")
        .to_string()
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let log_dir_arg = args.get(1).map(String::as_str).unwrap_or(DEFAULT_LOG_DIR);
    let level = args.get(2).map(String::as_str).unwrap_or(DEFAULT_LEVEL);

    // An unusable log directory is the one fatal condition.
    let log_dir = match ensure_log_dir(Path::new(log_dir_arg)) {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("logsetup: {err}");
            process::exit(1);
        }
    };

    let script = script_name();
    let log_file = log_dir.join(format!("{script}.log"));
    backup_if_exists(&log_file);
    ensure_log_file(&log_file)?;

    // One shared handle, constructed here and handed to every worker.
    let shared = LoggerHandle::new(&script);
    setup_multiprocess_logger(
        &shared,
        STDERR_SENTINEL,
        true,
        Some(LOG_FORMAT),
        Some(DATE_FORMAT),
        DEFAULT_LEVEL,
    )?;
    setup_multiprocess_logger(
        &shared,
        log_file.to_string_lossy().as_ref(),
        true,
        Some(LOG_FORMAT),
        Some(DATE_FORMAT),
        level,
    )?;
    install(&shared)?;

    info!("Running {script} with log file {}", log_file.display());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // diagnostic-only catch-all: format the cause chain and bail
        eprintln!("logsetup: {err:#}");
        process::exit(1);
    }
}
