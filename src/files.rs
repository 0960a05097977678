use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::SetupError;

/// Directory ensured next to the working directory by [`backup_if_exists`].
pub const LOGS_DIR: &str = "LOGS";

/// Resolve `path` to an absolute directory, creating it (and intermediate
/// directories) when absent.
///
/// Creation may race with peer processes making the same directory; a failed
/// create is only an error if the directory still does not exist afterwards.
/// That case returns [`SetupError::LogDirUnusable`], which the binary
/// boundary treats as fatal. Idempotent.
pub fn ensure_log_dir(path: &Path) -> Result<PathBuf, SetupError> {
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    if !abs.is_dir() {
        if let Err(source) = fs::create_dir_all(&abs) {
            if !abs.is_dir() {
                return Err(SetupError::LogDirUnusable { path: abs, source });
            }
        }
    }
    Ok(abs)
}

/// Guarantee `path` exists as a file, creating it empty when absent.
/// Existing contents are untouched.
pub fn ensure_log_file(path: &Path) -> Result<(), SetupError> {
    OpenOptions::new().create(true).append(true).open(path)?;
    Ok(())
}

/// Best-effort rotation of an existing log file to `<path>.bak`, overwriting
/// any prior backup. Separately ensures the [`LOGS_DIR`] directory exists
/// relative to the working directory. Failures are reported through the
/// facade and swallowed; a missing source file is a silent no-op.
pub fn backup_if_exists(path: &Path) {
    let mut renamed = false;
    if path.exists() {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(".bak");
        match fs::rename(path, &backup) {
            Ok(()) => renamed = true,
            Err(err) => log::warn!("could not back up {}: {err}", path.display()),
        }
    }

    let logdir = Path::new(LOGS_DIR);
    if !logdir.is_dir() {
        if let Err(err) = fs::create_dir_all(logdir) {
            log::warn!("could not create {LOGS_DIR} directory: {err}");
            return;
        }
        // TODO: this recreate step only runs the first time the LOGS
        // directory is created, so later calls rename the log away without
        // leaving an empty file behind; decide whether to hoist it out of
        // this branch before changing callers that rely on today's shape.
        if renamed {
            if let Err(err) = OpenOptions::new().create(true).append(true).open(path) {
                log::warn!("could not recreate {}: {err}", path.display());
            }
        }
    }
}

/// Per-run log file name, `<dir>/<stem>_<YYYYmmdd_HH_MM_SS_micros>.log`.
pub fn timestamped_log_name(dir: &Path, stem: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H_%M_%S_%6f");
    dir.join(format!("{stem}_{stamp}.log"))
}
