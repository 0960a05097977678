//! Process-wide logging configuration for tools that fan work out across
//! cooperating worker processes.
//!
//! The crate is a thin facade over the `log` crate: it creates log
//! directories, attaches file or stderr handlers with caller-supplied
//! formats, sets severity thresholds, and rotates a pre-existing log file to
//! a `.bak` backup. A [`LoggerHandle`] constructed once at pool start-up can
//! be shared by every worker and installed behind the `log` macros.
//!
//! ```no_run
//! use logsetup::{ensure_log_dir, install, setup_multiprocess_logger, LoggerHandle};
//! use std::path::Path;
//!
//! let dir = ensure_log_dir(Path::new("logs"))?;
//! let shared = LoggerHandle::new("worker");
//! setup_multiprocess_logger(
//!     &shared,
//!     dir.join("worker.log").to_string_lossy().as_ref(),
//!     true,
//!     Some("{time} {name} {level} {message}"),
//!     Some("%m-%d %H:%M"),
//!     "WARNING",
//! )?;
//! install(&shared)?;
//! # Ok::<(), logsetup::SetupError>(())
//! ```

pub mod error;
pub mod files;
pub mod handler;
pub mod logger;
pub mod severity;

pub use error::SetupError;
pub use files::{backup_if_exists, ensure_log_dir, ensure_log_file, timestamped_log_name, LOGS_DIR};
pub use handler::{Format, Handler, DEFAULT_DATE_FORMAT, DEFAULT_MESSAGE_FORMAT};
pub use logger::{
    get_logger, install, is_logging_configured, setup_logger, setup_multiprocess_logger,
    LoggerHandle, STDERR_SENTINEL,
};
pub use severity::Severity;
