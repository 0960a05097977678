use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use log::{Log, Metadata, Record};

use crate::error::SetupError;
use crate::handler::{Format, Handler};
use crate::severity::Severity;

/// Destination sentinel routing output to the standard-error stream.
pub const STDERR_SENTINEL: &str = "stderr";

struct Inner {
    name: String,
    severity: Mutex<Severity>,
    handlers: Mutex<Vec<Handler>>,
}

/// Shared reference to a named sink: an ordered handler list plus a minimum
/// severity. Clones refer to the same sink, so a handle constructed once at
/// pool start-up can be passed to every worker.
///
/// Repeated configuration calls accumulate handlers; nothing deduplicates
/// them. Configure each handle once, or accept duplicate log lines.
#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}

impl LoggerHandle {
    /// Fresh handle outside the process-wide registry. This is the explicit
    /// shared object for multi-process use; see [`setup_multiprocess_logger`].
    pub fn new(name: &str) -> Self {
        LoggerHandle {
            inner: Arc::new(Inner {
                name: name.to_string(),
                severity: Mutex::new(Severity::Warning),
                handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn severity(&self) -> Severity {
        *self.inner.severity.lock().unwrap()
    }

    pub fn set_severity(&self, severity: Severity) {
        *self.inner.severity.lock().unwrap() = severity;
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.lock().unwrap().len()
    }

    pub fn attach(&self, handler: Handler) {
        self.inner.handlers.lock().unwrap().push(handler);
    }

    /// Inspect the attached handlers without exposing the lock.
    pub fn with_handlers<R>(&self, f: impl FnOnce(&[Handler]) -> R) -> R {
        f(&self.inner.handlers.lock().unwrap())
    }

    /// Flush every attached handler, including ones from prior calls.
    pub fn flush(&self) {
        let mut handlers = self.inner.handlers.lock().unwrap();
        for handler in handlers.iter_mut() {
            let _ = handler.flush();
        }
    }
}

impl Log for LoggerHandle {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Severity::from(metadata.level()) >= self.severity()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let severity = Severity::from(record.level());
        let message = record.args().to_string();
        let name = if self.inner.name.is_empty() {
            record.target()
        } else {
            self.inner.name.as_str()
        };
        let mut handlers = self.inner.handlers.lock().unwrap();
        for handler in handlers.iter_mut() {
            let _ = handler.write(name, severity, &message);
        }
    }

    fn flush(&self) {
        LoggerHandle::flush(self);
    }
}

lazy_static! {
    static ref REGISTRY: Mutex<HashMap<String, LoggerHandle>> = Mutex::new(HashMap::new());
}

/// Handle for `name` from the process-wide registry, created on first use.
/// The empty name denotes the root-like default handle.
pub fn get_logger(name: &str) -> LoggerHandle {
    REGISTRY
        .lock()
        .unwrap()
        .entry(name.to_string())
        .or_insert_with(|| LoggerHandle::new(name))
        .clone()
}

fn configure(
    handle: &LoggerHandle,
    destination: &str,
    append: bool,
    message_format: Option<&str>,
    date_format: Option<&str>,
    level: &str,
) -> Result<(), SetupError> {
    let severity: Severity = level.parse()?;
    let format = Format::new(message_format, date_format);
    let handler = if destination == STDERR_SENTINEL {
        Handler::stderr(format)
    } else {
        Handler::file(Path::new(destination), append, format)?
    };
    handle.attach(handler);
    handle.set_severity(severity);
    handle.flush();
    Ok(())
}

/// Configure the registry handle for `name`: attach one handler (stderr for
/// the [`STDERR_SENTINEL`] destination, otherwise a file opened in append or
/// truncate mode), apply the format, set the severity, flush.
///
/// File-open failures propagate untouched. Calling this twice on one name
/// leaves two handlers attached.
pub fn setup_logger(
    name: &str,
    destination: &str,
    append: bool,
    message_format: Option<&str>,
    date_format: Option<&str>,
    level: &str,
) -> Result<LoggerHandle, SetupError> {
    let handle = get_logger(name);
    configure(&handle, destination, append, message_format, date_format, level)?;
    Ok(handle)
}

/// Same handler/format/level/flush logic as [`setup_logger`], applied to an
/// already-obtained shared handle instead of a registry name. The caller
/// constructs the handle once (at pool start-up) and passes it to every
/// worker; this function only augments it.
pub fn setup_multiprocess_logger(
    handle: &LoggerHandle,
    destination: &str,
    append: bool,
    message_format: Option<&str>,
    date_format: Option<&str>,
    level: &str,
) -> Result<LoggerHandle, SetupError> {
    configure(handle, destination, append, message_format, date_format, level)?;
    Ok(handle.clone())
}

/// Whether additional configuration has already run on the root handle.
///
/// True only when strictly more than one handler is attached: the default
/// handle starts out with one implicit handler in the underlying facility,
/// so a single handler still counts as unconfigured.
pub fn is_logging_configured() -> bool {
    get_logger("").handler_count() > 1
}

/// Register `handle` as the global logger behind the `log` macros.
/// A second install surfaces the facility's error.
pub fn install(handle: &LoggerHandle) -> Result<(), SetupError> {
    log::set_boxed_logger(Box::new(handle.clone()))?;
    log::set_max_level(handle.severity().to_level_filter());
    Ok(())
}
