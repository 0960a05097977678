use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::severity::Severity;

/// Template applied when the caller passes no message format.
pub const DEFAULT_MESSAGE_FORMAT: &str = "{time} {name} {level} {message}";
/// Chrono template applied when the caller passes no date format.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line formatter: a message template with `{time}`, `{name}`, `{level}` and
/// `{message}` placeholders, plus a chrono date template for `{time}`.
pub struct Format {
    message: String,
    date: String,
}

impl Format {
    /// Absent templates fall back to the module defaults.
    pub fn new(message: Option<&str>, date: Option<&str>) -> Self {
        Format {
            message: message.unwrap_or(DEFAULT_MESSAGE_FORMAT).to_string(),
            date: date.unwrap_or(DEFAULT_DATE_FORMAT).to_string(),
        }
    }

    pub fn render(&self, name: &str, severity: Severity, message: &str) -> String {
        let time = Local::now().format(&self.date).to_string();
        self.message
            .replace("{time}", &time)
            .replace("{name}", name)
            .replace("{level}", severity.as_str())
            .replace("{message}", message)
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::new(None, None)
    }
}

enum Sink {
    File(File),
    Stderr(StandardStream),
}

/// One output destination attached to a logger handle.
///
/// Owned exclusively by the handle it is attached to. File sinks are opened
/// once here and never explicitly closed; they drop at process teardown.
pub struct Handler {
    sink: Sink,
    format: Format,
}

impl Handler {
    /// Open a file sink at `path`, appending or truncating per `append`.
    pub fn file(path: &Path, append: bool, format: Format) -> io::Result<Self> {
        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };
        Ok(Handler {
            sink: Sink::File(file),
            format,
        })
    }

    /// Sink writing to the process standard-error stream, with the line
    /// colored by severity when the stream supports it.
    pub fn stderr(format: Format) -> Self {
        Handler {
            sink: Sink::Stderr(StandardStream::stderr(ColorChoice::Auto)),
            format,
        }
    }

    pub fn is_stderr(&self) -> bool {
        matches!(self.sink, Sink::Stderr(_))
    }

    /// Render and write one record line.
    pub fn write(&mut self, name: &str, severity: Severity, message: &str) -> io::Result<()> {
        let line = self.format.render(name, severity, message);
        match &mut self.sink {
            Sink::File(file) => writeln!(file, "{line}"),
            Sink::Stderr(stream) => {
                let mut spec = ColorSpec::new();
                spec.set_fg(level_color(severity));
                stream.set_color(&spec)?;
                writeln!(stream, "{line}")?;
                stream.reset()
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::File(file) => file.flush(),
            Sink::Stderr(stream) => stream.flush(),
        }
    }
}

fn level_color(severity: Severity) -> Option<Color> {
    match severity {
        Severity::Debug => Some(Color::Cyan),
        Severity::Info => Some(Color::Green),
        Severity::Warning => Some(Color::Yellow),
        Severity::Error | Severity::Critical => Some(Color::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn renders_custom_template() {
        let format = Format::new(Some("{level}:{name}:{message}"), None);
        let line = format.render("worker", Severity::Info, "ready");
        assert_eq!(line, "INFO:worker:ready");
    }

    #[test]
    fn default_template_carries_all_fields() {
        let line = Format::default().render("worker", Severity::Error, "boom");
        assert!(line.ends_with("worker ERROR boom"));
        // the {time} prefix is non-empty
        assert!(line.len() > "worker ERROR boom".len() + 1);
    }

    #[test]
    fn file_handler_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");

        let mut handler = Handler::file(&path, true, Format::default()).unwrap();
        handler.write("worker", Severity::Warning, "first").unwrap();
        handler.flush().unwrap();
        drop(handler);

        let mut handler = Handler::file(&path, true, Format::default()).unwrap();
        handler.write("worker", Severity::Warning, "second").unwrap();
        handler.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));
    }

    #[test]
    fn truncate_mode_discards_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        fs::write(&path, "stale\n").unwrap();

        let mut handler = Handler::file(&path, false, Format::default()).unwrap();
        handler.write("worker", Severity::Error, "fresh").unwrap();
        handler.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("fresh"));
    }

    #[test]
    fn file_handler_propagates_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");
        assert!(Handler::file(&path, true, Format::default()).is_err());
    }
}
