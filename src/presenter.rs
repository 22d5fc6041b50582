use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use colored::{ColoredString, Colorize};
use tracing::warn;

/// How a console message should read to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Plain,
    Info,
    Success,
    Alert,
}

/// Renders user-facing messages by severity onto one sink.
pub struct Presenter {
    sink: Mutex<Box<dyn Write + Send>>,
    colored: bool,
}

impl Presenter {
    pub fn stdout() -> Self {
        Self {
            sink: Mutex::new(Box::new(io::stdout())),
            colored: true,
        }
    }

    /// Presenter writing uncoloured text into a shared in-memory buffer
    pub fn buffered() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let presenter = Self {
            sink: Mutex::new(Box::new(buffer.clone())),
            colored: false,
        };
        (presenter, buffer)
    }

    pub fn render(&self, severity: Severity, message: &str) -> String {
        if !self.colored {
            return message.to_string();
        }
        paint(severity, message).to_string()
    }

    pub fn emit(&self, severity: Severity, message: &str) {
        let line = self.render(severity, message);
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{}", line).and_then(|_| sink.flush()) {
            warn!("Failed to write console output: {}", e);
        }
    }

    pub fn plain(&self, message: &str) {
        self.emit(Severity::Plain, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    pub fn success(&self, message: &str) {
        self.emit(Severity::Success, message);
    }

    pub fn alert(&self, message: &str) {
        self.emit(Severity::Alert, message);
    }
}

fn paint(severity: Severity, message: &str) -> ColoredString {
    match severity {
        Severity::Plain => message.normal(),
        Severity::Info => message.cyan(),
        Severity::Success => message.green(),
        Severity::Alert => message.red().bold(),
    }
}

#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = match self.0.lock() {
            Ok(bytes) => bytes,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
