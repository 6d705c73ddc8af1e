//! Print handler for configurable console output.
//!
//! `console.log` and `console.error` are routed through a handler so
//! output can go to the real stdout/stderr in the CLI or into a buffer
//! for test assertions. Enum dispatch rather than a trait object keeps
//! this hot path free of vtable indirection.

use parking_lot::Mutex;

/// Default handler that writes log lines to stdout and error lines to
/// stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    pub fn error_line(&self, msg: &str) {
        eprintln!("{msg}");
    }

    /// Stdout does not capture; always empty.
    pub fn get_output(&self) -> String {
        String::new()
    }
}

/// Handler that captures every line to a buffer, for tests.
///
/// Log and error lines land in the same buffer, in emission order.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn error_line(&self, msg: &str) {
        self.println(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout/stderr (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (testing).
    Buffer(BufferPrintHandler),
}

impl PrintHandlerImpl {
    /// Emit one `console.log` line.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
        }
    }

    /// Emit one `console.error` line.
    pub fn error_line(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.error_line(msg),
            Self::Buffer(h) => h.error_line(msg),
        }
    }

    /// Get all captured output. Empty for the stdout handler.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(h) => h.get_output(),
            Self::Buffer(h) => h.get_output(),
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

/// Create the default stdout/stderr handler.
pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a buffer handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_handler_captures_with_newline() {
        let handler = BufferPrintHandler::new();
        handler.println("hello");
        assert_eq!(handler.get_output(), "hello\n");
    }

    #[test]
    fn buffer_handler_interleaves_log_and_error_lines() {
        let handler = BufferPrintHandler::new();
        handler.println("out");
        handler.error_line("oops");
        handler.println("more");
        assert_eq!(handler.get_output(), "out\noops\nmore\n");
    }

    #[test]
    fn buffer_handler_clear_empties_buffer() {
        let handler = BufferPrintHandler::new();
        handler.println("hello");
        handler.clear();
        assert!(handler.get_output().is_empty());
    }

    #[test]
    fn stdout_handler_get_output_returns_empty() {
        let handler = StdoutPrintHandler;
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn buffer_handler_factory_creates_working_handler() {
        let handler = buffer_handler();
        handler.println("test");
        assert_eq!(handler.get_output(), "test\n");
    }
}
