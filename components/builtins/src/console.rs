//! Console object methods

use crate::util::inspect_args;
use core_types::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// The process stream a console method writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    /// Standard output (`console.log`)
    Stdout,
    /// Standard error (`console.warn`, `console.error`)
    Stderr,
}

/// Console output writer trait
pub trait ConsoleWriter {
    /// Write one line to the given stream
    fn write(&self, stream: ConsoleStream, message: &str);
}

/// Default console writer that prints to the process streams
struct ProcessWriter;

impl ConsoleWriter for ProcessWriter {
    fn write(&self, stream: ConsoleStream, message: &str) {
        match stream {
            ConsoleStream::Stdout => println!("{}", message),
            ConsoleStream::Stderr => eprintln!("{}", message),
        }
    }
}

/// Console object
pub struct ConsoleObject {
    /// Capture buffer; only set by [`ConsoleObject::new_with_output`]
    output: Option<Rc<RefCell<Vec<String>>>>,
    writer: Box<dyn ConsoleWriter>,
}

impl ConsoleObject {
    /// Create a new console writing to stdout and stderr
    pub fn new() -> Self {
        Self::with_writer(Box::new(ProcessWriter))
    }

    /// Create a console with a custom writer
    pub fn with_writer(writer: Box<dyn ConsoleWriter>) -> Self {
        ConsoleObject {
            output: None,
            writer,
        }
    }

    /// Create a console with custom output capture
    pub fn new_with_output(output: Rc<RefCell<Vec<String>>>) -> Self {
        ConsoleObject {
            output: Some(output),
            writer: Box::new(CaptureWriter),
        }
    }

    fn emit(&self, stream: ConsoleStream, message: String) {
        self.writer.write(stream, &message);
        if let Some(output) = &self.output {
            output.borrow_mut().push(message);
        }
    }

    /// console.log(...values)
    pub fn log(&self, values: &[Value]) {
        self.emit(ConsoleStream::Stdout, inspect_args(values));
    }

    /// console.warn(...values)
    pub fn warn(&self, values: &[Value]) {
        self.emit(ConsoleStream::Stderr, inspect_args(values));
    }

    /// Lines captured so far; always empty unless the console was created
    /// with [`ConsoleObject::new_with_output`]
    pub fn output(&self) -> Vec<String> {
        self.output
            .as_ref()
            .map(|output| output.borrow().clone())
            .unwrap_or_default()
    }
}

impl Default for ConsoleObject {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer for captured consoles; the lines land in the shared buffer only
struct CaptureWriter;

impl ConsoleWriter for CaptureWriter {
    fn write(&self, _stream: ConsoleStream, _message: &str) {}
}
