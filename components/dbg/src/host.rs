//! The host seam and the realm that implements it.
//!
//! [`Host`] is everything `dbg` asks of the engine it runs in: which globals
//! exist, the current call stack (structured or as `Error.prototype.stack`
//! text), the working directory and the diagnostic stream. [`Realm`] is the
//! Corten implementation, configurable to emulate Node, Deno, Bun or a
//! browser.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;

use builtins::{ConsoleObject, ErrorConstructor, Inspect, StackTraceStyle};
use core_types::{ResolveError, StackFrame, Value};

use crate::probe::CallSiteApi;
use crate::DbgOptions;

/// Name of the native frame the `dbg` builtin runs in
const DBG_FRAME: &str = "dbg";

/// What the `dbg` builtin needs from the hosting engine.
pub trait Host {
    /// Returns true if the global (or dotted property path such as
    /// `util.getCallSites`) exists in the realm.
    fn has_global(&self, path: &str) -> bool;

    /// Invoke a structured call-site API and return its frames, innermost
    /// first, exactly as the engine reports them.
    ///
    /// Frame 0 must be the `dbg` builtin's own frame, so that the script
    /// calling `dbg` sits at [`CALLER_INDEX`](crate::acquire::CALLER_INDEX).
    fn get_call_sites(&self, api: CallSiteApi) -> Result<Vec<StackFrame>, ResolveError>;

    /// Create a fresh `Error` at the current point and return its `stack`
    /// text, or `None` if the engine attaches no stack.
    ///
    /// As with [`Host::get_call_sites`], the first frame line must be the
    /// `dbg` builtin's own frame.
    fn capture_error_stack(&self) -> Result<Option<String>, ResolveError>;

    /// The process working directory, if the host has one.
    fn cwd(&self) -> Option<PathBuf>;

    /// Write one line to the diagnostic stream (`console.warn`).
    fn warn(&self, line: &str);
}

/// A Corten realm: globals, the live call stack and a console.
pub struct Realm {
    globals: HashSet<String>,
    /// Active frames, outermost first
    frames: RefCell<Vec<StackFrame>>,
    stack_style: StackTraceStyle,
    cwd: Option<PathBuf>,
    console: ConsoleObject,
}

impl Realm {
    /// An empty realm: no globals, V8 stack text, no working directory.
    pub fn new() -> Self {
        Realm {
            globals: HashSet::new(),
            frames: RefCell::new(Vec::new()),
            stack_style: StackTraceStyle::V8,
            cwd: None,
            console: ConsoleObject::new(),
        }
    }

    /// Node 22.9+ with `util.getCallSites`.
    pub fn node() -> Self {
        Self::new()
            .with_global("process")
            .with_global("util")
            .with_global(CallSiteApi::GetCallSites.global_path())
            .with_cwd(std::env::current_dir().ok())
    }

    /// Node before 23.3, which only exposes `util.getCallSite`.
    pub fn legacy_node() -> Self {
        Self::new()
            .with_global("process")
            .with_global("util")
            .with_global(CallSiteApi::GetCallSite.global_path())
            .with_cwd(std::env::current_dir().ok())
    }

    /// Deno: a server host with no call-site API.
    pub fn deno() -> Self {
        Self::new()
            .with_global("Deno")
            .with_cwd(std::env::current_dir().ok())
    }

    /// Bun: JavaScriptCore stacks, no call-site API.
    pub fn bun() -> Self {
        Self::new()
            .with_global("Bun")
            .with_global("process")
            .with_stack_style(StackTraceStyle::JavaScriptCore)
            .with_cwd(std::env::current_dir().ok())
    }

    /// A browser window using the given engine's stack layout.
    pub fn browser(style: StackTraceStyle) -> Self {
        Self::new()
            .with_global("window")
            .with_global("document")
            .with_stack_style(style)
    }

    /// Define a global.
    pub fn with_global(mut self, path: &str) -> Self {
        self.globals.insert(path.to_string());
        self
    }

    /// Remove a global.
    pub fn without_global(mut self, path: &str) -> Self {
        self.globals.remove(path);
        self
    }

    /// Set the working directory reported to scripts.
    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }

    /// Set the `Error.prototype.stack` layout.
    pub fn with_stack_style(mut self, style: StackTraceStyle) -> Self {
        self.stack_style = style;
        self
    }

    /// Replace the console the realm writes diagnostics to.
    pub fn with_console(mut self, console: ConsoleObject) -> Self {
        self.console = console;
        self
    }

    /// The realm's console.
    pub fn console(&self) -> &ConsoleObject {
        &self.console
    }

    /// The stack text layout in use.
    pub fn stack_style(&self) -> StackTraceStyle {
        self.stack_style
    }

    /// Enter a function.
    pub fn push_frame(&self, frame: StackFrame) {
        self.frames.borrow_mut().push(frame);
    }

    /// Leave the innermost function.
    pub fn pop_frame(&self) -> Option<StackFrame> {
        self.frames.borrow_mut().pop()
    }

    /// Snapshot of the call stack, innermost first.
    pub fn frames(&self) -> Vec<StackFrame> {
        self.frames.borrow().iter().rev().cloned().collect()
    }

    /// Run a native builtin with its own frame on the stack.
    pub fn call_native<R>(&self, name: &str, f: impl FnOnce(&Self) -> R) -> R {
        self.push_frame(StackFrame::native(name));
        let result = f(self);
        self.pop_frame();
        result
    }

    /// The script-facing `dbg(value, options)` builtin.
    pub fn call_dbg<T: Inspect>(&self, value: T, options: &DbgOptions) -> T {
        self.call_native(DBG_FRAME, |realm| crate::dbg(realm, value, options))
    }

    /// The stack as seen from inside the `dbg` builtin. Calls that reach
    /// [`crate::dbg`] without going through [`Realm::call_dbg`] have no
    /// builtin frame yet, so one is added.
    fn builtin_frames(&self) -> Vec<StackFrame> {
        let mut frames = self.frames();
        let inside_dbg = frames.first().is_some_and(|frame| {
            frame.is_native() && frame.function_name.as_deref() == Some(DBG_FRAME)
        });
        if !inside_dbg {
            frames.insert(0, StackFrame::native(DBG_FRAME));
        }
        frames
    }
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Realm {
    fn has_global(&self, path: &str) -> bool {
        self.globals.contains(path)
    }

    fn get_call_sites(&self, api: CallSiteApi) -> Result<Vec<StackFrame>, ResolveError> {
        if !self.has_global(api.global_path()) {
            return Err(ResolveError::HostFailure(format!(
                "{} is not a function",
                api.global_path()
            )));
        }
        Ok(self.builtin_frames())
    }

    fn capture_error_stack(&self) -> Result<Option<String>, ResolveError> {
        let mut error = ErrorConstructor::construct(None);
        error.capture_stack_trace(self.builtin_frames());
        Ok(Some(error.stack(self.stack_style)))
    }

    fn cwd(&self) -> Option<PathBuf> {
        self.cwd.clone()
    }

    fn warn(&self, line: &str) {
        self.console.warn(&[Value::String(line.to_string())]);
    }
}
