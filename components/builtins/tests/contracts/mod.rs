//! Contract tests for builtins component
//!
//! These tests verify the public API the `dbg` builtin depends on
