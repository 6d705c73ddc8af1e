//! Command implementations for the `esi` binary.
//!
//! The interpreter consumes parser output, not source text: programs
//! arrive as ESTree JSON files (for example from `acorn` with
//! `ecmaVersion: 5`). Each command returns an exit code for `main` to
//! pass through, so the command layer stays testable.

pub mod commands;

pub use commands::{print_value, run_file, run_source, RunOptions};
