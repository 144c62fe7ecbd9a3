#![forbid(unsafe_code)]

//! Thin command-line adapter around `theoryx-core`.
//!
//! Turns raw input (command-line tokens, free text, an image path) into a
//! validated history, runs the engine, and writes JSON to stdout.

pub mod cli;
pub mod error;

pub use cli::{init_tracing, run, run_from_env};
pub use error::{CliError, Result};
