//! envconf CLI library
//!
//! This module exposes the CLI main function so other binaries can embed it.

mod cli;

pub use cli::run;
