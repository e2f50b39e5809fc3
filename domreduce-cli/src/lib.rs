//! Command-line plumbing for the `domreduce` binary
//!
//! Argument handling that is worth testing on its own lives here; `main.rs` wires it
//! to clap, the configuration loader and the reducer.

pub mod extras;
pub mod report;
