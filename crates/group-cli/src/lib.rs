//! Group packager CLI library.
//!
//! Exposes CLI parsing and command implementations so they can be tested
//! without spawning the binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    init_logging, load_settings, open_input, open_output, run_batch, run_pack, show_config,
    OutputSink,
};
