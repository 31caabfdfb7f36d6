//! CLI command implementations.

pub mod args;
pub mod output;

pub mod conflicts;
pub mod duplicates;
pub mod inbox;
pub mod links;
pub mod quality;
pub mod stats;
pub mod trends;

pub use args::{Cli, Commands};
pub use output::Output;
