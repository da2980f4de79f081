//! Command line interface: argument parsing and command dispatch.

pub mod executor;
pub mod handlers;
pub mod parser;

pub use executor::Executor;
pub use parser::{Cli, Commands};
