//! Runtime option resolution: global and script-local options to CLI arguments.

mod resolve;
pub mod table;

pub use resolve::{resolve_options, shadowed_keys, unknown_keys, unsupported_keys, CliArgument};
