//! Contract tests for script dispatch, CLI parsing and command output.

mod output_contracts;
mod parse_contracts;
mod process_contracts;
mod scenarios;
mod support;
