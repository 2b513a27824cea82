//! Zygo command-line front end.
//!
//! Wires argument parsing, logging and the tokenizer driver together. The
//! parser and evaluator are external; this crate stops at tokens and the
//! literal values they decode to.

pub mod commands;
pub mod config;
mod logging;

pub use config::{Command, Config, ConfigError};
pub use logging::init_tracing;
