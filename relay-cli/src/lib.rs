//! # relay-cli
//!
//! Runs a single Telegram bridge leg under a small supervisor: argument parsing, config loading,
//! stdin-to-Telegram pumping, and lifecycle handling.

pub mod cli;
pub mod config;
pub mod supervisor;

pub use cli::{Cli, Commands};
pub use config::BridgeConfig;
pub use supervisor::{pump_lines, run_bridge};
