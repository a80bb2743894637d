// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod assemble;
pub mod data;
pub mod file;
pub mod progress;
pub mod runner;
pub mod source;
pub mod transfer;
pub mod xml;

pub use error::{FeedError, SettingsError, TransferError};
pub use runner::{run_once, RunStatus};
