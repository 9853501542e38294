// src/lib.rs

#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod file;
pub mod report;
pub mod runner;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{MlstError, Result};
