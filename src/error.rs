// src/error.rs
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::consts::{FAILURE_EXIT_CODE, NO_MATCH_EXIT_CODE, USAGE_EXIT_CODE};

pub type Result<T> = std::result::Result<T, MlstError>;

#[derive(Debug, Error)]
pub enum MlstError {
    /// Missing or malformed command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// Connection failure, timeout, non-2xx status or unreadable body.
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response markup too broken to locate table boundaries.
    #[error("could not parse response: {0}")]
    Parse(String),

    /// The server answered, but not with 2 or 3 top-level tables.
    #[error("No match found ({tables} tables in response)")]
    NoMatch { tables: usize },

    #[error("{op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MlstError {
    pub fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        MlstError::Io { op, path: path.to_path_buf(), source }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            MlstError::Usage(_) => USAGE_EXIT_CODE,
            MlstError::NoMatch { .. } => NO_MATCH_EXIT_CODE,
            _ => FAILURE_EXIT_CODE,
        }
    }
}
