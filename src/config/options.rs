// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

/// Where the response body comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Upload this sequence file to the server.
    Upload(PathBuf),
    /// Replay a previously saved response body.
    SavedHtml(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProxySetting {
    /// Whatever HTTP_PROXY / HTTPS_PROXY say.
    Environment,
    Disabled,
    Url(String),
}

impl ProxySetting {
    /// Accepts `host:port` or a full proxy URL.
    pub fn from_arg(arg: &str) -> Self {
        let arg = arg.trim();
        if arg.contains("://") {
            ProxySetting::Url(arg.to_string())
        } else {
            ProxySetting::Url(format!("http://{arg}"))
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetOptions {
    pub endpoint: String,
    pub proxy: ProxySetting,
    pub timeout: Duration,
}

impl Default for NetOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            proxy: ProxySetting::Environment,
            timeout: Duration::from_secs(READ_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub source: Source,
    pub output: PathBuf,
    pub database: String,
    pub net: NetOptions,
    pub save_html: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(source: Source, output: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self {
            source,
            output: output.into(),
            database: database.into(),
            net: NetOptions::default(),
            save_html: None,
        }
    }
}
