// src/cli.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};

use crate::config::consts::{DEFAULT_ENDPOINT, READ_TIMEOUT_SECS};
use crate::config::options::{NetOptions, ProxySetting, RunOptions, Source};
use crate::error::{MlstError, Result};
use crate::runner::{self, RunSummary};

/// Submit a sequence to PubMLST and export the allele and MLST tables as TSV.
///
/// Examples of databases: 'cdifficile' for C. difficile, 'mlst' for MRSA.
#[derive(Parser, Debug)]
#[command(name = "fetch_mlst", version)]
pub struct Args {
    /// Input FASTA file to upload
    #[arg(short = 'f', long, value_name = "FASTA")]
    pub fasta: Option<PathBuf>,

    /// Output file with MLST info
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// MLST database to query
    #[arg(short = 'm', long = "mlst", value_name = "DATABASE")]
    pub database: Option<String>,

    /// Sequence query endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Forward proxy, `host:port` or a URL
    #[arg(long, value_name = "PROXY", conflicts_with = "no_proxy")]
    pub proxy: Option<String>,

    /// Ignore HTTP_PROXY / HTTPS_PROXY
    #[arg(long)]
    pub no_proxy: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = READ_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Also write the raw response page here
    #[arg(long, value_name = "PATH")]
    pub save_html: Option<PathBuf>,

    /// Parse a saved response page instead of uploading (--fasta not needed)
    #[arg(long, value_name = "PATH")]
    pub from_html: Option<PathBuf>,

    /// Append log lines to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// -v for progress, -vv for debug output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Parse arguments. `--help` / `--version` print and exit here;
/// every other parse failure is a usage error.
pub fn parse_args<I, T>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => MlstError::Usage(e.to_string()),
    })
}

fn usage(missing: &[&str]) -> MlstError {
    let help = Args::command().render_help();
    MlstError::Usage(format!("Missing required argument(s): {}\n\n{help}", missing.join(", ")))
}

impl Args {
    pub fn into_options(self) -> Result<RunOptions> {
        let mut missing = Vec::new();
        if self.fasta.is_none() && self.from_html.is_none() { missing.push("--fasta"); }
        if self.output.is_none() { missing.push("--output"); }
        if self.database.is_none() { missing.push("--mlst"); }

        let (source, output, database) = match (self.fasta, self.from_html, self.output, self.database) {
            (_, Some(html), Some(o), Some(db)) => (Source::SavedHtml(html), o, db),
            (Some(fasta), None, Some(o), Some(db)) => (Source::Upload(fasta), o, db),
            _ => return Err(usage(&missing)),
        };

        let proxy = match (self.proxy, self.no_proxy) {
            (Some(p), _) => ProxySetting::from_arg(&p),
            (None, true) => ProxySetting::Disabled,
            (None, false) => ProxySetting::Environment,
        };

        Ok(RunOptions {
            source,
            output,
            database,
            net: NetOptions {
                endpoint: self.endpoint,
                proxy,
                timeout: Duration::from_secs(self.timeout),
            },
            save_html: self.save_html,
        })
    }
}

pub fn run() -> Result<RunSummary> {
    let args = parse_args(std::env::args_os())?;
    let (verbose, log_file) = (args.verbose, args.log_file.clone());
    // Usage problems win over log-file problems.
    let opts = args.into_options()?;
    crate::log::init(verbose, log_file.as_deref()).map_err(|e| {
        MlstError::io("cannot open log file", log_file.as_deref().unwrap_or(Path::new("")), e)
    })?;
    logd!("{opts:?}");
    runner::run(&opts)
}
