// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::consts::OUTPUT_SEP,
    config::options::{RunOptions, Source},
    core::net::{self, SubmissionRequest},
    error::Result,
    file, specs,
    report::TypeSection,
};

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub output: PathBuf,
    pub allele_rows: usize,
    pub type_rows: Option<usize>,
}

/// Fetch (or replay) the result page, flatten it, write the report.
/// Nothing is written to `opts.output` unless the page yields a report.
pub fn run(opts: &RunOptions) -> Result<RunSummary> {
    let body = match &opts.source {
        Source::Upload(fasta) => {
            let req = SubmissionRequest::new(fasta, &opts.database);
            net::submit(&req, &opts.net)?
        }
        Source::SavedHtml(path) => {
            logf!("Reading saved response {}", path.display());
            file::read_html(path)?
        }
    };

    if let Some(path) = &opts.save_html {
        file::save_html(path, &body)?;
    }

    let doc = specs::sequence_query::scrape(&body)?;
    let type_rows = match &doc.types {
        TypeSection::Rows(rows) => Some(rows.len()),
        TypeSection::Missing => None,
    };
    logf!(
        "{} allele rows, {}",
        doc.alleles.len(),
        type_rows.map_or_else(|| "no sequence type".to_string(), |n| format!("{n} type rows"))
    );

    file::write_report(&opts.output, &doc.render(OUTPUT_SEP))?;

    Ok(RunSummary { output: opts.output.clone(), allele_rows: doc.alleles.len(), type_rows })
}
