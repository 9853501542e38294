// src/core/net.rs
// Multipart POST to the BIGSdb sequence query page (blocking, one attempt).

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{multipart::Form, Client};

use crate::config::consts::*;
use crate::config::options::{NetOptions, ProxySetting};
use crate::error::{MlstError, Result};

/// One sequence query: which file, against which scheme database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRequest {
    fasta: PathBuf,
    database: String,
}

impl SubmissionRequest {
    pub fn new(fasta: impl Into<PathBuf>, database: impl Into<String>) -> Self {
        Self { fasta: fasta.into(), database: database.into() }
    }

    pub fn fasta(&self) -> &Path {
        &self.fasta
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Value of the `db` form field, e.g. `pubmlst_cdifficile_seqdef`.
    pub fn db_field(&self) -> String {
        format!("{DB_PREFIX}{}{DB_SUFFIX}", self.database())
    }

    /// Text fields in the order they are sent.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![(FIELD_DB, self.db_field())];
        fields.extend(FIXED_FIELDS.iter().map(|&(k, v)| (k, v.to_string())));
        fields
    }

    fn form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        form.file(FIELD_UPLOAD, self.fasta())
            .map_err(|e| MlstError::io("cannot read sequence file", self.fasta(), e))
    }
}

pub fn build_client(net: &NetOptions) -> Result<Client> {
    let transport = |source| MlstError::Transport { url: net.endpoint.clone(), source };

    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(net.timeout)
        .user_agent(USER_AGENT);

    builder = match &net.proxy {
        ProxySetting::Environment => builder,
        ProxySetting::Disabled => builder.no_proxy(),
        ProxySetting::Url(url) => builder.proxy(reqwest::Proxy::all(url).map_err(transport)?),
    };
    builder.build().map_err(transport)
}

/// Send the query and return the response body as text.
/// Non-2xx statuses are errors; nothing is retried.
pub fn submit(req: &SubmissionRequest, net: &NetOptions) -> Result<String> {
    let transport = |source| MlstError::Transport { url: net.endpoint.clone(), source };

    let client = build_client(net)?;
    let form = req.form()?;

    logf!("POST {} (db={}, file={})", net.endpoint, req.db_field(), req.fasta().display());
    let resp = client
        .post(&net.endpoint)
        .multipart(form)
        .send()
        .map_err(transport)?;

    let status = resp.status();
    logd!("HTTP {status} from {}", net.endpoint);
    let body = resp.error_for_status().map_err(transport)?.text().map_err(transport)?;
    logd!("Response body: {} bytes", body.len());
    Ok(body)
}
