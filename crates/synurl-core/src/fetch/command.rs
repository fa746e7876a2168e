//! External fetch tool backend.
//!
//! The tool is invoked as `program args... <url> <output.json>` and is
//! expected to write a [`FetchResult`] to the output path. Its exit code is
//! ignored; only the written file's `status` field counts.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, Stdio};

use super::{FetchResult, Fetcher};

#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: String,
    args: Vec<String>,
}

impl CommandFetcher {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Fetcher for CommandFetcher {
    fn fetch(&mut self, url: &str) -> Result<FetchResult> {
        let output = tempfile::Builder::new()
            .prefix("synurl-fetch-")
            .suffix(".json")
            .tempfile()
            .context("create fetch output file")?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .arg(output.path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .with_context(|| format!("run fetch command {:?}", self.program))?;
        if !status.success() {
            tracing::debug!(url, %status, "fetch command exited unsuccessfully");
        }

        Ok(read_result(output.path()))
    }
}

/// A missing, empty or unparseable output file counts as a failed fetch.
fn read_result(path: &Path) -> FetchResult {
    let parsed = std::fs::read(path)
        .map_err(anyhow::Error::from)
        .and_then(|bytes| serde_json::from_slice::<FetchResult>(&bytes).map_err(Into::into));
    match parsed {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(path = %path.display(), "unusable fetch output: {}", e);
            FetchResult::failed()
        }
    }
}
