//! Row sources for the timeline pipeline.
//!
//! Fetches delimited text from a local file or a published spreadsheet URL
//! and parses it into a [`RowSet`]. Fetching is the only asynchronous step;
//! everything downstream runs synchronously on the resolved rows.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tl_core::RowSet;

/// Default request timeout for remote sources.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Row source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Reading a local file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The body is not valid delimited text.
    #[error("invalid delimited data: {0}")]
    Parse(#[from] csv::Error),
}

/// Where rows come from.
#[derive(Clone, PartialEq, Eq)]
pub enum Source {
    /// A delimited file on disk.
    File { path: PathBuf, delimiter: u8 },
    /// A spreadsheet published as delimited text.
    Remote { url: String, delimiter: u8 },
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, delimiter } => f
                .debug_struct("File")
                .field("path", path)
                .field("delimiter", &char::from(*delimiter))
                .finish(),
            Self::Remote { url, delimiter } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("delimiter", &char::from(*delimiter))
                .finish(),
        }
    }
}

impl Source {
    /// Interprets `location` as a URL when it has an HTTP scheme, otherwise as
    /// a path. Tab-delimited paths (`.tsv`, `.tab`) default to tabs.
    pub fn parse(location: &str, delimiter: Option<u8>) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::Remote {
                url: location.to_string(),
                delimiter: delimiter.unwrap_or(b','),
            };
        }
        let path = PathBuf::from(location);
        let delimiter = delimiter.unwrap_or_else(|| default_delimiter(&path));
        Self::File { path, delimiter }
    }

    /// Fetches and parses all rows.
    pub async fn fetch(&self) -> Result<RowSet, SourceError> {
        match self {
            Self::File { path, delimiter } => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        path: path.clone(),
                        source,
                    })?;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "read source file");
                parse_delimited(bytes.as_slice(), *delimiter)
            }
            Self::Remote { url, delimiter } => {
                let body = fetch_remote(url).await?;
                parse_delimited(body.as_bytes(), *delimiter)
            }
        }
    }
}

fn default_delimiter(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

async fn fetch_remote(url: &str) -> Result<String, SourceError> {
    let http = reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(SourceError::ClientBuild)?;

    let response = http.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SourceError::Http {
            status: status.as_u16(),
            body,
        });
    }
    tracing::debug!(%url, bytes = body.len(), "fetched remote source");
    Ok(body)
}

/// Parses delimited text with a header row.
///
/// Headers and fields are trimmed. Records may differ in length; checking
/// them is left to the event store.
pub fn parse_delimited<R: std::io::Read>(
    reader: R,
    delimiter: u8,
) -> Result<RowSet, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let records = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    tracing::debug!(records = records.len(), "parsed delimited rows");
    Ok(RowSet::new(headers, records))
}
