use super::*;

/// Failure modes of the fetch-and-summarize pipeline. Configuration
/// problems are caught before any network traffic; the rest map onto the
/// stage that produced them.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("api error ({status}): {message}")]
  Api { message: String, status: u16 },
  #[error("configuration error: {0}")]
  Config(&'static str),
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),
  #[error("parse error: {0}")]
  Parse(&'static str),
}
