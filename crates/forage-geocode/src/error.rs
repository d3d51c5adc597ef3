//! Error type for `forage-geocode`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The service answered with a non-success status and (usually) a JSON
  /// error envelope.
  #[error("what3words rejected the request ({code}): {message}")]
  Api { code: String, message: String },

  /// The service returned an address the core grammar rejects.
  #[error("core error: {0}")]
  Core(#[from] forage_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
