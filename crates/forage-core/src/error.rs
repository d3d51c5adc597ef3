//! Error types for `forage-core`.

use thiserror::Error;

/// Boxed source for failures bubbling up from a storage or geocoding
/// backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not a valid latin binomial name: {0:?}")]
  InvalidLatinName(String),

  #[error("not a valid three-word address: {0:?}")]
  InvalidGeoAddress(String),

  #[error("no plant recorded under {0:?}")]
  PlantNotFound(String),

  #[error("no spot recorded at {0:?}")]
  SpotNotFound(String),

  #[error("storage error: {0}")]
  Store(#[source] BoxError),

  #[error("geocoding error: {0}")]
  Geocode(#[source] BoxError),
}

impl Error {
  /// Wrap a storage backend error.
  pub fn store(err: impl Into<BoxError>) -> Self { Self::Store(err.into()) }

  /// Wrap a geocoding collaborator error.
  pub fn geocode(err: impl Into<BoxError>) -> Self {
    Self::Geocode(err.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
