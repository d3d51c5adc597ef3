//! what3words-backed implementation of the core [`Geocoder`] trait.
//!
//! [`Geocoder`]: forage_core::geocode::Geocoder

mod w3w;

pub mod error;

pub use error::{Error, Result};
pub use w3w::W3wClient;
