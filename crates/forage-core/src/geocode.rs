//! The geocoding collaborator contract.
//!
//! Converts between a three-word address and coordinates. `forage-geocode`
//! implements this over HTTP; tests substitute a fixed table. A geocoding
//! failure is fatal for the current operation and is never retried.

use std::future::Future;

use crate::spot::{Coordinates, GeoAddress};

pub trait Geocoder: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Resolve a three-word address to coordinates.
  fn address_to_coordinates<'a>(
    &'a self,
    address: &'a GeoAddress,
  ) -> impl Future<Output = Result<Coordinates, Self::Error>> + Send + 'a;

  /// Resolve coordinates back to the nearest three-word address.
  fn coordinates_to_address(
    &self,
    coords: Coordinates,
  ) -> impl Future<Output = Result<GeoAddress, Self::Error>> + Send + '_;
}
