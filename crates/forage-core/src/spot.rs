//! Spots — physical places, keyed by a geocoded three-word address.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result, list::AccumList, merge, validate::is_valid_geo_address,
};

// ─── Natural key ─────────────────────────────────────────────────────────────

/// A geocoded three-word address (`word.word.word`) — the spot's natural
/// key.
///
/// Construction validates and strips the conventional leading slashes, so
/// a held `GeoAddress` is always in canonical dotted form. The key is
/// unique per spot and immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoAddress(String);

impl GeoAddress {
  pub fn parse(raw: &str) -> Result<Self> {
    if !is_valid_geo_address(raw) {
      return Err(Error::InvalidGeoAddress(raw.to_owned()));
    }
    Ok(Self(raw.trim_start_matches('/').to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for GeoAddress {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A latitude/longitude pair in WGS 84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A spot record. Coordinates are resolved through the geocoder when the
/// spot is first recorded and never recomputed on later edits; the list
/// fields accumulate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spot {
  pub spot_id:  i64,
  pub w3w_name: GeoAddress,
  pub coords:   Coordinates,
  /// Natural keys of plants found at this spot.
  pub plants:   AccumList,
  /// Ids of notes about the spot itself.
  pub notes:    AccumList,
}

impl Spot {
  /// Merge a patch into this record under the accumulate rule. The natural
  /// key and coordinates are untouched.
  pub fn apply(&mut self, patch: SpotPatch) {
    merge::accumulate(&mut self.plants, patch.plants);
    merge::accumulate(&mut self.notes, patch.notes);
  }
}

/// Input for inserting a spot that does not exist yet. The store assigns
/// the id; the caller has already resolved the coordinates.
#[derive(Debug, Clone)]
pub struct NewSpot {
  pub w3w_name: GeoAddress,
  pub coords:   Coordinates,
  pub plants:   AccumList,
  pub notes:    AccumList,
}

impl NewSpot {
  /// A fresh record with every list field empty.
  pub fn new(w3w_name: GeoAddress, coords: Coordinates) -> Self {
    Self {
      w3w_name,
      coords,
      plants: AccumList::new(),
      notes: AccumList::new(),
    }
  }

  pub fn apply(&mut self, patch: SpotPatch) {
    merge::accumulate(&mut self.plants, patch.plants);
    merge::accumulate(&mut self.notes, patch.notes);
  }
}

/// The caller-supplied partial record for an upsert. Coordinates are
/// deliberately absent: they are derived from the address exactly once.
#[derive(Debug, Clone, Default)]
pub struct SpotPatch {
  pub plants: Vec<String>,
  pub notes:  Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_strips_leading_slashes() {
    let addr = GeoAddress::parse("///filled.count.soap").unwrap();
    assert_eq!(addr.as_str(), "filled.count.soap");
  }

  #[test]
  fn parse_rejects_empty_component() {
    assert!(matches!(
      GeoAddress::parse("filled..soap"),
      Err(Error::InvalidGeoAddress(_))
    ));
  }
}
