//! Plants, keyed by canonical Latin binomial name.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  list::AccumList,
  merge,
  validate::{is_valid_latin_name, normalize_latin_name},
};

// ─── Natural key ─────────────────────────────────────────────────────────────

/// A canonical Latin binomial name — the plant's natural key.
///
/// Construction normalizes ("QUERCUS ROBUR" → "Quercus robur") and then
/// validates, so a held `LatinName` is always well-formed. The key is
/// unique per plant and immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatinName(String);

impl LatinName {
  pub fn parse(raw: &str) -> Result<Self> {
    let canonical = normalize_latin_name(raw);
    if !is_valid_latin_name(&canonical) {
      return Err(Error::InvalidLatinName(raw.to_owned()));
    }
    Ok(Self(canonical))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for LatinName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A plant record. Everything except the natural key accumulates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
  pub plant_id:  i64,
  pub latin:     LatinName,
  /// Common names, in the order they were recorded.
  pub common:    AccumList,
  /// Natural keys of spots this plant has been found at.
  pub spots:     AccumList,
  /// Ids of identification notes.
  pub id_notes:  AccumList,
  /// Ids of usage notes.
  pub use_notes: AccumList,
}

impl Plant {
  /// Merge a patch into this record under the accumulate rule. The natural
  /// key is untouched.
  pub fn apply(&mut self, patch: PlantPatch) {
    merge::accumulate(&mut self.common, patch.common);
    merge::accumulate(&mut self.spots, patch.spots);
    merge::accumulate(&mut self.id_notes, patch.id_notes);
    merge::accumulate(&mut self.use_notes, patch.use_notes);
  }
}

/// Input for inserting a plant that does not exist yet. The store assigns
/// the id.
#[derive(Debug, Clone)]
pub struct NewPlant {
  pub latin:     LatinName,
  pub common:    AccumList,
  pub spots:     AccumList,
  pub id_notes:  AccumList,
  pub use_notes: AccumList,
}

impl NewPlant {
  /// A fresh record with every list field empty.
  pub fn new(latin: LatinName) -> Self {
    Self {
      latin,
      common: AccumList::new(),
      spots: AccumList::new(),
      id_notes: AccumList::new(),
      use_notes: AccumList::new(),
    }
  }

  pub fn apply(&mut self, patch: PlantPatch) {
    merge::accumulate(&mut self.common, patch.common);
    merge::accumulate(&mut self.spots, patch.spots);
    merge::accumulate(&mut self.id_notes, patch.id_notes);
    merge::accumulate(&mut self.use_notes, patch.use_notes);
  }
}

/// The caller-supplied partial record for an upsert: only the elements to
/// append. Empty elements are dropped at merge time — empty means "no
/// change requested".
#[derive(Debug, Clone, Default)]
pub struct PlantPatch {
  pub common:    Vec<String>,
  pub spots:     Vec<String>,
  pub id_notes:  Vec<String>,
  pub use_notes: Vec<String>,
}
