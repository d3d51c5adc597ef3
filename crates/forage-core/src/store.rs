//! The `ForageStore` trait — the storage seam.
//!
//! Implemented by storage backends (e.g. `forage-store-sqlite`). The
//! repository operations in [`crate::repo`] depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  note::Note,
  plant::{LatinName, NewPlant, Plant},
  spot::{GeoAddress, NewSpot, Spot},
};

/// Abstraction over a forage store backend.
///
/// Natural-key uniqueness (`latin`, `w3w_name`) is enforced by the
/// backend, not by callers. All methods return `Send` futures so the trait
/// can be used in multi-threaded async runtimes.
pub trait ForageStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Plants ────────────────────────────────────────────────────────────

  /// Exact-match lookup by Latin name. `None` if absent.
  fn find_plant<'a>(
    &'a self,
    latin: &'a LatinName,
  ) -> impl Future<Output = Result<Option<Plant>, Self::Error>> + Send + 'a;

  /// Insert a new plant row and return it with its assigned id.
  fn insert_plant(
    &self,
    input: NewPlant,
  ) -> impl Future<Output = Result<Plant, Self::Error>> + Send + '_;

  /// Persist the list fields of an existing plant. Keyed by id; the
  /// natural key is never rewritten.
  fn update_plant<'a>(
    &'a self,
    plant: &'a Plant,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Spots ─────────────────────────────────────────────────────────────

  /// Exact-match lookup by three-word address. `None` if absent.
  fn find_spot<'a>(
    &'a self,
    address: &'a GeoAddress,
  ) -> impl Future<Output = Result<Option<Spot>, Self::Error>> + Send + 'a;

  /// Insert a new spot row and return it with its assigned id.
  fn insert_spot(
    &self,
    input: NewSpot,
  ) -> impl Future<Output = Result<Spot, Self::Error>> + Send + '_;

  /// Persist the list fields of an existing spot. Coordinates and the
  /// natural key are never rewritten.
  fn update_spot<'a>(
    &'a self,
    spot: &'a Spot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Notes ─────────────────────────────────────────────────────────────

  /// Insert a note stamped with the current time and return it with its
  /// assigned id. The text is stored verbatim; empty text is allowed.
  fn add_note<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<Note, Self::Error>> + Send + 'a;

  /// Retrieve a note by id. `None` if absent (a dangling reference from an
  /// accumulating list).
  fn get_note(
    &self,
    note_id: i64,
  ) -> impl Future<Output = Result<Option<Note>, Self::Error>> + Send + '_;

  // ── Linking ───────────────────────────────────────────────────────────

  /// Persist both sides of a plant↔spot link in one transaction: either
  /// both rows are updated or neither is.
  fn update_link<'a>(
    &'a self,
    plant: &'a Plant,
    spot: &'a Spot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
