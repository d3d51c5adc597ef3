//! Integration tests for `SqliteStore` against an in-memory database,
//! driving the repository operations end to end.

use std::collections::HashMap;

use forage_core::{
  Error as CoreError,
  geocode::Geocoder,
  note::NoteKind,
  plant::{LatinName, PlantPatch},
  repo,
  spot::{Coordinates, GeoAddress, SpotPatch},
  store::ForageStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn oak() -> LatinName {
  LatinName::parse("Quercus robur").unwrap()
}

fn soap() -> GeoAddress {
  GeoAddress::parse("filled.count.soap").unwrap()
}

// ─── Geocoder stub ───────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("unknown address: {0}")]
struct UnknownAddress(String);

/// Geocoder backed by a fixed table; errors on anything not in it.
struct StaticGeocoder(HashMap<String, Coordinates>);

impl StaticGeocoder {
  fn with_soap_spot() -> Self {
    let mut table = HashMap::new();
    table.insert("filled.count.soap".to_owned(), Coordinates {
      lat: 51.520847,
      lng: -0.195521,
    });
    Self(table)
  }
}

impl Geocoder for StaticGeocoder {
  type Error = UnknownAddress;

  async fn address_to_coordinates(
    &self,
    address: &GeoAddress,
  ) -> Result<Coordinates, UnknownAddress> {
    self
      .0
      .get(address.as_str())
      .copied()
      .ok_or_else(|| UnknownAddress(address.to_string()))
  }

  async fn coordinates_to_address(
    &self,
    coords: Coordinates,
  ) -> Result<GeoAddress, UnknownAddress> {
    self
      .0
      .iter()
      .find(|(_, c)| c.lat == coords.lat && c.lng == coords.lng)
      .map(|(addr, _)| GeoAddress::parse(addr).unwrap())
      .ok_or_else(|| UnknownAddress(format!("{},{}", coords.lat, coords.lng)))
  }
}

// ─── Plants ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_plant_missing_returns_none() {
  let s = store().await;
  let found = s.find_plant(&oak()).await.unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn upsert_creates_once_then_merges() {
  let s = store().await;

  let first = repo::upsert_plant(&s, &oak(), PlantPatch {
    common: vec!["Oak".into()],
    ..Default::default()
  })
  .await
  .unwrap();

  let second = repo::upsert_plant(&s, &oak(), PlantPatch {
    common: vec!["English oak".into()],
    ..Default::default()
  })
  .await
  .unwrap();

  // Same row, not a duplicate.
  assert_eq!(second.plant_id, first.plant_id);
  assert_eq!(second.common.to_column(), "Oak, English oak");

  let stored = s.find_plant(&oak()).await.unwrap().unwrap();
  assert_eq!(stored.plant_id, first.plant_id);
  assert_eq!(stored.common.to_column(), "Oak, English oak");
}

#[tokio::test]
async fn accumulation_keeps_duplicates() {
  let s = store().await;

  for _ in 0..2 {
    repo::upsert_plant(&s, &oak(), PlantPatch {
      common: vec!["English oak".into()],
      ..Default::default()
    })
    .await
    .unwrap();
  }

  let stored = s.find_plant(&oak()).await.unwrap().unwrap();
  assert_eq!(stored.common.to_column(), "English oak, English oak");
}

#[tokio::test]
async fn natural_key_unique_index_rejects_duplicate_insert() {
  let s = store().await;
  s.insert_plant(forage_core::plant::NewPlant::new(oak()))
    .await
    .unwrap();

  let err = s
    .insert_plant(forage_core::plant::NewPlant::new(oak()))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}

#[tokio::test]
async fn get_plant_missing_is_not_found() {
  let s = store().await;
  let err = repo::get_plant(&s, &oak()).await.unwrap_err();
  assert!(matches!(err, CoreError::PlantNotFound(_)));
}

// ─── Plant notes ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn identification_note_end_to_end() {
  let s = store().await;

  let (plant, note) =
    repo::add_note_to_plant(&s, &oak(), NoteKind::Identification, "acorns present")
      .await
      .unwrap();

  assert_eq!(plant.id_notes.len(), 1);
  assert!(plant.id_notes.contains(&note.note_id.to_string()));
  assert!(plant.use_notes.is_empty());

  // The notes table holds exactly that text under the assigned id.
  let stored = s.get_note(note.note_id).await.unwrap().unwrap();
  assert_eq!(stored.text, "acorns present");
  assert_eq!(stored.time, note.time);
}

#[tokio::test]
async fn use_note_lands_in_use_list() {
  let s = store().await;

  let (plant, note) =
    repo::add_note_to_plant(&s, &oak(), NoteKind::Use, "good for tanning")
      .await
      .unwrap();

  assert!(plant.id_notes.is_empty());
  assert_eq!(plant.use_notes.to_column(), note.note_id.to_string());
}

#[tokio::test]
async fn empty_note_text_is_allowed() {
  let s = store().await;
  let note = repo::add_note(&s, "").await.unwrap();
  let stored = s.get_note(note.note_id).await.unwrap().unwrap();
  assert_eq!(stored.text, "");
}

// ─── Spots ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn spot_creation_stores_geocoder_coordinates_verbatim() {
  let s = store().await;
  let g = StaticGeocoder::with_soap_spot();

  let spot = repo::upsert_spot(&s, &g, &soap(), SpotPatch::default())
    .await
    .unwrap();
  assert_eq!(spot.coords.lat, 51.520847);
  assert_eq!(spot.coords.lng, -0.195521);

  let stored = s.find_spot(&soap()).await.unwrap().unwrap();
  assert_eq!(stored.coords, spot.coords);
}

#[tokio::test]
async fn spot_edit_never_recomputes_coordinates() {
  let s = store().await;
  let g = StaticGeocoder::with_soap_spot();

  let created = repo::upsert_spot(&s, &g, &soap(), SpotPatch::default())
    .await
    .unwrap();

  // Editing through a geocoder that no longer knows the address must
  // succeed: coordinates are resolved exactly once.
  let empty = StaticGeocoder(HashMap::new());
  let (spot, _note) =
    repo::add_note_to_spot(&s, &empty, &soap(), "shady bank, north side")
      .await
      .unwrap();

  assert_eq!(spot.coords, created.coords);
  assert_eq!(spot.notes.len(), 1);
}

#[tokio::test]
async fn spot_creation_fails_on_geocoder_error_and_stores_nothing() {
  let s = store().await;
  let g = StaticGeocoder(HashMap::new());

  let err = repo::upsert_spot(&s, &g, &soap(), SpotPatch::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Geocode(_)));

  assert!(s.find_spot(&soap()).await.unwrap().is_none());
}

// ─── Linking ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn link_updates_both_sides() {
  let s = store().await;
  let g = StaticGeocoder::with_soap_spot();

  // Both records exist beforehand.
  repo::upsert_plant(&s, &oak(), PlantPatch::default())
    .await
    .unwrap();
  repo::upsert_spot(&s, &g, &soap(), SpotPatch::default())
    .await
    .unwrap();

  repo::link_plant_spot(&s, &g, &oak(), &soap()).await.unwrap();

  let plant = s.find_plant(&oak()).await.unwrap().unwrap();
  let spot = s.find_spot(&soap()).await.unwrap().unwrap();
  assert!(plant.spots.contains("filled.count.soap"));
  assert!(spot.plants.contains("Quercus robur"));
}

#[tokio::test]
async fn link_creates_missing_sides() {
  let s = store().await;
  let g = StaticGeocoder::with_soap_spot();

  let (plant, spot) =
    repo::link_plant_spot(&s, &g, &oak(), &soap()).await.unwrap();

  assert!(plant.spots.contains(soap().as_str()));
  assert!(spot.plants.contains(oak().as_str()));

  // Both persisted, not just returned.
  let stored_plant = s.find_plant(&oak()).await.unwrap().unwrap();
  let stored_spot = s.find_spot(&soap()).await.unwrap().unwrap();
  assert_eq!(stored_plant.spots.to_column(), "filled.count.soap");
  assert_eq!(stored_spot.plants.to_column(), "Quercus robur");
}

#[tokio::test]
async fn linking_twice_accumulates_twice() {
  let s = store().await;
  let g = StaticGeocoder::with_soap_spot();

  repo::link_plant_spot(&s, &g, &oak(), &soap()).await.unwrap();
  repo::link_plant_spot(&s, &g, &oak(), &soap()).await.unwrap();

  let plant = s.find_plant(&oak()).await.unwrap().unwrap();
  assert_eq!(
    plant.spots.to_column(),
    "filled.count.soap, filled.count.soap"
  );
}
