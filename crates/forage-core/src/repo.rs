//! The create-or-update operations over plants, spots, and notes.
//!
//! These are the only entry points that mutate the store. Natural keys
//! arrive as already-parsed newtypes, so every name and address seen here
//! is normalized and valid. Backend failures are boxed into
//! [`Error::Store`] / [`Error::Geocode`].

use crate::{
  Error, Result,
  geocode::Geocoder,
  note::{Note, NoteKind},
  plant::{LatinName, NewPlant, Plant, PlantPatch},
  spot::{GeoAddress, NewSpot, Spot, SpotPatch},
  store::ForageStore,
};

// ─── Plants ──────────────────────────────────────────────────────────────────

/// Lookup that treats absence as an error. Backs read-only views where the
/// record is assumed to exist.
pub async fn get_plant<S: ForageStore>(
  store: &S,
  latin: &LatinName,
) -> Result<Plant> {
  store
    .find_plant(latin)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::PlantNotFound(latin.to_string()))
}

/// Create-if-absent, else merge-update. Returns the record as persisted.
pub async fn upsert_plant<S: ForageStore>(
  store: &S,
  latin: &LatinName,
  patch: PlantPatch,
) -> Result<Plant> {
  match store.find_plant(latin).await.map_err(Error::store)? {
    Some(mut plant) => {
      plant.apply(patch);
      store.update_plant(&plant).await.map_err(Error::store)?;
      Ok(plant)
    }
    None => {
      let mut input = NewPlant::new(latin.clone());
      input.apply(patch);
      store.insert_plant(input).await.map_err(Error::store)
    }
  }
}

/// Record a note and attach its id to the plant's identification or use
/// list, creating the plant if needed.
pub async fn add_note_to_plant<S: ForageStore>(
  store: &S,
  latin: &LatinName,
  kind: NoteKind,
  text: &str,
) -> Result<(Plant, Note)> {
  let note = store.add_note(text).await.map_err(Error::store)?;

  let mut patch = PlantPatch::default();
  let id = note.note_id.to_string();
  match kind {
    NoteKind::Identification => patch.id_notes.push(id),
    NoteKind::Use => patch.use_notes.push(id),
  }

  let plant = upsert_plant(store, latin, patch).await?;
  Ok((plant, note))
}

// ─── Spots ───────────────────────────────────────────────────────────────────

/// Lookup that treats absence as an error.
pub async fn get_spot<S: ForageStore>(
  store: &S,
  address: &GeoAddress,
) -> Result<Spot> {
  store
    .find_spot(address)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::SpotNotFound(address.to_string()))
}

/// Create-if-absent, else merge-update. The geocoder is consulted only
/// when the spot is first recorded; edits never recompute coordinates.
pub async fn upsert_spot<S: ForageStore, G: Geocoder>(
  store: &S,
  geocoder: &G,
  address: &GeoAddress,
  patch: SpotPatch,
) -> Result<Spot> {
  match store.find_spot(address).await.map_err(Error::store)? {
    Some(mut spot) => {
      spot.apply(patch);
      store.update_spot(&spot).await.map_err(Error::store)?;
      Ok(spot)
    }
    None => {
      let coords = geocoder
        .address_to_coordinates(address)
        .await
        .map_err(Error::geocode)?;
      let mut input = NewSpot::new(address.clone(), coords);
      input.apply(patch);
      store.insert_spot(input).await.map_err(Error::store)
    }
  }
}

/// Record a note about the spot itself, creating the spot if needed.
pub async fn add_note_to_spot<S: ForageStore, G: Geocoder>(
  store: &S,
  geocoder: &G,
  address: &GeoAddress,
  text: &str,
) -> Result<(Spot, Note)> {
  let note = store.add_note(text).await.map_err(Error::store)?;

  let mut patch = SpotPatch::default();
  patch.notes.push(note.note_id.to_string());

  let spot = upsert_spot(store, geocoder, address, patch).await?;
  Ok((spot, note))
}

// ─── Notes ───────────────────────────────────────────────────────────────────

/// Record a free-standing note attached to nothing.
pub async fn add_note<S: ForageStore>(store: &S, text: &str) -> Result<Note> {
  store.add_note(text).await.map_err(Error::store)
}

// ─── Linking ─────────────────────────────────────────────────────────────────

/// Associate a plant with a spot, creating either side if absent. Both
/// cross-reference lists are persisted through a single transactional
/// store call, so a failure leaves neither side updated.
pub async fn link_plant_spot<S: ForageStore, G: Geocoder>(
  store: &S,
  geocoder: &G,
  latin: &LatinName,
  address: &GeoAddress,
) -> Result<(Plant, Spot)> {
  let mut plant = upsert_plant(store, latin, PlantPatch::default()).await?;
  let mut spot =
    upsert_spot(store, geocoder, address, SpotPatch::default()).await?;

  plant.spots.push(address.as_str());
  spot.plants.push(latin.as_str());
  store.update_link(&plant, &spot).await.map_err(Error::store)?;

  Ok((plant, spot))
}
