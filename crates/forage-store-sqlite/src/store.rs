//! [`SqliteStore`] — the SQLite implementation of [`ForageStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use forage_core::{
  note::Note,
  plant::{LatinName, NewPlant, Plant},
  spot::{GeoAddress, NewSpot, Spot},
  store::ForageStore,
};

use crate::{
  Error, Result,
  encode::{RawNote, RawPlant, RawSpot, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A forage store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ForageStore impl ────────────────────────────────────────────────────────

impl ForageStore for SqliteStore {
  type Error = Error;

  // ── Plants ────────────────────────────────────────────────────────────────

  async fn find_plant(&self, latin: &LatinName) -> Result<Option<Plant>> {
    let key = latin.as_str().to_owned();

    let raw: Option<RawPlant> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT plant_id, latin, common, spots, id_notes, use_notes
               FROM plants WHERE latin = ?1",
              rusqlite::params![key],
              |row| {
                Ok(RawPlant {
                  plant_id:  row.get(0)?,
                  latin:     row.get(1)?,
                  common:    row.get(2)?,
                  spots:     row.get(3)?,
                  id_notes:  row.get(4)?,
                  use_notes: row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPlant::into_plant).transpose()
  }

  async fn insert_plant(&self, input: NewPlant) -> Result<Plant> {
    let latin     = input.latin.as_str().to_owned();
    let common    = input.common.to_column();
    let spots     = input.spots.to_column();
    let id_notes  = input.id_notes.to_column();
    let use_notes = input.use_notes.to_column();

    let plant_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO plants (latin, common, spots, id_notes, use_notes)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![latin, common, spots, id_notes, use_notes],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Plant {
      plant_id,
      latin: input.latin,
      common: input.common,
      spots: input.spots,
      id_notes: input.id_notes,
      use_notes: input.use_notes,
    })
  }

  async fn update_plant(&self, plant: &Plant) -> Result<()> {
    let plant_id  = plant.plant_id;
    let common    = plant.common.to_column();
    let spots     = plant.spots.to_column();
    let id_notes  = plant.id_notes.to_column();
    let use_notes = plant.use_notes.to_column();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE plants
           SET common = ?1, spots = ?2, id_notes = ?3, use_notes = ?4
           WHERE plant_id = ?5",
          rusqlite::params![common, spots, id_notes, use_notes, plant_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Spots ─────────────────────────────────────────────────────────────────

  async fn find_spot(&self, address: &GeoAddress) -> Result<Option<Spot>> {
    let key = address.as_str().to_owned();

    let raw: Option<RawSpot> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT spot_id, w3w_name, lat, lng, plants, notes
               FROM spots WHERE w3w_name = ?1",
              rusqlite::params![key],
              |row| {
                Ok(RawSpot {
                  spot_id:  row.get(0)?,
                  w3w_name: row.get(1)?,
                  lat:      row.get(2)?,
                  lng:      row.get(3)?,
                  plants:   row.get(4)?,
                  notes:    row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawSpot::into_spot).transpose()
  }

  async fn insert_spot(&self, input: NewSpot) -> Result<Spot> {
    let w3w_name = input.w3w_name.as_str().to_owned();
    let lat      = input.coords.lat;
    let lng      = input.coords.lng;
    let plants   = input.plants.to_column();
    let notes    = input.notes.to_column();

    let spot_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO spots (w3w_name, lat, lng, plants, notes)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![w3w_name, lat, lng, plants, notes],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Spot {
      spot_id,
      w3w_name: input.w3w_name,
      coords: input.coords,
      plants: input.plants,
      notes: input.notes,
    })
  }

  async fn update_spot(&self, spot: &Spot) -> Result<()> {
    let spot_id = spot.spot_id;
    let plants  = spot.plants.to_column();
    let notes   = spot.notes.to_column();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE spots SET plants = ?1, notes = ?2 WHERE spot_id = ?3",
          rusqlite::params![plants, notes, spot_id],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn add_note(&self, text: &str) -> Result<Note> {
    let time = Utc::now();
    let time_str = encode_dt(time);
    let text = text.to_owned();
    let body = text.clone();

    let note_id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO notes (time, text) VALUES (?1, ?2)",
          rusqlite::params![time_str, body],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Note { note_id, time, text })
  }

  async fn get_note(&self, note_id: i64) -> Result<Option<Note>> {
    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT note_id, time, text FROM notes WHERE note_id = ?1",
              rusqlite::params![note_id],
              |row| {
                Ok(RawNote {
                  note_id: row.get(0)?,
                  time:    row.get(1)?,
                  text:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawNote::into_note).transpose()
  }

  // ── Linking ───────────────────────────────────────────────────────────────

  async fn update_link(&self, plant: &Plant, spot: &Spot) -> Result<()> {
    let plant_id  = plant.plant_id;
    let common    = plant.common.to_column();
    let p_spots   = plant.spots.to_column();
    let id_notes  = plant.id_notes.to_column();
    let use_notes = plant.use_notes.to_column();

    let spot_id  = spot.spot_id;
    let s_plants = spot.plants.to_column();
    let s_notes  = spot.notes.to_column();

    // Both sides in one transaction: a failure rolls back both updates and
    // never leaves a one-sided link.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE plants
           SET common = ?1, spots = ?2, id_notes = ?3, use_notes = ?4
           WHERE plant_id = ?5",
          rusqlite::params![common, p_spots, id_notes, use_notes, plant_id],
        )?;
        tx.execute(
          "UPDATE spots SET plants = ?1, notes = ?2 WHERE spot_id = ?3",
          rusqlite::params![s_plants, s_notes, spot_id],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
