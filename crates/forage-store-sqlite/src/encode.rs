//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, natural keys in their
//! canonical string form, and accumulating lists as `", "`-joined blobs.

use chrono::{DateTime, Utc};
use forage_core::{
  list::AccumList,
  note::Note,
  plant::{LatinName, Plant},
  spot::{Coordinates, GeoAddress, Spot},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `plants` row.
pub struct RawPlant {
  pub plant_id:  i64,
  pub latin:     String,
  pub common:    String,
  pub spots:     String,
  pub id_notes:  String,
  pub use_notes: String,
}

impl RawPlant {
  pub fn into_plant(self) -> Result<Plant> {
    Ok(Plant {
      plant_id:  self.plant_id,
      latin:     LatinName::parse(&self.latin)?,
      common:    AccumList::from_column(&self.common),
      spots:     AccumList::from_column(&self.spots),
      id_notes:  AccumList::from_column(&self.id_notes),
      use_notes: AccumList::from_column(&self.use_notes),
    })
  }
}

/// Raw values read directly from a `spots` row.
pub struct RawSpot {
  pub spot_id:  i64,
  pub w3w_name: String,
  pub lat:      f64,
  pub lng:      f64,
  pub plants:   String,
  pub notes:    String,
}

impl RawSpot {
  pub fn into_spot(self) -> Result<Spot> {
    Ok(Spot {
      spot_id:  self.spot_id,
      w3w_name: GeoAddress::parse(&self.w3w_name)?,
      coords:   Coordinates { lat: self.lat, lng: self.lng },
      plants:   AccumList::from_column(&self.plants),
      notes:    AccumList::from_column(&self.notes),
    })
  }
}

/// Raw values read directly from a `notes` row.
pub struct RawNote {
  pub note_id: i64,
  pub time:    String,
  pub text:    String,
}

impl RawNote {
  pub fn into_note(self) -> Result<Note> {
    Ok(Note {
      note_id: self.note_id,
      time:    decode_dt(&self.time)?,
      text:    self.text,
    })
  }
}
