//! Notes — write-once timestamped free text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which accumulating list a plant note is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
  /// How to recognise the plant in the field.
  Identification,
  /// What the plant is good for once found.
  Use,
}

/// A timestamped free-text note. Never updated after insertion; empty text
/// is allowed. Plants and spots reference notes by stringified id in their
/// accumulating lists — notes are never embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
  pub note_id: i64,
  /// Assigned by the store at insertion; immutable.
  pub time:    DateTime<Utc>,
  pub text:    String,
}
