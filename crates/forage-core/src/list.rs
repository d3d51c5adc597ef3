//! [`AccumList`] — the ordered, append-only list behind every accumulating
//! field.
//!
//! Lists live in a single `", "`-joined text column in storage. An element
//! that itself contains a comma therefore splits on read; that is inherent
//! to the column layout and accepted.

use serde::{Deserialize, Serialize};

/// An ordered list of string elements. Elements are only ever appended,
/// never removed, and never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccumList(Vec<String>);

impl AccumList {
  pub fn new() -> Self { Self(Vec::new()) }

  /// Append one element at the end. Duplicates are kept.
  pub fn push(&mut self, element: impl Into<String>) {
    self.0.push(element.into());
  }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn contains(&self, element: &str) -> bool {
    self.0.iter().any(|e| e == element)
  }

  /// Decode from the stored column form. An empty column is the empty
  /// list.
  pub fn from_column(raw: &str) -> Self {
    if raw.is_empty() {
      return Self::new();
    }
    Self(raw.split(',').map(|e| e.trim_start().to_owned()).collect())
  }

  /// Encode to the stored column form.
  pub fn to_column(&self) -> String { self.0.join(", ") }
}

impl FromIterator<String> for AccumList {
  fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn column_round_trip() {
    let list = AccumList::from_column("Oak, English oak");
    assert_eq!(list.iter().collect::<Vec<_>>(), ["Oak", "English oak"]);
    assert_eq!(list.to_column(), "Oak, English oak");
  }

  #[test]
  fn empty_column_is_empty_list() {
    let list = AccumList::from_column("");
    assert!(list.is_empty());
    assert_eq!(list.to_column(), "");
  }

  #[test]
  fn push_keeps_order_and_duplicates() {
    let mut list = AccumList::new();
    list.push("12");
    list.push("7");
    list.push("12");
    assert_eq!(list.iter().collect::<Vec<_>>(), ["12", "7", "12"]);
    assert_eq!(list.to_column(), "12, 7, 12");
  }
}
