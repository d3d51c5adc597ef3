//! The create-or-update merge rules.
//!
//! An incoming patch carries only the fields the caller explicitly set.
//! Accumulating fields append; scalar fields replace; an empty or absent
//! incoming value means "no change requested", never "clear this field".
//! Natural keys are not part of any patch and are never altered.

use crate::list::AccumList;

/// Append every non-empty incoming element, in order. Never deduplicates:
/// sending the same value twice records it twice.
pub fn accumulate<I, S>(existing: &mut AccumList, incoming: I)
where
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  for element in incoming {
    let element = element.into();
    if !element.is_empty() {
      existing.push(element);
    }
  }
}

/// Replace the stored value with a non-empty incoming one. `None` and `""`
/// both leave the stored value untouched.
pub fn replace(existing: &mut String, incoming: Option<String>) {
  match incoming {
    Some(value) if !value.is_empty() => *existing = value,
    _ => {}
  }
}
