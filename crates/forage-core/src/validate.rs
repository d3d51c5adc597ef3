//! Format checks for the two natural keys.
//!
//! These are pure predicates: they return `false` rather than erroring.
//! [`LatinName::parse`](crate::plant::LatinName::parse) and
//! [`GeoAddress::parse`](crate::spot::GeoAddress::parse) turn a failed
//! check into an [`Error`](crate::Error) for callers.

/// Lowercase every word and capitalize the first. Does not validate.
pub fn normalize_latin_name(raw: &str) -> String {
  let lowered = raw.trim().to_lowercase();
  let mut chars = lowered.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

/// Anchored match of "one capitalized word, a space, then one or more
/// lowercase words". Letters only, single spaces, at least two words.
pub fn is_valid_latin_name(name: &str) -> bool {
  let mut words = name.split(' ');
  let Some(genus) = words.next() else {
    return false;
  };

  // Genus: one uppercase letter followed by one or more lowercase letters.
  let mut chars = genus.chars();
  let capitalized = chars
    .next()
    .is_some_and(|c| c.is_alphabetic() && c.is_uppercase());
  if !capitalized || !is_lowercase_word(chars.as_str()) {
    return false;
  }

  // Epithets: one or more all-lowercase words.
  let mut epithets = 0;
  for word in words {
    if !is_lowercase_word(word) {
      return false;
    }
    epithets += 1;
  }
  epithets > 0
}

/// `word.word.word` — exactly three non-empty, letters-only components.
/// Leading slashes (the conventional `///word.word.word` form) are
/// permitted.
pub fn is_valid_geo_address(addr: &str) -> bool {
  let body = addr.trim_start_matches('/');
  let mut parts = 0;
  for part in body.split('.') {
    if part.is_empty() || !part.chars().all(char::is_alphabetic) {
      return false;
    }
    parts += 1;
  }
  parts == 3
}

fn is_lowercase_word(word: &str) -> bool {
  !word.is_empty()
    && word.chars().all(|c| c.is_alphabetic() && c.is_lowercase())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_uppercases_genus_only() {
    assert_eq!(normalize_latin_name("QUERCUS ROBUR"), "Quercus robur");
    assert_eq!(normalize_latin_name("quercus Robur"), "Quercus robur");
    assert_eq!(normalize_latin_name("  quercus robur  "), "Quercus robur");
    assert_eq!(normalize_latin_name(""), "");
  }

  #[test]
  fn valid_latin_names() {
    assert!(is_valid_latin_name("Quercus robur"));
    assert!(is_valid_latin_name("Allium ursinum"));
    // Subspecies: any number of lowercase epithets.
    assert!(is_valid_latin_name("Sambucus nigra caerulea"));
  }

  #[test]
  fn invalid_latin_names() {
    assert!(!is_valid_latin_name(""));
    assert!(!is_valid_latin_name("Quercus"));
    assert!(!is_valid_latin_name("quercus robur"));
    assert!(!is_valid_latin_name("Quercus Robur"));
    assert!(!is_valid_latin_name("Quercus r0bur"));
    assert!(!is_valid_latin_name("Quercus robur."));
    // Anchored: a valid prefix with trailing junk is not acceptance.
    assert!(!is_valid_latin_name("Quercus robur "));
    assert!(!is_valid_latin_name("Quercus  robur"));
    assert!(!is_valid_latin_name("Q robur"));
  }

  #[test]
  fn valid_geo_addresses() {
    assert!(is_valid_geo_address("filled.count.soap"));
    assert!(is_valid_geo_address("///filled.count.soap"));
  }

  #[test]
  fn invalid_geo_addresses() {
    assert!(!is_valid_geo_address(""));
    assert!(!is_valid_geo_address("filled.count"));
    assert!(!is_valid_geo_address("filled.count.soap.extra"));
    assert!(!is_valid_geo_address("filled..soap"));
    assert!(!is_valid_geo_address("filled.c0unt.soap"));
    assert!(!is_valid_geo_address("filled.count.soap "));
  }
}
