//! Free-text answer normalization and comparison.
//!
//! Answers are case-folded, stripped of diacritics (decomposed, then
//! combining marks dropped), and trimmed. After that only exact equality
//! counts: there is no partial or edit-distance matching.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a string for comparison.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    folded.trim().to_string()
}

/// Whether a candidate answer matches the expected one after normalization.
pub fn matches(candidate: &str, expected: &str) -> bool {
    normalize(candidate) == normalize(expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accents_and_case_ignored() {
        assert!(matches("Bogotá", "bogota"));
        assert!(matches(" BOGOTA ", "Bogotá"));
        assert!(matches("popayan", "Popayán"));
        assert!(matches("San José", "san jose"));
    }

    #[test]
    fn different_cities_do_not_match() {
        assert!(!matches("Medellín", "Cali"));
        assert!(!matches("Bogot", "Bogotá"));
    }

    #[test]
    fn empty_candidate() {
        assert!(!matches("", "Cali"));
        assert!(!matches("   ", "Cali"));
        assert!(matches("", ""));
    }

    #[test]
    fn enye_decomposes_to_n() {
        assert_eq!(normalize("Nariño"), "narino");
    }

    #[test]
    fn inner_whitespace_kept() {
        assert_eq!(normalize("  Santa  Marta "), "santa  marta");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-zA-Z áéíóúüñÁÉÍÓÚÑ]{0,24}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn matches_is_reflexive(s in "[a-zA-Z áéíóúüñÁÉÍÓÚÑ]{0,24}") {
            prop_assert!(matches(&s, &s));
        }
    }
}
