//! Input checks applied before anything reaches the store.
//!
//! Lengths are counted in characters, not bytes, so accented and non-Latin
//! vocabulary gets the same budget as ASCII.

use crate::card_engine::{config::EngineConfig, error::InputError, models::NewVocabulary};

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), InputError> {
    if value.chars().count() > max {
        return Err(InputError::TooLong { field, max });
    }
    Ok(())
}

fn check_present(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        return Err(InputError::Blank { field });
    }
    Ok(())
}

/// Validate a new vocabulary item; a missing description becomes empty.
pub fn vocabulary(config: &EngineConfig, input: NewVocabulary) -> Result<NewVocabulary, InputError> {
    check_present("Term", &input.term)?;
    check_len("Term", &input.term, config.max_term_len)?;
    if let Some(description) = &input.description {
        check_len("Description", description, config.max_description_len)?;
    }
    check_present("Translation", &input.translation)?;
    check_len("Translation", &input.translation, config.max_translation_len)?;

    Ok(NewVocabulary {
        description: Some(input.description.unwrap_or_default()),
        ..input
    })
}

/// Validate a new language name given how many languages already exist.
/// Returns the trimmed name.
pub fn language_name<'a>(
    config: &EngineConfig,
    name: &'a str,
    existing: usize,
) -> Result<&'a str, InputError> {
    if existing >= config.max_languages {
        return Err(InputError::LanguageLimit(config.max_languages));
    }
    let name = name.trim();
    check_present("Language", name)?;
    check_len("Language", name, config.max_language_name_len)?;
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(term: &str, translation: &str, description: Option<&str>) -> NewVocabulary {
        NewVocabulary {
            term: term.into(),
            translation: translation.into(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn accepts_boundary_lengths() {
        let c = EngineConfig::default();
        let ok = vocabulary(&c, input(&"a".repeat(50), &"b".repeat(50), Some(&"c".repeat(100))));
        assert!(ok.is_ok());
    }

    #[test]
    fn rejects_over_length_fields_in_order() {
        let c = EngineConfig::default();
        let err = vocabulary(&c, input(&"a".repeat(51), "x", None)).unwrap_err();
        assert_eq!(err, InputError::TooLong { field: "Term", max: 50 });

        let err = vocabulary(&c, input("a", "x", Some(&"d".repeat(101)))).unwrap_err();
        assert_eq!(err, InputError::TooLong { field: "Description", max: 100 });

        let err = vocabulary(&c, input("a", &"t".repeat(51), None)).unwrap_err();
        assert_eq!(err, InputError::TooLong { field: "Translation", max: 50 });
    }

    #[test]
    fn counts_characters_not_bytes() {
        let c = EngineConfig::default();
        assert!(vocabulary(&c, input(&"ü".repeat(50), "x", None)).is_ok());
    }

    #[test]
    fn missing_description_becomes_empty() {
        let c = EngineConfig::default();
        let v = vocabulary(&c, input("Haus", "house", None)).unwrap();
        assert_eq!(v.description.as_deref(), Some(""));
    }

    #[test]
    fn blank_term_rejected() {
        let c = EngineConfig::default();
        assert_eq!(
            vocabulary(&c, input("   ", "x", None)).unwrap_err(),
            InputError::Blank { field: "Term" }
        );
    }

    #[test]
    fn language_limits() {
        let c = EngineConfig::default();
        assert_eq!(language_name(&c, "  Deutsch ", 0).unwrap(), "Deutsch");
        assert_eq!(language_name(&c, "x", 14).unwrap_err(), InputError::LanguageLimit(14));
        assert!(matches!(language_name(&c, "Abcdefghijklm", 0), Err(InputError::TooLong { .. })));
        assert!(matches!(language_name(&c, "", 0), Err(InputError::Blank { .. })));
    }
}
