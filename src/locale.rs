use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{error::FarmError, species::Species};

const EMBEDDED_MESSAGES: &str = include_str!("../locales/messages.yaml");

/// Message keys every locale must define, species nouns excluded.
pub const MESSAGE_KEYS: [&str; 10] = [
    "pet_info",
    "choose_language",
    "language",
    "exit",
    "gen_farm",
    "ffood_info",
    "calc_farm_info",
    "default_name",
    "usual_name",
    "special_name",
];

/// Message templates per locale code.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LocaleBundle {
    locales: BTreeMap<String, BTreeMap<String, String>>,
}

impl LocaleBundle {
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_MESSAGES).context("Failed to parse embedded locale bundle")
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let bundle: LocaleBundle = serde_yaml::from_str(text)?;
        Ok(bundle)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read locale file {}", path.display()))?;
        Self::from_yaml_str(&data).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Checks that every locale carries the full key set.
    pub fn validate(&self) -> Result<(), FarmError> {
        if self.locales.is_empty() {
            return Err(FarmError::NoLocales);
        }
        let species_keys = Species::ALL.map(Species::key);
        for (locale, messages) in &self.locales {
            for key in MESSAGE_KEYS.iter().chain(species_keys.iter()) {
                if !messages.contains_key(*key) {
                    return Err(FarmError::MissingMessage {
                        locale: locale.clone(),
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn lookup(&self, locale: &str, key: &str) -> Result<&str, FarmError> {
        let messages = self
            .locales
            .get(locale)
            .ok_or_else(|| FarmError::UnknownLocale(locale.to_string()))?;
        messages
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| FarmError::MissingMessage {
                locale: locale.to_string(),
                key: key.to_string(),
            })
    }

    pub fn available_locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bundle_is_complete() {
        let bundle = LocaleBundle::embedded().unwrap();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.available_locales(), vec!["en", "ru"]);
        assert_eq!(bundle.lookup("en", "cat").unwrap(), "cat");
        assert_eq!(bundle.lookup("ru", "language").unwrap(), "Русский");
    }

    #[test]
    fn lookup_reports_unknown_locale_and_key() {
        let bundle = LocaleBundle::embedded().unwrap();
        assert_eq!(
            bundle.lookup("fr", "cat"),
            Err(FarmError::UnknownLocale("fr".to_string()))
        );
        assert_eq!(
            bundle.lookup("en", "horse"),
            Err(FarmError::MissingMessage {
                locale: "en".to_string(),
                key: "horse".to_string(),
            })
        );
    }

    #[test]
    fn validate_finds_missing_species_noun() {
        let bundle = LocaleBundle::from_yaml_str(
            r#"
de:
  pet_info: "%v"
  choose_language: "Sprache:"
  language: "Deutsch"
  exit: "Beenden"
  gen_farm: "Hof erzeugen"
  ffood_info: "%v"
  calc_farm_info: "..."
  default_name: "%v"
  usual_name: "%v %v"
  special_name: "%v %v"
  cat: "Katze"
  dog: "Hund"
"#,
        )
        .unwrap();
        assert_eq!(
            bundle.validate(),
            Err(FarmError::MissingMessage {
                locale: "de".to_string(),
                key: "cow".to_string(),
            })
        );
    }

    #[test]
    fn empty_bundle_is_invalid() {
        let bundle = LocaleBundle::from_yaml_str("{}").unwrap();
        assert_eq!(bundle.validate(), Err(FarmError::NoLocales));
    }

    #[test]
    fn load_reads_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.yaml");
        fs::write(&path, "xx:\n  cat: \"miau\"\n").unwrap();

        let bundle = LocaleBundle::load(&path).unwrap();
        assert_eq!(bundle.lookup("xx", "cat").unwrap(), "miau");
    }
}
