//! Display strings in English and Arabic

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const BUNDLED_TRANSLATIONS: &str = include_str!("../data/translations.json");

/// Supported display languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

/// Layout direction implied by a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn direction(self) -> TextDirection {
        match self {
            Language::En => TextDirection::Ltr,
            Language::Ar => TextDirection::Rtl,
        }
    }

    /// The other language, as offered by the header switch
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

/// Key to per-language string table
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<String, HashMap<Language, String>>,
}

impl Translations {
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::from_json(BUNDLED_TRANSLATIONS)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    /// Look up `key` in `language`, falling back to English and then to the
    /// key itself.
    pub fn lookup<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        let Some(entry) = self.entries.get(key) else {
            return key;
        };
        entry
            .get(&language)
            .or_else(|| entry.get(&Language::En))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_languages() {
        let t = Translations::bundled().unwrap();
        assert_eq!(t.lookup("book_now", Language::En), "Book Now");
        assert_eq!(t.lookup("book_now", Language::Ar), "احجز الآن");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let t = Translations::bundled().unwrap();
        assert_eq!(t.lookup("no_such_key", Language::Ar), "no_such_key");
    }

    #[test]
    fn test_missing_language_falls_back_to_english() {
        let t = Translations::from_json(r#"{ "hello": { "en": "Hello" } }"#).unwrap();
        assert_eq!(t.lookup("hello", Language::Ar), "Hello");
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::En.direction(), TextDirection::Ltr);
        assert_eq!(Language::Ar.direction(), TextDirection::Rtl);
        assert_eq!(Language::Ar.toggled(), Language::En);
    }

    #[test]
    fn test_language_parsing() {
        assert!(matches!("EN".parse::<Language>(), Ok(Language::En)));
        assert!(matches!("arabic".parse::<Language>(), Ok(Language::Ar)));
        assert!("fr".parse::<Language>().is_err());
    }
}
