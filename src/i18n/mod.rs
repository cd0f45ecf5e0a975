// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support.
//!
//! Translation tables map a language code to a table of source strings and
//! their translations. Tables for the bundled languages are embedded from
//! `assets/i18n/*.toml`; more can be merged from the configuration.
//!
//! # Features
//!
//! - Locale resolution from CLI, config, or system settings
//! - Primary-subtag fallback (`en-US` falls back to `en`)
//! - Untranslated strings are returned unchanged

use std::collections::BTreeMap;

use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

use crate::config::Config;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Fallback when no other locale can be resolved.
pub const DEFAULT_LANGUAGE: &str = "en";

type Table = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translations {
    tables: BTreeMap<String, Table>,
}

impl Translations {
    /// Loads the tables embedded in the binary. Files that fail to parse are
    /// skipped.
    #[must_use]
    pub fn bundled() -> Self {
        let mut translations = Self::default();
        for file in Asset::iter() {
            let filename = file.as_ref();
            let Some(code) = filename.strip_suffix(".toml") else {
                continue;
            };
            let Some(content) = Asset::get(filename) else {
                continue;
            };
            let text = String::from_utf8_lossy(content.data.as_ref());
            if let Ok(table) = toml::from_str::<Table>(&text) {
                translations.merge(code, table);
            }
        }
        translations
    }

    /// Adds entries for `code`, replacing existing translations of the same
    /// strings.
    pub fn merge(&mut self, code: &str, table: impl IntoIterator<Item = (String, String)>) {
        self.tables.entry(code.to_string()).or_default().extend(table);
    }

    pub fn insert(&mut self, code: &str, source: &str, translation: &str) {
        self.tables
            .entry(code.to_string())
            .or_default()
            .insert(source.to_string(), translation.to_string());
    }

    /// Language codes with at least one table.
    pub fn languages(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Same as [`Translations::languages`], parsed. Codes that are not valid
    /// language tags are left out.
    pub fn available_locales(&self) -> Vec<LanguageIdentifier> {
        self.tables.keys().filter_map(|code| code.parse().ok()).collect()
    }

    /// Looks `source` up for `code`, then for its primary subtag.
    pub fn lookup(&self, code: &str, source: &str) -> Option<&str> {
        if let Some(found) = self.tables.get(code).and_then(|t| t.get(source)) {
            return Some(found.as_str());
        }
        let primary = primary_subtag(code);
        self.tables
            .get(primary.as_str())
            .and_then(|t| t.get(source))
            .map(String::as_str)
    }

    /// Translates `source` into `code`, or returns it unchanged.
    pub fn localize(&self, code: Option<&str>, source: &str) -> String {
        code.and_then(|code| self.lookup(code, source))
            .unwrap_or(source)
            .to_string()
    }
}

/// Primary language subtag of `code`: `"en-US"` gives `"en"`.
pub fn primary_subtag(code: &str) -> String {
    match code.parse::<LanguageIdentifier>() {
        Ok(langid) => langid.language.as_str().to_string(),
        Err(_) => code.split(['-', '_']).next().unwrap_or(code).to_string(),
    }
}

fn match_available(code: &str, available: &[LanguageIdentifier]) -> Option<LanguageIdentifier> {
    let lang = code.parse::<LanguageIdentifier>().ok()?;
    if available.contains(&lang) {
        return Some(lang);
    }
    available
        .iter()
        .find(|candidate| candidate.language == lang.language && candidate.region.is_none())
        .cloned()
}

/// Picks the active locale: CLI argument, then configuration, then the OS
/// locale. Each candidate must match an available locale exactly or by its
/// primary subtag.
pub fn resolve_locale(
    cli_lang: Option<&str>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    if let Some(lang) = cli_lang.and_then(|code| match_available(code, available)) {
        return Some(lang);
    }
    if let Some(lang) = config
        .language
        .as_deref()
        .and_then(|code| match_available(code, available))
    {
        return Some(lang);
    }
    sys_locale::get_locale().and_then(|code| match_available(&code, available))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en".parse().unwrap(), "fr".parse().unwrap()]
    }

    #[test]
    fn bundled_tables_include_english_and_french() {
        let translations = Translations::bundled();
        let languages = translations.languages();
        assert!(languages.contains(&"en".to_string()));
        assert!(languages.contains(&"fr".to_string()));
        assert_eq!(translations.lookup("fr", "Send"), Some("Envoyer"));
    }

    #[test]
    fn lookup_falls_back_to_primary_subtag() {
        let mut translations = Translations::default();
        translations.insert("fr", "Like", "J'aime");
        translations.insert("fr-CA", "Send", "Soumettre");
        assert_eq!(translations.lookup("fr-CA", "Send"), Some("Soumettre"));
        assert_eq!(translations.lookup("fr-CA", "Like"), Some("J'aime"));
        assert_eq!(translations.lookup("de", "Like"), None);
    }

    #[test]
    fn localize_returns_input_when_untranslated() {
        let translations = Translations::default();
        assert_eq!(translations.localize(Some("fr"), "Loaded"), "Loaded");
        assert_eq!(translations.localize(None, "Loaded"), "Loaded");
    }

    #[test]
    fn merge_overrides_bundled_entries() {
        let mut translations = Translations::bundled();
        translations.merge(
            "fr",
            [("Send".to_string(), "Publier".to_string())],
        );
        assert_eq!(translations.lookup("fr", "Send"), Some("Publier"));
        assert_eq!(translations.lookup("fr", "Like"), Some("J'aime"));
    }

    #[test]
    fn primary_subtag_handles_plain_and_regional_codes() {
        assert_eq!(primary_subtag("en-US"), "en");
        assert_eq!(primary_subtag("fr"), "fr");
    }

    #[test]
    fn resolve_locale_prefers_cli() {
        let config = Config {
            language: Some("en".to_string()),
            ..Config::default()
        };
        let lang = resolve_locale(Some("fr"), &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_uses_config_and_regional_fallback() {
        let config = Config {
            language: Some("fr-BE".to_string()),
            ..Config::default()
        };
        let lang = resolve_locale(Some("xx-unknown-tag-!"), &config, &available());
        assert_eq!(lang, Some("fr".parse().unwrap()));
    }

    #[test]
    fn resolve_locale_without_preferences_stays_within_available() {
        let config = Config::default();
        if let Some(lang) = resolve_locale(None, &config, &available()) {
            assert!(available().contains(&lang));
        }
    }
}
