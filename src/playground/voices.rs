//! Voice filtering and language display helpers.

use serde::{Deserialize, Serialize};

use crate::manager::Voice;

/// Synthetic language value matching every voice.
pub const ALL_LANGUAGES: &str = "all";

const LABEL_DESCRIPTION_CHARS: usize = 20;

const LANGUAGES: &[(&str, &str, &str)] = &[
    // (code, display name, flag country)
    ("en", "English", "us"),
    ("zh", "Chinese", "cn"),
    ("es", "Spanish", "es"),
    ("fr", "French", "fr"),
    ("de", "German", "de"),
    ("ja", "Japanese", "jp"),
    ("ko", "Korean", "kr"),
    ("ru", "Russian", "ru"),
    ("it", "Italian", "it"),
    ("nl", "Dutch", "nl"),
    ("hi", "Hindi", "in"),
    ("pl", "Polish", "pl"),
    ("pt", "Portuguese", "pt"),
    ("tr", "Turkish", "tr"),
    ("sv", "Swedish", "se"),
    ("ar", "Arabic", "sa"),
    ("hu", "Hungarian", "hu"),
    ("cs", "Czech", "cz"),
    ("da", "Danish", "dk"),
    ("no", "Norwegian", "no"),
    ("fi", "Finnish", "fi"),
    ("ro", "Romanian", "ro"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    ALL_LANGUAGES.to_string()
}

impl Default for VoiceFilter {
    fn default() -> Self {
        Self { search: String::new(), language: default_language() }
    }
}

impl VoiceFilter {
    #[must_use]
    pub fn matches(&self, voice: &Voice) -> bool {
        let matches_search = voice
            .description
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_language = self.language == ALL_LANGUAGES || voice.language == self.language;
        matches_search && matches_language
    }
}

/// Voices visible under `filter`, in list order.
#[must_use]
pub fn filter_voices<'a>(voices: &'a [Voice], filter: &VoiceFilter) -> Vec<&'a Voice> {
    voices.iter().filter(|v| filter.matches(v)).collect()
}

/// `all` plus every distinct language in `voices`, sorted.
#[must_use]
pub fn available_languages(voices: &[Voice]) -> Vec<String> {
    let mut languages: Vec<String> = std::iter::once(ALL_LANGUAGES.to_string())
        .chain(voices.iter().map(|v| v.language.clone()))
        .collect();
    languages.sort();
    languages.dedup();
    languages
}

/// Human-readable name for a language code.
#[must_use]
pub fn language_name(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    if code == ALL_LANGUAGES {
        return "Any language".to_string();
    }
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map_or_else(|| code.to_uppercase(), |(_, name, _)| (*name).to_string())
}

/// Country code used to pick a flag icon for a language.
#[must_use]
pub fn flag_country_code(code: &str) -> String {
    let lower = code.to_lowercase();
    LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == lower)
        .map_or_else(|| lower.clone(), |(_, _, country)| (*country).to_string())
}

/// Short picker label: language name plus the start of the description.
#[must_use]
pub fn voice_label(voice: &Voice) -> String {
    let head: String = voice.description.chars().take(LABEL_DESCRIPTION_CHARS).collect();
    format!("{} - {head}...", language_name(&voice.language))
}

#[cfg(test)]
#[path = "voices_test.rs"]
mod tests;
