//! The user preference bag carried on the profile document.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("language code must be two lowercase letters, got {input:?}")]
pub struct ParseLanguageCodeError {
    /// The unrecognised input value.
    pub input: String,
}

/// Two-letter interface language code.
///
/// # Examples
/// ```
/// # use backend::domain::LanguageCode;
/// let code: LanguageCode = "fr".parse().unwrap();
/// assert_eq!(code.as_str(), "fr");
/// assert_eq!(LanguageCode::default().as_str(), "fr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// String form of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("fr".to_owned())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = ParseLanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 2 && s.chars().all(|c| c.is_ascii_lowercase()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(ParseLanguageCodeError {
                input: s.to_owned(),
            })
        }
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = ParseLanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

/// Per-user settings stored alongside the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    /// Whether the user receives activity notifications.
    pub notifications: bool,
    /// Interface language.
    pub language: LanguageCode,
    /// Whether edits save automatically.
    pub auto_save: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            language: LanguageCode::default(),
            auto_save: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::french("fr")]
    #[case::english("en")]
    fn valid_language_codes_parse(#[case] input: &str) {
        let code: LanguageCode = input.parse().expect("valid code");
        assert_eq!(code.as_str(), input);
    }

    #[rstest]
    #[case::empty("")]
    #[case::uppercase("FR")]
    #[case::too_long("fra")]
    #[case::digits("f1")]
    fn invalid_language_codes_are_rejected(#[case] input: &str) {
        let result: Result<LanguageCode, _> = input.parse();
        assert!(result.is_err());
    }

    #[test]
    fn defaults_match_the_first_run_document() {
        let prefs = Preferences::default();
        assert!(prefs.notifications);
        assert!(prefs.auto_save);
        assert_eq!(prefs.language.as_str(), "fr");
    }

    #[test]
    fn preferences_serialise_in_camel_case() {
        let value = serde_json::to_value(Preferences::default()).expect("serialises");
        assert_eq!(value["autoSave"], true);
        assert_eq!(value["language"], "fr");
    }
}
