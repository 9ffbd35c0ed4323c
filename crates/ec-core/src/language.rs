use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported interface language.
///
/// The set is closed: every localized screen text is a total mapping over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    En,
    Ta,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language tag: {0}")]
pub struct UnsupportedLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ta];

    /// Short tag used in configuration and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ta => "ta",
        }
    }

    /// BCP-47 tag handed to the speech synthesizer.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Ta => "ta-IN",
        }
    }

    /// Language name used inside model prompts ("Respond in ...").
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "Tamil",
        }
    }

    /// Name shown on the language switch.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ta => "தமிழ்",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::Ta,
            Language::Ta => Language::En,
        }
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Language::En),
            "ta" | "ta-in" => Ok(Language::Ta),
            other => Err(UnsupportedLanguage(other.to_string())),
        }
    }
}
