//! # Pure Data Module / 纯数据模块
//!
//! Configuration data structures and the TOML → DTO mapping.
//!
//! This module holds data only. Missing keys fall back to the documented
//! defaults below; values are never validated here. An unreachable
//! `base_url` or an empty `api_key` is a fact for the adapters to report.

use crate::language::Language;

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_AI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub ai: AiConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralConfig {
    pub default_language: Language,
}

/// Remote model settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    /// May be empty; the environment usually supplies it.
    pub api_key: String,
    /// Per-request timeout. Zero or negative values in the file mean the default.
    pub timeout_secs: u64,
    pub cache_classifications: bool,
}

/// Text-to-speech settings.
///
/// `args` may contain `{voice}` and `{text}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub program: String,
    pub args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                default_language: Language::En,
            },
            ai: AiConfig {
                base_url: DEFAULT_AI_BASE_URL.to_string(),
                model: DEFAULT_AI_MODEL.to_string(),
                api_key: String::new(),
                timeout_secs: DEFAULT_AI_TIMEOUT_SECS,
                cache_classifications: false,
            },
            speech: SpeechConfig {
                enabled: true,
                program: "espeak-ng".to_string(),
                args: vec!["-v".to_string(), "{voice}".to_string(), "{text}".to_string()],
            },
        }
    }
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// An unrecognised `default_language` tag keeps the default language.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let section = |name: &str| toml_value.get(name);
        let str_key = |table: &str, key: &str| {
            section(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let bool_key = |table: &str, key: &str| {
            section(table)
                .and_then(|t| t.get(key))
                .and_then(|v| v.as_bool())
        };

        Ok(Self {
            general: GeneralConfig {
                default_language: str_key("general", "default_language")
                    .and_then(|tag| tag.parse().ok())
                    .unwrap_or(defaults.general.default_language),
            },
            ai: AiConfig {
                base_url: str_key("ai", "base_url").unwrap_or(defaults.ai.base_url),
                model: str_key("ai", "model").unwrap_or(defaults.ai.model),
                api_key: str_key("ai", "api_key").unwrap_or(defaults.ai.api_key),
                timeout_secs: section("ai")
                    .and_then(|t| t.get("timeout_secs"))
                    .and_then(|v| v.as_integer())
                    .filter(|secs| *secs > 0)
                    .map(|secs| secs as u64)
                    .unwrap_or(defaults.ai.timeout_secs),
                cache_classifications: bool_key("ai", "cache_classifications")
                    .unwrap_or(defaults.ai.cache_classifications),
            },
            speech: SpeechConfig {
                enabled: bool_key("speech", "enabled").unwrap_or(defaults.speech.enabled),
                program: str_key("speech", "program").unwrap_or(defaults.speech.program),
                args: section("speech")
                    .and_then(|t| t.get("args"))
                    .and_then(|v| v.as_array())
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or(defaults.speech.args),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_empty_document_yields_defaults() {
        let toml_value: Value = toml::from_str("").unwrap();
        let config = AppConfig::from_toml(&toml_value).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ai.model, "gemini-3-flash-preview");
    }

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [general]
            default_language = "ta"

            [ai]
            base_url = "http://localhost:9999"
            model = "test-model"
            api_key = "k"
            timeout_secs = 5
            cache_classifications = true

            [speech]
            enabled = false
            program = "say"
            args = ["{text}"]
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.general.default_language, Language::Ta);
        assert_eq!(config.ai.base_url, "http://localhost:9999");
        assert_eq!(config.ai.model, "test-model");
        assert_eq!(config.ai.api_key, "k");
        assert_eq!(config.ai.timeout_secs, 5);
        assert!(config.ai.cache_classifications);
        assert!(!config.speech.enabled);
        assert_eq!(config.speech.program, "say");
        assert_eq!(config.speech.args, vec!["{text}".to_string()]);
    }

    #[test]
    fn test_from_toml_keeps_empty_strings_as_facts() {
        let toml_str = r#"
            [ai]
            base_url = ""
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        // Not validated: the HTTP adapter reports the bad URL
        assert_eq!(config.ai.base_url, "");
    }

    #[test]
    fn test_from_toml_non_positive_timeout_uses_default() {
        for raw in ["0", "-3"] {
            let toml_value: Value = toml::from_str(&format!("[ai]\ntimeout_secs = {raw}\n")).unwrap();
            let config = AppConfig::from_toml(&toml_value).unwrap();
            assert_eq!(config.ai.timeout_secs, DEFAULT_AI_TIMEOUT_SECS);
        }
    }

    #[test]
    fn test_from_toml_ignores_unknown_language_tag() {
        let toml_str = r#"
            [general]
            default_language = "fr"
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.general.default_language, Language::En);
    }
}
