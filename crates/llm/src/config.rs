//! Provider selection from environment variables.
//!
//! | Variable                               | Effect                                 |
//! |----------------------------------------|----------------------------------------|
//! | `REASONFLOW_PROVIDER`                  | `anthropic` or `gemini`                |
//! | `ANTHROPIC_API_KEY`                    | Anthropic credential                   |
//! | `GEMINI_API_KEY` / `GOOGLE_API_KEY`    | Gemini credential (first one set wins) |
//! | `REASONFLOW_MODEL`                     | Model override                         |
//! | `REASONFLOW_BASE_URL`                  | Endpoint override                      |
//!
//! Without `REASONFLOW_PROVIDER` the provider is picked from whichever key is
//! present, Anthropic first.

use std::fmt;
use std::str::FromStr;

use pipeline::{LlmError, ModelName};

pub const PROVIDER_VAR: &str = "REASONFLOW_PROVIDER";
pub const MODEL_VAR: &str = "REASONFLOW_MODEL";
pub const BASE_URL_VAR: &str = "REASONFLOW_BASE_URL";
pub const ANTHROPIC_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const GEMINI_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "gemini" | "google" => Ok(Self::Gemini),
            other => Err(LlmError::Configuration {
                message: format!("unknown provider '{other}' (expected anthropic or gemini)"),
            }),
        }
    }
}

/// Values given on the command line; each wins over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct ProviderOverrides {
    pub kind: Option<ProviderKind>,
    pub model: Option<ModelName>,
    pub base_url: Option<String>,
}

/// Everything needed to build one provider.
#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: Option<ModelName>,
    pub base_url: Option<String>,
}

// Keeps the key out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolves the configuration from the process environment.
    pub fn from_env(overrides: ProviderOverrides) -> Result<Self, LlmError> {
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    pub fn resolve<F>(overrides: ProviderOverrides, lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let anthropic_key = var(ANTHROPIC_KEY_VAR);
        let gemini_key = GEMINI_KEY_VARS.iter().find_map(|name| var(*name));

        let kind = match overrides.kind {
            Some(kind) => kind,
            None => match var(PROVIDER_VAR) {
                Some(raw) => raw.parse()?,
                None if anthropic_key.is_some() => ProviderKind::Anthropic,
                None if gemini_key.is_some() => ProviderKind::Gemini,
                None => {
                    return Err(LlmError::Configuration {
                        message: format!(
                            "no API key found; set {ANTHROPIC_KEY_VAR} or {}",
                            GEMINI_KEY_VARS.join(" / ")
                        ),
                    })
                }
            },
        };

        let api_key = match kind {
            ProviderKind::Anthropic => anthropic_key,
            ProviderKind::Gemini => gemini_key,
        }
        .ok_or_else(|| LlmError::Configuration {
            message: format!("no API key found for provider {kind}"),
        })?;

        let model = overrides
            .model
            .or_else(|| var(MODEL_VAR).and_then(ModelName::new));
        let base_url = overrides.base_url.or_else(|| var(BASE_URL_VAR));

        Ok(Self {
            kind,
            api_key,
            model,
            base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn anthropic_key_is_preferred_when_both_are_set() {
        let config = ProviderConfig::resolve(
            ProviderOverrides::default(),
            env(&[("ANTHROPIC_API_KEY", "a"), ("GEMINI_API_KEY", "g")]),
        )
        .unwrap();
        assert_eq!(config.kind, ProviderKind::Anthropic);
        assert_eq!(config.api_key, "a");
    }

    #[test]
    fn google_key_is_accepted_for_gemini() {
        let config =
            ProviderConfig::resolve(ProviderOverrides::default(), env(&[("GOOGLE_API_KEY", "g")]))
                .unwrap();
        assert_eq!(config.kind, ProviderKind::Gemini);
        assert_eq!(config.api_key, "g");
    }

    #[test]
    fn provider_variable_selects_the_key() {
        let config = ProviderConfig::resolve(
            ProviderOverrides::default(),
            env(&[
                ("REASONFLOW_PROVIDER", "Gemini"),
                ("ANTHROPIC_API_KEY", "a"),
                ("GEMINI_API_KEY", "g"),
            ]),
        )
        .unwrap();
        assert_eq!(config.kind, ProviderKind::Gemini);
        assert_eq!(config.api_key, "g");
    }

    #[test]
    fn overrides_win_over_environment() {
        let overrides = ProviderOverrides {
            kind: Some(ProviderKind::Anthropic),
            model: ModelName::new("claude-cli"),
            base_url: Some("http://localhost:1234".to_string()),
        };
        let config = ProviderConfig::resolve(
            overrides,
            env(&[
                ("REASONFLOW_PROVIDER", "gemini"),
                ("REASONFLOW_MODEL", "from-env"),
                ("REASONFLOW_BASE_URL", "http://env"),
                ("ANTHROPIC_API_KEY", "a"),
            ]),
        )
        .unwrap();
        assert_eq!(config.kind, ProviderKind::Anthropic);
        assert_eq!(config.model.unwrap().as_str(), "claude-cli");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:1234"));
    }

    #[test]
    fn missing_key_for_chosen_provider_is_rejected() {
        let err = ProviderConfig::resolve(
            ProviderOverrides::default(),
            env(&[("REASONFLOW_PROVIDER", "anthropic"), ("GEMINI_API_KEY", "g")]),
        )
        .unwrap_err();
        assert!(matches!(err, LlmError::Configuration { .. }));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let err = ProviderConfig::resolve(
            ProviderOverrides::default(),
            env(&[("ANTHROPIC_API_KEY", "   ")]),
        )
        .unwrap_err();
        assert!(matches!(err, LlmError::Configuration { .. }));
    }

    #[test]
    fn unknown_provider_name_is_rejected() {
        assert!("openai".parse::<ProviderKind>().is_err());
        assert_eq!("CLAUDE".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = ProviderConfig::resolve(
            ProviderOverrides::default(),
            env(&[("ANTHROPIC_API_KEY", "sk-secret")]),
        )
        .unwrap();
        assert!(!format!("{config:?}").contains("sk-secret"));
    }
}
