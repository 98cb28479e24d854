use crate::services::gemini_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// Generation-service settings, resolved once at startup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Read settings from the process environment. A missing key is not an
    /// error here; the planner reports it on every request instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_empty(API_KEY_VAR),
            model: non_empty(MODEL_VAR).unwrap_or(defaults.model),
            base_url: non_empty(BASE_URL_VAR).unwrap_or(defaults.base_url),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = PlannerConfig::from_lookup(lookup(&[]));
        assert!(!config.has_api_key());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "gemini-2.0-flash"),
            (BASE_URL_VAR, "http://localhost:9000"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = PlannerConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")]));
        assert!(!config.has_api_key());
    }
}
