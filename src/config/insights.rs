//! Insights client settings loaded from environment variables.
//!
//! The API key is optional. Without one the client still builds, and every request
//! falls back to the fixed "could not connect" message.

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the text-generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightsSettings {
    /// API key, if configured
    pub api_key: Option<String>,
    /// Model name used in the request path
    pub model: String,
    /// Service root, without trailing slash
    pub base_url: String,
}

impl Default for InsightsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl InsightsSettings {
    /// Reads `INSIGHTS_API_KEY` (or `API_KEY`), `INSIGHTS_MODEL` and `INSIGHTS_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var("INSIGHTS_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let model = std::env::var("INSIGHTS_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = std::env::var("INSIGHTS_BASE_URL")
            .map_or_else(|_| DEFAULT_BASE_URL.to_string(), |url| url.trim_end_matches('/').to_string());

        Self {
            api_key,
            model,
            base_url,
        }
    }

    /// Returns true when an API key is available.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_disabled() {
        let settings = InsightsSettings::default();
        assert!(!settings.is_enabled());
        assert_eq!(settings.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_from_env_has_a_model() {
        // Depends on the environment, so only check what is always true
        let settings = InsightsSettings::from_env();
        assert!(!settings.model.is_empty());
        assert!(!settings.base_url.ends_with('/'));
    }
}
