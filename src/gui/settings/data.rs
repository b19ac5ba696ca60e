use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

pub const SETTINGS_FILE: &str = "settings.json";
pub const BACKEND_URL_ENV: &str = "LIBRIS_BACKEND_URL";

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub dark_mode: bool,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            dark_mode: true,
        }
    }
}

impl SettingsData {
    /// Replaces the stored backend URL with a non-blank override.
    pub fn with_backend_override(self, backend_url: Option<String>) -> Self {
        match backend_url.map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => Self { backend_url: url, ..self },
            _ => self,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn is_valid_backend_url(url: &str) -> bool {
        let url = url.trim();
        url.strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|host| !host.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let settings = SettingsData::default();
        assert_eq!(settings.backend_url, "http://localhost:5000");
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert!(settings.dark_mode);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{"backend_url":"http://books.lan"}"#).unwrap();
        assert_eq!(settings.backend_url, "http://books.lan");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn override_replaces_backend_url_unless_blank() {
        let settings = SettingsData::default()
            .with_backend_override(Some(" http://10.0.0.2:8080 ".to_string()));
        assert_eq!(settings.backend_url, "http://10.0.0.2:8080");

        let settings = settings.with_backend_override(Some("   ".to_string()));
        assert_eq!(settings.backend_url, "http://10.0.0.2:8080");

        let settings = settings.with_backend_override(None);
        assert_eq!(settings.backend_url, "http://10.0.0.2:8080");
    }

    #[test]
    fn zero_timeout_is_raised_to_one_second() {
        let settings = SettingsData { request_timeout_secs: 0, ..Default::default() };
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn backend_url_validation() {
        assert!(SettingsData::is_valid_backend_url("http://localhost:5000"));
        assert!(SettingsData::is_valid_backend_url("https://books.example"));
        assert!(!SettingsData::is_valid_backend_url("localhost:5000"));
        assert!(!SettingsData::is_valid_backend_url("http://"));
    }
}
