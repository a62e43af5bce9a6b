use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://exhibitor-backend.onrender.com/api";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    refresh_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `dashboard.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw, Path::new(SETTINGS_FILE));
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings.api_base = normalize_api_base(&settings.api_base)?;
    Ok(settings)
}

fn apply_file(settings: &mut ClientSettings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.refresh_interval_secs {
        settings.refresh_interval = Duration::from_secs(v);
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout = Duration::from_secs(v);
    }
}

fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("DASHBOARD_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = lookup("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = lookup("APP__REFRESH_INTERVAL_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.refresh_interval = Duration::from_secs(parsed);
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout = Duration::from_secs(parsed);
        }
    }
}

/// Trims and validates an API base, dropping any trailing slash so paths can
/// be appended segment by segment.
pub fn normalize_api_base(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_API_BASE.to_string());
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid api base '{raw}'"))?;
    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!("api base '{raw}' must be an http(s) url"));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn defaults_match_backend_deployment() {
        let settings = ClientSettings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.refresh_interval, Duration::from_secs(300));
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = ClientSettings::default();
        apply_file(
            &mut settings,
            "api_base = \"http://localhost:5000/api\"\nrefresh_interval_secs = 60\n",
            Path::new("dashboard.toml"),
        );
        assert_eq!(settings.api_base, "http://localhost:5000/api");
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
        assert_eq!(settings.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let mut settings = ClientSettings::default();
        apply_file(&mut settings, "api_base = [", Path::new("dashboard.toml"));
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn app_prefixed_env_wins() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DASHBOARD_API_BASE", "http://a.example/api"),
            ("APP__API_BASE", "http://b.example/api"),
            ("APP__REFRESH_INTERVAL_SECS", "not-a-number"),
            ("APP__REQUEST_TIMEOUT_SECS", "3"),
        ]);
        let mut settings = ClientSettings::default();
        apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.api_base, "http://b.example/api");
        assert_eq!(settings.refresh_interval, DEFAULT_REFRESH_INTERVAL);
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn normalizes_trailing_slash() {
        assert_eq!(
            normalize_api_base(" http://localhost:5000/api/ ").expect("valid"),
            "http://localhost:5000/api"
        );
        assert_eq!(normalize_api_base("").expect("empty"), DEFAULT_API_BASE);
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(normalize_api_base("ftp://example.com").is_err());
        assert!(normalize_api_base("not a url").is_err());
    }
}
