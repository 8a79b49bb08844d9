use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "email_triage.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub service_url: String,
    /// No timeout unless configured; a hung request then stays in `Processing`.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:5000".into(),
            request_timeout_secs: None,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn with_service_url(mut self, service_url: impl Into<String>) -> Self {
        self.service_url = service_url.into();
        self
    }

    /// Trims the service url and checks that it is an absolute http(s) url.
    pub fn validated(mut self) -> anyhow::Result<Self> {
        let trimmed = self.service_url.trim().trim_end_matches('/').to_string();
        let parsed = url::Url::parse(&trimmed)
            .with_context(|| format!("invalid service url '{}'", self.service_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("service url must start with http:// or https://, got '{trimmed}'");
        }
        self.service_url = trimmed;
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file if it parses, then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.service_url {
                    settings.service_url = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = Some(v);
                }
            }
            Err(err) => {
                tracing::warn!("ignoring unreadable settings file '{}': {err}", path.display());
            }
        }
    }

    if let Some(v) = env("EMAIL_TRIAGE_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = env("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    settings
}
