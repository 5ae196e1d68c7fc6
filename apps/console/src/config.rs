use std::{fs, io, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::protocol::DEFAULT_API_BASE;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "order-console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base: Option<String>,
    log_filter: Option<String>,
}

pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_config_file(config_path)? {
        if let Some(v) = file_cfg.api_base {
            settings.api_base = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ORDER_CONSOLE_API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = lookup("ORDER_CONSOLE_LOG") {
        settings.log_filter = v;
    }
}

fn read_config_file(explicit: Option<&Path>) -> anyhow::Result<Option<FileSettings>> {
    let path = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if explicit.is_none() && err.kind() == io::ErrorKind::NotFound => {
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
    };

    let file_cfg = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(Some(file_cfg))
}

pub fn normalize_api_base(raw_api_base: &str) -> anyhow::Result<String> {
    let api_base = raw_api_base.trim().trim_end_matches('/');
    if api_base.is_empty() {
        bail!("api base url must not be empty");
    }

    let url = Url::parse(api_base).with_context(|| format!("invalid api base url '{api_base}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "api base url '{api_base}' must use http or https, not '{}'",
            url.scheme()
        );
    }
    if url.host_str().is_none() {
        bail!("api base url '{api_base}' has no host");
    }

    Ok(api_base.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
