use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "shop.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub account_service_url: String,
    pub order_service_url: String,
    pub user_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            account_service_url: "http://localhost:8081".into(),
            order_service_url: "http://localhost:8080".into(),
            user_id: "user1".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    account_service_url: Option<String>,
    order_service_url: Option<String>,
    user_id: Option<String>,
}

impl Settings {
    pub fn account_service_url(&self) -> anyhow::Result<Url> {
        parse_service_url("account", &self.account_service_url)
    }

    pub fn order_service_url(&self) -> anyhow::Result<Url> {
        parse_service_url("order", &self.order_service_url)
    }
}

/// Defaults, then `path` when it exists, then the process environment.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = Settings::default();
    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw, path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

fn apply_file(settings: &mut Settings, raw: &str, path: &Path) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring unreadable config file");
            return;
        }
    };

    if let Some(v) = file_cfg.account_service_url {
        settings.account_service_url = v;
    }
    if let Some(v) = file_cfg.order_service_url {
        settings.order_service_url = v;
    }
    if let Some(v) = file_cfg.user_id {
        settings.user_id = v;
    }
}

// `APP__*` names win over the short names when both are set.
fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ACCOUNT_SERVICE_URL") {
        settings.account_service_url = v;
    }
    if let Some(v) = lookup("APP__ACCOUNT_SERVICE_URL") {
        settings.account_service_url = v;
    }

    if let Some(v) = lookup("ORDER_SERVICE_URL") {
        settings.order_service_url = v;
    }
    if let Some(v) = lookup("APP__ORDER_SERVICE_URL") {
        settings.order_service_url = v;
    }

    if let Some(v) = lookup("SHOP_USER_ID") {
        settings.user_id = v;
    }
    if let Some(v) = lookup("APP__USER_ID") {
        settings.user_id = v;
    }
}

fn parse_service_url(service: &str, raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid {service} service url '{raw}'"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("{service} service url '{raw}' cannot carry a path");
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
