// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// One navbar entry. The menu set is configuration, not code: pages only
/// name the entry that should be highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub name: String,
    pub path: String,
    pub title: String,
    pub glyph: String,
}

impl Menu {
    fn new(name: &str, path: &str, title: &str, glyph: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            title: title.to_string(),
            glyph: glyph.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub page_size: usize,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
    pub menus: Vec<Menu>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: PathBuf::from("clinic.sqlite"),
            page_size: 5,
            request_timeout: Duration::from_secs(5),
            max_body_bytes: 16 * 1024,
            menus: vec![
                Menu::new("home", "/", "Home", "home"),
                Menu::new("owners", "/owners/find", "Find owners", "search"),
                Menu::new("vets", "/vets.html", "Veterinarians", "th-list"),
                Menu::new("error", "/oups", "Trigger an error", "warning-sign"),
            ],
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

impl ServerConfig {
    /// Defaults overridden by `CLINIC_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("CLINIC_BIND").unwrap_or(defaults.bind_addr),
            db_path: env::var("CLINIC_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            page_size: env_usize("CLINIC_PAGE_SIZE", defaults.page_size),
            request_timeout: Duration::from_millis(env_u64(
                "CLINIC_REQUEST_TIMEOUT_MS",
                defaults.request_timeout.as_millis() as u64,
            )),
            max_body_bytes: env_usize("CLINIC_MAX_BODY_BYTES", defaults.max_body_bytes),
            menus: defaults.menus,
        }
    }

    #[must_use]
    pub fn menu(&self, name: &str) -> Option<&Menu> {
        self.menus.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

pub fn validate_startup_config(config: &ServerConfig) -> Result<(), String> {
    if config.page_size == 0 {
        return Err("page size must be > 0".to_string());
    }
    if config.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    if config.request_timeout.is_zero() {
        return Err("request timeout must be > 0".to_string());
    }
    if config.menus.is_empty() {
        return Err("menu set must not be empty".to_string());
    }
    if config.bind_addr.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid bind addr {}", config.bind_addr));
    }
    Ok(())
}
