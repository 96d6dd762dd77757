use std::collections::HashMap;
use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub store: Store,
    pub limits: Limits,
    pub slug: Slug,
    pub show_error_details: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    pub kind: StoreKind,
    pub table: String,
    pub secrets_file: Option<PathBuf>,
    pub sql: SqlStore,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqlStore {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Supabase,
    Sql,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_upload_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Slug {
    pub length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            store: Store::default(),
            limits: Limits::default(),
            slug: Slug::default(),
            show_error_details: false,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store {
            kind: StoreKind::Supabase,
            table: "pastes".to_owned(),
            secrets_file: None,
            sql: SqlStore::default(),
        }
    }
}

impl Default for SqlStore {
    fn default() -> Self {
        SqlStore {
            url: "sqlite::memory:".to_owned(),
            max_connections: 5,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_upload_size: 1024 * 1024,
        }
    }
}

impl Default for Slug {
    fn default() -> Self {
        Slug { length: 8 }
    }
}

impl Config {
    /// Load the config from a TOML file, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let config: Config = match std::fs::read_to_string(path) {
            Ok(source) => toml::from_str(&source)
                .with_context(|| format!("failed to parse config file {}", path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("config file {} not found, using defaults", path.display());
                Config::default()
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read config file {}", path.display()))
            }
        };

        if config.slug.length == 0 {
            anyhow::bail!("slug.length must be at least 1");
        }

        Ok(config)
    }

    /// The shareable link for a slug.
    pub fn share_url(&self, slug: &str) -> String {
        format!(
            "{base_url}/?id={slug}",
            base_url = self.base_url.trim_end_matches('/'),
            slug = urlencoding::encode(slug)
        )
    }

    /// Secret sources in the order they are consulted.
    pub fn secret_sources(&self) -> Vec<SecretSource> {
        let mut sources = vec![SecretSource::Environment];
        match &self.store.secrets_file {
            Some(path) => sources.push(SecretSource::File(path.clone())),
            None => {
                sources.push(SecretSource::File(
                    PathBuf::from(".quickshare").join("secrets.toml"),
                ));
                if let Some(dirs) = ProjectDirs::from("", "", "quickshare") {
                    sources.push(SecretSource::File(dirs.config_dir().join("secrets.toml")));
                }
            }
        }
        sources
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API keys missing! Ensure SUPABASE_URL and SUPABASE_KEY are set.")]
    MissingCredentials,
}

/// Endpoint and key for the hosted database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Some(Credentials {
            url: non_empty(URL_VAR)?,
            key: non_empty(KEY_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// The process environment.
    Environment,
    /// A TOML secrets file with `SUPABASE_URL` and `SUPABASE_KEY` at the top level.
    File(PathBuf),
}

impl SecretSource {
    fn credentials(&self) -> Option<Credentials> {
        match self {
            SecretSource::Environment => Credentials::from_lookup(|name| std::env::var(name).ok()),
            SecretSource::File(path) => {
                let source = match std::fs::read_to_string(path) {
                    Ok(source) => source,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        debug!("no secrets file at {}", path.display());
                        return None;
                    }
                    Err(e) => {
                        warn!("failed to read secrets file {}: {e}", path.display());
                        return None;
                    }
                };
                let secrets: HashMap<String, toml::Value> = match toml::from_str(&source) {
                    Ok(secrets) => secrets,
                    Err(e) => {
                        warn!("failed to parse secrets file {}: {e}", path.display());
                        return None;
                    }
                };
                Credentials::from_lookup(|name| {
                    secrets
                        .get(name)
                        .and_then(toml::Value::as_str)
                        .map(str::to_owned)
                })
            }
        }
    }
}

/// Take credentials from the first source that provides both values.
pub fn resolve_credentials(sources: &[SecretSource]) -> Result<Credentials, ConfigError> {
    sources
        .iter()
        .find_map(|source| {
            let credentials = source.credentials()?;
            debug!("using credentials from {source:?}");
            Some(credentials)
        })
        .ok_or(ConfigError::MissingCredentials)
}
