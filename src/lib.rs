pub mod commands;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod pages;
pub mod slug;
pub mod store;

pub use error::{ApiError, ApiResult};

use config::Config;
use store::AnyStore;

/// Everything a request needs, resolved once at startup.
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub store: AnyStore,
}

impl App {
    pub fn new(config: Config, store: impl Into<AnyStore>) -> Self {
        App {
            config,
            store: store.into(),
        }
    }

    /// Resolve credentials and connect to the configured store.
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = AnyStore::from_config(&config).await?;
        Ok(App { config, store })
    }
}
