use anyhow::Context;
use thiserror::Error;
use tracing::info;

use crate::config::{self, Config, StoreKind};

pub mod memory;
pub mod sql;
pub mod supabase;

pub use memory::MemoryStore;
pub use sql::SqlStore;
pub use supabase::SupabaseStore;

/// Failure kinds a store can report.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("slug already exists")]
    Conflict,
    #[error("temporary store failure: {detail}")]
    Transient { detail: String },
    #[error("store failure: {detail}")]
    Unknown { detail: String },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[allow(async_fn_in_trait)]
pub trait PasteStore {
    /// Insert a paste, failing with [`StoreError::Conflict`] if the slug is taken.
    async fn insert(&self, slug: &str, content: &str) -> StoreResult<()>;

    /// Look up a paste's content by slug.
    async fn lookup(&self, slug: &str) -> StoreResult<Option<String>>;
}

#[derive(Clone)]
pub enum AnyStore {
    Supabase(SupabaseStore),
    Sql(SqlStore),
    Memory(MemoryStore),
}

impl AnyStore {
    /// Build the store selected by the config.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: AnyStore = match config.store.kind {
            StoreKind::Supabase => {
                let credentials = config::resolve_credentials(&config.secret_sources())?;
                info!("using supabase store at {}", credentials.url);
                SupabaseStore::new(&credentials, &config.store.table)
                    .context("failed to connect to supabase")?
                    .into()
            }
            StoreKind::Sql => {
                info!("using sql store at {}", config.store.sql.url);
                SqlStore::connect(
                    &config.store.sql.url,
                    &config.store.table,
                    config.store.sql.max_connections,
                )
                .await
                .context("failed to connect to database")?
                .into()
            }
            StoreKind::Memory => {
                info!("using in-memory store");
                MemoryStore::default().into()
            }
        };
        Ok(store)
    }
}

impl PasteStore for AnyStore {
    async fn insert(&self, slug: &str, content: &str) -> StoreResult<()> {
        match self {
            AnyStore::Supabase(store) => store.insert(slug, content).await,
            AnyStore::Sql(store) => store.insert(slug, content).await,
            AnyStore::Memory(store) => store.insert(slug, content).await,
        }
    }

    async fn lookup(&self, slug: &str) -> StoreResult<Option<String>> {
        match self {
            AnyStore::Supabase(store) => store.lookup(slug).await,
            AnyStore::Sql(store) => store.lookup(slug).await,
            AnyStore::Memory(store) => store.lookup(slug).await,
        }
    }
}

impl From<SupabaseStore> for AnyStore {
    fn from(value: SupabaseStore) -> Self {
        AnyStore::Supabase(value)
    }
}

impl From<SqlStore> for AnyStore {
    fn from(value: SqlStore) -> Self {
        AnyStore::Sql(value)
    }
}

impl From<MemoryStore> for AnyStore {
    fn from(value: MemoryStore) -> Self {
        AnyStore::Memory(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_kind_needs_no_credentials() {
        let mut config = Config::default();
        config.store.kind = StoreKind::Memory;
        let store = AnyStore::from_config(&config).await.unwrap();
        assert!(matches!(store, AnyStore::Memory(_)));
    }

    #[cfg(feature = "sqlite")]
    #[tokio::test]
    async fn sql_kind_dispatches() {
        let mut config = Config::default();
        config.store.kind = StoreKind::Sql;
        config.store.sql.max_connections = 1;
        let store = AnyStore::from_config(&config).await.unwrap();

        store.insert("demo1", "hello world").await.unwrap();
        assert!(matches!(
            store.insert("demo1", "other").await,
            Err(StoreError::Conflict)
        ));
        assert_eq!(
            store.lookup("demo1").await.unwrap().as_deref(),
            Some("hello world")
        );
    }

    #[tokio::test]
    async fn supabase_kind_reads_secrets_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(
            &path,
            "SUPABASE_URL = \"https://abc.supabase.co\"\nSUPABASE_KEY = \"anon\"\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.store.secrets_file = Some(path);
        let store = AnyStore::from_config(&config).await.unwrap();
        assert!(matches!(store, AnyStore::Supabase(_)));
    }
}
