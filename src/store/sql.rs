use sqlx::any::{AnyKind, AnyPoolOptions};
use sqlx::AnyPool;

use super::{PasteStore, StoreError, StoreResult};

/// Database error codes reported for unique or primary key violations.
const UNIQUE_VIOLATION_CODES: &[&str] = &[
    // postgres unique_violation
    "23505",
    // sqlite SQLITE_CONSTRAINT_UNIQUE, SQLITE_CONSTRAINT_PRIMARYKEY
    "2067", "1555",
];

#[derive(Clone)]
pub struct SqlStore {
    pool: AnyPool,
    queries: Queries,
}

#[derive(Clone)]
struct Queries {
    insert: String,
    lookup: String,
}

impl Queries {
    fn new(kind: AnyKind, table: &str) -> Self {
        let (first, second) = match kind {
            #[cfg(feature = "postgres")]
            AnyKind::Postgres => ("$1", "$2"),
            #[allow(unreachable_patterns)]
            _ => ("?", "?"),
        };
        Queries {
            insert: format!("INSERT INTO {table} (slug, content) VALUES ({first}, {second})"),
            lookup: format!("SELECT content FROM {table} WHERE slug = {first}"),
        }
    }
}

impl SqlStore {
    /// Connect to a database by URL, creating the paste table if needed.
    pub async fn connect(url: &str, table: &str, max_connections: u32) -> anyhow::Result<Self> {
        // an in-memory sqlite database lives only as long as its connection
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await?;

        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (slug TEXT PRIMARY KEY, content TEXT NOT NULL)"
        ))
        .execute(&pool)
        .await?;

        Ok(Self {
            queries: Queries::new(pool.any_kind(), table),
            pool,
        })
    }
}

impl PasteStore for SqlStore {
    async fn insert(&self, slug: &str, content: &str) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(&self.queries.insert)
            .bind(slug)
            .bind(content)
            .execute(&mut conn)
            .await?;
        Ok(())
    }

    async fn lookup(&self, slug: &str) -> StoreResult<Option<String>> {
        let mut conn = self.pool.acquire().await?;
        let content = sqlx::query_scalar::<_, String>(&self.queries.lookup)
            .bind(slug)
            .fetch_optional(&mut conn)
            .await?;
        Ok(content)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(source: sqlx::Error) -> Self {
        match &source {
            sqlx::Error::Database(e)
                if e.code()
                    .is_some_and(|code| UNIQUE_VIOLATION_CODES.contains(&&*code)) =>
            {
                StoreError::Conflict
            }
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Transient {
                    detail: source.to_string(),
                }
            }
            _ => StoreError::Unknown {
                detail: source.to_string(),
            },
        }
    }
}
