use anyhow::Context;
use tracing::info;

use crate::slug;
use crate::store::PasteStore;
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let probe = slug::generate(app.config.slug.length);
    app.store
        .lookup(&probe)
        .await
        .context("store is not reachable")?;
    info!("store is reachable, table '{}'", app.config.store.table);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Credentials};
    use crate::store::{MemoryStore, SupabaseStore};

    #[tokio::test]
    async fn reachable_store_passes() {
        let app = App::new(Config::default(), MemoryStore::default());
        run(app).await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_store_fails() {
        // bind and drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let credentials = Credentials {
            url: format!("http://{addr}"),
            key: "anon".to_owned(),
        };
        let store = SupabaseStore::new(&credentials, "pastes").unwrap();

        let err = run(App::new(Config::default(), store)).await.unwrap_err();
        assert!(err.to_string().contains("store is not reachable"), "{err:#}");
    }
}
