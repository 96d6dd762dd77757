use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::models::Created;
use crate::slug;
use crate::store::{PasteStore, StoreError};
use crate::App;

/// Store `content` under the custom slug, or a random one if none was given.
pub async fn create(app: &App, content: &str, custom_slug: &str) -> crate::ApiResult<Created> {
    if content.trim().is_empty() {
        return Err(ApiError::EmptyContent);
    }

    let slug = match slug::normalize_custom(custom_slug) {
        Some(custom) => custom.to_owned(),
        None => slug::generate(app.config.slug.length),
    };

    match app.store.insert(&slug, content).await {
        Ok(()) => {}
        Err(StoreError::Conflict) => {
            warn!("slug already taken: '{slug}'");
            return Err(ApiError::SlugTaken { slug });
        }
        Err(e) => {
            error!("failed to insert paste '{slug}': {e}");
            return Err(e.into());
        }
    }

    info!("new paste: slug='{slug}', size={size}", size = content.len());

    let url = app.config.share_url(&slug);
    Ok(Created { slug, url })
}

/// Fetch the content stored under `slug`, if any.
pub async fn view(app: &App, slug: &str) -> crate::ApiResult<Option<String>> {
    let content = app.store.lookup(slug).await.map_err(|e| {
        error!("failed to look up paste '{slug}': {e}");
        e
    })?;

    if content.is_none() {
        info!("paste not found: '{slug}'");
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::MemoryStore;

    fn app() -> (App, MemoryStore) {
        let store = MemoryStore::default();
        (App::new(Config::default(), store.clone()), store)
    }

    #[tokio::test]
    async fn generated_slug_round_trips() {
        let (app, _) = app();
        let created = create(&app, "hello world", "").await.unwrap();

        assert_eq!(created.slug.len(), 8);
        assert!(created.slug.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(
            created.url,
            format!("http://localhost:3000/?id={}", created.slug)
        );
        assert_eq!(
            view(&app, &created.slug).await.unwrap().as_deref(),
            Some("hello world")
        );
    }

    #[tokio::test]
    async fn custom_slug_is_trimmed() {
        let (app, _) = app();
        let created = create(&app, "notes", "  my-meeting-notes ").await.unwrap();
        assert_eq!(created.slug, "my-meeting-notes");
        assert_eq!(
            view(&app, "my-meeting-notes").await.unwrap().as_deref(),
            Some("notes")
        );
    }

    #[tokio::test]
    async fn configured_slug_length_is_used() {
        let (mut app, _) = app();
        app.config.slug.length = 6;
        let created = create(&app, "x", "   ").await.unwrap();
        assert_eq!(created.slug.len(), 6);
    }

    #[tokio::test]
    async fn blank_content_never_reaches_the_store() {
        let (app, store) = app();
        for content in ["", "   ", "\n\t "] {
            let err = create(&app, content, "demo1").await.unwrap_err();
            assert!(matches!(err, ApiError::EmptyContent));
        }
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn taken_slug_keeps_original() {
        let (app, _) = app();
        create(&app, "hello world", "demo1").await.unwrap();

        let err = create(&app, "other", "demo1").await.unwrap_err();
        assert!(matches!(err, ApiError::SlugTaken { ref slug } if slug == "demo1"));
        assert_eq!(
            view(&app, "demo1").await.unwrap().as_deref(),
            Some("hello world")
        );
    }

    #[tokio::test]
    async fn content_is_stored_verbatim() {
        let (app, _) = app();
        let content = "  indented\n\ttabbed\n";
        create(&app, content, "ws").await.unwrap();
        assert_eq!(view(&app, "ws").await.unwrap().as_deref(), Some(content));
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let (app, _) = app();
        assert_eq!(view(&app, "nope").await.unwrap(), None);
    }
}
