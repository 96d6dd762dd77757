use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::{PasteStore, StoreError, StoreResult};
use crate::config::Credentials;

/// Postgres SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// A table in a Supabase project, reached through its PostgREST endpoint.
#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    table_url: Url,
}

#[derive(Serialize)]
struct NewPaste<'a> {
    slug: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ContentRow {
    content: String,
}

/// Error body returned by PostgREST.
#[derive(Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

impl SupabaseStore {
    pub fn new(credentials: &Credentials, table: &str) -> anyhow::Result<Self> {
        let base = Url::parse(&format!("{}/", credentials.url.trim_end_matches('/')))
            .context("invalid SUPABASE_URL")?;
        let table_url = base
            .join(&format!("rest/v1/{table}"))
            .context("invalid table name")?;

        let mut api_key =
            HeaderValue::from_str(&credentials.key).context("invalid SUPABASE_KEY")?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", credentials.key))
            .context("invalid SUPABASE_KEY")?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;

        Ok(SupabaseStore { client, table_url })
    }
}

impl PasteStore for SupabaseStore {
    async fn insert(&self, slug: &str, content: &str) -> StoreResult<()> {
        let response = self
            .client
            .post(self.table_url.clone())
            .header("Prefer", "return=minimal")
            .json(&NewPaste { slug, content })
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(classify(response).await)
        }
    }

    async fn lookup(&self, slug: &str) -> StoreResult<Option<String>> {
        let filter = format!("eq.{slug}");
        let response = self
            .client
            .get(self.table_url.clone())
            .query(&[("select", "content"), ("slug", filter.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(classify(response).await);
        }

        let rows: Vec<ContentRow> = response.json().await?;
        Ok(rows.into_iter().next().map(|row| row.content))
    }
}

/// Turn an unsuccessful PostgREST response into a store error.
async fn classify(response: Response) -> StoreError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error: Option<PostgrestError> = serde_json::from_str(&body).ok();

    // 409 is also returned for foreign key violations
    let is_conflict = match error.as_ref().and_then(|e| e.code.as_deref()) {
        Some(code) => code == UNIQUE_VIOLATION,
        None => status == StatusCode::CONFLICT,
    };
    if is_conflict {
        return StoreError::Conflict;
    }

    let message = error
        .as_ref()
        .and_then(|e| e.message.as_deref())
        .unwrap_or(body.as_str());
    let detail = format!("{status}: {message}");

    if status.is_server_error()
        || status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
    {
        StoreError::Transient { detail }
    } else {
        StoreError::Unknown { detail }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(source: reqwest::Error) -> Self {
        let detail = source.to_string();
        if source.is_connect() || source.is_timeout() {
            StoreError::Transient { detail }
        } else {
            StoreError::Unknown { detail }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(url: &str, key: &str) -> Credentials {
        Credentials {
            url: url.to_owned(),
            key: key.to_owned(),
        }
    }

    #[test]
    fn table_url_ignores_trailing_slash() {
        for url in ["https://abc.supabase.co", "https://abc.supabase.co/"] {
            let store = SupabaseStore::new(&credentials(url, "anon"), "pastes").unwrap();
            assert_eq!(
                store.table_url.as_str(),
                "https://abc.supabase.co/rest/v1/pastes"
            );
        }
    }

    #[test]
    fn bad_credentials_fail_construction() {
        assert!(SupabaseStore::new(&credentials("not a url", "anon"), "pastes").is_err());
        assert!(
            SupabaseStore::new(&credentials("https://abc.supabase.co", "bad\nkey"), "pastes")
                .is_err()
        );
    }
}
