use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controllers::paste;
use crate::models::PasteForm;
use crate::pages::{self, Notice};
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::new(app.config.address, app.config.port);
    let router = router(app);

    info!("listening on http://{addr}");
    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

pub fn router(app: App) -> Router {
    let max_upload_size = app.config.limits.max_upload_size;
    Router::new()
        .route("/", get(index).post(create_paste))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Which page a request to `/` is asking for.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    View(String),
    Create,
}

impl Route {
    /// Repeated `id` parameters resolve to the last one.
    fn from_query(mut params: HashMap<String, String>) -> Self {
        match params.remove("id") {
            Some(id) if !id.is_empty() => Route::View(id),
            _ => Route::Create,
        }
    }
}

async fn index(
    State(app): State<App>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match Route::from_query(params) {
        Route::Create => Html(pages::create(&PasteForm::default(), &[], None)).into_response(),
        Route::View(slug) => match paste::view(&app, &slug).await {
            Ok(Some(content)) => Html(pages::view(&slug, &content)).into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response(),
            Err(e) => e.into_page(app.config.show_error_details),
        },
    }
}

async fn create_paste(State(app): State<App>, Form(form): Form<PasteForm>) -> Response {
    match paste::create(&app, &form.content, &form.custom_id).await {
        Ok(created) => {
            let notices = [Notice::success("Link Created Successfully!")];
            (
                StatusCode::CREATED,
                Html(pages::create(&form, &notices, Some(&created.url))),
            )
                .into_response()
        }
        Err(e) => {
            let notices = e.notices(app.config.show_error_details);
            (e.status_code(), Html(pages::create(&form, &notices, None))).into_response()
        }
    }
}
