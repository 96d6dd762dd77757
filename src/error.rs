use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::pages::{self, Notice};
use crate::store::StoreError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("empty content")]
    EmptyContent,
    #[error("slug '{slug}' is already taken")]
    SlugTaken { slug: String },
    #[error("store error")]
    Store {
        #[from]
        source: StoreError,
    },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyContent => StatusCode::BAD_REQUEST,
            ApiError::SlugTaken { .. } => StatusCode::CONFLICT,
            ApiError::Store {
                source: StoreError::Transient { .. },
            } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Messages to show the user, with the underlying cause when `show_details` is set.
    pub fn notices(&self, show_details: bool) -> Vec<Notice> {
        match self {
            ApiError::EmptyContent => vec![Notice::warning(
                "Please enter some content before generating a link.",
            )],
            ApiError::SlugTaken { slug } => vec![Notice::error(format!(
                "The ID '{slug}' is already taken. Please try a different Custom ID or leave it \
                 blank for a random one."
            ))],
            ApiError::Store { source } => {
                let mut notices = vec![Notice::error("An unexpected database error occurred.")];
                if show_details {
                    notices.push(Notice::info(format!("Debug info: {source}")));
                }
                notices
            }
        }
    }
}

impl ApiError {
    /// Render as a standalone error page.
    pub fn into_page(self, show_details: bool) -> Response {
        let status_code = self.status_code();
        (
            status_code,
            Html(pages::error(status_code, &self.notices(show_details))),
        )
            .into_response()
    }
}
