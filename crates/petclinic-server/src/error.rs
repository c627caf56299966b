// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use petclinic_store::StoreError;
use std::fmt::{Display, Formatter};

/// Marker extension carrying the human-readable message for an error
/// response, so the error-view middleware can render it into HTML.
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

#[derive(Debug)]
#[non_exhaustive]
pub enum AppError {
    NotFound(String),
    Store(StoreError),
    Render(askama::Error),
    /// The `/oups` route: a deliberate failure demonstrating the error view.
    Showcase(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "{what}"),
            Self::Store(e) => write!(f, "data access failed: {e}"),
            Self::Render(e) => write!(f, "template rendering failed: {e}"),
            Self::Showcase(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { entity, id } => Self::NotFound(format!("{entity} {id} not found")),
            other => Self::Store(other),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        Self::Render(e)
    }
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Render(_) | Self::Showcase(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, "request failed: {message}");
        }
        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404_with_message_extension() {
        let err: AppError = StoreError::not_found("owner", 7).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let message = response
            .extensions()
            .get::<ErrorMessage>()
            .expect("message extension");
        assert_eq!(message.0, "owner 7 not found");
    }

    #[test]
    fn backend_failures_are_internal_errors() {
        let err: AppError = StoreError::Backend("disk on fire".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
