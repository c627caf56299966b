// SPDX-License-Identifier: Apache-2.0

use crate::error::{AppError, ErrorMessage};
use crate::views::{render, BasePage, WelcomePage};
use crate::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

pub async fn welcome(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&WelcomePage {
        base: BasePage::new(&state.config, "home"),
    })
}

pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css")],
        include_str!("../../static/petclinic.css"),
    )
}

/// Always fails, demonstrating how an error propagates into the error view.
pub async fn crash(State(_state): State<AppState>) -> Result<Html<String>, AppError> {
    Err(AppError::Showcase(
        "Expected: controller used to showcase what happens when an exception is thrown"
            .to_string(),
    ))
}

pub async fn fallback(uri: Uri) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    response
        .extensions_mut()
        .insert(ErrorMessage(format!("no page at {}", uri.path())));
    response
}
