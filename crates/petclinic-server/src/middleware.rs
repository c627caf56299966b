// SPDX-License-Identifier: Apache-2.0

//! Request-scoped middleware: tracing spans with request ids, the
//! error-view mapper that turns failed responses into HTML, and the
//! per-request timeout.

use crate::error::ErrorMessage;
use crate::views::{render, BasePage, ErrorFragment, ErrorPage, ErrorView};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::atomic::Ordering;
use tracing::Instrument;

fn propagated_request_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("x-request-id")?.to_str().ok()?.trim();
    if value.is_empty() || value.len() > 128 {
        return None;
    }
    Some(value.to_string())
}

fn make_request_id(state: &AppState, headers: &HeaderMap) -> String {
    propagated_request_id(headers).unwrap_or_else(|| {
        let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{id:016x}")
    })
}

pub(crate) async fn request_tracing_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let request_id = make_request_id(&state, request.headers());

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("x-request-id", value);
    }
    response
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Rewrites error responses into the error view. Handlers attach an
/// [`ErrorMessage`] extension; this layer renders it as a full page for
/// plain navigation or as a fragment for htmx swaps, keeping the status.
pub(crate) async fn error_view_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let htmx = is_htmx_request(request.headers());
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }
    let Some(ErrorMessage(message)) = response.extensions().get::<ErrorMessage>().cloned() else {
        return response;
    };

    let view = ErrorView { message };
    let rendered = if htmx {
        render(&ErrorFragment { view })
    } else {
        render(&ErrorPage {
            base: BasePage::new(&state.config, "error"),
            view,
        })
    };
    match rendered {
        Ok(html) => (status, html).into_response(),
        // Keep the original status with a plain body if the error view
        // itself fails to render.
        Err(e) => {
            tracing::error!("error view rendering failed: {e}");
            response
        }
    }
}

pub(crate) async fn timeout_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match tokio::time::timeout(state.config.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("request exceeded the configured timeout");
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            response
                .extensions_mut()
                .insert(ErrorMessage("request timed out".to_string()));
            response
        }
    }
}
