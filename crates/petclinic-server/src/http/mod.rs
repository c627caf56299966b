// SPDX-License-Identifier: Apache-2.0

//! Route handlers. Every HTML handler takes [`HxRequest`](crate::extract::HxRequest)
//! and renders either the full page or the bare fragment htmx swaps into
//! `#main`. Handlers that represent a navigable location also stamp
//! `HX-Push-Url` on fragment responses so the address bar follows the swap.

use crate::error::AppError;
use crate::AppState;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Response};
use petclinic_model::Owner;

pub mod owners;
pub mod pets;
pub mod system;
pub mod vets;
pub mod visits;

/// Fragment response that also updates the browser history entry.
fn pushed_fragment(html: Html<String>, url: &str) -> Result<Response, AppError> {
    let mut response = html.into_response();
    if let Ok(value) = HeaderValue::from_str(url) {
        response.headers_mut().insert("hx-push-url", value);
    }
    Ok(response)
}

async fn load_owner(state: &AppState, owner_id: i64) -> Result<Owner, AppError> {
    state
        .store
        .find_owner(owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("owner {owner_id} not found")))
}

