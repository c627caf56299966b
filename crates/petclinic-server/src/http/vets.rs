// SPDX-License-Identifier: Apache-2.0

//! The veterinarian directory: a paged HTML view and a JSON listing of
//! the whole roster.

use crate::error::AppError;
use crate::extract::HxRequest;
use crate::views::{render, BasePage, VetsFragment, VetsListView, VetsPage};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json, Response};
use petclinic_model::{PageRequest, Vet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct VetsQuery {
    pub page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetsResponse {
    pub vet_list: Vec<Vet>,
}

pub async fn list_html(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Query(query): Query<VetsQuery>,
) -> Result<Response, AppError> {
    let request = PageRequest::new(query.page.unwrap_or(1), state.config.page_size);
    let page = state.store.list_vets(request).await?;
    let view = VetsListView::new(page);
    if htmx {
        Ok(render(&VetsFragment { view })?.into_response())
    } else {
        Ok(render(&VetsPage {
            base: BasePage::new(&state.config, "vets"),
            view,
        })?
        .into_response())
    }
}

pub async fn list_json(State(state): State<AppState>) -> Result<Json<VetsResponse>, AppError> {
    let vet_list = state.store.all_vets().await?;
    Ok(Json(VetsResponse { vet_list }))
}
