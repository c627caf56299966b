// SPDX-License-Identifier: Apache-2.0

//! Owner pages: the find form, the three-way search outcome, details,
//! and the create/edit form round-trips.

use super::{load_owner, pushed_fragment};
use crate::error::AppError;
use crate::extract::HxRequest;
use crate::views::{
    render, BasePage, FindOwnersFragment, FindOwnersPage, OwnerDetailsFragment, OwnerDetailsPage,
    OwnerDetailsView, OwnerFindView, OwnerFormFragment, OwnerFormPage, OwnerFormView,
    OwnersListFragment, OwnersListPage, OwnersListView,
};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use petclinic_model::{FieldErrors, Owner, PageRequest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OwnersQuery {
    pub page: Option<usize>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerFormData {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
}

impl OwnerFormData {
    fn into_owner(self, id: Option<i64>, pets: Vec<petclinic_model::Pet>) -> Owner {
        Owner {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            telephone: self.telephone,
            pets,
        }
    }
}

fn render_find_form(
    state: &AppState,
    htmx: bool,
    last_name: &str,
    errors: &FieldErrors,
) -> Result<Response, AppError> {
    let form = OwnerFindView::new(last_name, errors);
    if htmx {
        Ok(render(&FindOwnersFragment { form })?.into_response())
    } else {
        Ok(render(&FindOwnersPage {
            base: BasePage::new(&state.config, "owners"),
            form,
        })?
        .into_response())
    }
}

fn render_owner_form(
    state: &AppState,
    htmx: bool,
    owner: &Owner,
    errors: &FieldErrors,
    push_url: Option<String>,
) -> Result<Response, AppError> {
    let form = OwnerFormView::new(owner, errors);
    if htmx {
        let html = render(&OwnerFormFragment { form })?;
        match push_url {
            Some(url) => pushed_fragment(html, &url),
            None => Ok(html.into_response()),
        }
    } else {
        Ok(render(&OwnerFormPage {
            base: BasePage::new(&state.config, "owners"),
            form,
        })?
        .into_response())
    }
}

pub async fn find_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
) -> Result<Response, AppError> {
    render_find_form(&state, htmx, "", &FieldErrors::new())
}

/// `GET /owners`: the search result decides the view. No match re-renders
/// the find form with an error, a single match redirects straight to the
/// owner, anything else is a paged list.
pub async fn list(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Query(query): Query<OwnersQuery>,
) -> Result<Response, AppError> {
    let last_name = query.last_name.unwrap_or_default();
    let request = PageRequest::new(query.page.unwrap_or(1), state.config.page_size);
    let page = state
        .store
        .find_owners_by_last_name(&last_name, request)
        .await?;

    if page.is_empty() {
        let mut errors = FieldErrors::new();
        errors.reject("last_name", "has not been found");
        return render_find_form(&state, htmx, &last_name, &errors);
    }
    if page.total_items == 1 {
        if let Some(owner) = page.items.first() {
            let id = owner.id.unwrap_or_default();
            return Ok(Redirect::to(&format!("/owners/{id}")).into_response());
        }
    }

    let view = OwnersListView::new(&last_name, page);
    if htmx {
        Ok(render(&OwnersListFragment { view })?.into_response())
    } else {
        Ok(render(&OwnersListPage {
            base: BasePage::new(&state.config, "owners"),
            view,
        })?
        .into_response())
    }
}

pub async fn details(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path(owner_id): Path<i64>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let view = OwnerDetailsView::new(&owner);
    if htmx {
        let html = render(&OwnerDetailsFragment { view })?;
        pushed_fragment(html, &format!("/owners/{owner_id}"))
    } else {
        Ok(render(&OwnerDetailsPage {
            base: BasePage::new(&state.config, "owners"),
            view,
        })?
        .into_response())
    }
}

pub async fn new_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
) -> Result<Response, AppError> {
    render_owner_form(&state, htmx, &Owner::default(), &FieldErrors::new(), None)
}

pub async fn create(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    axum::Form(form): axum::Form<OwnerFormData>,
) -> Result<Response, AppError> {
    let owner = form.into_owner(None, Vec::new());
    let errors = owner.validate();
    if !errors.is_empty() {
        return render_owner_form(&state, htmx, &owner, &errors, None);
    }
    let id = state.store.save_owner(&owner).await?;
    Ok(Redirect::to(&format!("/owners/{id}")).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path(owner_id): Path<i64>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    render_owner_form(
        &state,
        htmx,
        &owner,
        &FieldErrors::new(),
        Some(format!("/owners/{owner_id}/edit")),
    )
}

pub async fn update(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path(owner_id): Path<i64>,
    axum::Form(form): axum::Form<OwnerFormData>,
) -> Result<Response, AppError> {
    let existing = load_owner(&state, owner_id).await?;
    let owner = form.into_owner(Some(owner_id), existing.pets);
    let errors = owner.validate();
    if !errors.is_empty() {
        return render_owner_form(&state, htmx, &owner, &errors, None);
    }
    state.store.save_owner(&owner).await?;
    Ok(Redirect::to(&format!("/owners/{owner_id}")).into_response())
}
