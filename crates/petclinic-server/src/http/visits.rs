// SPDX-License-Identifier: Apache-2.0

use super::{load_owner, pushed_fragment};
use crate::error::AppError;
use crate::extract::HxRequest;
use crate::views::{render, BasePage, VisitFormFragment, VisitFormPage, VisitFormView};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use petclinic_model::{FieldErrors, Owner, Pet, Visit};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct VisitFormData {
    pub date: String,
    pub description: String,
}

#[allow(clippy::too_many_arguments)]
fn render_visit_form(
    state: &AppState,
    htmx: bool,
    owner: &Owner,
    pet: &Pet,
    date: &str,
    description: &str,
    errors: &FieldErrors,
    push_url: Option<String>,
) -> Result<Response, AppError> {
    let form = VisitFormView::new(owner, pet, date, description, errors);
    if htmx {
        let html = render(&VisitFormFragment { form })?;
        match push_url {
            Some(url) => pushed_fragment(html, &url),
            None => Ok(html.into_response()),
        }
    } else {
        Ok(render(&VisitFormPage {
            base: BasePage::new(&state.config, "owners"),
            form,
        })?
        .into_response())
    }
}

fn find_pet(owner: &Owner, pet_id: i64) -> Result<Pet, AppError> {
    owner
        .pet_by_id(pet_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("pet {pet_id} not found")))
}

pub async fn new_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path((owner_id, pet_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;
    let today = chrono::Local::now().date_naive();
    render_visit_form(
        &state,
        htmx,
        &owner,
        &pet,
        &today.to_string(),
        "",
        &FieldErrors::new(),
        Some(format!("/owners/{owner_id}/pets/{pet_id}/visits/new")),
    )
}

pub async fn create(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path((owner_id, pet_id)): Path<(i64, i64)>,
    axum::Form(form): axum::Form<VisitFormData>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = find_pet(&owner, pet_id)?;

    let mut errors = FieldErrors::new();
    let date = match form.date.parse::<NaiveDate>() {
        Ok(date) => date,
        Err(_) => {
            errors.reject("date", "must be a valid date");
            chrono::Local::now().date_naive()
        }
    };
    let visit = Visit {
        id: None,
        date,
        description: form.description.clone(),
    };
    errors.merge(visit.validate());

    if !errors.is_empty() {
        return render_visit_form(
            &state,
            htmx,
            &owner,
            &pet,
            &form.date,
            &form.description,
            &errors,
            None,
        );
    }
    state.store.save_visit(owner_id, pet_id, &visit).await?;
    Ok(Redirect::to(&format!("/owners/{owner_id}")).into_response())
}
