// SPDX-License-Identifier: Apache-2.0

//! Pet form round-trips. Form input arrives as strings; parse failures
//! become field errors rather than request failures so the form re-renders
//! with what the user typed.

use super::{load_owner, pushed_fragment};
use crate::error::AppError;
use crate::extract::HxRequest;
use crate::views::{render, BasePage, PetFormFragment, PetFormPage, PetFormView};
use crate::AppState;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::NaiveDate;
use petclinic_model::{FieldErrors, Owner, Pet, PetType, Visit};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PetFormData {
    pub name: String,
    pub birth_date: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

async fn type_options(state: &AppState) -> Result<Vec<String>, AppError> {
    Ok(state
        .store
        .pet_types()
        .await?
        .into_iter()
        .map(|t| t.name)
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn render_pet_form(
    state: &AppState,
    htmx: bool,
    owner: &Owner,
    pet_id: Option<i64>,
    name: &str,
    birth_date: &str,
    type_name: &str,
    options: &[String],
    errors: &FieldErrors,
    push_url: Option<String>,
) -> Result<Response, AppError> {
    let form = PetFormView::new(owner, pet_id, name, birth_date, type_name, options, errors);
    if htmx {
        let html = render(&PetFormFragment { form })?;
        match push_url {
            Some(url) => pushed_fragment(html, &url),
            None => Ok(html.into_response()),
        }
    } else {
        Ok(render(&PetFormPage {
            base: BasePage::new(&state.config, "owners"),
            form,
        })?
        .into_response())
    }
}

/// Assembles a pet from raw form input, collecting field errors for the
/// unparsable parts instead of failing the request.
async fn bind_pet(
    state: &AppState,
    form: &PetFormData,
    id: Option<i64>,
    visits: Vec<Visit>,
) -> Result<(Pet, FieldErrors), AppError> {
    let mut errors = FieldErrors::new();
    let birth_date = match form.birth_date.parse::<NaiveDate>() {
        Ok(date) => date,
        Err(_) => {
            errors.reject("birth_date", "must be a valid date");
            today()
        }
    };
    let pet_type = match state
        .store
        .pet_types()
        .await?
        .into_iter()
        .find(|t| t.name == form.type_name)
    {
        Some(t) => t,
        None => {
            errors.reject("type", "is required");
            PetType {
                id: 0,
                name: form.type_name.clone(),
            }
        }
    };
    let pet = Pet {
        id,
        name: form.name.clone(),
        birth_date,
        pet_type,
        visits,
    };
    errors.merge(pet.validate(today()));
    Ok((pet, errors))
}

pub async fn new_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path(owner_id): Path<i64>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let options = type_options(&state).await?;
    render_pet_form(
        &state,
        htmx,
        &owner,
        None,
        "",
        "",
        "",
        &options,
        &FieldErrors::new(),
        Some(format!("/owners/{owner_id}/pets/new")),
    )
}

pub async fn create(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path(owner_id): Path<i64>,
    axum::Form(form): axum::Form<PetFormData>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let (pet, mut errors) = bind_pet(&state, &form, None, Vec::new()).await?;
    // A new pet must not reuse the name of one the owner already has.
    if !form.name.trim().is_empty() && owner.pet_by_name(&form.name, true).is_some() {
        errors.reject("name", "already exists");
    }
    if !errors.is_empty() {
        let options = type_options(&state).await?;
        return render_pet_form(
            &state,
            htmx,
            &owner,
            None,
            &form.name,
            &form.birth_date,
            &form.type_name,
            &options,
            &errors,
            None,
        );
    }
    state.store.save_pet(owner_id, &pet).await?;
    Ok(Redirect::to(&format!("/owners/{owner_id}")).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path((owner_id, pet_id)): Path<(i64, i64)>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let pet = owner
        .pet_by_id(pet_id)
        .ok_or_else(|| AppError::NotFound(format!("pet {pet_id} not found")))?
        .clone();
    let options = type_options(&state).await?;
    render_pet_form(
        &state,
        htmx,
        &owner,
        Some(pet_id),
        &pet.name,
        &pet.birth_date.to_string(),
        &pet.pet_type.name,
        &options,
        &FieldErrors::new(),
        Some(format!("/owners/{owner_id}/pets/{pet_id}/edit")),
    )
}

pub async fn update(
    State(state): State<AppState>,
    HxRequest(htmx): HxRequest,
    Path((owner_id, pet_id)): Path<(i64, i64)>,
    axum::Form(form): axum::Form<PetFormData>,
) -> Result<Response, AppError> {
    let owner = load_owner(&state, owner_id).await?;
    let existing = owner
        .pet_by_id(pet_id)
        .ok_or_else(|| AppError::NotFound(format!("pet {pet_id} not found")))?;
    let visits = existing.visits.clone();
    let (pet, errors) = bind_pet(&state, &form, Some(pet_id), visits).await?;
    if !errors.is_empty() {
        let options = type_options(&state).await?;
        return render_pet_form(
            &state,
            htmx,
            &owner,
            Some(pet_id),
            &form.name,
            &form.birth_date,
            &form.type_name,
            &options,
            &errors,
            None,
        );
    }
    state.store.save_pet(owner_id, &pet).await?;
    Ok(Redirect::to(&format!("/owners/{owner_id}")).into_response())
}
