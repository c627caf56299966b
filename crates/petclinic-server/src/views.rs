// SPDX-License-Identifier: Apache-2.0

//! View models and askama templates. Every HTML view exists twice: a
//! `*Page` wrapping the layout and a `*Fragment` rendering only the
//! partial markup htmx swaps in. Both carry the same inner view model and
//! include the same template file, so the two renderings cannot drift.

use crate::config::ServerConfig;
use crate::error::AppError;
use askama::Template;
use axum::response::Html;
use petclinic_model::{FieldErrors, Owner, Page, PageLink, Pet, Vet, Visit};

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Debug, Clone)]
pub struct MenuView {
    pub path: String,
    pub title: String,
    pub glyph: String,
    pub active: bool,
}

/// Shared page chrome: the navbar with the active entry highlighted.
#[derive(Debug, Clone)]
pub struct BasePage {
    pub menus: Vec<MenuView>,
}

impl BasePage {
    #[must_use]
    pub fn new(config: &ServerConfig, active: &str) -> Self {
        Self {
            menus: config
                .menus
                .iter()
                .map(|m| MenuView {
                    path: m.path.clone(),
                    title: m.title.clone(),
                    glyph: m.glyph.clone(),
                    active: m.name.eq_ignore_ascii_case(active),
                })
                .collect(),
        }
    }
}

/// One form row: label, current value, and any validation messages.
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub name: String,
    pub value: String,
    pub date: bool,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl InputField {
    #[must_use]
    pub fn bound(label: &str, name: &str, value: &str, date: bool, errors: &FieldErrors) -> Self {
        let field_errors = errors.field(name);
        Self {
            label: label.to_string(),
            name: name.to_string(),
            value: value.to_string(),
            date,
            valid: field_errors.is_empty(),
            errors: field_errors,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectValue {
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct SelectField {
    pub label: String,
    pub name: String,
    pub values: Vec<SelectValue>,
    pub valid: bool,
    pub errors: Vec<String>,
}

impl SelectField {
    #[must_use]
    pub fn bound(
        label: &str,
        name: &str,
        value: &str,
        options: &[String],
        errors: &FieldErrors,
    ) -> Self {
        let field_errors = errors.field(name);
        Self {
            label: label.to_string(),
            name: name.to_string(),
            values: options
                .iter()
                .map(|option| SelectValue {
                    value: option.clone(),
                    selected: option == value,
                })
                .collect(),
            valid: field_errors.is_empty(),
            errors: field_errors,
        }
    }
}

/// Pagination bar state, precomputed from a result page.
#[derive(Debug, Clone)]
pub struct PaginationView {
    pub has_pages: bool,
    pub first: bool,
    pub last: bool,
    pub previous: usize,
    pub next: usize,
    pub links: Vec<PageLink>,
}

impl PaginationView {
    #[must_use]
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            has_pages: page.has_pages(),
            first: page.is_first(),
            last: page.is_last(),
            previous: page.previous(),
            next: page.next(),
            links: page.page_links(),
        }
    }
}

// --- owners ---

#[derive(Debug, Clone)]
pub struct OwnerFindView {
    pub last_name: String,
    pub errors: Vec<String>,
}

impl OwnerFindView {
    #[must_use]
    pub fn new(last_name: &str, errors: &FieldErrors) -> Self {
        Self {
            last_name: last_name.to_string(),
            errors: errors.field("last_name"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OwnerFormView {
    pub action: String,
    pub errors: Vec<String>,
    pub first_name: InputField,
    pub last_name: InputField,
    pub address: InputField,
    pub city: InputField,
    pub telephone: InputField,
}

impl OwnerFormView {
    #[must_use]
    pub fn new(owner: &Owner, errors: &FieldErrors) -> Self {
        let action = match owner.id {
            Some(id) => format!("/owners/{id}/edit"),
            None => "/owners/new".to_string(),
        };
        Self {
            action,
            errors: errors.messages(),
            first_name: InputField::bound(
                "First Name",
                "first_name",
                &owner.first_name,
                false,
                errors,
            ),
            last_name: InputField::bound("Last Name", "last_name", &owner.last_name, false, errors),
            address: InputField::bound("Address", "address", &owner.address, false, errors),
            city: InputField::bound("City", "city", &owner.city, false, errors),
            telephone: InputField::bound("Telephone", "telephone", &owner.telephone, false, errors),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OwnerRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: String,
}

#[derive(Debug, Clone)]
pub struct OwnersListView {
    pub last_name: String,
    pub rows: Vec<OwnerRow>,
    pub pagination: PaginationView,
}

impl OwnersListView {
    #[must_use]
    pub fn new(last_name: &str, page: Page<Owner>) -> Self {
        let pagination = PaginationView::from_page(&page);
        let rows = page
            .items
            .into_iter()
            .map(|owner| OwnerRow {
                id: owner.id.unwrap_or_default(),
                name: format!("{} {}", owner.first_name, owner.last_name),
                address: owner.address,
                city: owner.city,
                telephone: owner.telephone,
                pets: owner
                    .pets
                    .iter()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            })
            .collect();
        Self {
            last_name: last_name.to_string(),
            rows,
            pagination,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisitRow {
    pub date: String,
    pub description: String,
}

impl VisitRow {
    fn new(visit: &Visit) -> Self {
        Self {
            date: visit.date.to_string(),
            description: visit.description.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PetCard {
    pub id: i64,
    pub name: String,
    pub birth_date: String,
    pub type_name: String,
    pub visits: Vec<VisitRow>,
}

#[derive(Debug, Clone)]
pub struct OwnerDetailsView {
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<PetCard>,
}

impl OwnerDetailsView {
    #[must_use]
    pub fn new(owner: &Owner) -> Self {
        Self {
            owner_id: owner.id.unwrap_or_default(),
            name: format!("{} {}", owner.first_name, owner.last_name),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
            pets: owner
                .pets
                .iter()
                .map(|pet| PetCard {
                    id: pet.id.unwrap_or_default(),
                    name: pet.name.clone(),
                    birth_date: pet.birth_date.to_string(),
                    type_name: pet.pet_type.name.clone(),
                    visits: pet.visits.iter().map(VisitRow::new).collect(),
                })
                .collect(),
        }
    }
}

// --- pets and visits ---

#[derive(Debug, Clone)]
pub struct PetFormView {
    pub action: String,
    pub owner_name: String,
    pub errors: Vec<String>,
    pub name: InputField,
    pub birth_date: InputField,
    pub pet_type: SelectField,
}

impl PetFormView {
    #[must_use]
    pub fn new(
        owner: &Owner,
        pet_id: Option<i64>,
        name: &str,
        birth_date: &str,
        type_name: &str,
        type_options: &[String],
        errors: &FieldErrors,
    ) -> Self {
        let owner_id = owner.id.unwrap_or_default();
        let action = match pet_id {
            Some(id) => format!("/owners/{owner_id}/pets/{id}/edit"),
            None => format!("/owners/{owner_id}/pets/new"),
        };
        Self {
            action,
            owner_name: format!("{} {}", owner.first_name, owner.last_name),
            errors: errors.messages(),
            name: InputField::bound("Name", "name", name, false, errors),
            birth_date: InputField::bound("Birth Date", "birth_date", birth_date, true, errors),
            pet_type: SelectField::bound("Type", "type", type_name, type_options, errors),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisitFormView {
    pub action: String,
    pub owner_name: String,
    pub pet_name: String,
    pub pet_birth_date: String,
    pub previous_visits: Vec<VisitRow>,
    pub errors: Vec<String>,
    pub date: InputField,
    pub description: InputField,
}

impl VisitFormView {
    #[must_use]
    pub fn new(
        owner: &Owner,
        pet: &Pet,
        date: &str,
        description: &str,
        errors: &FieldErrors,
    ) -> Self {
        let owner_id = owner.id.unwrap_or_default();
        let pet_id = pet.id.unwrap_or_default();
        Self {
            action: format!("/owners/{owner_id}/pets/{pet_id}/visits/new"),
            owner_name: format!("{} {}", owner.first_name, owner.last_name),
            pet_name: pet.name.clone(),
            pet_birth_date: pet.birth_date.to_string(),
            previous_visits: pet.visits.iter().map(VisitRow::new).collect(),
            errors: errors.messages(),
            date: InputField::bound("Date", "date", date, true, errors),
            description: InputField::bound(
                "Description",
                "description",
                description,
                false,
                errors,
            ),
        }
    }
}

// --- vets ---

#[derive(Debug, Clone)]
pub struct VetRow {
    pub name: String,
    pub specialties: String,
}

#[derive(Debug, Clone)]
pub struct VetsListView {
    pub rows: Vec<VetRow>,
    pub pagination: PaginationView,
}

impl VetsListView {
    #[must_use]
    pub fn new(page: Page<Vet>) -> Self {
        let pagination = PaginationView::from_page(&page);
        let rows = page
            .items
            .iter()
            .map(|vet| VetRow {
                name: format!("{} {}", vet.first_name, vet.last_name),
                specialties: vet.specialties_label(),
            })
            .collect();
        Self { rows, pagination }
    }
}

// --- error ---

#[derive(Debug, Clone)]
pub struct ErrorView {
    pub message: String,
}

// --- templates: full pages ---

#[derive(Template)]
#[template(path = "welcome.html")]
pub struct WelcomePage {
    pub base: BasePage,
}

#[derive(Template)]
#[template(path = "owners/find.html")]
pub struct FindOwnersPage {
    pub base: BasePage,
    pub form: OwnerFindView,
}

#[derive(Template)]
#[template(path = "owners/list.html")]
pub struct OwnersListPage {
    pub base: BasePage,
    pub view: OwnersListView,
}

#[derive(Template)]
#[template(path = "owners/details.html")]
pub struct OwnerDetailsPage {
    pub base: BasePage,
    pub view: OwnerDetailsView,
}

#[derive(Template)]
#[template(path = "owners/edit.html")]
pub struct OwnerFormPage {
    pub base: BasePage,
    pub form: OwnerFormView,
}

#[derive(Template)]
#[template(path = "pets/edit.html")]
pub struct PetFormPage {
    pub base: BasePage,
    pub form: PetFormView,
}

#[derive(Template)]
#[template(path = "visits/new.html")]
pub struct VisitFormPage {
    pub base: BasePage,
    pub form: VisitFormView,
}

#[derive(Template)]
#[template(path = "vets/list.html")]
pub struct VetsPage {
    pub base: BasePage,
    pub view: VetsListView,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub base: BasePage,
    pub view: ErrorView,
}

// --- templates: htmx fragments ---

#[derive(Template)]
#[template(path = "fragments/owner_find.html")]
pub struct FindOwnersFragment {
    pub form: OwnerFindView,
}

#[derive(Template)]
#[template(path = "fragments/owners_list.html")]
pub struct OwnersListFragment {
    pub view: OwnersListView,
}

#[derive(Template)]
#[template(path = "fragments/owner_details.html")]
pub struct OwnerDetailsFragment {
    pub view: OwnerDetailsView,
}

#[derive(Template)]
#[template(path = "fragments/owner_form.html")]
pub struct OwnerFormFragment {
    pub form: OwnerFormView,
}

#[derive(Template)]
#[template(path = "fragments/pet_form.html")]
pub struct PetFormFragment {
    pub form: PetFormView,
}

#[derive(Template)]
#[template(path = "fragments/visit_form.html")]
pub struct VisitFormFragment {
    pub form: VisitFormView,
}

#[derive(Template)]
#[template(path = "fragments/vets_list.html")]
pub struct VetsFragment {
    pub view: VetsListView,
}

#[derive(Template)]
#[template(path = "fragments/error.html")]
pub struct ErrorFragment {
    pub view: ErrorView,
}
