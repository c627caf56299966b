// SPDX-License-Identifier: Apache-2.0

//! Domain types for the clinic: owners, pets, visits, vets, plus the
//! validation and pagination helpers the web layer renders from.

mod errors;
mod owner;
mod page;
mod vet;

pub use errors::FieldErrors;
pub use owner::{Owner, Pet, PetType, Visit, TELEPHONE_MAX_DIGITS};
pub use page::{Page, PageLink, PageRequest, DEFAULT_PAGE_SIZE};
pub use vet::Vet;
