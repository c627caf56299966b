// SPDX-License-Identifier: Apache-2.0

//! Persistence layer: a `ClinicStore` trait over the clinic entities with a
//! SQLite implementation and an in-memory fake for handler tests.

use async_trait::async_trait;
use petclinic_model::{Owner, Page, PageRequest, Pet, PetType, Vet, Visit};
use std::fmt::{Display, Formatter};

mod fake;
mod schema;
mod sqlite;

pub use fake::FakeStore;
pub use schema::{SCHEMA_SQL, SEED_SQL};
pub use sqlite::SqliteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    NotFound { entity: &'static str, id: i64 },
    Backend(String),
}

impl StoreError {
    #[must_use]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Backend(msg) => write!(f, "store backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Data access for the clinic. Lookups return fully assembled aggregates:
/// an owner carries its pets and each pet its visits.
#[async_trait]
pub trait ClinicStore: Send + Sync {
    async fn find_owner(&self, id: i64) -> Result<Option<Owner>, StoreError>;

    /// Prefix search on last name; the empty prefix matches every owner.
    async fn find_owners_by_last_name(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> Result<Page<Owner>, StoreError>;

    /// Insert when `owner.id` is `None`, update otherwise. Returns the id.
    async fn save_owner(&self, owner: &Owner) -> Result<i64, StoreError>;

    async fn save_pet(&self, owner_id: i64, pet: &Pet) -> Result<i64, StoreError>;

    async fn save_visit(&self, owner_id: i64, pet_id: i64, visit: &Visit)
        -> Result<i64, StoreError>;

    async fn pet_types(&self) -> Result<Vec<PetType>, StoreError>;

    async fn list_vets(&self, request: PageRequest) -> Result<Page<Vet>, StoreError>;

    async fn all_vets(&self) -> Result<Vec<Vet>, StoreError>;
}
