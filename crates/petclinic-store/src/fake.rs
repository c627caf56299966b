// SPDX-License-Identifier: Apache-2.0

use crate::{ClinicStore, StoreError};
use async_trait::async_trait;
use petclinic_model::{Owner, Page, PageRequest, Pet, PetType, Vet, Visit};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct FakeState {
    owners: Vec<Owner>,
    vets: Vec<Vet>,
    types: Vec<PetType>,
    next_id: i64,
}

/// In-memory store for handler tests. Same ordering contracts as the
/// sqlite implementation: pets by name, visits newest first, owners by
/// last name then id.
#[derive(Debug, Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake with the standard pet types and a small vet roster, so form
    /// pages have selects to render.
    #[must_use]
    pub fn with_defaults() -> Self {
        let store = Self::new();
        {
            let state = store.state.try_lock();
            let mut state = state.expect("fresh fake store is uncontended");
            state.types = ["cat", "dog", "lizard", "snake", "bird", "hamster"]
                .iter()
                .enumerate()
                .map(|(i, name)| PetType {
                    id: i as i64 + 1,
                    name: (*name).to_string(),
                })
                .collect();
            state.vets = vec![
                Vet {
                    id: 1,
                    first_name: "James".to_string(),
                    last_name: "Carter".to_string(),
                    specialties: Vec::new(),
                },
                Vet {
                    id: 2,
                    first_name: "Helen".to_string(),
                    last_name: "Leary".to_string(),
                    specialties: vec!["radiology".to_string()],
                },
            ];
            state.next_id = 100;
        }
        store
    }

    /// Inserts an owner verbatim, assigning ids where missing.
    pub async fn seed_owner(&self, mut owner: Owner) -> i64 {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let id = owner.id.unwrap_or(state.next_id);
        owner.id = Some(id);
        for pet in &mut owner.pets {
            if pet.id.is_none() {
                state.next_id += 1;
                pet.id = Some(state.next_id);
            }
            for visit in &mut pet.visits {
                if visit.id.is_none() {
                    state.next_id += 1;
                    visit.id = Some(state.next_id);
                }
            }
        }
        state.owners.push(owner);
        id
    }

    pub async fn seed_vets(&self, vets: Vec<Vet>) {
        self.state.lock().await.vets = vets;
    }
}

fn sort_owner(owner: &mut Owner) {
    owner.pets.sort_by(|a, b| a.name.cmp(&b.name));
    for pet in &mut owner.pets {
        pet.visits.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    }
}

#[async_trait]
impl ClinicStore for FakeStore {
    async fn find_owner(&self, id: i64) -> Result<Option<Owner>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.owners.iter().find(|o| o.id == Some(id)).cloned().map(
            |mut owner| {
                sort_owner(&mut owner);
                owner
            },
        ))
    }

    async fn find_owners_by_last_name(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> Result<Page<Owner>, StoreError> {
        let state = self.state.lock().await;
        let wanted = prefix.to_lowercase();
        let mut matched: Vec<Owner> = state
            .owners
            .iter()
            .filter(|o| o.last_name.to_lowercase().starts_with(&wanted))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.last_name.cmp(&b.last_name).then(a.id.cmp(&b.id)));
        let total = matched.len();
        let items: Vec<Owner> = matched
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .map(|mut owner| {
                sort_owner(&mut owner);
                owner
            })
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn save_owner(&self, owner: &Owner) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        match owner.id {
            Some(id) => {
                let existing = state
                    .owners
                    .iter_mut()
                    .find(|o| o.id == Some(id))
                    .ok_or_else(|| StoreError::not_found("owner", id))?;
                existing.first_name = owner.first_name.clone();
                existing.last_name = owner.last_name.clone();
                existing.address = owner.address.clone();
                existing.city = owner.city.clone();
                existing.telephone = owner.telephone.clone();
                Ok(id)
            }
            None => {
                state.next_id += 1;
                let id = state.next_id;
                let mut stored = owner.clone();
                stored.id = Some(id);
                stored.pets = Vec::new();
                state.owners.push(stored);
                Ok(id)
            }
        }
    }

    async fn save_pet(&self, owner_id: i64, pet: &Pet) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let fresh_id = state.next_id;
        let owner = state
            .owners
            .iter_mut()
            .find(|o| o.id == Some(owner_id))
            .ok_or_else(|| StoreError::not_found("owner", owner_id))?;
        match pet.id {
            Some(id) => {
                let existing = owner
                    .pets
                    .iter_mut()
                    .find(|p| p.id == Some(id))
                    .ok_or_else(|| StoreError::not_found("pet", id))?;
                existing.name = pet.name.clone();
                existing.birth_date = pet.birth_date;
                existing.pet_type = pet.pet_type.clone();
                Ok(id)
            }
            None => {
                let mut stored = pet.clone();
                stored.id = Some(fresh_id);
                stored.visits = Vec::new();
                owner.pets.push(stored);
                Ok(fresh_id)
            }
        }
    }

    async fn save_visit(
        &self,
        owner_id: i64,
        pet_id: i64,
        visit: &Visit,
    ) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let fresh_id = state.next_id;
        let owner = state
            .owners
            .iter_mut()
            .find(|o| o.id == Some(owner_id))
            .ok_or_else(|| StoreError::not_found("owner", owner_id))?;
        let pet = owner
            .pets
            .iter_mut()
            .find(|p| p.id == Some(pet_id))
            .ok_or_else(|| StoreError::not_found("pet", pet_id))?;
        let mut stored = visit.clone();
        stored.id = Some(fresh_id);
        pet.visits.push(stored);
        Ok(fresh_id)
    }

    async fn pet_types(&self) -> Result<Vec<PetType>, StoreError> {
        let state = self.state.lock().await;
        let mut types = state.types.clone();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(types)
    }

    async fn list_vets(&self, request: PageRequest) -> Result<Page<Vet>, StoreError> {
        let state = self.state.lock().await;
        let mut vets = state.vets.clone();
        vets.sort_by_key(|v| v.id);
        let total = vets.len();
        let items = vets
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn all_vets(&self) -> Result<Vec<Vet>, StoreError> {
        let state = self.state.lock().await;
        let mut vets = state.vets.clone();
        vets.sort_by_key(|v| v.id);
        Ok(vets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn pet(name: &str) -> Pet {
        Pet {
            id: None,
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date"),
            pet_type: PetType {
                id: 2,
                name: "dog".to_string(),
            },
            visits: Vec::new(),
        }
    }

    #[tokio::test]
    async fn fake_matches_sqlite_ordering_contracts() {
        let store = FakeStore::with_defaults();
        let id = store
            .seed_owner(Owner {
                first_name: "Jean".to_string(),
                last_name: "Coleman".to_string(),
                address: "105 N. Lake St.".to_string(),
                city: "Monona".to_string(),
                telephone: "6085552654".to_string(),
                pets: vec![pet("Samantha"), pet("Max")],
                ..Owner::default()
            })
            .await;

        let owner = store.find_owner(id).await.expect("query").expect("owner");
        let names: Vec<&str> = owner.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);

        let page = store
            .find_owners_by_last_name("col", PageRequest::default())
            .await
            .expect("query");
        assert_eq!(page.total_items, 1);

        let types = store.pet_types().await.expect("types");
        assert_eq!(types.first().map(|t| t.name.as_str()), Some("bird"));
    }
}
