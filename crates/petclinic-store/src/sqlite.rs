// SPDX-License-Identifier: Apache-2.0

use crate::schema::{SCHEMA_SQL, SEED_SQL};
use crate::{ClinicStore, StoreError};
use async_trait::async_trait;
use chrono::NaiveDate;
use petclinic_model::{Owner, Page, PageRequest, Pet, PetType, Vet, Visit};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use tokio::sync::Mutex;

/// SQLite-backed store. The connection is serialized behind a mutex; every
/// operation is a handful of indexed point queries, so contention is not a
/// concern at clinic scale.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Loads the classic clinic data set. Idempotent.
    pub async fn seed(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(SEED_SQL)?;
        Ok(())
    }
}

fn load_visits(conn: &Connection, pet_id: i64) -> Result<Vec<Visit>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT id, visit_date, description FROM visits
         WHERE pet_id = ?1 ORDER BY visit_date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![pet_id], |row| {
        Ok(Visit {
            id: Some(row.get(0)?),
            date: row.get::<_, NaiveDate>(1)?,
            description: row.get(2)?,
        })
    })?;
    rows.collect()
}

fn load_pets(conn: &Connection, owner_id: i64) -> Result<Vec<Pet>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.name, p.birth_date, t.id, t.name
         FROM pets p JOIN types t ON t.id = p.type_id
         WHERE p.owner_id = ?1 ORDER BY p.name",
    )?;
    let rows = stmt.query_map(params![owner_id], |row| {
        Ok(Pet {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            birth_date: row.get::<_, NaiveDate>(2)?,
            pet_type: PetType {
                id: row.get(3)?,
                name: row.get(4)?,
            },
            visits: Vec::new(),
        })
    })?;
    let mut pets: Vec<Pet> = rows.collect::<Result<_, _>>()?;
    for pet in &mut pets {
        if let Some(id) = pet.id {
            pet.visits = load_visits(conn, id)?;
        }
    }
    Ok(pets)
}

fn owner_from_row(row: &rusqlite::Row<'_>) -> Result<Owner, rusqlite::Error> {
    Ok(Owner {
        id: Some(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        telephone: row.get(5)?,
        pets: Vec::new(),
    })
}

fn load_specialties(conn: &Connection, vet_id: i64) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT s.name FROM specialties s
         JOIN vet_specialties vs ON vs.specialty_id = s.id
         WHERE vs.vet_id = ?1 ORDER BY s.name",
    )?;
    let rows = stmt.query_map(params![vet_id], |row| row.get(0))?;
    rows.collect()
}

fn pet_exists_for_owner(
    conn: &Connection,
    owner_id: i64,
    pet_id: i64,
) -> Result<bool, rusqlite::Error> {
    conn.query_row(
        "SELECT 1 FROM pets WHERE id = ?1 AND owner_id = ?2",
        params![pet_id, owner_id],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
}

#[async_trait]
impl ClinicStore for SqliteStore {
    async fn find_owner(&self, id: i64) -> Result<Option<Owner>, StoreError> {
        let conn = self.conn.lock().await;
        let owner = conn
            .query_row(
                "SELECT id, first_name, last_name, address, city, telephone
                 FROM owners WHERE id = ?1",
                params![id],
                owner_from_row,
            )
            .optional()?;
        match owner {
            Some(mut owner) => {
                owner.pets = load_pets(&conn, id)?;
                Ok(Some(owner))
            }
            None => Ok(None),
        }
    }

    async fn find_owners_by_last_name(
        &self,
        prefix: &str,
        request: PageRequest,
    ) -> Result<Page<Owner>, StoreError> {
        let conn = self.conn.lock().await;
        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM owners WHERE last_name LIKE ?1 || '%'",
            params![prefix],
            |row| row.get(0),
        )?;
        let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name, address, city, telephone
             FROM owners WHERE last_name LIKE ?1 || '%'
             ORDER BY last_name, id LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt.query_map(
            params![prefix, request.size as i64, request.offset() as i64],
            owner_from_row,
        )?;
        let mut owners: Vec<Owner> = rows.collect::<Result<_, _>>()?;
        for owner in &mut owners {
            if let Some(id) = owner.id {
                owner.pets = load_pets(&conn, id)?;
            }
        }
        Ok(Page::new(owners, request, total as usize))
    }

    async fn save_owner(&self, owner: &Owner) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        match owner.id {
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE owners SET first_name = ?1, last_name = ?2, address = ?3,
                     city = ?4, telephone = ?5 WHERE id = ?6",
                    params![
                        owner.first_name,
                        owner.last_name,
                        owner.address,
                        owner.city,
                        owner.telephone,
                        id
                    ],
                )?;
                if updated == 0 {
                    return Err(StoreError::not_found("owner", id));
                }
                Ok(id)
            }
            None => {
                conn.execute(
                    "INSERT INTO owners (first_name, last_name, address, city, telephone)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        owner.first_name,
                        owner.last_name,
                        owner.address,
                        owner.city,
                        owner.telephone
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            }
        }
    }

    async fn save_pet(&self, owner_id: i64, pet: &Pet) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        let owner_exists: bool = conn
            .query_row("SELECT 1 FROM owners WHERE id = ?1", params![owner_id], |_| {
                Ok(())
            })
            .optional()?
            .is_some();
        if !owner_exists {
            return Err(StoreError::not_found("owner", owner_id));
        }
        match pet.id {
            Some(id) => {
                let updated = conn.execute(
                    "UPDATE pets SET name = ?1, birth_date = ?2, type_id = ?3
                     WHERE id = ?4 AND owner_id = ?5",
                    params![pet.name, pet.birth_date, pet.pet_type.id, id, owner_id],
                )?;
                if updated == 0 {
                    return Err(StoreError::not_found("pet", id));
                }
                Ok(id)
            }
            None => {
                conn.execute(
                    "INSERT INTO pets (name, birth_date, type_id, owner_id)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![pet.name, pet.birth_date, pet.pet_type.id, owner_id],
                )?;
                Ok(conn.last_insert_rowid())
            }
        }
    }

    async fn save_visit(
        &self,
        owner_id: i64,
        pet_id: i64,
        visit: &Visit,
    ) -> Result<i64, StoreError> {
        let conn = self.conn.lock().await;
        if !pet_exists_for_owner(&conn, owner_id, pet_id)? {
            return Err(StoreError::not_found("pet", pet_id));
        }
        conn.execute(
            "INSERT INTO visits (pet_id, visit_date, description) VALUES (?1, ?2, ?3)",
            params![pet_id, visit.date, visit.description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    async fn pet_types(&self) -> Result<Vec<PetType>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, name FROM types ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(PetType {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    async fn list_vets(&self, request: PageRequest) -> Result<Page<Vet>, StoreError> {
        let conn = self.conn.lock().await;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM vets", [], |row| row.get(0))?;
        let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name FROM vets ORDER BY id LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt.query_map(
            params![request.size as i64, request.offset() as i64],
            |row| {
                Ok(Vet {
                    id: row.get(0)?,
                    first_name: row.get(1)?,
                    last_name: row.get(2)?,
                    specialties: Vec::new(),
                })
            },
        )?;
        let mut vets: Vec<Vet> = rows.collect::<Result<_, _>>()?;
        for vet in &mut vets {
            vet.specialties = load_specialties(&conn, vet.id)?;
        }
        Ok(Page::new(vets, request, total as usize))
    }

    async fn all_vets(&self) -> Result<Vec<Vet>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT id, first_name, last_name FROM vets ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Vet {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                specialties: Vec::new(),
            })
        })?;
        let mut vets: Vec<Vet> = rows.collect::<Result<_, _>>()?;
        for vet in &mut vets {
            vet.specialties = load_specialties(&conn, vet.id)?;
        }
        Ok(vets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petclinic_model::DEFAULT_PAGE_SIZE;

    async fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().expect("open in-memory store");
        store.seed().await.expect("seed");
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[tokio::test]
    async fn find_owner_assembles_pets_and_visits() {
        let store = seeded().await;
        let owner = store
            .find_owner(6)
            .await
            .expect("query")
            .expect("owner 6 exists");
        assert_eq!(owner.last_name, "Coleman");
        // pets ordered by name
        let names: Vec<&str> = owner.pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Max", "Samantha"]);
        // visits newest first
        let max = owner.pet_by_name("Max", false).expect("max");
        assert_eq!(max.visits.len(), 2);
        assert_eq!(max.visits[0].description, "neutered");
        assert_eq!(max.visits[0].date, date(2013, 1, 3));
    }

    #[tokio::test]
    async fn unknown_owner_is_none() {
        let store = seeded().await;
        assert!(store.find_owner(999).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn last_name_search_is_a_prefix_match() {
        let store = seeded().await;
        let page = store
            .find_owners_by_last_name("Davis", PageRequest::default())
            .await
            .expect("query");
        assert_eq!(page.total_items, 2);
        assert!(page.items.iter().all(|o| o.last_name == "Davis"));

        let page = store
            .find_owners_by_last_name("Dav", PageRequest::default())
            .await
            .expect("query");
        assert_eq!(page.total_items, 2);

        let none = store
            .find_owners_by_last_name("Zzz", PageRequest::default())
            .await
            .expect("query");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn empty_prefix_pages_through_all_owners() {
        let store = seeded().await;
        let first = store
            .find_owners_by_last_name("", PageRequest::new(1, DEFAULT_PAGE_SIZE))
            .await
            .expect("query");
        assert_eq!(first.total_items, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 5);

        let second = store
            .find_owners_by_last_name("", PageRequest::new(2, DEFAULT_PAGE_SIZE))
            .await
            .expect("query");
        assert_eq!(second.items.len(), 5);
        assert!(second.is_last());

        let past_the_end = store
            .find_owners_by_last_name("", PageRequest::new(9, DEFAULT_PAGE_SIZE))
            .await
            .expect("query");
        assert!(past_the_end.items.is_empty());
        assert_eq!(past_the_end.total_items, 10);
    }

    #[tokio::test]
    async fn save_owner_inserts_then_updates() {
        let store = seeded().await;
        let mut owner = Owner {
            id: None,
            first_name: "Joe".to_string(),
            last_name: "Bloggs".to_string(),
            address: "123 Caramel Street".to_string(),
            city: "London".to_string(),
            telephone: "0131676163".to_string(),
            pets: Vec::new(),
        };
        let id = store.save_owner(&owner).await.expect("insert");
        assert!(id > 10);

        owner.id = Some(id);
        owner.city = "Glasgow".to_string();
        let same = store.save_owner(&owner).await.expect("update");
        assert_eq!(same, id);
        let reloaded = store.find_owner(id).await.expect("query").expect("exists");
        assert_eq!(reloaded.city, "Glasgow");

        owner.id = Some(9999);
        let err = store.save_owner(&owner).await.expect_err("missing owner");
        assert_eq!(err, StoreError::not_found("owner", 9999));
    }

    #[tokio::test]
    async fn save_pet_and_visit_round_trip() {
        let store = seeded().await;
        let pet = Pet {
            id: None,
            name: "Rex".to_string(),
            birth_date: date(2021, 2, 3),
            pet_type: PetType {
                id: 2,
                name: "dog".to_string(),
            },
            visits: Vec::new(),
        };
        let pet_id = store.save_pet(1, &pet).await.expect("insert pet");

        let visit = Visit {
            id: None,
            date: date(2024, 1, 15),
            description: "checkup".to_string(),
        };
        store
            .save_visit(1, pet_id, &visit)
            .await
            .expect("insert visit");

        let owner = store.find_owner(1).await.expect("query").expect("exists");
        let rex = owner.pet_by_name("Rex", false).expect("rex saved");
        assert_eq!(rex.pet_type.name, "dog");
        assert_eq!(rex.visits.len(), 1);
        assert_eq!(rex.visits[0].description, "checkup");
    }

    #[tokio::test]
    async fn saves_against_missing_parents_fail() {
        let store = seeded().await;
        let pet = Pet {
            id: None,
            name: "Ghost".to_string(),
            birth_date: date(2021, 2, 3),
            pet_type: PetType {
                id: 1,
                name: "cat".to_string(),
            },
            visits: Vec::new(),
        };
        let err = store.save_pet(999, &pet).await.expect_err("no owner");
        assert_eq!(err, StoreError::not_found("owner", 999));

        let visit = Visit {
            id: None,
            date: date(2024, 1, 15),
            description: "checkup".to_string(),
        };
        let err = store
            .save_visit(1, 999, &visit)
            .await
            .expect_err("no pet");
        assert_eq!(err, StoreError::not_found("pet", 999));

        // pet 7 belongs to owner 6, not owner 1
        let err = store
            .save_visit(1, 7, &visit)
            .await
            .expect_err("wrong owner");
        assert_eq!(err, StoreError::not_found("pet", 7));
    }

    #[tokio::test]
    async fn pet_types_are_sorted_by_name() {
        let store = seeded().await;
        let names: Vec<String> = store
            .pet_types()
            .await
            .expect("query")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["bird", "cat", "dog", "hamster", "lizard", "snake"]);
    }

    #[tokio::test]
    async fn vets_page_and_carry_specialties() {
        let store = seeded().await;
        let first = store
            .list_vets(PageRequest::new(1, DEFAULT_PAGE_SIZE))
            .await
            .expect("query");
        assert_eq!(first.total_items, 6);
        assert_eq!(first.total_pages, 2);
        let douglas = &first.items[2];
        assert_eq!(douglas.last_name, "Douglas");
        assert_eq!(
            douglas.specialties,
            vec!["dentistry".to_string(), "surgery".to_string()]
        );

        let second = store
            .list_vets(PageRequest::new(2, DEFAULT_PAGE_SIZE))
            .await
            .expect("query");
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].last_name, "Jenkins");

        assert_eq!(store.all_vets().await.expect("query").len(), 6);
    }

    #[tokio::test]
    async fn schema_and_seed_are_idempotent_on_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("clinic.sqlite");
        {
            let store = SqliteStore::open(&path).expect("open");
            store.seed().await.expect("seed");
        }
        let store = SqliteStore::open(&path).expect("reopen");
        store.seed().await.expect("reseed");
        let page = store
            .find_owners_by_last_name("", PageRequest::default())
            .await
            .expect("query");
        assert_eq!(page.total_items, 10);
    }
}
