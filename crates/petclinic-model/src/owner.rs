// SPDX-License-Identifier: Apache-2.0

use crate::FieldErrors;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const TELEPHONE_MAX_DIGITS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
}

impl Visit {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.description.trim().is_empty() {
            errors.reject("description", "must not be blank");
        }
        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: Option<i64>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub pet_type: PetType,
    pub visits: Vec<Visit>,
}

impl Pet {
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// `today` is passed in so validation stays deterministic under test.
    #[must_use]
    pub fn validate(&self, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.reject("name", "must not be blank");
        }
        if self.birth_date > today {
            errors.reject("birth_date", "must not be in the future");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    pub pets: Vec<Pet>,
}

impl Owner {
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        for (field, value) in [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                errors.reject(field, "must not be blank");
            }
        }
        let telephone = self.telephone.trim();
        if telephone.is_empty() {
            errors.reject("telephone", "must not be blank");
        } else if !telephone.bytes().all(|b| b.is_ascii_digit()) {
            errors.reject("telephone", "must contain digits only");
        } else if telephone.len() > TELEPHONE_MAX_DIGITS {
            errors.reject(
                "telephone",
                format!("must be at most {TELEPHONE_MAX_DIGITS} digits"),
            );
        }
        errors
    }

    #[must_use]
    pub fn pet_by_id(&self, pet_id: i64) -> Option<&Pet> {
        self.pets.iter().find(|p| p.id == Some(pet_id))
    }

    /// Case-insensitive lookup by pet name; `ignore_new` skips pets that
    /// have not been saved yet, so a form round-trip does not collide with
    /// itself.
    #[must_use]
    pub fn pet_by_name(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        let wanted = name.trim().to_lowercase();
        self.pets.iter().find(|p| {
            if ignore_new && p.is_new() {
                return false;
            }
            p.name.trim().to_lowercase() == wanted
        })
    }
}
