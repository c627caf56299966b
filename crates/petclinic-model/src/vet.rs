// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialties: Vec<String>,
}

impl Vet {
    #[must_use]
    pub fn specialties_label(&self) -> String {
        if self.specialties.is_empty() {
            "none".to_string()
        } else {
            self.specialties.join(" ")
        }
    }
}
