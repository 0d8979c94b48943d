//! Wire types for the PetFriends API.
//!
//! These mirror what the service sends and accepts. Nothing here validates
//! values locally; the service is the only judge of what is acceptable.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Filter value selecting every pet in the catalog.
pub const ALL_PETS: &str = "";

/// Filter value selecting only the caller's own pets.
pub const MY_PETS: &str = "my_pets";

/// Email/password pair exchanged for an [`AuthKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Token returned by `GET /api/key`, sent back in the `auth_key` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthKey {
    pub key: String,
}

impl AuthKey {
    /// Wrap an arbitrary token. Used for keys passed on the command line and
    /// for forged keys in negative tests.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// A pet as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub animal_type: String,
    #[serde(deserialize_with = "string_or_number")]
    pub age: String,
    /// Data URL of the photo, or an empty string when there is none.
    #[serde(default)]
    pub pet_photo: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub created_at: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Pet {
    pub fn has_photo(&self) -> bool {
        !self.pet_photo.is_empty()
    }
}

/// Body of `GET /api/pets`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetList {
    pub pets: Vec<Pet>,
}

impl PetList {
    pub fn contains_id(&self, id: &str) -> bool {
        self.pets.iter().any(|pet| pet.id == id)
    }
}

/// Text fields sent when creating or updating a pet.
///
/// Every field is optional so that requests with missing fields can be
/// expressed; absent fields are left out of the request. `age` is text
/// because the service receives it as a form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PetForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
}

impl PetForm {
    pub fn new(name: impl Into<String>, animal_type: impl Into<String>, age: impl ToString) -> Self {
        Self {
            name: Some(name.into()),
            animal_type: Some(animal_type.into()),
            age: Some(age.to_string()),
        }
    }

    /// Present fields as `(name, value)` pairs, in wire order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_deref()),
            ("animal_type", self.animal_type.as_deref()),
            ("age", self.age.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
