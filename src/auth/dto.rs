use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo_types::{Address, User};

/// Request body for signup. Every field is optional on the wire so that a
/// missing one is reported as a validation failure rather than a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone_number: Option<String>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub role: Option<String>,
    pub address: Option<AddressInput>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressInput {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Signup fields after presence checks; password still in plaintext.
#[derive(Debug)]
pub struct SignupFields {
    pub name: String,
    pub username: String,
    pub password: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub address: Address,
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

impl SignupRequest {
    /// Returns `None` when any required field is absent or empty.
    pub fn validate(self) -> Option<SignupFields> {
        let address = self.address?;
        Some(SignupFields {
            name: present(self.name)?,
            username: present(self.username)?,
            password: present(self.password)?,
            phone_number: present(self.phone_number)?,
            gender: present(self.gender)?,
            date_of_birth: present(self.date_of_birth)?,
            role: present(self.role)?,
            profile_picture: present(self.profile_picture),
            address: Address {
                street: present(address.street)?,
                city: present(address.city)?,
                state: present(address.state)?,
                zip_code: present(address.zip_code)?,
            },
        })
    }
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub name: String,
    pub username: String,
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub role: String,
    #[serde(rename = "profilePicture", skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub address: Address,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            phone_number: u.phone_number,
            gender: u.gender,
            date_of_birth: u.date_of_birth,
            role: u.role,
            profile_picture: u.profile_picture,
            address: u.address,
            created_at: u.created_at,
        }
    }
}
