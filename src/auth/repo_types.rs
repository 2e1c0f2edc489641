use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Postal address attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// User record as loaded from the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub password_hash: String, // Argon2 PHC string, never exposed
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub address: Address,
    pub created_at: OffsetDateTime,
}

/// Everything needed to insert a user; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub address: Address,
}

#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub phone_number: String,
    pub gender: String,
    pub date_of_birth: String,
    pub role: String,
    pub profile_picture: Option<String>,
    pub address: Json<Address>,
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            username: r.username,
            password_hash: r.password_hash,
            phone_number: r.phone_number,
            gender: r.gender,
            date_of_birth: r.date_of_birth,
            role: r.role,
            profile_picture: r.profile_picture,
            address: r.address.0,
            created_at: r.created_at,
        }
    }
}
