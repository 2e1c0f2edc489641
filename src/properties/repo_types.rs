use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

#[cfg(test)]
use crate::properties::dto::PropertyPatch;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Property listing as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price: f64,
    pub location: Location,
    pub square_feet: f64,
    pub year_built: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

// The shipped merge is the COALESCE update in `PgPropertyStore::update`;
// this mirrors it for the in-memory store.
#[cfg(test)]
impl Property {
    /// Shallow merge: each top-level field present in `patch` replaces the
    /// stored one wholesale, `location` included.
    pub fn apply(&mut self, patch: PropertyPatch, now: OffsetDateTime) {
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.kind {
            self.kind = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.square_feet {
            self.square_feet = v;
        }
        if let Some(v) = patch.year_built {
            self.year_built = v;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, FromRow)]
pub struct PropertyRow {
    pub id: Uuid,
    pub title: String,
    pub kind: String,
    pub description: String,
    pub price: f64,
    pub location: Json<Location>,
    pub square_feet: f64,
    pub year_built: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<PropertyRow> for Property {
    fn from(r: PropertyRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            kind: r.kind,
            description: r.description,
            price: r.price,
            location: r.location.0,
            square_feet: r.square_feet,
            year_built: r.year_built,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
