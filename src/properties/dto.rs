use serde::Deserialize;
#[cfg(test)]
use time::OffsetDateTime;
#[cfg(test)]
use uuid::Uuid;

#[cfg(test)]
use crate::properties::repo_types::Property;
use crate::properties::repo_types::Location;

/// Body of a create request. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price: f64,
    pub location: Location,
    pub square_feet: f64,
    pub year_built: i32,
}

#[cfg(test)]
impl NewProperty {
    pub fn into_property(self, id: Uuid, now: OffsetDateTime) -> Property {
        Property {
            id,
            title: self.title,
            kind: self.kind,
            description: self.description,
            price: self.price,
            location: self.location,
            square_feet: self.square_feet,
            year_built: self.year_built,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of an update request; absent or null fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub location: Option<Location>,
    pub square_feet: Option<f64>,
    pub year_built: Option<i32>,
}
