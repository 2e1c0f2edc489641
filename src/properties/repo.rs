use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::error::StoreError;
use crate::properties::{
    dto::{NewProperty, PropertyPatch},
    repo_types::{Property, PropertyRow},
};

/// Storage for property listings.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All properties, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Property>, StoreError>;
    async fn create(&self, property: NewProperty) -> Result<Property, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, StoreError>;
    /// Shallow-merges `patch` into the stored record; `None` when absent.
    async fn update(
        &self,
        id: Uuid,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, StoreError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgPropertyStore {
    db: PgPool,
}

impl PgPropertyStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const PROPERTY_COLUMNS: &str = "id, title, kind, description, price, location, square_feet, \
                                year_built, created_at, updated_at";

fn list_statement() -> String {
    format!("SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY created_at DESC")
}

/// Shallow merge in one statement: a NULL bind keeps the stored column, so
/// concurrent updates resolve last-write-wins. `created_at` is never written.
fn update_statement() -> String {
    format!(
        r#"
        UPDATE properties SET
            title       = COALESCE($2, title),
            kind        = COALESCE($3, kind),
            description = COALESCE($4, description),
            price       = COALESCE($5, price),
            location    = COALESCE($6, location),
            square_feet = COALESCE($7, square_feet),
            year_built  = COALESCE($8, year_built),
            updated_at  = now()
        WHERE id = $1
        RETURNING {PROPERTY_COLUMNS}
        "#
    )
}

#[async_trait]
impl PropertyStore for PgPropertyStore {
    async fn list(&self) -> Result<Vec<Property>, StoreError> {
        let rows = sqlx::query_as::<_, PropertyRow>(&list_statement())
            .fetch_all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Property::from).collect())
    }

    async fn create(&self, p: NewProperty) -> Result<Property, StoreError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            r#"
            INSERT INTO properties (id, title, kind, description, price, location,
                                    square_feet, year_built)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PROPERTY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&p.title)
        .bind(&p.kind)
        .bind(&p.description)
        .bind(p.price)
        .bind(Json(&p.location))
        .bind(p.square_feet)
        .bind(p.year_built)
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, StoreError> {
        let row = sqlx::query_as::<_, PropertyRow>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Property::from))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: PropertyPatch,
    ) -> Result<Option<Property>, StoreError> {
        let row = sqlx::query_as::<_, PropertyRow>(&update_statement())
            .bind(id)
            .bind(patch.title)
            .bind(patch.kind)
            .bind(patch.description)
            .bind(patch.price)
            .bind(patch.location.map(Json))
            .bind(patch.square_feet)
            .bind(patch.year_built)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(Property::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
