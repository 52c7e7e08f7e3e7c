//! Repository for the `immobile` table.

use sqlx::PgPool;
use vetrina_core::types::DbId;

use crate::models::property::{CreateProperty, Property};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, indirizzo, created_at";

/// Read access to properties. This service never mutates them; `create`
/// exists for seeding and integration tests.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Find a property by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM immobile WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new property, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!("INSERT INTO immobile (indirizzo) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Property>(&query)
            .bind(&input.address)
            .fetch_one(pool)
            .await
    }
}
