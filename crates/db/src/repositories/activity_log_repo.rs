//! Repository for the `log` table.

use sqlx::{PgConnection, PgPool};
use vetrina_core::types::DbId;

use crate::models::activity::ActivityLogEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, immobile, azione, data";

/// Append and query operations for the activity log. Entries are never
/// updated or deleted.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append an entry. Takes a connection so it can run inside the
    /// signing transaction; the timestamp is assigned by the database.
    pub async fn insert(
        conn: &mut PgConnection,
        property_id: DbId,
        action: &str,
    ) -> Result<ActivityLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO log (immobile, azione, data) VALUES ($1, $2, now()) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLogEntry>(&query)
            .bind(property_id)
            .bind(action)
            .fetch_one(conn)
            .await
    }

    /// List all entries for a property, oldest first.
    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<ActivityLogEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM log WHERE immobile = $1 ORDER BY id");
        sqlx::query_as::<_, ActivityLogEntry>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }
}
