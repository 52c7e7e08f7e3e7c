//! Activity log model.

use serde::Serialize;
use sqlx::FromRow;
use vetrina_core::types::{DbId, Timestamp};

/// A row from the `log` table. Append-only: entries are never updated or
/// deleted by the service.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLogEntry {
    pub id: DbId,
    #[sqlx(rename = "immobile")]
    pub property_id: DbId,
    #[sqlx(rename = "azione")]
    pub action: String,
    #[sqlx(rename = "data")]
    pub logged_at: Timestamp,
}
