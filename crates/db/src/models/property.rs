//! Property entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vetrina_core::types::{DbId, Timestamp};

/// A row from the `immobile` table. Read-only to this service: properties
/// are created and edited by the listing management flows upstream.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    #[sqlx(rename = "indirizzo")]
    pub address: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a property (seeding and tests only).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProperty {
    pub address: Option<String>,
}
