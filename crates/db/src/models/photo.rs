//! Photo record model.
//!
//! Rust field names are mapped onto the legacy Italian columns of the
//! `file` table, which upstream upload flows also write to.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vetrina_core::types::{DbId, Timestamp};

/// A row from the `file` table.
///
/// `slot_name` is a string ordinal: `"0"` marks the canonical first
/// photo, higher numbers the remaining gallery order, and non-numeric
/// values mark superseded records.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PhotoRecord {
    pub id: DbId,
    #[sqlx(rename = "immobile")]
    pub property_id: DbId,
    #[sqlx(rename = "tipologia")]
    pub category: String,
    #[sqlx(rename = "nome")]
    pub slot_name: String,
    #[sqlx(rename = "codice_bucket")]
    pub storage_key: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a photo record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhotoRecord {
    pub property_id: DbId,
    pub category: String,
    pub slot_name: String,
    pub storage_key: String,
}
