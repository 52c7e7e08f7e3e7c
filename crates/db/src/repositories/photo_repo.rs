//! Repository for the `file` table, including the signing transaction.

use sqlx::PgPool;
use vetrina_core::signing::{
    slot_sort_key, RetireMode, CANONICAL_SLOT, PHOTO_CATEGORY, SUPERSEDED_SLOT,
};
use vetrina_core::types::DbId;

use crate::models::photo::{CreatePhotoRecord, PhotoRecord};
use crate::repositories::ActivityLogRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, immobile, tipologia, nome, codice_bucket, created_at";

/// Query and mutation operations for photo records.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePhotoRecord,
    ) -> Result<PhotoRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO file (immobile, tipologia, nome, codice_bucket)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoRecord>(&query)
            .bind(input.property_id)
            .bind(&input.category)
            .bind(&input.slot_name)
            .bind(&input.storage_key)
            .fetch_one(pool)
            .await
    }

    /// List a property's photo records (photo category only), in insertion
    /// order.
    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<PhotoRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM file
             WHERE immobile = $1 AND tipologia = $2
             ORDER BY id"
        );
        sqlx::query_as::<_, PhotoRecord>(&query)
            .bind(property_id)
            .bind(PHOTO_CATEGORY)
            .fetch_all(pool)
            .await
    }

    /// The property's earliest photo: lowest numeric slot name wins,
    /// non-numeric slots (superseded markers) sort last. Slot names are
    /// strings, so the ordering is done here rather than in SQL.
    pub async fn first_photo(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Option<PhotoRecord>, sqlx::Error> {
        let records = Self::list_by_property(pool, property_id).await?;
        Ok(records
            .into_iter()
            .min_by_key(|record| slot_sort_key(&record.slot_name)))
    }

    /// The signing transaction: retire the previous canonical-slot record,
    /// insert the new one pointing at `output_key`, and append the audit
    /// row. Commits on success; any statement failure rolls the whole
    /// transaction back and surfaces the error.
    ///
    /// Deliberately NOT idempotent: each successful call retires whatever
    /// record currently holds the canonical slot, so repeating a request
    /// stacks transitions instead of being a no-op.
    pub async fn record_signing(
        pool: &PgPool,
        property_id: DbId,
        output_key: &str,
        retire: RetireMode,
        audit_action: &str,
    ) -> Result<PhotoRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result =
            Self::signing_statements(&mut tx, property_id, output_key, retire, audit_action).await;

        match result {
            Ok(record) => {
                tx.commit().await?;
                Ok(record)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback after failed signing transaction also failed");
                }
                Err(err)
            }
        }
    }

    /// The three statements of the signing transaction, in order.
    async fn signing_statements(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        property_id: DbId,
        output_key: &str,
        retire: RetireMode,
        audit_action: &str,
    ) -> Result<PhotoRecord, sqlx::Error> {
        match retire {
            RetireMode::Delete => {
                sqlx::query("DELETE FROM file WHERE immobile = $1 AND tipologia = $2 AND nome = $3")
                    .bind(property_id)
                    .bind(PHOTO_CATEGORY)
                    .bind(CANONICAL_SLOT)
                    .execute(&mut **tx)
                    .await?;
            }
            RetireMode::Rename => {
                sqlx::query(
                    "UPDATE file SET nome = $4 WHERE immobile = $1 AND tipologia = $2 AND nome = $3",
                )
                .bind(property_id)
                .bind(PHOTO_CATEGORY)
                .bind(CANONICAL_SLOT)
                .bind(SUPERSEDED_SLOT)
                .execute(&mut **tx)
                .await?;
            }
        }

        let query = format!(
            "INSERT INTO file (immobile, tipologia, nome, codice_bucket)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let record = sqlx::query_as::<_, PhotoRecord>(&query)
            .bind(property_id)
            .bind(PHOTO_CATEGORY)
            .bind(CANONICAL_SLOT)
            .bind(output_key)
            .fetch_one(&mut **tx)
            .await?;

        ActivityLogRepo::insert(&mut **tx, property_id, audit_action).await?;

        Ok(record)
    }
}
