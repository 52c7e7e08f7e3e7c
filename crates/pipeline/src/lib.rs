//! The signing pipeline: one validated request in, one durable state
//! transition out.
//!
//! Sequence: load property (configurable) -> select earliest photo ->
//! fetch photo and watermark blobs concurrently -> composite -> upload ->
//! transactional record swap plus audit row. Every failure short-circuits
//! the run; nothing is retried. The uploaded blob is not compensated when
//! the final transaction fails, so a failed recording step leaves an
//! orphan object behind (accepted, see `error` docs).

pub mod config;
pub mod error;

pub use config::PipelineConfig;
pub use error::PipelineError;

use std::sync::Arc;

use vetrina_core::signing::{
    output_key, reference_segment, watermark_key, SigningRequest, AUDIT_ACTION_CONCLUDED,
};
use vetrina_core::types::DbId;
use vetrina_db::repositories::{PhotoRepo, PropertyRepo};
use vetrina_db::DbPool;
use vetrina_imaging::{composite, CompositeOptions};
use vetrina_storage::{ObjectStore, StorageError};

const MSG_PROPERTY_NOT_FOUND: &str = "Immobile non trovato. Impossibile procedere.";
const MSG_PHOTO_BLOB_NOT_FOUND: &str = "Foto non trovata, operazione annullata";
const MSG_WATERMARK_NOT_FOUND: &str = "Scritta non trovata, operazione annullata";
const MSG_UPDATE_FAILED: &str = "Errore nelle query di aggiornamento";

/// Result of a successful signing run.
#[derive(Debug, Clone)]
pub struct SigningOutcome {
    pub property_id: DbId,
    pub output_key: String,
    pub width: u32,
    pub height: u32,
}

/// Orchestrates a single signing transition. Holds no per-request state:
/// connections come from the pool, blobs from the object store.
pub struct SigningPipeline {
    pool: DbPool,
    store: Arc<dyn ObjectStore>,
    config: PipelineConfig,
}

impl SigningPipeline {
    pub fn new(pool: DbPool, store: Arc<dyn ObjectStore>, config: PipelineConfig) -> Self {
        Self {
            pool,
            store,
            config,
        }
    }

    /// Run the pipeline for an already-validated request.
    ///
    /// Not idempotent: a repeated successful request retires whatever
    /// record currently holds the canonical slot (including the previous
    /// run's output) and inserts a further one.
    pub async fn execute(&self, request: SigningRequest) -> Result<SigningOutcome, PipelineError> {
        let property_id = request.property_id;

        if self.config.require_property {
            let property = PropertyRepo::find_by_id(&self.pool, property_id).await?;
            if property.is_none() {
                return Err(PipelineError::NotFound(MSG_PROPERTY_NOT_FOUND.to_string()));
            }
        }

        let photo = PhotoRepo::first_photo(&self.pool, property_id)
            .await?
            .ok_or_else(|| {
                PipelineError::NotFound(format!(
                    "Impossibile segnalare immobile \"{}\" senza almeno una foto",
                    request.kind
                ))
            })?;

        let reference = reference_segment(&photo.storage_key).ok_or_else(|| {
            PipelineError::Processing(format!(
                "Percorso della foto non valido: {}",
                photo.storage_key
            ))
        })?;
        let destination = output_key(&self.config.output_prefix, reference);

        let asset_key = watermark_key(&self.config.watermark_prefix, request.kind, &request.color);

        // The two blobs are independent; fetch them concurrently.
        let photo_blob = async {
            self.store
                .get(&self.config.bucket_signed, &photo.storage_key)
                .await
                .map_err(|err| blob_error(err, MSG_PHOTO_BLOB_NOT_FOUND))
        };
        let watermark_blob = async {
            self.store
                .get(&self.config.bucket_original, &asset_key)
                .await
                .map_err(|err| blob_error(err, MSG_WATERMARK_NOT_FOUND))
        };
        let (photo_bytes, watermark_bytes) = tokio::try_join!(photo_blob, watermark_blob)?;

        let options = CompositeOptions {
            min_width: self.config.min_width,
            darken: self.config.apply_darken,
        };
        let output = tokio::task::spawn_blocking(move || {
            composite(&photo_bytes, &watermark_bytes, &options)
        })
        .await
        .map_err(|err| PipelineError::Processing(format!("Elaborazione interrotta: {err}")))?
        .map_err(|err| {
            PipelineError::Processing(format!("Elaborazione dell'immagine non riuscita: {err}"))
        })?;

        let (width, height) = (output.width, output.height);
        self.store
            .put(
                &self.config.bucket_signed,
                &destination,
                output.bytes,
                &self.config.content_type,
            )
            .await
            .map_err(|err| {
                PipelineError::Storage(format!(
                    "Caricamento del file elaborato non riuscito: {err}"
                ))
            })?;

        // The blob upload above is outside this transaction. If recording
        // fails the object stays behind as an orphan.
        PhotoRepo::record_signing(
            &self.pool,
            property_id,
            &destination,
            self.config.retire_mode,
            AUDIT_ACTION_CONCLUDED,
        )
        .await
        .map_err(|err| {
            tracing::error!(property_id, error = %err, "Signing transaction failed, rolled back");
            PipelineError::Transaction(MSG_UPDATE_FAILED.to_string())
        })?;

        tracing::info!(
            property_id,
            output_key = %destination,
            width,
            height,
            "Property signed"
        );

        Ok(SigningOutcome {
            property_id,
            output_key: destination,
            width,
            height,
        })
    }
}

/// Map a blob fetch failure: missing object becomes a not-found with the
/// asset-specific message, anything else stays a storage fault.
fn blob_error(err: StorageError, not_found_message: &str) -> PipelineError {
    if err.is_not_found() {
        PipelineError::NotFound(not_found_message.to_string())
    } else {
        PipelineError::Storage(err.to_string())
    }
}
