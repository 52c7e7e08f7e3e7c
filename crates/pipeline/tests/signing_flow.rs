//! End-to-end pipeline tests against a real database and an in-memory
//! object store.

use std::io::Cursor;
use std::sync::Arc;

use assert_matches::assert_matches;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use sqlx::PgPool;
use vetrina_core::signing::{RetireMode, SigningRequest, TransactionKind, CANONICAL_SLOT};
use vetrina_db::models::photo::CreatePhotoRecord;
use vetrina_db::models::property::CreateProperty;
use vetrina_db::repositories::{ActivityLogRepo, PhotoRepo, PropertyRepo};
use vetrina_pipeline::{PipelineConfig, PipelineError, SigningPipeline};
use vetrina_storage::memory::MemoryObjectStore;
use vetrina_storage::ObjectStore;

const BUCKET_ORIGINAL: &str = "assets-original";
const BUCKET_SIGNED: &str = "assets-signed";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, color);
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn config() -> PipelineConfig {
    PipelineConfig {
        bucket_original: BUCKET_ORIGINAL.to_string(),
        bucket_signed: BUCKET_SIGNED.to_string(),
        content_type: "image/png".to_string(),
        watermark_prefix: "watermark".to_string(),
        output_prefix: "immobili".to_string(),
        min_width: 1000,
        apply_darken: false,
        require_property: true,
        retire_mode: RetireMode::Delete,
    }
}

fn request(property_id: i64) -> SigningRequest {
    SigningRequest {
        property_id,
        kind: TransactionKind::Sold,
        color: "red".to_string(),
    }
}

fn pipeline(pool: &PgPool, store: &MemoryObjectStore, config: PipelineConfig) -> SigningPipeline {
    SigningPipeline::new(pool.clone(), Arc::new(store.clone()), config)
}

/// Seed a property with one photo record whose blob (of the given size)
/// and the venduto/red watermark are both present in the store.
async fn seed(pool: &PgPool, store: &MemoryObjectStore, width: u32, height: u32) -> i64 {
    let property = PropertyRepo::create(
        pool,
        &CreateProperty {
            address: Some("Via Garibaldi 7".to_string()),
        },
    )
    .await
    .unwrap();

    PhotoRepo::create(
        pool,
        &CreatePhotoRecord {
            property_id: property.id,
            category: "FOTO".to_string(),
            slot_name: "0".to_string(),
            storage_key: "immobili/ref42/0.png".to_string(),
        },
    )
    .await
    .unwrap();

    store
        .put(
            BUCKET_SIGNED,
            "immobili/ref42/0.png",
            png(width, height, Rgba([255, 255, 255, 255])),
            "image/png",
        )
        .await
        .unwrap();
    store
        .put(
            BUCKET_ORIGINAL,
            "watermark/venduto-red.png",
            png(20, 20, Rgba([255, 0, 0, 255])),
            "image/png",
        )
        .await
        .unwrap();

    property.id
}

// ---------------------------------------------------------------------------
// Success scenarios
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn wide_photo_signs_without_resize(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;

    let outcome = pipeline(&pool, &store, config())
        .execute(request(property_id))
        .await
        .unwrap();

    assert_eq!(outcome.output_key, "immobili/ref42/done.png");
    assert_eq!((outcome.width, outcome.height), (1200, 900));

    // Output blob exists and decodes with unchanged dimensions.
    let bytes = store.get(BUCKET_SIGNED, "immobili/ref42/done.png").await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.width(), 1200);

    // Canonical record swapped, one audit row.
    let records = PhotoRepo::list_by_property(&pool, property_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].slot_name, CANONICAL_SLOT);
    assert_eq!(records[0].storage_key, "immobili/ref42/done.png");

    let log = ActivityLogRepo::list_by_property(&pool, property_id).await.unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action, "Immobile concluso");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn narrow_photo_is_upscaled_before_compositing(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 800, 1200).await;

    let outcome = pipeline(&pool, &store, config())
        .execute(request(property_id))
        .await
        .unwrap();

    assert_eq!(outcome.width, 1000, "width raised to the threshold");
    assert_eq!(outcome.height, 1500, "aspect ratio preserved");

    let bytes = store.get(BUCKET_SIGNED, "immobili/ref42/done.png").await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1000, 1500));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn signing_twice_is_not_idempotent(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;
    let runner = pipeline(&pool, &store, config());

    runner.execute(request(property_id)).await.unwrap();
    // The second run picks up the first run's output as the canonical
    // photo and watermarks it again: a further transition, not a no-op.
    runner.execute(request(property_id)).await.unwrap();

    let records = PhotoRepo::list_by_property(&pool, property_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].storage_key, "immobili/ref42/done.png");

    let log = ActivityLogRepo::list_by_property(&pool, property_id).await.unwrap();
    assert_eq!(log.len(), 2, "each run records its own transition");
}

// ---------------------------------------------------------------------------
// Failure scenarios
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_property_is_rejected_when_check_enabled(pool: PgPool) {
    let store = MemoryObjectStore::new();

    let err = pipeline(&pool, &store, config())
        .execute(request(999_999))
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::NotFound(_));
    assert!(err.to_string().contains("Immobile non trovato"));
    assert!(store.is_empty().await, "no blob writes on failure");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn property_check_can_be_disabled(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let mut relaxed = config();
    relaxed.require_property = false;

    let err = pipeline(&pool, &store, relaxed)
        .execute(request(999_999))
        .await
        .unwrap_err();

    // The pipeline skipped the property lookup and failed on the next
    // step instead: no photo records.
    assert!(err.to_string().contains("senza almeno una foto"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn property_without_photos_is_a_domain_error(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property = PropertyRepo::create(&pool, &CreateProperty { address: None })
        .await
        .unwrap();

    let err = pipeline(&pool, &store, config())
        .execute(request(property.id))
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::NotFound(_));
    assert!(err
        .to_string()
        .contains("Impossibile segnalare immobile \"venduto\" senza almeno una foto"));
    assert!(store.is_empty().await);
    assert!(ActivityLogRepo::list_by_property(&pool, property.id)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_watermark_asset_is_named(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;

    // Ask for a color whose asset was never uploaded.
    let mut req = request(property_id);
    req.color = "blue".to_string();

    let err = pipeline(&pool, &store, config()).execute(req).await.unwrap_err();
    assert_matches!(err, PipelineError::NotFound(_));
    assert!(err.to_string().contains("Scritta non trovata"));
    assert!(!store.contains(BUCKET_SIGNED, "immobili/ref42/done.png").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_photo_blob_is_named(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;

    // Simulate a record pointing at a blob that is gone: reseed the store
    // without the photo object.
    let fresh = MemoryObjectStore::new();
    fresh
        .put(
            BUCKET_ORIGINAL,
            "watermark/venduto-red.png",
            png(20, 20, Rgba([255, 0, 0, 255])),
            "image/png",
        )
        .await
        .unwrap();

    let err = pipeline(&pool, &fresh, config())
        .execute(request(property_id))
        .await
        .unwrap_err();
    assert_matches!(err, PipelineError::NotFound(_));
    assert!(err.to_string().contains("Foto non trovata"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_recording_rolls_back_but_leaves_orphan_blob(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;

    // Shrink the audit column so the last statement of the recording
    // transaction fails after upload already happened.
    sqlx::query("ALTER TABLE log ALTER COLUMN azione TYPE VARCHAR(5)")
        .execute(&pool)
        .await
        .unwrap();

    let err = pipeline(&pool, &store, config())
        .execute(request(property_id))
        .await
        .unwrap_err();

    assert_matches!(err, PipelineError::Transaction(_));
    assert_eq!(err.to_string(), "Errore nelle query di aggiornamento");

    // Relational state rolled back: the original record is still the
    // canonical one and no audit row exists.
    let records = PhotoRepo::list_by_property(&pool, property_id).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].storage_key, "immobili/ref42/0.png");
    assert!(ActivityLogRepo::list_by_property(&pool, property_id)
        .await
        .unwrap()
        .is_empty());

    // The uploaded blob is NOT compensated: documented orphan.
    assert!(store.contains(BUCKET_SIGNED, "immobili/ref42/done.png").await);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn darkening_variant_dims_the_base(pool: PgPool) {
    let store = MemoryObjectStore::new();
    let property_id = seed(&pool, &store, 1200, 900).await;
    let mut darkened = config();
    darkened.apply_darken = true;

    pipeline(&pool, &store, darkened)
        .execute(request(property_id))
        .await
        .unwrap();

    let bytes = store.get(BUCKET_SIGNED, "immobili/ref42/done.png").await.unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    // A corner pixel (away from the centered watermark) of the white base
    // is dimmed.
    let corner = decoded.get_pixel(5, 5);
    assert!(corner[0] < 255);
}
