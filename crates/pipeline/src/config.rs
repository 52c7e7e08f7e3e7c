//! Pipeline configuration.
//!
//! The two historical deployments of this flow differed in bucket
//! topology, whether the base photo is darkened, whether property
//! existence is checked, the allowed color set, and how the previous
//! canonical record is retired. All of that is configuration on one
//! pipeline instead of parallel code paths.

use vetrina_core::signing::RetireMode;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Bucket holding immutable assets (watermarks, original uploads).
    pub bucket_original: String,
    /// Bucket holding processed photos; the source photo is read from
    /// here and the composited output is written back here. Equal to
    /// `bucket_original` in the single-bucket deployment.
    pub bucket_signed: String,
    /// Content type of the uploaded output object.
    pub content_type: String,
    /// Key prefix (namespace) of the watermark assets.
    pub watermark_prefix: String,
    /// Key prefix of the composited output objects.
    pub output_prefix: String,
    /// Minimum base photo size before compositing; smaller photos are
    /// upscaled.
    pub min_width: u32,
    /// Darken the base photo before resizing.
    pub apply_darken: bool,
    /// Check that the property row exists before doing anything else.
    pub require_property: bool,
    /// How the previous canonical record is retired.
    pub retire_mode: RetireMode,
}
