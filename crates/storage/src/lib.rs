//! Object storage abstraction.
//!
//! [`ObjectStore`] is the seam between the signing pipeline and blob
//! storage: [`s3::S3ObjectStore`] is the production implementation,
//! [`memory::MemoryObjectStore`] backs integration tests.

pub mod error;
pub mod memory;
pub mod s3;

pub use error::StorageError;

use async_trait::async_trait;

/// Binary blob storage keyed by bucket + key.
///
/// `get` on a missing key is a [`StorageError::NotFound`], never a
/// transient fault; every other failure (network, permissions) surfaces
/// as [`StorageError::Transient`] so callers can tell the two apart.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch an object's bytes.
    async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write an object, overwriting any previous content.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
