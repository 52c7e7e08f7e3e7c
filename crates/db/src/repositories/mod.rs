//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or, for statements that participate in the signing
//! transaction, `&mut PgConnection`) as the first argument.

pub mod activity_log_repo;
pub mod photo_repo;
pub mod property_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use photo_repo::PhotoRepo;
pub use property_repo::PropertyRepo;
