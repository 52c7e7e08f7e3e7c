//! Domain core for the vetrina property signing service.
//!
//! Pure types and validation: no I/O, no database, no HTTP. The other
//! workspace crates (`vetrina-db`, `vetrina-storage`, `vetrina-pipeline`,
//! `vetrina-api`) build on top of these definitions.

pub mod error;
pub mod signing;
pub mod types;
