//! Request handlers.
//!
//! Handlers validate raw input via `vetrina-core`, delegate to the
//! signing pipeline, and map errors via [`crate::error::AppError`].

pub mod signing;
