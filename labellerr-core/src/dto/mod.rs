//! Data Transfer Objects sent to the platform
//!
//! Each request payload carries an explicit `validate()` that runs before the
//! client builds the HTTP request. Validation never performs I/O.

pub mod dataset;
pub mod export;
pub mod project;
pub mod template;
