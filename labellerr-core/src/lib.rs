//! Labellerr Core
//!
//! Core types and abstractions for the Labellerr SDK.
//!
//! This crate contains:
//! - Domain types: Records returned by the platform (Dataset, Project, Export, etc.)
//! - DTOs: Request payloads sent to the platform, each with explicit validation
//! - Registry: Data-type dispatch for datasets and projects
//!
//! Nothing in this crate performs I/O.

pub mod domain;
pub mod dto;
pub mod registry;
pub mod validation;

pub use domain::data_type::DataType;
pub use domain::status::Progress;
pub use validation::ValidationError;
