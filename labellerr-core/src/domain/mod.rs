//! Core domain types
//!
//! Records as the Labellerr platform reports them. These are shared between the
//! client (which deserializes them) and the CLI (which renders them).

pub mod data_type;
pub mod dataset;
pub mod export;
pub mod preannotation;
pub mod project;
pub mod status;
pub mod template;
