//! Data-type dispatch
//!
//! The platform reports a `data_type` string on every dataset and project.
//! This module maps that string to a typed kind through an explicit table,
//! so the set of supported kinds can be listed and tested on its own.

use thiserror::Error;

use crate::domain::data_type::DataType;
use crate::domain::dataset::Dataset;
use crate::domain::project::Project;

/// A dataset viewed through its data type
#[derive(Debug, Clone)]
pub enum DatasetKind {
    Image(Dataset),
    Video(Dataset),
    Audio(Dataset),
    Document(Dataset),
    Text(Dataset),
}

/// A project viewed through its data type
#[derive(Debug, Clone)]
pub enum ProjectKind {
    Image(Project),
    Video(Project),
    Audio(Project),
    Document(Project),
    Text(Project),
}

/// Errors raised while resolving a kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Data type not supported: {0}")]
    UnsupportedDataType(String),

    #[error("No handler registered for data type: {0}")]
    Unregistered(DataType),
}

type DatasetCtor = fn(Dataset) -> DatasetKind;
type ProjectCtor = fn(Project) -> ProjectKind;

const DATASET_REGISTRY: &[(DataType, DatasetCtor)] = &[
    (DataType::Image, DatasetKind::Image),
    (DataType::Video, DatasetKind::Video),
    (DataType::Audio, DatasetKind::Audio),
    (DataType::Document, DatasetKind::Document),
    (DataType::Text, DatasetKind::Text),
];

const PROJECT_REGISTRY: &[(DataType, ProjectCtor)] = &[
    (DataType::Image, ProjectKind::Image),
    (DataType::Video, ProjectKind::Video),
    (DataType::Audio, ProjectKind::Audio),
    (DataType::Document, ProjectKind::Document),
    (DataType::Text, ProjectKind::Text),
];

/// Data types with a registered dataset handler
pub fn dataset_entries() -> impl Iterator<Item = DataType> {
    DATASET_REGISTRY.iter().map(|(data_type, _)| *data_type)
}

/// Data types with a registered project handler
pub fn project_entries() -> impl Iterator<Item = DataType> {
    PROJECT_REGISTRY.iter().map(|(data_type, _)| *data_type)
}

fn lookup<C: Copy>(table: &[(DataType, C)], raw: &str) -> Result<C, RegistryError> {
    let data_type: DataType = raw
        .parse()
        .map_err(|_| RegistryError::UnsupportedDataType(raw.to_string()))?;

    table
        .iter()
        .find(|(registered, _)| *registered == data_type)
        .map(|(_, ctor)| *ctor)
        .ok_or(RegistryError::Unregistered(data_type))
}

/// Resolve the typed kind of a dataset from its `data_type` field
pub fn dataset_kind(dataset: Dataset) -> Result<DatasetKind, RegistryError> {
    let ctor = lookup(DATASET_REGISTRY, &dataset.data_type)?;
    Ok(ctor(dataset))
}

/// Resolve the typed kind of a project from its `data_type` field
pub fn project_kind(project: Project) -> Result<ProjectKind, RegistryError> {
    let ctor = lookup(PROJECT_REGISTRY, &project.data_type)?;
    Ok(ctor(project))
}

impl Dataset {
    /// Consume the record into the variant registered for its data type
    pub fn kind(self) -> Result<DatasetKind, RegistryError> {
        dataset_kind(self)
    }
}

impl Project {
    /// Consume the record into the variant registered for its data type
    pub fn kind(self) -> Result<ProjectKind, RegistryError> {
        project_kind(self)
    }
}

impl DatasetKind {
    pub fn data_type(&self) -> DataType {
        match self {
            DatasetKind::Image(_) => DataType::Image,
            DatasetKind::Video(_) => DataType::Video,
            DatasetKind::Audio(_) => DataType::Audio,
            DatasetKind::Document(_) => DataType::Document,
            DatasetKind::Text(_) => DataType::Text,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        match self {
            DatasetKind::Image(d)
            | DatasetKind::Video(d)
            | DatasetKind::Audio(d)
            | DatasetKind::Document(d)
            | DatasetKind::Text(d) => d,
        }
    }

    pub fn into_inner(self) -> Dataset {
        match self {
            DatasetKind::Image(d)
            | DatasetKind::Video(d)
            | DatasetKind::Audio(d)
            | DatasetKind::Document(d)
            | DatasetKind::Text(d) => d,
        }
    }
}

impl ProjectKind {
    pub fn data_type(&self) -> DataType {
        match self {
            ProjectKind::Image(_) => DataType::Image,
            ProjectKind::Video(_) => DataType::Video,
            ProjectKind::Audio(_) => DataType::Audio,
            ProjectKind::Document(_) => DataType::Document,
            ProjectKind::Text(_) => DataType::Text,
        }
    }

    pub fn project(&self) -> &Project {
        match self {
            ProjectKind::Image(p)
            | ProjectKind::Video(p)
            | ProjectKind::Audio(p)
            | ProjectKind::Document(p)
            | ProjectKind::Text(p) => p,
        }
    }

    /// Datasets attached to the project
    pub fn attached_datasets(&self) -> &[String] {
        &self.project().attached_datasets
    }
}
