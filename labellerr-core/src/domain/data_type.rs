//! Data types supported by datasets and projects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::validation::ValidationError;

/// Kind of media a dataset or project holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Image,
    Video,
    Audio,
    Document,
    Text,
}

impl DataType {
    /// All supported data types, in the order the platform lists them
    pub const ALL: [DataType; 5] = [
        DataType::Image,
        DataType::Video,
        DataType::Audio,
        DataType::Document,
        DataType::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Image => "image",
            DataType::Video => "video",
            DataType::Audio => "audio",
            DataType::Document => "document",
            DataType::Text => "text",
        }
    }

    /// File extensions (lowercase, without the dot) accepted for uploads
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DataType::Image => &["jpg", "jpeg", "png", "tiff"],
            DataType::Video => &["mp4"],
            DataType::Audio => &["mp3", "wav"],
            DataType::Document => &["pdf"],
            DataType::Text => &["txt"],
        }
    }

    /// Check whether a file's extension is accepted for this data type
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Comma-separated list of valid names, used in error messages
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(DataType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|data_type| data_type.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    "data_type",
                    format!("Invalid data_type. Must be one of {}", Self::names()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_type() {
        assert_eq!("video".parse::<DataType>().unwrap(), DataType::Video);
        let err = "hologram".parse::<DataType>().unwrap_err();
        assert_eq!(err.field, "data_type");
        assert!(err.message.contains("image, video, audio, document, text"));
    }

    #[test]
    fn test_accepts_extension_case_insensitively() {
        assert!(DataType::Image.accepts(Path::new("/tmp/cat.JPG")));
        assert!(DataType::Audio.accepts(Path::new("clip.wav")));
        assert!(!DataType::Video.accepts(Path::new("clip.wav")));
        assert!(!DataType::Text.accepts(Path::new("README")));
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&DataType::Document).unwrap();
        assert_eq!(json, "\"document\"");
    }
}
