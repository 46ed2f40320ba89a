// SPDX-License-Identifier: MIT OR Apache-2.0
//! Codec settings, persisted as RON.

use crate::document::DEFAULT_MATERIAL_NAME;
use crate::encoder::EncodeOptions;
use crate::error::{CodecError, CodecResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "matgraph.ron";

/// Interchange settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecSettings {
    /// Settings format version
    pub version: u32,
    /// Write socket positions in link records
    #[serde(default = "default_true")]
    pub emit_socket_indices: bool,
    /// Indent written documents
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Name for a new material when a document carries none
    #[serde(default = "default_fallback_material_name")]
    pub fallback_material_name: String,
    /// Default document file name
    #[serde(default = "default_document_file_name")]
    pub document_file_name: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_fallback_material_name() -> String {
    DEFAULT_MATERIAL_NAME.to_string()
}

fn default_document_file_name() -> PathBuf {
    PathBuf::from("material_nodes.json")
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            emit_socket_indices: true,
            pretty: true,
            fallback_material_name: default_fallback_material_name(),
            document_file_name: default_document_file_name(),
        }
    }
}

impl CodecSettings {
    /// Load settings from a file
    pub fn load(path: &Path) -> CodecResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: CodecSettings =
            ron::from_str(&content).map_err(|e| CodecError::Settings(e.to_string()))?;

        // Version check
        if settings.version > SETTINGS_FORMAT_VERSION {
            return Err(CodecError::Settings(format!(
                "Settings version {} is newer than supported version {}",
                settings.version, SETTINGS_FORMAT_VERSION
            )));
        }

        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> CodecResult<Self> {
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> CodecResult<()> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content = ron::ser::to_string_pretty(self, config)
            .map_err(|e| CodecError::Settings(e.to_string()))?;

        std::fs::write(path, content).map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings file path for a directory
    pub fn settings_file_path(dir: &Path) -> PathBuf {
        dir.join(SETTINGS_FILE_NAME)
    }

    /// Encoder options derived from these settings
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            emit_socket_indices: self.emit_socket_indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CodecSettings::default();
        assert_eq!(settings.version, SETTINGS_FORMAT_VERSION);
        assert_eq!(settings.fallback_material_name, "Imported_Material");
        assert!(settings.encode_options().emit_socket_indices);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = CodecSettings::settings_file_path(dir.path());

        let settings = CodecSettings {
            emit_socket_indices: false,
            fallback_material_name: "Scanned".to_string(),
            ..CodecSettings::default()
        };
        settings.save(&path).unwrap();

        let loaded = CodecSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: CodecSettings = ron::from_str("(version: 1, pretty: false)").unwrap();
        assert!(!settings.pretty);
        assert!(settings.emit_socket_indices);
        assert_eq!(settings.document_file_name, PathBuf::from("material_nodes.json"));
    }

    #[test]
    fn test_newer_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "(version: 99)").unwrap();

        let err = CodecSettings::load(&path).unwrap_err();
        assert!(matches!(err, CodecError::Settings(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = CodecSettings::load_or_default(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(settings, CodecSettings::default());
    }
}
