// SPDX-License-Identifier: MIT OR Apache-2.0
//! Whole-file export and import of library materials.

use crate::decoder::{decode_into_library, ImportTarget};
use crate::document::{MaterialDocument, FORMAT_VERSION};
use crate::encoder::encode_material;
use crate::error::CodecResult;
use crate::manifest::{DecodeManifest, EncodeManifest};
use crate::settings::CodecSettings;
use matgraph_core::MaterialLibrary;
use std::path::Path;

/// Encode a material (the active one when `material` is `None`) and write it to `path`
pub fn export_material_file(
    library: &MaterialLibrary,
    material: Option<&str>,
    path: &Path,
    settings: &CodecSettings,
) -> CodecResult<EncodeManifest> {
    let encoded = encode_material(library, material, &settings.encode_options())?;
    encoded.document.save(path, settings.pretty)?;

    tracing::info!(
        "Exported material '{}' ({} nodes, {} links) to {:?}",
        encoded.document.material_name,
        encoded.manifest.nodes_exported,
        encoded.manifest.links_exported,
        path
    );
    for unreadable in &encoded.manifest.unreadable_defaults {
        tracing::warn!("{unreadable}");
    }
    for skipped in &encoded.manifest.skipped_links {
        tracing::warn!("{skipped}");
    }

    Ok(encoded.manifest)
}

/// Read a document from `path` and decode it into the library
pub fn import_material_file(
    path: &Path,
    library: &mut MaterialLibrary,
    target: &ImportTarget,
    settings: &CodecSettings,
) -> CodecResult<DecodeManifest> {
    let document = MaterialDocument::load(path)?;
    if document.format_version < FORMAT_VERSION {
        tracing::debug!("Reading version {} document {:?}", document.format_version, path);
    }

    let manifest = decode_into_library(&document, library, target, &settings.fallback_material_name);
    manifest.log_summary();
    Ok(manifest)
}
