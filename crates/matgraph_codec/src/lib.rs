// SPDX-License-Identifier: MIT OR Apache-2.0
//! JSON interchange for shader node graphs.
//!
//! This crate converts a host node graph into a portable document and
//! back:
//! - [`encode`] / [`encode_material`] read a graph into a [`MaterialDocument`]
//! - [`decode`] / [`decode_into_library`] rebuild a graph from a document
//! - Manifests report everything that was skipped, per node, socket and link
//!
//! ## Round trip
//!
//! Decoding an encoded graph reproduces every node of a supported kind with
//! its name, location, properties and unlinked input values, and every link
//! between such nodes. Links are matched by socket name; documents written
//! by this crate also carry socket positions to tell apart sockets that
//! share a name.

pub mod document;
pub mod error;
pub mod manifest;
pub mod schema;
pub mod encoder;
pub mod decoder;
pub mod settings;
pub mod material_io;

pub use decoder::{decode, decode_into_library, ImportTarget};
pub use document::{InputValue, LinkRecord, MaterialDocument, NodeRecord, RejectedRecord, FORMAT_VERSION};
pub use encoder::{encode, encode_material, EncodeOptions, Encoded};
pub use error::{CodecError, CodecResult};
pub use manifest::{
    DecodeManifest, DecodeWarning, EncodeManifest, LinkSkipReason, NodeSkipReason, UnexportedLink,
};
pub use material_io::{export_material_file, import_material_file};
pub use settings::CodecSettings;
