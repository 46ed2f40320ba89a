// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shader node-graph model for material interchange.
//!
//! This crate provides the in-memory side of material interchange:
//! - Shader nodes with typed input/output sockets
//! - Per-kind properties for the supported node kinds
//! - Link validation (direction, type, single link per input)
//! - A material library with an active selection
//!
//! ## Host interface
//!
//! Interchange code never touches [`ShaderGraph`] directly. It goes through
//! [`NodeGraphHost`], which any graph provider can implement.

pub mod socket;
pub mod properties;
pub mod node;
pub mod link;
pub mod graph;
pub mod host;
pub mod library;
pub mod shader_nodes;

pub use graph::{HostError, ShaderGraph};
pub use host::{LinkInfo, NodeGraphHost, NodeInfo, SocketInfo};
pub use library::{Material, MaterialLibrary};
pub use node::{Node, NodeRegistry, NodeType};
pub use properties::{ColorRamp, ColorStop, NodeProperties, ShaderNodeKind};
pub use socket::{Socket, SocketDirection, SocketType, SocketValue};
