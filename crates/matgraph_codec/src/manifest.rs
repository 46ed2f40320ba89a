// SPDX-License-Identifier: MIT OR Apache-2.0
//! Manifests: what an export or import did and what it had to skip.

use crate::document::LinkRecord;
use serde::Serialize;
use std::fmt;

/// Summary of an export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EncodeManifest {
    /// Nodes written
    pub nodes_exported: usize,
    /// Links written
    pub links_exported: usize,
    /// Input defaults left out because they could not be read
    pub unreadable_defaults: Vec<UnreadableSocketDefault>,
    /// Inputs whose value was overwritten by a later socket of the same name
    pub collapsed_inputs: Vec<CollapsedInput>,
    /// Links left out because an endpoint socket could not be named
    pub skipped_links: Vec<UnexportedLink>,
}

/// A host link that was not written
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("Link {from_node} -> {to_node} not exported: {reason}")]
pub struct UnexportedLink {
    /// Source node name
    pub from_node: String,
    /// Target node name
    pub to_node: String,
    /// What could not be resolved
    pub reason: String,
}

/// An input default that could not be read
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("Unreadable default on {node}.{socket}: {reason}")]
pub struct UnreadableSocketDefault {
    /// Node name
    pub node: String,
    /// Socket name
    pub socket: String,
    /// Host error message
    pub reason: String,
}

/// Two unlinked inputs of one node sharing a name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollapsedInput {
    /// Node name
    pub node: String,
    /// Shared socket name
    pub socket: String,
    /// Position of the socket whose value was kept
    pub kept_index: usize,
}

/// Summary of an import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodeManifest {
    /// Material the document was imported into
    pub material_name: String,
    /// Nodes created
    pub nodes_created: usize,
    /// Nodes dropped, with reasons
    pub nodes_skipped: Vec<SkippedNode>,
    /// Links created
    pub links_created: usize,
    /// Links dropped, with reasons
    pub links_skipped: Vec<SkippedLink>,
    /// Non-fatal problems on nodes that were created
    pub warnings: Vec<DecodeWarning>,
}

impl DecodeManifest {
    /// Empty manifest for an import into `material_name`
    pub fn new(material_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            ..Self::default()
        }
    }

    /// True when no node and no link was dropped
    pub fn is_complete(&self) -> bool {
        self.nodes_skipped.is_empty() && self.links_skipped.is_empty()
    }

    /// Log a one-line summary, then every skipped item
    pub fn log_summary(&self) {
        tracing::info!(
            "Material '{}' imported with {} nodes and {} links",
            self.material_name,
            self.nodes_created,
            self.links_created
        );
        for skipped in &self.nodes_skipped {
            tracing::warn!("Skipped node {}: {}", skipped.name, skipped.reason);
        }
        for skipped in &self.links_skipped {
            tracing::warn!("Skipped link {}: {}", skipped.link, skipped.reason);
        }
        for warning in &self.warnings {
            tracing::debug!("{warning}");
        }
    }
}

/// A node record that was not materialized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedNode {
    /// Node name in the document
    pub name: String,
    /// Type tag in the document
    pub type_tag: String,
    /// Why it was skipped
    pub reason: NodeSkipReason,
}

/// Why a node record was skipped
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind")]
pub enum NodeSkipReason {
    /// Type tag is outside the supported set
    #[error("Unsupported node type: {type_tag}")]
    UnsupportedNodeType {
        /// The unsupported tag
        type_tag: String,
    },

    /// The host refused to create the node
    #[error("Host rejected node: {message}")]
    HostRejected {
        /// Host error message
        message: String,
    },

    /// The entry could not be read as a node record
    #[error("Malformed node entry #{index}: {message}")]
    MalformedRecord {
        /// Position in the `nodes` array
        index: usize,
        /// Parse error
        message: String,
    },
}

/// A link record that was not created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLink {
    /// The record as found in the document
    pub link: LinkRecord,
    /// Why it was skipped
    pub reason: LinkSkipReason,
}

/// Why a link record was skipped
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind")]
pub enum LinkSkipReason {
    /// A node or socket named by the link does not exist
    #[error("Unresolved endpoint {}", endpoint(.node, .socket))]
    UnresolvedLinkEndpoint {
        /// Node name from the record
        node: String,
        /// Socket name, absent when the node itself is missing
        socket: Option<String>,
    },

    /// The target input already received a link from this document
    #[error("Input {node}.{socket} already has an incoming link")]
    DuplicateInputLink {
        /// Target node
        node: String,
        /// Target socket
        socket: String,
    },

    /// The host refused the link
    #[error("Host rejected link: {message}")]
    HostRejected {
        /// Host error message
        message: String,
    },

    /// The entry could not be read as a link record
    #[error("Malformed link entry #{index}: {message}")]
    MalformedRecord {
        /// Position in the `links` array
        index: usize,
        /// Parse error
        message: String,
    },
}

fn endpoint(node: &str, socket: &Option<String>) -> String {
    match socket {
        Some(socket) => format!("{node}.{socket}"),
        None => node.to_string(),
    }
}

/// Non-fatal problem during an import
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DecodeWarning {
    /// The host gave the node a different name
    RenamedNode {
        /// Name in the document
        requested: String,
        /// Name in the host graph
        assigned: String,
    },
    /// A property value could not be applied
    InvalidProperty {
        /// Node name
        node: String,
        /// Property key
        property: String,
        /// What was wrong
        reason: String,
    },
    /// An input named in the document does not exist on the node
    UnknownInput {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
    },
    /// An input value was not applied
    IgnoredInput {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
        /// What was wrong
        reason: String,
    },
    /// A link socket name matched several sockets and no position hint decided
    AmbiguousSocket {
        /// Node name
        node: String,
        /// Socket name
        socket: String,
        /// Position that was used
        chosen: usize,
    },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RenamedNode { requested, assigned } => {
                write!(f, "Node {requested} renamed to {assigned}")
            }
            Self::InvalidProperty { node, property, reason } => {
                write!(f, "Property {node}.{property} not applied: {reason}")
            }
            Self::UnknownInput { node, socket } => write!(f, "Node {node} has no input {socket}"),
            Self::IgnoredInput { node, socket, reason } => {
                write!(f, "Input {node}.{socket} not applied: {reason}")
            }
            Self::AmbiguousSocket { node, socket, chosen } => {
                write!(f, "Socket name {node}.{socket} is ambiguous, using #{chosen}")
            }
        }
    }
}
