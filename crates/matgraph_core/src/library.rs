// SPDX-License-Identifier: MIT OR Apache-2.0
//! Material library: named materials and the active selection.

use crate::graph::ShaderGraph;
use indexmap::IndexMap;

/// A material owning a shader graph
#[derive(Debug, Clone)]
pub struct Material {
    /// Unique material name
    pub name: String,
    /// Whether the material is driven by its node graph
    pub use_nodes: bool,
    /// The material's node graph
    pub graph: ShaderGraph,
}

impl Material {
    /// Create a material without nodes
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            graph: ShaderGraph::new(name.clone()),
            name,
            use_nodes: false,
        }
    }

    /// Switch the material to nodes.
    ///
    /// An empty graph gets the default setup: a Principled BSDF feeding the
    /// material output.
    pub fn enable_nodes(&mut self) {
        self.use_nodes = true;
        if self.graph.node_count() > 0 {
            return;
        }

        let bsdf = self.graph.add_node("ShaderNodeBsdfPrincipled", "Principled BSDF");
        let output = self.graph.add_node("ShaderNodeOutputMaterial", "Material Output");
        if let (Ok(bsdf), Ok(output)) = (bsdf, output) {
            if let Some(node) = self.graph.node_mut(&bsdf) {
                node.location = [10.0, 300.0];
            }
            if let Some(node) = self.graph.node_mut(&output) {
                node.location = [300.0, 300.0];
            }
            if let Err(e) = self.graph.connect_by_name(&bsdf, "BSDF", &output, "Surface") {
                tracing::warn!("Default material setup failed for {}: {e}", self.name);
            }
        }
    }

    /// Node graph, if the material uses nodes
    pub fn node_graph(&self) -> Option<&ShaderGraph> {
        self.use_nodes.then_some(&self.graph)
    }
}

/// Collection of materials with an optional active material
#[derive(Debug, Clone, Default)]
pub struct MaterialLibrary {
    materials: IndexMap<String, Material>,
    active: Option<String>,
}

impl MaterialLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new material; returns the unique name it was stored under
    pub fn add_material(&mut self, name: &str) -> String {
        let name = if self.materials.contains_key(name) {
            (1..)
                .map(|n| format!("{name}.{n:03}"))
                .find(|candidate| !self.materials.contains_key(candidate))
                .unwrap_or_else(|| name.to_string())
        } else {
            name.to_string()
        };
        self.materials.insert(name.clone(), Material::new(name.clone()));
        name
    }

    /// Get a material by name
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Get a mutable material by name
    pub fn material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.get_mut(name)
    }

    /// Get a material by name, creating it if missing
    pub fn get_or_create(&mut self, name: &str) -> &mut Material {
        self.materials
            .entry(name.to_string())
            .or_insert_with(|| Material::new(name))
    }

    /// Select the active material; returns false if it does not exist
    pub fn set_active(&mut self, name: &str) -> bool {
        if !self.materials.contains_key(name) {
            return false;
        }
        self.active = Some(name.to_string());
        true
    }

    /// Name of the active material
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active material
    pub fn active_material(&self) -> Option<&Material> {
        self.active.as_deref().and_then(|name| self.materials.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_node_setup() {
        let mut material = Material::new("Test");
        assert!(material.node_graph().is_none());

        material.enable_nodes();
        let graph = material.node_graph().unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn test_material_names_unique() {
        let mut library = MaterialLibrary::new();
        assert_eq!(library.add_material("Stone"), "Stone");
        assert_eq!(library.add_material("Stone"), "Stone.001");
        assert!(library.set_active("Stone.001"));
        assert!(!library.set_active("Missing"));
        assert_eq!(library.active_material().unwrap().name, "Stone.001");
    }
}
