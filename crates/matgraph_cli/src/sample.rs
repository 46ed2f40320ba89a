// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in sample material: a trowelled microcement surface.

use matgraph_core::properties::{BlendType, MixDataType, RampInterpolation};
use matgraph_core::{
    ColorRamp, ColorStop, HostError, MaterialLibrary, NodeGraphHost, NodeProperties, ShaderGraph,
    SocketValue,
};

/// Name of the sample material
pub const SAMPLE_MATERIAL_NAME: &str = "Microcement";

/// Library holding the sample material, selected as active
pub fn sample_library() -> Result<MaterialLibrary, HostError> {
    let mut library = MaterialLibrary::new();
    let name = library.add_material(SAMPLE_MATERIAL_NAME);
    let material = library.get_or_create(&name);
    material.use_nodes = true;
    build_microcement(&mut material.graph)?;
    library.set_active(&name);
    Ok(library)
}

fn ramp(interpolation: RampInterpolation, stops: [(f32, [f32; 4]); 2]) -> NodeProperties {
    let mut ramp = ColorRamp::default();
    ramp.interpolation = interpolation;
    ramp.set_stops(
        stops
            .into_iter()
            .map(|(position, color)| ColorStop { position, color })
            .collect(),
    );
    NodeProperties::ColorRamp(ramp)
}

fn build_microcement(g: &mut ShaderGraph) -> Result<(), HostError> {
    g.clear();

    let coords = g.create_node("ShaderNodeTexCoord", "Texture Coordinate", [-1200.0, 0.0])?;
    let mapping = g.create_node("ShaderNodeMapping", "Mapping", [-1000.0, 0.0])?;
    g.connect_by_name(&coords, "UV", &mapping, "Vector")?;

    // Base cement noise
    let base = g.create_node("ShaderNodeTexNoise", "Base Noise", [-700.0, 200.0])?;
    g.set_input(&base, "Scale", SocketValue::Float(8.0))?;
    g.set_input(&base, "Detail", SocketValue::Float(5.0))?;
    g.set_input(&base, "Roughness", SocketValue::Float(0.5))?;
    g.connect_by_name(&mapping, "Vector", &base, "Vector")?;

    // Stretched, distorted coordinates for the trowel strokes
    let trowel_mapping = g.create_node("ShaderNodeMapping", "Trowel Mapping", [-850.0, -400.0])?;
    g.set_input(&trowel_mapping, "Scale", SocketValue::Vector([25.0, 3.0, 1.0]))?;
    g.set_input(&trowel_mapping, "Rotation", SocketValue::Vector([0.0, 0.0, 35f32.to_radians()]))?;
    g.connect_by_name(&mapping, "Vector", &trowel_mapping, "Vector")?;

    let distortion = g.create_node("ShaderNodeTexNoise", "Distortion Noise", [-850.0, -600.0])?;
    g.set_input(&distortion, "Scale", SocketValue::Float(6.0))?;
    g.set_input(&distortion, "Detail", SocketValue::Float(3.0))?;
    g.connect_by_name(&mapping, "Vector", &distortion, "Vector")?;

    // Both vector math inputs are named "Vector"; link by position
    let offset = g.create_node("ShaderNodeVectorMath", "Trowel Offset", [-600.0, -500.0])?;
    g.link(&trowel_mapping, 0, &offset, 0)?;
    g.link(&distortion, 1, &offset, 1)?;

    let trowel = g.create_node("ShaderNodeTexNoise", "Trowel Noise", [-450.0, -400.0])?;
    g.set_input(&trowel, "Scale", SocketValue::Float(1.0))?;
    g.set_input(&trowel, "Detail", SocketValue::Float(1.0))?;
    g.connect_by_name(&offset, "Vector", &trowel, "Vector")?;

    let trowel_ramp = g.create_node("ShaderNodeValToRGB", "Trowel Ramp", [-250.0, -400.0])?;
    g.set_properties(
        &trowel_ramp,
        ramp(
            RampInterpolation::Ease,
            [(0.3, [0.0, 0.0, 0.0, 1.0]), (0.7, [1.0, 1.0, 1.0, 1.0])],
        ),
    )?;
    g.connect_by_name(&trowel, "Fac", &trowel_ramp, "Fac")?;

    let mix = g.create_node("ShaderNodeMix", "Mix", [-200.0, 100.0])?;
    g.set_properties(
        &mix,
        NodeProperties::Mix {
            data_type: MixDataType::Rgba,
            blend_type: BlendType::Overlay,
            clamp_factor: true,
        },
    )?;
    g.set_input(&mix, "Factor", SocketValue::Float(0.2))?;
    g.connect_by_name(&base, "Fac", &mix, "Color1")?;
    g.connect_by_name(&trowel_ramp, "Color", &mix, "Color2")?;

    let tint = g.create_node("ShaderNodeValToRGB", "Base Ramp", [200.0, 0.0])?;
    g.set_properties(
        &tint,
        ramp(
            RampInterpolation::Linear,
            [(0.0, [0.65, 0.65, 0.6, 1.0]), (1.0, [0.88, 0.88, 0.85, 1.0])],
        ),
    )?;
    g.connect_by_name(&mix, "Result", &tint, "Fac")?;

    let bump = g.create_node("ShaderNodeBump", "Bump", [200.0, -300.0])?;
    g.set_input(&bump, "Strength", SocketValue::Float(0.15))?;
    g.set_input(&bump, "Distance", SocketValue::Float(0.02))?;
    g.connect_by_name(&trowel, "Fac", &bump, "Height")?;

    let bsdf = g.create_node("ShaderNodeBsdfPrincipled", "Principled BSDF", [500.0, 0.0])?;
    g.set_input(&bsdf, "Roughness", SocketValue::Float(0.7))?;
    g.connect_by_name(&tint, "Color", &bsdf, "Base Color")?;
    g.connect_by_name(&bump, "Normal", &bsdf, "Normal")?;

    let output = g.create_node("ShaderNodeOutputMaterial", "Material Output", [800.0, 0.0])?;
    g.connect_by_name(&bsdf, "BSDF", &output, "Surface")?;

    Ok(())
}
