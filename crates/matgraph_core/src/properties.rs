// SPDX-License-Identifier: MIT OR Apache-2.0
//! Supported shader node kinds and their per-kind properties.
//!
//! The set of kinds is closed: these are the node types whose extended
//! properties survive interchange. Every other node type is treated as a
//! generic node with sockets only.
//!
//! Enum values serialize to the host application's identifiers
//! (`"3D"`, `"BANDS"`, `"MULTIPLY_ADD"`, ...), which is also the form used
//! in interchange documents.

use serde::{Deserialize, Serialize};

/// Closed set of node kinds with interchangeable properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderNodeKind {
    /// Procedural noise texture
    NoiseTexture,
    /// Procedural wave texture
    WaveTexture,
    /// Color ramp (value to RGB)
    ColorRamp,
    /// Mix of floats, vectors or colors
    Mix,
    /// Scalar math
    Math,
    /// Vector math
    VectorMath,
    /// Bump mapping
    Bump,
    /// Vector mapping
    Mapping,
    /// Texture coordinates
    TexCoordinate,
    /// Principled BSDF
    PrincipledBsdf,
    /// Material output
    MaterialOutput,
}

impl ShaderNodeKind {
    /// Every supported kind, in registry order
    pub const ALL: [ShaderNodeKind; 11] = [
        Self::NoiseTexture,
        Self::WaveTexture,
        Self::ColorRamp,
        Self::Mix,
        Self::Math,
        Self::VectorMath,
        Self::Bump,
        Self::Mapping,
        Self::TexCoordinate,
        Self::PrincipledBsdf,
        Self::MaterialOutput,
    ];

    /// Host type tag for this kind
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::NoiseTexture => "ShaderNodeTexNoise",
            Self::WaveTexture => "ShaderNodeTexWave",
            Self::ColorRamp => "ShaderNodeValToRGB",
            Self::Mix => "ShaderNodeMix",
            Self::Math => "ShaderNodeMath",
            Self::VectorMath => "ShaderNodeVectorMath",
            Self::Bump => "ShaderNodeBump",
            Self::Mapping => "ShaderNodeMapping",
            Self::TexCoordinate => "ShaderNodeTexCoord",
            Self::PrincipledBsdf => "ShaderNodeBsdfPrincipled",
            Self::MaterialOutput => "ShaderNodeOutputMaterial",
        }
    }

    /// Look up a kind by host type tag
    pub fn from_type_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.type_tag() == tag)
    }

    /// Properties a freshly created node of this kind starts with
    pub fn default_properties(&self) -> NodeProperties {
        match self {
            Self::NoiseTexture => NodeProperties::NoiseTexture {
                noise_dimensions: NoiseDimensions::default(),
            },
            Self::WaveTexture => NodeProperties::WaveTexture {
                wave_type: WaveType::default(),
                bands_direction: BandsDirection::default(),
                wave_profile: WaveProfile::default(),
            },
            Self::ColorRamp => NodeProperties::ColorRamp(ColorRamp::default()),
            Self::Mix => NodeProperties::Mix {
                data_type: MixDataType::default(),
                blend_type: BlendType::default(),
                clamp_factor: true,
            },
            Self::Math => NodeProperties::Math {
                operation: MathOperation::default(),
                use_clamp: false,
            },
            Self::VectorMath => NodeProperties::VectorMath {
                operation: VectorMathOperation::default(),
            },
            Self::Bump => NodeProperties::Bump { invert: false },
            Self::Mapping => NodeProperties::Mapping {
                vector_type: MappingType::default(),
            },
            Self::TexCoordinate | Self::PrincipledBsdf | Self::MaterialOutput => NodeProperties::None,
        }
    }
}

/// Per-kind properties of a node.
///
/// Values that live on input sockets (noise scale, mix factor, bump
/// strength, ...) are not stored here; they are read from the sockets.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeProperties {
    /// Noise texture settings
    NoiseTexture {
        /// Dimensionality of the noise
        noise_dimensions: NoiseDimensions,
    },
    /// Wave texture settings
    WaveTexture {
        /// Bands or rings
        wave_type: WaveType,
        /// Band direction
        bands_direction: BandsDirection,
        /// Wave profile
        wave_profile: WaveProfile,
    },
    /// Color ramp settings and stops
    ColorRamp(ColorRamp),
    /// Mix settings
    Mix {
        /// Data type being mixed
        data_type: MixDataType,
        /// Blend mode, only meaningful for color mixing
        blend_type: BlendType,
        /// Clamp the factor to [0, 1]
        clamp_factor: bool,
    },
    /// Math settings
    Math {
        /// Operation
        operation: MathOperation,
        /// Clamp the result to [0, 1]
        use_clamp: bool,
    },
    /// Vector math settings
    VectorMath {
        /// Operation
        operation: VectorMathOperation,
    },
    /// Bump settings
    Bump {
        /// Invert the bump direction
        invert: bool,
    },
    /// Mapping settings
    Mapping {
        /// How the vector is transformed
        vector_type: MappingType,
    },
    /// Node has no extended properties
    None,
}

/// Noise dimensionality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoiseDimensions {
    /// 1D
    #[serde(rename = "1D")]
    One,
    /// 2D
    #[serde(rename = "2D")]
    Two,
    /// 3D
    #[default]
    #[serde(rename = "3D")]
    Three,
    /// 4D
    #[serde(rename = "4D")]
    Four,
}

/// Wave pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaveType {
    /// Straight bands
    #[default]
    Bands,
    /// Concentric rings
    Rings,
}

/// Direction of wave bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BandsDirection {
    /// Along X
    #[default]
    X,
    /// Along Y
    Y,
    /// Along Z
    Z,
    /// Diagonal
    Diagonal,
}

/// Wave profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaveProfile {
    /// Sine
    #[default]
    Sin,
    /// Sawtooth
    Saw,
    /// Triangle
    Tri,
}

/// Color space used for ramp interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorMode {
    /// RGB
    #[default]
    Rgb,
    /// HSV
    Hsv,
    /// HSL
    Hsl,
}

/// Ramp interpolation between stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RampInterpolation {
    /// Ease in/out
    Ease,
    /// Cardinal spline
    Cardinal,
    /// Linear
    #[default]
    Linear,
    /// B-spline
    BSpline,
    /// Constant (step)
    Constant,
}

/// A color ramp stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in [0, 1]
    pub position: f32,
    /// RGBA color
    pub color: [f32; 4],
}

/// Color ramp state
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    /// Interpolation color space
    pub color_mode: ColorMode,
    /// Interpolation between stops
    pub interpolation: RampInterpolation,
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Stops ordered by position
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Replace all stops.
    ///
    /// Positions are clamped to [0, 1] and stops are kept sorted by position
    /// (stable, so equal positions keep their order). An empty list is
    /// rejected because a ramp always holds at least one stop.
    pub fn set_stops(&mut self, stops: Vec<ColorStop>) -> bool {
        if stops.is_empty() {
            return false;
        }
        let mut stops: Vec<ColorStop> = stops
            .into_iter()
            .map(|stop| ColorStop {
                position: stop.position.clamp(0.0, 1.0),
                ..stop
            })
            .collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        self.stops = stops;
        true
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            interpolation: RampInterpolation::default(),
            stops: vec![
                ColorStop {
                    position: 0.0,
                    color: [0.0, 0.0, 0.0, 1.0],
                },
                ColorStop {
                    position: 1.0,
                    color: [1.0, 1.0, 1.0, 1.0],
                },
            ],
        }
    }
}

/// Data type handled by a mix node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MixDataType {
    /// Float
    #[default]
    Float,
    /// Vector
    Vector,
    /// Color
    Rgba,
    /// Rotation
    Rotation,
}

/// Color blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum BlendType {
    #[default]
    Mix,
    Darken,
    Multiply,
    Burn,
    Lighten,
    Screen,
    Dodge,
    Add,
    Overlay,
    SoftLight,
    LinearLight,
    Difference,
    Exclusion,
    Subtract,
    Divide,
    Hue,
    Saturation,
    Color,
    Value,
}

/// Scalar math operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum MathOperation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    MultiplyAdd,
    Power,
    Logarithm,
    Sqrt,
    InverseSqrt,
    Absolute,
    Exponent,
    Minimum,
    Maximum,
    LessThan,
    GreaterThan,
    Sign,
    Compare,
    SmoothMin,
    SmoothMax,
    Round,
    Floor,
    Ceil,
    Trunc,
    Fract,
    Modulo,
    FlooredModulo,
    Wrap,
    Snap,
    Pingpong,
    Sine,
    Cosine,
    Tangent,
    Arcsine,
    Arccosine,
    Arctangent,
    Arctan2,
    Sinh,
    Cosh,
    Tanh,
    Radians,
    Degrees,
}

/// Vector math operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum VectorMathOperation {
    #[default]
    Add,
    Subtract,
    Multiply,
    Divide,
    MultiplyAdd,
    CrossProduct,
    Project,
    Reflect,
    Refract,
    Faceforward,
    DotProduct,
    Distance,
    Length,
    Scale,
    Normalize,
    Absolute,
    Power,
    Sign,
    Minimum,
    Maximum,
    Floor,
    Ceil,
    Fraction,
    Modulo,
    Wrap,
    Snap,
    Sine,
    Cosine,
    Tangent,
}

/// Mapping vector type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingType {
    /// Transform a point
    #[default]
    Point,
    /// Inverse transform for texture coordinates
    Texture,
    /// Transform a direction, ignoring location
    Vector,
    /// Transform a normal
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_round_trip() {
        for kind in ShaderNodeKind::ALL {
            assert_eq!(ShaderNodeKind::from_type_tag(kind.type_tag()), Some(kind));
        }
        assert_eq!(ShaderNodeKind::from_type_tag("ShaderNodeTexImage"), None);
    }

    #[test]
    fn test_ramp_stops_sorted_and_clamped() {
        let mut ramp = ColorRamp::default();
        assert!(ramp.set_stops(vec![
            ColorStop { position: 1.5, color: [1.0; 4] },
            ColorStop { position: 0.25, color: [0.5; 4] },
        ]));
        assert_eq!(ramp.stops()[0].position, 0.25);
        assert_eq!(ramp.stops()[1].position, 1.0);

        assert!(!ramp.set_stops(Vec::new()));
        assert_eq!(ramp.stops().len(), 2);
    }
}
