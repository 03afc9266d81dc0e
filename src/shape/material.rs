//! Materials attached to the faces of a [`PolyMesh`](crate::shape::PolyMesh).
//!
//! A material is an opaque, named description of a surface appearance. The only thing
//! this crate needs to know about it is which flat color it corresponds to, if any. That
//! color is recovered by walking the material's shader nodes.

use crate::math::Real;
use std::sync::Arc;

/// A color with red, green, blue and alpha channels in `[0, 1]`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    /// The red channel.
    pub r: Real,
    /// The green channel.
    pub g: Real,
    /// The blue channel.
    pub b: Real,
    /// The alpha channel.
    pub a: Real,
}

impl Rgba {
    /// Opaque white, used when no color can be resolved at all.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    /// Stand-in for a base color driven by an image texture.
    pub const TEXTURED: Rgba = Rgba::new(1.0, 0.5, 0.5, 1.0);

    /// Creates a new color.
    #[inline]
    pub const fn new(r: Real, g: Real, b: Real, a: Real) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn opaque(r: Real, g: Real, b: Real) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// The channels of this color, as an array.
    #[inline]
    pub fn to_array(self) -> [Real; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantizes this color to 8 bits per channel.
    ///
    /// Channels are clamped to `[0, 1]` first.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

impl From<[Real; 4]> for Rgba {
    fn from(c: [Real; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[Real; 3]> for Rgba {
    fn from(c: [Real; 3]) -> Self {
        Self::opaque(c[0], c[1], c[2])
    }
}

/// The node a shader input is linked to.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum LinkedNode {
    /// An image-texture node.
    ImageTexture {
        /// Is an image actually assigned to this texture node?
        has_image: bool,
    },
    /// Any other node (procedural textures, math nodes, etc.)
    Other,
}

/// The value plugged into a color input of a shader node.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ColorInput {
    /// A constant color.
    Value(Rgba),
    /// The input is driven by the output of another node.
    Linked(LinkedNode),
}

impl ColorInput {
    /// The flat color this input stands for, if it can be expressed as one.
    ///
    /// A texture with an image cannot be summarized by a single color and resolves
    /// to [`Rgba::TEXTURED`] instead. Any other link is unresolved.
    pub fn resolve(&self) -> Option<Rgba> {
        match self {
            ColorInput::Value(color) => Some(*color),
            ColorInput::Linked(LinkedNode::ImageTexture { has_image: true }) => {
                Some(Rgba::TEXTURED)
            }
            ColorInput::Linked(_) => None,
        }
    }
}

/// A node of a material's shading graph.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderNode {
    /// A principled BSDF.
    Principled {
        /// The "Base Color" input.
        base_color: ColorInput,
    },
    /// A toon BSDF.
    Toon {
        /// The "Color" input.
        color: ColorInput,
    },
    /// Any other kind of node.
    Other,
}

impl ShaderNode {
    /// The base color of this node, or `None` if it has none or if it can't be resolved.
    pub fn resolve_base_color(&self) -> Option<Rgba> {
        match self {
            ShaderNode::Principled { base_color } => base_color.resolve(),
            ShaderNode::Toon { color } => color.resolve(),
            ShaderNode::Other => None,
        }
    }
}

/// A named material.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// The name of this material.
    pub name: String,
    /// If `false`, the shader nodes are ignored.
    pub use_nodes: bool,
    /// The shader nodes, in the material's stable iteration order.
    pub nodes: Vec<ShaderNode>,
}

impl Material {
    /// Creates a material without any shader node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            use_nodes: true,
            nodes: Vec::new(),
        }
    }

    /// Creates a material made of a single principled node with a constant base color.
    pub fn flat(name: impl Into<String>, color: Rgba) -> Self {
        Self::new(name).with_node(ShaderNode::Principled {
            base_color: ColorInput::Value(color),
        })
    }

    /// Appends a shader node to this material.
    pub fn with_node(mut self, node: ShaderNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// The flat color of this material.
    ///
    /// This is the resolved base color of the first principled or toon node that has
    /// one. Returns `None` if node usage is disabled or if no node resolves.
    pub fn base_color(&self) -> Option<Rgba> {
        if !self.use_nodes {
            return None;
        }

        self.nodes.iter().find_map(ShaderNode::resolve_base_color)
    }
}

/// The color summarizing a list of material slots.
///
/// This is the base color of the first material that resolves to one, or white.
pub fn material_slots_color(slots: &[Option<Arc<Material>>]) -> Rgba {
    slots
        .iter()
        .flatten()
        .find_map(|mat| mat.base_color())
        .unwrap_or(Rgba::WHITE)
}
