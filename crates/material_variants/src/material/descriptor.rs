//! Material descriptor definitions
//!
//! A [`MaterialDescriptor`] is the typed, resolved form of one glTF material.
//! It is built once at asset load (by the capability resolver or the default
//! factory) and read-only afterwards; every optional extension is an explicit
//! `Option` field, and the [`MaterialCapabilities`] recorded at construction
//! mirror which of the feature blocks were present.

use bitflags::bitflags;

use super::texture::TextureReference;
use crate::foundation::math::{Vec3, Vec4};

/// Alpha rendering modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Alpha is ignored
    #[default]
    Opaque,
    /// Alpha testing against the material cutoff
    Mask,
    /// Alpha blending, configured outside the shader
    Blend,
}

impl AlphaMode {
    /// Parse the glTF spelling (`OPAQUE`, `MASK`, `BLEND`)
    pub fn from_gltf(value: &str) -> Option<Self> {
        match value {
            "OPAQUE" => Some(Self::Opaque),
            "MASK" => Some(Self::Mask),
            "BLEND" => Some(Self::Blend),
            _ => None,
        }
    }

    /// glTF spelling of this mode
    pub const fn as_gltf(self) -> &'static str {
        match self {
            Self::Opaque => "OPAQUE",
            Self::Mask => "MASK",
            Self::Blend => "BLEND",
        }
    }
}

/// Base shading workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingModel {
    /// KHR_materials_unlit, or no shading information at all
    Unlit,
    /// Core glTF metallic-roughness
    MetallicRoughness,
    /// KHR_materials_pbrSpecularGlossiness
    SpecularGlossiness,
}

/// Metallic-roughness parameters (`pbrMetallicRoughness`)
#[derive(Debug, Clone, PartialEq)]
pub struct MetallicRoughnessParams {
    /// Linear RGBA base color
    pub base_color_factor: Vec4,
    /// Metalness (0.0 = dielectric, 1.0 = metal)
    pub metallic_factor: f32,
    /// Perceptual roughness
    pub roughness_factor: f32,
    /// Base color texture
    pub base_color_texture: Option<TextureReference>,
    /// Metallic-roughness texture
    pub metallic_roughness_texture: Option<TextureReference>,
}

impl Default for MetallicRoughnessParams {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::new(1.0, 1.0, 1.0, 1.0),
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            base_color_texture: None,
            metallic_roughness_texture: None,
        }
    }
}

/// Specular-glossiness parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SpecularGlossinessParams {
    /// Linear RGBA diffuse color
    pub diffuse_factor: Vec4,
    /// Linear RGB specular color
    pub specular_factor: Vec3,
    /// Glossiness (1.0 = perfectly smooth)
    pub glossiness_factor: f32,
    /// Diffuse texture
    pub diffuse_texture: Option<TextureReference>,
    /// Specular-glossiness texture
    pub specular_glossiness_texture: Option<TextureReference>,
}

impl Default for SpecularGlossinessParams {
    fn default() -> Self {
        Self {
            diffuse_factor: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular_factor: Vec3::new(1.0, 1.0, 1.0),
            glossiness_factor: 1.0,
            diffuse_texture: None,
            specular_glossiness_texture: None,
        }
    }
}

/// KHR_materials_clearcoat
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clearcoat {
    /// Clearcoat layer intensity
    pub factor: f32,
    /// Clearcoat layer roughness
    pub roughness_factor: f32,
    /// Intensity texture
    pub texture: Option<TextureReference>,
    /// Roughness texture
    pub roughness_texture: Option<TextureReference>,
    /// Clearcoat normal map
    pub normal_texture: Option<TextureReference>,
}

/// KHR_materials_specular
#[derive(Debug, Clone, PartialEq)]
pub struct PbrSpecular {
    /// Specular strength
    pub specular_factor: f32,
    /// Specular F0 color
    pub specular_color_factor: Vec3,
    /// Strength texture
    pub texture: Option<TextureReference>,
    /// Color texture
    pub color_texture: Option<TextureReference>,
}

impl Default for PbrSpecular {
    fn default() -> Self {
        Self {
            specular_factor: 0.0,
            specular_color_factor: Vec3::new(1.0, 1.0, 1.0),
            texture: None,
            color_texture: None,
        }
    }
}

/// KHR_materials_sheen
#[derive(Debug, Clone, PartialEq)]
pub struct Sheen {
    /// Sheen roughness
    pub roughness_factor: f32,
    /// Sheen color
    pub color_factor: Vec3,
    /// Roughness texture
    pub roughness_texture: Option<TextureReference>,
    /// Color texture
    pub color_texture: Option<TextureReference>,
}

impl Default for Sheen {
    fn default() -> Self {
        Self {
            roughness_factor: 0.0,
            color_factor: Vec3::new(1.0, 1.0, 1.0),
            roughness_texture: None,
            color_texture: None,
        }
    }
}

/// KHR_materials_transmission
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transmission {
    /// Fraction of light transmitted through the surface
    pub factor: f32,
    /// Transmission texture
    pub texture: Option<TextureReference>,
}

/// KHR_materials_volume
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Color white light turns into after traveling the attenuation distance
    pub attenuation_color: Vec3,
    /// Average travel distance before interaction
    pub attenuation_distance: f32,
    /// Thickness of the volume
    pub thickness_factor: f32,
    /// Thickness texture
    pub texture: Option<TextureReference>,
}

impl Default for Volume {
    fn default() -> Self {
        Self {
            attenuation_color: Vec3::new(1.0, 1.0, 1.0),
            attenuation_distance: 0.0,
            thickness_factor: 0.0,
            texture: None,
        }
    }
}

/// Optional feature blocks of a material
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureBlocks {
    /// Clearcoat layer
    pub clearcoat: Option<Clearcoat>,
    /// Specular extension
    pub pbr_specular: Option<PbrSpecular>,
    /// Sheen layer
    pub sheen: Option<Sheen>,
    /// Transmission
    pub transmission: Option<Transmission>,
    /// Volume
    pub volume: Option<Volume>,
}

bitflags! {
    /// Feature blocks a material declared at parse time
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MaterialCapabilities: u8 {
        /// KHR_materials_clearcoat present
        const CLEARCOAT = 1 << 0;
        /// KHR_materials_specular present
        const PBR_SPECULAR = 1 << 1;
        /// KHR_materials_sheen present
        const SHEEN = 1 << 2;
        /// KHR_materials_transmission present
        const TRANSMISSION = 1 << 3;
        /// KHR_materials_volume present
        const VOLUME = 1 << 4;
    }
}

impl MaterialCapabilities {
    /// Capabilities implied by which feature blocks are present
    pub fn from_blocks(blocks: &FeatureBlocks) -> Self {
        let mut capabilities = Self::empty();
        capabilities.set(Self::CLEARCOAT, blocks.clearcoat.is_some());
        capabilities.set(Self::PBR_SPECULAR, blocks.pbr_specular.is_some());
        capabilities.set(Self::SHEEN, blocks.sheen.is_some());
        capabilities.set(Self::TRANSMISSION, blocks.transmission.is_some());
        capabilities.set(Self::VOLUME, blocks.volume.is_some());
        capabilities
    }
}

/// Where a descriptor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialOrigin {
    /// Resolved from an authored material record
    Authored,
    /// The built-in fallback; carries no alpha declaration
    Fallback,
}

/// Resolved, immutable description of one material
///
/// Fields are only writable inside the crate; construction goes through
/// [`CapabilityResolver`](super::CapabilityResolver) or
/// [`DefaultMaterialFactory`](super::DefaultMaterialFactory), which record
/// the capability flags exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDescriptor {
    pub(crate) name: Option<String>,
    pub(crate) alpha_mode: AlphaMode,
    pub(crate) alpha_cutoff: f32,
    pub(crate) double_sided: bool,
    pub(crate) emissive_factor: Vec3,
    pub(crate) shading_model: ShadingModel,
    pub(crate) metallic_roughness: Option<MetallicRoughnessParams>,
    pub(crate) specular_glossiness: Option<SpecularGlossinessParams>,
    pub(crate) features: FeatureBlocks,
    pub(crate) normal_texture: Option<TextureReference>,
    pub(crate) occlusion_texture: Option<TextureReference>,
    pub(crate) emissive_texture: Option<TextureReference>,
    pub(crate) capabilities: MaterialCapabilities,
    pub(crate) origin: MaterialOrigin,
}

impl MaterialDescriptor {
    /// Material name, if the record had one
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Alpha rendering mode
    pub const fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    /// Alpha cutoff (only meaningful under [`AlphaMode::Mask`])
    pub const fn alpha_cutoff(&self) -> f32 {
        self.alpha_cutoff
    }

    /// Whether back faces are rendered
    pub const fn double_sided(&self) -> bool {
        self.double_sided
    }

    /// Linear RGB emission
    pub const fn emissive_factor(&self) -> Vec3 {
        self.emissive_factor
    }

    /// Base shading workflow
    pub const fn shading_model(&self) -> ShadingModel {
        self.shading_model
    }

    /// Metallic-roughness block, if declared
    pub const fn metallic_roughness(&self) -> Option<&MetallicRoughnessParams> {
        self.metallic_roughness.as_ref()
    }

    /// Specular-glossiness block, if declared
    pub const fn specular_glossiness(&self) -> Option<&SpecularGlossinessParams> {
        self.specular_glossiness.as_ref()
    }

    /// Optional feature blocks
    pub const fn features(&self) -> &FeatureBlocks {
        &self.features
    }

    /// Normal map
    pub const fn normal_texture(&self) -> Option<&TextureReference> {
        self.normal_texture.as_ref()
    }

    /// Occlusion map
    pub const fn occlusion_texture(&self) -> Option<&TextureReference> {
        self.occlusion_texture.as_ref()
    }

    /// Emission map
    pub const fn emissive_texture(&self) -> Option<&TextureReference> {
        self.emissive_texture.as_ref()
    }

    /// Capability flags recorded at construction
    pub const fn capabilities(&self) -> MaterialCapabilities {
        self.capabilities
    }

    /// Where this descriptor came from
    pub const fn origin(&self) -> MaterialOrigin {
        self.origin
    }

    /// KHR_materials_clearcoat was declared
    pub const fn has_clearcoat(&self) -> bool {
        self.capabilities.contains(MaterialCapabilities::CLEARCOAT)
    }

    /// KHR_materials_specular was declared
    pub const fn has_pbr_specular(&self) -> bool {
        self.capabilities.contains(MaterialCapabilities::PBR_SPECULAR)
    }

    /// KHR_materials_sheen was declared
    pub const fn has_sheen(&self) -> bool {
        self.capabilities.contains(MaterialCapabilities::SHEEN)
    }

    /// KHR_materials_transmission was declared
    pub const fn has_transmission(&self) -> bool {
        self.capabilities.contains(MaterialCapabilities::TRANSMISSION)
    }

    /// KHR_materials_volume was declared
    pub const fn has_volume(&self) -> bool {
        self.capabilities.contains(MaterialCapabilities::VOLUME)
    }
}
