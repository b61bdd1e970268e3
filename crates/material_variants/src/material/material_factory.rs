//! Fallback material creation
//!
//! Primitives without a material index (and records that fail to resolve)
//! render with the material produced here.

use super::descriptor::{
    AlphaMode, FeatureBlocks, MaterialCapabilities, MaterialDescriptor, MaterialOrigin,
    MetallicRoughnessParams, ShadingModel,
};
use crate::foundation::math::Vec3;

/// Name given to the fallback material
pub const DEFAULT_MATERIAL_NAME: &str = "Default Material";

/// Factory for the built-in fallback material
pub struct DefaultMaterialFactory;

impl DefaultMaterialFactory {
    /// Create the default material
    ///
    /// Metallic-roughness with every factor at its glTF default, no textures
    /// and no feature blocks. The result is marked
    /// [`MaterialOrigin::Fallback`], so it compiles to a variant that only
    /// declares `MATERIAL_METALLICROUGHNESS`.
    pub fn create() -> MaterialDescriptor {
        let features = FeatureBlocks::default();
        MaterialDescriptor {
            name: Some(DEFAULT_MATERIAL_NAME.to_string()),
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            emissive_factor: Vec3::zeros(),
            shading_model: ShadingModel::MetallicRoughness,
            metallic_roughness: Some(MetallicRoughnessParams::default()),
            specular_glossiness: None,
            capabilities: MaterialCapabilities::from_blocks(&features),
            features,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            origin: MaterialOrigin::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;

    #[test]
    fn test_default_material_shape() {
        let material = DefaultMaterialFactory::create();
        assert_eq!(material.name(), Some(DEFAULT_MATERIAL_NAME));
        assert_eq!(material.shading_model(), ShadingModel::MetallicRoughness);
        assert_eq!(material.origin(), MaterialOrigin::Fallback);
        assert!(material.capabilities().is_empty());
        assert!(material.normal_texture().is_none());

        let params = material.metallic_roughness().unwrap();
        assert_eq!(params.base_color_factor, Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(params.metallic_factor, 1.0);
        assert_eq!(params.roughness_factor, 1.0);
        assert!(params.base_color_texture.is_none());
    }

    #[test]
    fn test_default_material_is_stable() {
        assert_eq!(DefaultMaterialFactory::create(), DefaultMaterialFactory::create());
    }
}
