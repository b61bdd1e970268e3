//! Per-slot UV transform resolution
//!
//! A texture reference carrying a KHR_texture_transform contributes one
//! define and one matrix uniform named after its slot. The transform's
//! `texCoord`, when present, replaces the reference's UV channel.

use super::output::VariantOutput;
use crate::foundation::math::Mat3;
use crate::material::texture::{TextureReference, TextureSlot};

/// UV state of one texture after transform resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedUv {
    /// Channel the sampler reads
    pub uv_channel: u32,
    /// Composed transform matrix
    pub transform: Option<Mat3>,
}

/// Applies texture transforms slot by slot
pub struct TextureTransformResolver;

impl TextureTransformResolver {
    /// Resolve `reference` bound at `slot`, registering any transform on `output`
    ///
    /// Without a transform nothing is emitted and the source channel is kept.
    pub fn resolve(
        slot: TextureSlot,
        reference: &TextureReference,
        output: &mut VariantOutput,
    ) -> ResolvedUv {
        let Some(transform) = &reference.transform else {
            return ResolvedUv {
                uv_channel: reference.uv_channel,
                transform: None,
            };
        };

        let matrix = transform.matrix();
        output.define(slot.uv_transform_define());
        output.uniforms.set(slot.uv_transform_uniform(), matrix);

        ResolvedUv {
            uv_channel: transform.tex_coord.unwrap_or(reference.uv_channel),
            transform: Some(matrix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::material::texture::{ImageHandle, UvTransform};
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_no_transform_emits_nothing() {
        let mut output = VariantOutput::new();
        let reference = TextureReference::new(ImageHandle(0)).with_uv_channel(1);

        let resolved = TextureTransformResolver::resolve(TextureSlot::BaseColor, &reference, &mut output);

        assert_eq!(resolved.uv_channel, 1);
        assert!(resolved.transform.is_none());
        assert!(output.defines.is_empty());
        assert!(output.uniforms.is_empty());
    }

    #[test]
    fn test_pure_translation() {
        let mut output = VariantOutput::new();
        let reference = TextureReference::new(ImageHandle(0)).with_transform(UvTransform {
            offset: Vec2::new(0.5, 0.0),
            ..UvTransform::default()
        });

        let resolved = TextureTransformResolver::resolve(TextureSlot::BaseColor, &reference, &mut output);

        let expected = Mat3::new(1.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(output.defines, vec!["HAS_BASECOLOR_UV_TRANSFORM"]);
        assert_relative_eq!(
            *output.uniforms.get("baseColorUVTransform").and_then(|v| v.as_mat3()).unwrap(),
            expected
        );
        assert_relative_eq!(resolved.transform.unwrap(), expected);
        assert_eq!(resolved.uv_channel, 0);
    }

    #[test]
    fn test_composition_order() {
        let mut output = VariantOutput::new();
        let reference = TextureReference::new(ImageHandle(0)).with_transform(UvTransform {
            offset: Vec2::new(1.0, 0.0),
            rotation: FRAC_PI_2,
            scale: Vec2::new(2.0, 2.0),
            tex_coord: None,
        });

        let resolved = TextureTransformResolver::resolve(TextureSlot::Normal, &reference, &mut output);

        // rotation * scale * translation maps (0, 0) to R * S * (1, 0) = (0, 2)
        let origin = resolved.transform.unwrap() * crate::foundation::math::Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(origin.y, 2.0, epsilon = 1e-6);
        assert!(output.has_define("HAS_NORMAL_UV_TRANSFORM"));
        assert!(output.uniforms.contains("normalUVTransform"));
    }

    #[test]
    fn test_tex_coord_override() {
        let mut output = VariantOutput::new();
        let reference = TextureReference::new(ImageHandle(0))
            .with_uv_channel(0)
            .with_transform(UvTransform {
                tex_coord: Some(1),
                ..UvTransform::default()
            });

        let resolved = TextureTransformResolver::resolve(TextureSlot::Emissive, &reference, &mut output);
        assert_eq!(resolved.uv_channel, 1);
        assert_eq!(reference.uv_channel, 0);
    }
}
