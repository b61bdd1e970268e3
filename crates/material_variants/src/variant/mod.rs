//! Compile-time phase: descriptors plus toggles into shader variants

pub mod compiler;
pub mod output;
pub mod texture_transform;

pub use compiler::{FeatureBlock, VariantCompiler, FEATURE_BLOCKS};
pub use output::{
    TextureBinding, UniformMap, UniformValue, VariantKey, VariantOutput, SHADER_IDENTIFIER,
};
pub use texture_transform::{ResolvedUv, TextureTransformResolver};
