//! # Material Variants
//!
//! glTF material resolution and shader-variant compilation for a
//! physically-based renderer.
//!
//! ## Features
//!
//! - **Capability resolution**: raw glTF material records become typed,
//!   immutable descriptors with their extension blocks and capability flags
//! - **Variant compilation**: descriptor plus render toggles yields a
//!   deterministic define sequence, typed uniforms and texture bindings
//! - **Texture transforms**: KHR_texture_transform composed per slot
//! - **Fallback material**: surfaces without a material still render
//! - **Config files**: render toggles load from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use material_variants::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let library = MaterialLibrary::from_file("scene.gltf")?;
//!     let toggles = RenderToggles::default().with_clearcoat(false);
//!
//!     for material in library.iter() {
//!         let variant = VariantCompiler::compile(material, &toggles);
//!         println!("{} {:?}", variant.shader_identifier, variant.defines);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod material;
pub mod render;
pub mod variant;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Mat3, Vec2, Vec3, Vec4},
        material::{
            AlphaMode, CapabilityResolver, DefaultMaterialFactory, MaterialCapabilities,
            MaterialDescriptor, MaterialLibrary, SchemaError, ShadingModel, TextureReference,
        },
        render::RenderToggles,
        variant::{TextureBinding, UniformValue, VariantCompiler, VariantKey, VariantOutput},
    };
}
