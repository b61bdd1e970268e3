//! Material model and parse-time resolution
//!
//! Raw glTF material records are resolved once, at asset load, into
//! immutable [`MaterialDescriptor`]s.

pub mod descriptor;
pub mod library;
pub mod material_factory;
pub mod resolver;
pub mod schema;
pub mod texture;

pub use descriptor::{
    AlphaMode, Clearcoat, FeatureBlocks, MaterialCapabilities, MaterialDescriptor,
    MaterialOrigin, MetallicRoughnessParams, PbrSpecular, ShadingModel, Sheen,
    SpecularGlossinessParams, Transmission, Volume,
};
pub use library::{LibraryError, MaterialFailure, MaterialLibrary};
pub use material_factory::{DefaultMaterialFactory, DEFAULT_MATERIAL_NAME};
pub use resolver::CapabilityResolver;
pub use schema::SchemaError;
pub use texture::{ImageHandle, TextureReference, TextureSlot, UvTransform};
