//! Caller-owned render toggles
//!
//! [`RenderToggles`] is the snapshot of global rendering switches handed to
//! every variant compilation. The compiler only reads the feature toggles;
//! the remaining switches travel with the snapshot for the caller's own
//! subsystems (skinning, morphing, lighting).

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Global rendering switches
///
/// All toggles default to enabled. Absent keys in a config file keep their
/// default, so a file only needs to list what it turns off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderToggles {
    /// KHR_materials_clearcoat
    pub clearcoat: bool,
    /// KHR_materials_specular
    #[serde(alias = "pbrSpecular")]
    pub pbr_specular: bool,
    /// KHR_materials_sheen
    pub sheen: bool,
    /// KHR_materials_transmission (also gates KHR_materials_volume)
    pub transmission: bool,
    /// Morph target animation
    pub morphing: bool,
    /// Skeletal skinning
    pub skinning: bool,
    /// Image based lighting
    pub ibl: bool,
    /// KHR_lights_punctual
    pub punctual: bool,
}

impl RenderToggles {
    /// Create a toggle set with everything enabled
    pub const fn new() -> Self {
        Self {
            clearcoat: true,
            pbr_specular: true,
            sheen: true,
            transmission: true,
            morphing: true,
            skinning: true,
            ibl: true,
            punctual: true,
        }
    }

    /// Toggle set with every material feature disabled
    pub const fn without_material_features() -> Self {
        Self {
            clearcoat: false,
            pbr_specular: false,
            sheen: false,
            transmission: false,
            ..Self::new()
        }
    }

    /// Enable or disable clearcoat
    #[must_use]
    pub const fn with_clearcoat(mut self, enabled: bool) -> Self {
        self.clearcoat = enabled;
        self
    }

    /// Enable or disable the specular extension
    #[must_use]
    pub const fn with_pbr_specular(mut self, enabled: bool) -> Self {
        self.pbr_specular = enabled;
        self
    }

    /// Enable or disable sheen
    #[must_use]
    pub const fn with_sheen(mut self, enabled: bool) -> Self {
        self.sheen = enabled;
        self
    }

    /// Enable or disable transmission and volume
    #[must_use]
    pub const fn with_transmission(mut self, enabled: bool) -> Self {
        self.transmission = enabled;
        self
    }

    /// Enable or disable morph targets
    #[must_use]
    pub const fn with_morphing(mut self, enabled: bool) -> Self {
        self.morphing = enabled;
        self
    }

    /// Enable or disable skinning
    #[must_use]
    pub const fn with_skinning(mut self, enabled: bool) -> Self {
        self.skinning = enabled;
        self
    }

    /// Enable or disable image based lighting
    #[must_use]
    pub const fn with_ibl(mut self, enabled: bool) -> Self {
        self.ibl = enabled;
        self
    }

    /// Enable or disable punctual lights
    #[must_use]
    pub const fn with_punctual(mut self, enabled: bool) -> Self {
        self.punctual = enabled;
        self
    }
}

impl Default for RenderToggles {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for RenderToggles {}
