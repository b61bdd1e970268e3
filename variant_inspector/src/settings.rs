//! Inspector settings file

use material_variants::config::Config;
use material_variants::render::RenderToggles;
use serde::{Deserialize, Serialize};

/// Settings loaded from `--config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Render toggles to compile under
    pub toggles: RenderToggles,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            toggles: RenderToggles::default(),
        }
    }
}

impl Config for InspectorConfig {}
