//! Render-side inputs to variant compilation

pub mod toggles;

pub use toggles::RenderToggles;
