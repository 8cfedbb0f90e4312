//! Hello-graphics engine crate.
//!
//! Owns the platform + GPU pieces the triangle demo is built from: the winit
//! runtime loop, the wgpu device/surface, SPIR-V shader loading and the
//! triangle pipeline.

pub mod device;
pub mod window;
pub mod shader;
pub mod core;

pub mod logging;
pub mod render;
