//! Precompiled shader loading.
//!
//! Shaders arrive as SPIR-V files on disk. They are read whole, checked for
//! the SPIR-V header, and handed to wgpu; nothing else about them is
//! interpreted here.

mod loader;
mod spirv;

pub use loader::{load_shader, read_shader_file, ShaderSpec, ShaderStage};
pub use spirv::{parse_spirv, SpirvError, SPIRV_MAGIC};
