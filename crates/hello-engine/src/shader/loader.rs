use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::device::Gpu;

use super::spirv::parse_spirv;

/// The pipeline stage a shader file is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Where a shader lives and how to enter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSpec {
    pub path: PathBuf,
    pub stage: ShaderStage,
    pub entry_point: String,
}

impl ShaderSpec {
    /// A shader whose entry point is `main`, as GLSL-compiled SPIR-V has.
    pub fn new(path: impl Into<PathBuf>, stage: ShaderStage) -> Self {
        Self {
            path: path.into(),
            stage,
            entry_point: "main".to_string(),
        }
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into();
        self
    }
}

/// Reads a whole shader file into memory.
pub fn read_shader_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("could not open file {} for reading", path.display()))
}

/// Loads a SPIR-V file and creates a shader module from it on `gpu`'s device.
pub fn load_shader(gpu: &Gpu<'_>, shader: &ShaderSpec) -> Result<wgpu::ShaderModule> {
    let fail = || format!("could not create GPU shader from file {}", shader.path.display());

    let bytes = read_shader_file(&shader.path).with_context(fail)?;
    let words = parse_spirv(&bytes).with_context(fail)?;

    log::debug!(
        "loaded {} shader {} ({} bytes)",
        shader.stage,
        shader.path.display(),
        bytes.len()
    );

    let label = format!("{} shader", shader.stage);
    let module = gpu
        .device()
        .create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label.as_str()),
            source: wgpu::ShaderSource::SpirV(Cow::Owned(words)),
        });

    if let Some(err) = gpu.take_device_error() {
        return Err(anyhow::Error::new(err).context(fail()));
    }

    Ok(module)
}
