use std::path::{Path, PathBuf};

use hello_engine::device::GpuInit;
use hello_engine::render::ClearColor;
use hello_engine::shader::{ShaderSpec, ShaderStage};
use hello_engine::window::RuntimeConfig;

/// Environment variable that relocates the precompiled shader directory.
pub const SHADER_DIR_ENV: &str = "HELLO_GRAPHICS_SHADER_DIR";

/// Shader directory used when the environment does not override it,
/// relative to the working directory.
pub const DEFAULT_SHADER_DIR: &str = "shaders/bin";

pub const VERTEX_SHADER_FILE: &str = "triangle.vert.spv";
pub const FRAGMENT_SHADER_FILE: &str = "triangle.frag.spv";

/// Everything the demo can be configured with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window: RuntimeConfig,
    pub gpu: GpuInit,
    pub shader_dir: PathBuf,
    pub clear_color: ClearColor,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            shader_dir: PathBuf::from(DEFAULT_SHADER_DIR),
            clear_color: ClearColor::default(),
        }
    }
}

impl AppConfig {
    /// Defaults with `HELLO_GRAPHICS_SHADER_DIR` applied.
    pub fn from_env() -> Self {
        Self::default().with_shader_dir_override(std::env::var_os(SHADER_DIR_ENV).map(PathBuf::from))
    }

    fn with_shader_dir_override(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.shader_dir = dir;
        }
        self
    }

    pub fn vertex_shader(&self) -> ShaderSpec {
        ShaderSpec::new(shader_path(&self.shader_dir, VERTEX_SHADER_FILE), ShaderStage::Vertex)
    }

    pub fn fragment_shader(&self) -> ShaderSpec {
        ShaderSpec::new(shader_path(&self.shader_dir, FRAGMENT_SHADER_FILE), ShaderStage::Fragment)
    }
}

fn shader_path(dir: &Path, file: &str) -> PathBuf {
    dir.join(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_shaders() {
        let config = AppConfig::default();
        assert_eq!(config.shader_dir, PathBuf::from("shaders/bin"));
        assert_eq!(
            config.vertex_shader().path,
            PathBuf::from("shaders/bin/triangle.vert.spv")
        );
        assert_eq!(
            config.fragment_shader().path,
            PathBuf::from("shaders/bin/triangle.frag.spv")
        );
        assert_eq!(config.clear_color, ClearColor::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn shader_specs_have_expected_stages() {
        let config = AppConfig::default();
        assert_eq!(config.vertex_shader().stage, ShaderStage::Vertex);
        assert_eq!(config.fragment_shader().stage, ShaderStage::Fragment);
        assert_eq!(config.vertex_shader().entry_point, "main");
    }

    #[test]
    fn override_replaces_shader_dir() {
        let config = AppConfig::default().with_shader_dir_override(Some("/opt/demo/spv".into()));
        assert_eq!(
            config.vertex_shader().path,
            PathBuf::from("/opt/demo/spv/triangle.vert.spv")
        );
    }

    #[test]
    fn empty_override_is_ignored() {
        let config = AppConfig::default().with_shader_dir_override(Some(PathBuf::new()));
        assert_eq!(config.shader_dir, PathBuf::from(DEFAULT_SHADER_DIR));

        let config = AppConfig::default().with_shader_dir_override(None);
        assert_eq!(config.shader_dir, PathBuf::from(DEFAULT_SHADER_DIR));
    }
}
