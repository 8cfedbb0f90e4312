use anyhow::{Context, Result};

use hello_engine::core::{App, AppControl, FrameCtx};
use hello_engine::device::Gpu;
use hello_engine::render::{ClearColor, TrianglePipeline};
use hello_engine::shader::ShaderSpec;

/// Clears the window and draws one triangle per frame.
pub struct HelloTriangle {
    vertex: ShaderSpec,
    fragment: ShaderSpec,
    clear_color: ClearColor,
    pipeline: Option<TrianglePipeline>,
}

impl HelloTriangle {
    pub fn new(vertex: ShaderSpec, fragment: ShaderSpec, clear_color: ClearColor) -> Self {
        Self {
            vertex,
            fragment,
            clear_color,
            pipeline: None,
        }
    }
}

impl App for HelloTriangle {
    fn on_start(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        self.pipeline = Some(TrianglePipeline::new(gpu, &self.vertex, &self.fragment)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        let pipeline = self
            .pipeline
            .as_ref()
            .context("frame requested before the graphics pipeline was created")?;

        let clear = self.clear_color;
        ctx.render(|target| pipeline.draw(target, clear))?;

        Ok(AppControl::Continue)
    }
}
