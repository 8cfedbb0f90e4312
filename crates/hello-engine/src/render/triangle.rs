use anyhow::Result;

use crate::device::Gpu;
use crate::shader::{load_shader, ShaderSpec, ShaderStage};

use super::{ClearColor, RenderTarget};

/// Vertices per draw; positions come from the vertex shader, not a buffer.
const VERTEX_COUNT: u32 = 3;

/// Fixed-function triangle: a vertex and a fragment shader, no vertex input,
/// no bindings, one color target in the surface format.
pub struct TrianglePipeline {
    pipeline: wgpu::RenderPipeline,
    format: wgpu::TextureFormat,
}

impl TrianglePipeline {
    /// Loads both shaders and links them into a render pipeline.
    ///
    /// The shader modules are released once the pipeline holds them.
    pub fn new(gpu: &Gpu<'_>, vertex: &ShaderSpec, fragment: &ShaderSpec) -> Result<Self> {
        anyhow::ensure!(
            vertex.stage == ShaderStage::Vertex,
            "{} is a {} shader, expected a vertex shader",
            vertex.path.display(),
            vertex.stage
        );
        anyhow::ensure!(
            fragment.stage == ShaderStage::Fragment,
            "{} is a {} shader, expected a fragment shader",
            fragment.path.display(),
            fragment.stage
        );

        let vs = load_shader(gpu, vertex)?;
        let fs = load_shader(gpu, fragment)?;

        let device = gpu.device();
        let format = gpu.surface_format();

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle pipeline"),
            layout: Some(&layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(vertex.entry_point.as_str()),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(fragment.entry_point.as_str()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = gpu.take_device_error() {
            return Err(anyhow::Error::new(err).context("could not create GPU graphics pipeline"));
        }

        drop(vs);
        drop(fs);

        log::info!("triangle pipeline ready ({format:?})");

        Ok(Self { pipeline, format })
    }

    /// Surface format the pipeline was built for.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Clears the target to `clear` and draws the triangle over it.
    pub fn draw(&self, target: &mut RenderTarget<'_>, clear: ClearColor) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.draw(0..VERTEX_COUNT, 0..1);
    }
}
