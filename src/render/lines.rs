use super::helpers::{make_pipeline, GrowableBuffer};
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LineVertex {
    pub(crate) pos: [f32; 3],
    pub(crate) color: [f32; 3],
}

pub(crate) struct LineResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) vertices: GrowableBuffer,
    pub(crate) count: u32,
}

pub(crate) fn create_line_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    initial_vertices: usize,
) -> LineResources {
    let vertices = GrowableBuffer::new(
        device,
        "hero_line_vertices",
        (std::mem::size_of::<LineVertex>() * initial_vertices) as u64,
    );
    let buffers = [wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            },
            wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 12,
                shader_location: 1,
            },
        ],
    }];
    let pipeline = make_pipeline(
        device,
        "hero_lines_pipeline",
        layout,
        shader,
        "vs_lines",
        "fs_lines",
        &buffers,
        wgpu::PrimitiveTopology::LineList,
        format,
    );
    LineResources {
        pipeline,
        vertices,
        count: 0,
    }
}

pub(crate) fn pack_lines(positions: &[Vec3], colors: &[Vec3]) -> Vec<LineVertex> {
    positions
        .iter()
        .zip(colors)
        .map(|(p, c)| LineVertex {
            pos: p.to_array(),
            color: c.to_array(),
        })
        .collect()
}
