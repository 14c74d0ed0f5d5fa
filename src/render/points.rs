use super::helpers::{make_pipeline, GrowableBuffer};
use glam::Vec3;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PointInstance {
    pub(crate) center: [f32; 3],
    pub(crate) color: [f32; 3],
}

// Two triangles covering a unit quad centered on the point
const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

pub(crate) struct PointResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) quad_vb: wgpu::Buffer,
    pub(crate) instances: GrowableBuffer,
    pub(crate) count: u32,
}

pub(crate) fn create_point_resources(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    initial_count: usize,
) -> PointResources {
    let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("hero_quad_vb"),
        contents: bytemuck::cast_slice(&QUAD_CORNERS),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let instances = GrowableBuffer::new(
        device,
        "hero_point_instances",
        (std::mem::size_of::<PointInstance>() * initial_count) as u64,
    );
    let buffers = [
        // slot 0: quad corners
        wgpu::VertexBufferLayout {
            array_stride: (std::mem::size_of::<f32>() * 2) as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        },
        // slot 1: per-point center and color
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 2,
                },
            ],
        },
    ];
    let pipeline = make_pipeline(
        device,
        "hero_points_pipeline",
        layout,
        shader,
        "vs_points",
        "fs_points",
        &buffers,
        wgpu::PrimitiveTopology::TriangleList,
        format,
    );
    PointResources {
        pipeline,
        quad_vb,
        instances,
        count: 0,
    }
}

pub(crate) fn pack_points(positions: &[Vec3], colors: &[Vec3]) -> Vec<PointInstance> {
    positions
        .iter()
        .zip(colors)
        .map(|(p, c)| PointInstance {
            center: p.to_array(),
            color: c.to_array(),
        })
        .collect()
}
