use crate::constants::{LINE_OPACITY, POINT_OPACITY, POINT_SIZE};
use crate::core::{Camera, RenderSurface, HERO_WGSL};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod lines;
mod points;

use lines::{create_line_resources, pack_lines, LineResources};
use points::{create_point_resources, pack_points, PointResources};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct HeroUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    point_size: f32,
    point_opacity: f32,
    line_opacity: f32,
    _pad: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryHandle {
    Points,
    Lines,
}

/// WebGPU-backed drawing target for the hero canvas.
pub struct GpuSurface {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    points: PointResources,
    lines: LineResources,
    camera: Camera,
    width: u32,
    height: u32,
    disposed: bool,
}

impl GpuSurface {
    pub async fn new(canvas: &web::HtmlCanvasElement, expected_points: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // the page shows through the canvas, so prefer a blending alpha mode
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("hero_shader"),
            source: wgpu::ShaderSource::Wgsl(HERO_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("hero_uniforms"),
            size: std::mem::size_of::<HeroUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("hero_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("hero_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("hero_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let points = create_point_resources(&device, &layout, &shader, format, expected_points);
        // links rarely exceed a few per point; the buffer grows if they do
        let lines = create_line_resources(&device, &layout, &shader, format, expected_points * 8);

        log::info!("[gpu] surface {}x{} format={:?} alpha={:?}", width, height, format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            bind_group,
            points,
            lines,
            camera: Camera::hero(width, height),
            width,
            height,
            disposed: false,
        })
    }

    fn write_uniforms(&self) {
        let u = HeroUniforms {
            view: self.camera.view_matrix().to_cols_array_2d(),
            proj: self.camera.projection_matrix().to_cols_array_2d(),
            point_size: POINT_SIZE,
            point_opacity: POINT_OPACITY,
            line_opacity: LINE_OPACITY,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }
}

impl RenderSurface for GpuSurface {
    type Handle = GeometryHandle;

    fn create_point_cloud(&mut self, positions: &[Vec3], colors: &[Vec3]) -> GeometryHandle {
        self.update_geometry(GeometryHandle::Points, positions, colors);
        GeometryHandle::Points
    }

    fn create_line_set(&mut self, positions: &[Vec3], colors: &[Vec3]) -> GeometryHandle {
        self.update_geometry(GeometryHandle::Lines, positions, colors);
        GeometryHandle::Lines
    }

    fn update_geometry(&mut self, handle: GeometryHandle, positions: &[Vec3], colors: &[Vec3]) {
        if self.disposed {
            return;
        }
        match handle {
            GeometryHandle::Points => {
                let packed = pack_points(positions, colors);
                self.points
                    .instances
                    .write(&self.device, &self.queue, bytemuck::cast_slice(&packed));
                self.points.count = packed.len() as u32;
            }
            GeometryHandle::Lines => {
                let packed = pack_lines(positions, colors);
                self.lines
                    .vertices
                    .write(&self.device, &self.queue, bytemuck::cast_slice(&packed));
                self.lines.count = packed.len() as u32;
            }
        }
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.write_uniforms();
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("hero_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("hero_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            if self.lines.count > 0 {
                rpass.set_pipeline(&self.lines.pipeline);
                rpass.set_vertex_buffer(0, self.lines.vertices.buffer.slice(..));
                rpass.draw(0..self.lines.count, 0..1);
            }
            if self.points.count > 0 {
                rpass.set_pipeline(&self.points.pipeline);
                rpass.set_vertex_buffer(0, self.points.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.points.instances.buffer.slice(..));
                rpass.draw(0..6, 0..self.points.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        if self.disposed || width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.camera.set_viewport(width, height);
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.points.instances.destroy();
        self.points.quad_vb.destroy();
        self.lines.vertices.destroy();
        self.uniform_buffer.destroy();
        self.device.destroy();
        log::info!("[gpu] disposed");
    }
}
