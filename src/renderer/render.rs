use super::gpu_model::GpuModel;
use super::lighting::{SceneUniform, srgb_to_linear};
use super::renderer::Renderer;
use egui_wgpu::ScreenDescriptor;
use nalgebra_glm as glm;

/// What one frame of 3D content looks like.
pub struct Frame<'a> {
    pub model: Option<&'a GpuModel>,
    pub view_proj: glm::Mat4,
    /// sRGB background.
    pub clear_color: [f32; 3],
    pub exposure: f32,
    /// 1 renders at full resolution; N renders at 1/N and upscales.
    pub pixel_scale: u32,
    pub show_bounding_boxes: bool,
}

impl Frame<'_> {
    /// Background only, for pages without 3D content.
    pub fn empty(clear_color: [f32; 3]) -> Self {
        Self {
            model: None,
            view_proj: glm::Mat4::identity(),
            clear_color,
            exposure: 1.0,
            pixel_scale: 1,
            show_bounding_boxes: false,
        }
    }
}

impl Renderer {
    pub fn render(
        &mut self,
        frame: Frame<'_>,
        paint_jobs: Vec<egui::ClippedPrimitive>,
        textures_delta: egui::TexturesDelta,
        screen_descriptor: ScreenDescriptor,
    ) -> Result<(), wgpu::SurfaceError> {
        // Skip rendering if window size is invalid (minimized, not ready, etc.)
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        let uniform = SceneUniform::new(&frame.view_proj, &self.lights, frame.exposure);
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniform));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let [r, g, b] = frame.clear_color.map(|c| srgb_to_linear(c) as f64);
        let clear = wgpu::Color { r, g, b, a: 1.0 };

        let pixelated = frame.pixel_scale > 1;
        if pixelated {
            self.ensure_low_res(frame.pixel_scale);
        }

        {
            let (color_view, depth_view) = match (&self.low_res, pixelated) {
                (Some(target), true) => (&target.color_view, &target.depth_view),
                _ => (&view, &self.depth_view),
            };
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(model) = frame.model {
                render_pass.set_pipeline(&self.mesh_pipeline);
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                model.draw(&mut render_pass, &self.white_bind_group);
            }

            if frame.show_bounding_boxes && self.num_bounding_box_lines > 0 {
                if let Some(buffer) = &self.bounding_box_vertex_buffer {
                    render_pass.set_pipeline(&self.line_pipeline);
                    render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..(self.num_bounding_box_lines * 2), 0..1);
                }
            }
        }

        if let (Some(target), true) = (&self.low_res, pixelated) {
            let mut blit_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            blit_pass.set_pipeline(&self.blit_pipeline);
            blit_pass.set_bind_group(0, &target.bind_group, &[]);
            blit_pass.draw(0..3, 0..1);
        }

        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut egui_rpass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui render pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut egui_rpass, &paint_jobs, &screen_descriptor);
        }

        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
