pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Size of the reduced-resolution target for a `scale` (1 = full size).
pub fn scaled_extent(width: u32, height: u32, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    (width.div_ceil(scale).max(1), height.div_ceil(scale).max(1))
}

/// Color and depth at a fraction of the window size. The scene is drawn
/// here and then stretched onto the surface with nearest sampling.
pub struct LowResTarget {
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub color_view: wgpu::TextureView,
    pub depth_view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

impl LowResTarget {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        full: (u32, u32),
        scale: u32,
    ) -> Self {
        let (width, height) = scaled_extent(full.0, full.1, scale);
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Low Res Color"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Low Res Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        log::debug!("Low-res target {}x{} (1/{})", width, height, scale);
        Self {
            width,
            height,
            scale,
            color_view,
            depth_view: create_depth_view(device, width, height),
            bind_group,
        }
    }

    pub fn matches(&self, full: (u32, u32), scale: u32) -> bool {
        self.scale == scale && (self.width, self.height) == scaled_extent(full.0, full.1, scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_extent_rounds_up_and_never_hits_zero() {
        assert_eq!(scaled_extent(1280, 720, 4), (320, 180));
        assert_eq!(scaled_extent(1281, 721, 4), (321, 181));
        assert_eq!(scaled_extent(3, 3, 4), (1, 1));
        assert_eq!(scaled_extent(800, 600, 0), (800, 600));
    }
}
