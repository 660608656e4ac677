use super::lighting::NodeUniform;
use super::renderer::Renderer;
use super::vertex::Vertex;
use crate::model::{Model, NodeId};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DrawCall {
    pub node: NodeId,
    pub index_start: u32,
    pub index_count: u32,
    pub base_vertex: i32,
    pub texture: Option<usize>,
    pub base_color: [f32; 4],
}

/// Concatenate every primitive into one vertex and one index stream.
pub(crate) fn flatten(model: &Model) -> (Vec<Vertex>, Vec<u32>, Vec<DrawCall>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut draws = Vec::new();

    for node_id in model.walk() {
        for prim in &model.node(node_id).primitives {
            if prim.indices.is_empty() || prim.positions.is_empty() {
                continue;
            }
            let base_vertex = vertices.len() as i32;
            let index_start = indices.len() as u32;
            for (i, position) in prim.positions.iter().enumerate() {
                vertices.push(Vertex {
                    position: *position,
                    normal: prim.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                    uv: prim.uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                });
            }
            let count = prim.positions.len() as u32;
            indices.extend(prim.indices.iter().map(|&i| i.min(count - 1)));
            draws.push(DrawCall {
                node: node_id,
                index_start,
                index_count: prim.indices.len() as u32,
                base_vertex,
                texture: prim.texture.filter(|&slot| slot < model.textures.len()),
                base_color: prim.base_color,
            });
        }
    }
    (vertices, indices, draws)
}

pub(crate) fn aligned_stride(size: u64, alignment: u64) -> u64 {
    let alignment = alignment.max(1);
    size.div_ceil(alignment) * alignment
}

/// GPU copy of a `Model`: merged buffers, one uniform slot per draw and one
/// bind group per texture.
pub struct GpuModel {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    pub(crate) draws: Vec<DrawCall>,
    node_buffer: wgpu::Buffer,
    pub(crate) node_bind_group: wgpu::BindGroup,
    pub(crate) node_stride: u64,
    pub(crate) textures: Vec<wgpu::BindGroup>,
}

impl GpuModel {
    /// `None` when the model has nothing to draw.
    pub fn new(renderer: &Renderer, model: &Model) -> Option<Self> {
        let (vertices, indices, draws) = flatten(model);
        if draws.is_empty() {
            log::warn!("{} has no drawable primitives", model.name);
            return None;
        }

        let device = &renderer.device;
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_size = size_of::<NodeUniform>() as u64;
        let node_stride = aligned_stride(
            uniform_size,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        let node_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Node Uniform Buffer"),
            size: node_stride * draws.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let node_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Node Bind Group"),
            layout: &renderer.node_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &node_buffer,
                    offset: 0,
                    size: NonZeroU64::new(uniform_size),
                }),
            }],
        });

        let textures = model
            .textures
            .iter()
            .map(|image| renderer.create_texture_bind_group(image))
            .collect();

        log::info!(
            "Uploaded {}: {} vertices, {} triangles, {} draws, {} textures",
            model.name,
            vertices.len(),
            indices.len() / 3,
            draws.len(),
            model.textures.len()
        );

        let gpu = Self {
            vertex_buffer,
            index_buffer,
            draws,
            node_buffer,
            node_bind_group,
            node_stride,
            textures,
        };
        gpu.update_transforms(&renderer.queue, model);
        Some(gpu)
    }

    /// Push current world matrices to the GPU.
    pub fn update_transforms(&self, queue: &wgpu::Queue, model: &Model) {
        let mut bytes = vec![0u8; (self.node_stride as usize) * self.draws.len()];
        for (i, draw) in self.draws.iter().enumerate() {
            let uniform = NodeUniform::new(&model.node(draw.node).world, draw.base_color);
            let start = i * self.node_stride as usize;
            let src = bytemuck::bytes_of(&uniform);
            bytes[start..start + src.len()].copy_from_slice(src);
        }
        queue.write_buffer(&self.node_buffer, 0, &bytes);
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>, white: &wgpu::BindGroup) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        for (i, draw) in self.draws.iter().enumerate() {
            let offset = (i as u64 * self.node_stride) as u32;
            pass.set_bind_group(1, &self.node_bind_group, &[offset]);
            let texture = draw
                .texture
                .and_then(|slot| self.textures.get(slot))
                .unwrap_or(white);
            pass.set_bind_group(2, texture, &[]);
            pass.draw_indexed(
                draw.index_start..draw.index_start + draw.index_count,
                draw.base_vertex,
                0..1,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Transform, test_box};

    #[test]
    fn flatten_offsets_each_primitive() {
        let mut model = Model::new("two boxes");
        let mut a = Node::new(Some("a".into()), Transform::identity());
        a.primitives.push(test_box([0.0; 3], [1.0; 3]));
        let a = model.add_node(a, None);
        let mut b = Node::new(Some("b".into()), Transform::identity());
        let mut prim = test_box([0.0; 3], [1.0; 3]);
        prim.texture = Some(3);
        b.primitives.push(prim);
        let b = model.add_node(b, Some(a));

        let (vertices, indices, draws) = flatten(&model);
        assert_eq!(vertices.len(), 16);
        assert_eq!(indices.len(), 72);
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[1].node, b);
        assert_eq!(draws[1].index_start, 36);
        assert_eq!(draws[1].base_vertex, 8);
        // Slot 3 does not exist on this model.
        assert_eq!(draws[1].texture, None);
    }

    #[test]
    fn stride_respects_alignment() {
        assert_eq!(aligned_stride(144, 256), 256);
        assert_eq!(aligned_stride(256, 256), 256);
        assert_eq!(aligned_stride(300, 256), 512);
        assert_eq!(aligned_stride(144, 0), 144);
    }
}
