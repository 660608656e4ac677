use super::line_vertex::LineVertex;
use super::renderer::Renderer;
use crate::geometry::Aabb;
use wgpu::util::DeviceExt;

/// The twelve edges of `aabb` as line-list vertex pairs.
pub fn box_lines(aabb: &Aabb, color: [f32; 3]) -> Vec<LineVertex> {
    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    let corners = aabb.corners();
    EDGES
        .iter()
        .flat_map(|&(a, b)| {
            [
                LineVertex::new(corners[a].into(), color),
                LineVertex::new(corners[b].into(), color),
            ]
        })
        .collect()
}

impl Renderer {
    /// Replace the debug boxes drawn over the scene.
    pub fn set_bounding_boxes(&mut self, boxes: &[Aabb], color: [f32; 3]) {
        let vertices: Vec<LineVertex> = boxes.iter().flat_map(|b| box_lines(b, color)).collect();
        if vertices.is_empty() {
            self.bounding_box_vertex_buffer = None;
            self.num_bounding_box_lines = 0;
            return;
        }
        self.bounding_box_vertex_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Bounding Box Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.num_bounding_box_lines = (vertices.len() / 2) as u32;
    }
}
