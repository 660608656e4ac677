use nalgebra_glm as glm;

/// One indexed triangle list with a single material.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    /// Index into `Model::textures`.
    pub texture: Option<usize>,
}

impl Primitive {
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals: Vec::new(),
            uvs: Vec::new(),
            indices,
            base_color: [1.0, 1.0, 1.0, 1.0],
            texture: None,
        }
    }

    /// Triangles as vertex index triples, skipping any that reference
    /// vertices out of range.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let len = self.positions.len();
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let tri = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            tri.iter().all(|&i| i < len).then_some(tri)
        })
    }

    /// Flat normals accumulated per vertex, for meshes exported without normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![glm::Vec3::zeros(); self.positions.len()];
        let triangles: Vec<[usize; 3]> = self.triangles().collect();
        for [a, b, c] in triangles {
            let pa = glm::make_vec3(&self.positions[a]);
            let pb = glm::make_vec3(&self.positions[b]);
            let pc = glm::make_vec3(&self.positions[c]);
            let n = glm::cross(&(pb - pa), &(pc - pa));
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }
        self.normals = normals
            .into_iter()
            .map(|n| {
                if glm::length(&n) < 1e-12 {
                    [0.0, 1.0, 0.0]
                } else {
                    let n = glm::normalize(&n);
                    [n.x, n.y, n.z]
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_skip_out_of_range_indices() {
        let prim = Primitive::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2, 0, 1, 7],
        );
        assert_eq!(prim.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn computed_normals_face_the_winding() {
        let mut prim = Primitive::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        prim.compute_normals();
        assert_eq!(prim.normals, vec![[0.0, 0.0, 1.0]; 3]);
    }
}
