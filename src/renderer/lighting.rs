use nalgebra_glm as glm;

/// Hemisphere ambient plus two directional lights, tone mapped with ACES.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub key_position: [f32; 3],
    pub key_color: [f32; 3],
    pub key_intensity: f32,
    pub fill_position: [f32; 3],
    pub fill_color: [f32; 3],
    pub fill_intensity: f32,
    pub aces: bool,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            sky_color: [1.0, 1.0, 1.0],
            ground_color: hex_to_linear(0x444444),
            hemisphere_intensity: 1.2,
            key_position: [5.0, 10.0, 7.5],
            key_color: [1.0, 1.0, 1.0],
            key_intensity: 3.0,
            fill_position: [-5.0, 5.0, 5.0],
            fill_color: hex_to_linear(0xfff5f0),
            fill_intensity: 1.5,
            aces: true,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub sky_color: [f32; 4],
    pub ground_color: [f32; 4],
    pub key_dir: [f32; 4],
    pub key_color: [f32; 4],
    pub fill_dir: [f32; 4],
    pub fill_color: [f32; 4],
    pub params: [f32; 4],
}

impl SceneUniform {
    pub fn new(view_proj: &glm::Mat4, lights: &LightRig, exposure: f32) -> Self {
        let key = direction_to(&lights.key_position);
        let fill = direction_to(&lights.fill_position);
        Self {
            view_proj: (*view_proj).into(),
            sky_color: with_w(lights.sky_color, lights.hemisphere_intensity),
            ground_color: with_w(lights.ground_color, 1.0),
            key_dir: [key.x, key.y, key.z, lights.key_intensity],
            key_color: with_w(lights.key_color, 1.0),
            fill_dir: [fill.x, fill.y, fill.z, lights.fill_intensity],
            fill_color: with_w(lights.fill_color, 1.0),
            params: [exposure, if lights.aces { 1.0 } else { 0.0 }, 0.0, 0.0],
        }
    }
}

/// Per-draw data bound with a dynamic offset.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct NodeUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

impl NodeUniform {
    pub fn new(world: &glm::Mat4, base_color: [f32; 4]) -> Self {
        let normal = glm::transpose(&glm::inverse(world));
        Self {
            model: (*world).into(),
            normal: normal.into(),
            base_color,
        }
    }
}

/// Directional lights shine from their position toward the origin.
fn direction_to(position: &[f32; 3]) -> glm::Vec3 {
    let v = glm::make_vec3(position);
    let len = glm::length(&v);
    if len < 1e-6 { glm::vec3(0.0, 1.0, 0.0) } else { v / len }
}

fn with_w(rgb: [f32; 3], w: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], w]
}

/// `0xRRGGBB` as sRGB components in 0..=1.
pub fn hex_to_srgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0)]
}

/// `0xRRGGBB` in sRGB to linear components.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    hex_to_srgb(hex).map(srgb_to_linear)
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_directions_are_normalized_toward_the_light() {
        let uniform = SceneUniform::new(&glm::Mat4::identity(), &LightRig::default(), 1.4);
        let key = glm::vec3(uniform.key_dir[0], uniform.key_dir[1], uniform.key_dir[2]);
        assert!((glm::length(&key) - 1.0).abs() < 1e-5);
        assert!(key.y > 0.0 && key.z > 0.0);
        assert_eq!(uniform.key_dir[3], 3.0);
        assert_eq!(uniform.params[0], 1.4);
        assert_eq!(uniform.params[1], 1.0);
    }

    #[test]
    fn hex_conversion_hits_endpoints() {
        assert_eq!(hex_to_linear(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let grey = hex_to_linear(0x202020)[0];
        assert!((grey - 0.0144).abs() < 1e-3);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let world = glm::scaling(&glm::vec3(2.0, 1.0, 1.0));
        let uniform = NodeUniform::new(&world, [1.0; 4]);
        assert!((uniform.normal[0][0] - 0.5).abs() < 1e-6);
        assert_eq!(uniform.model[0][0], 2.0);
    }
}
