use crate::error::FolioError;
use crate::model::{Model, Node, NodeId, Primitive, TextureImage, Transform};
use nalgebra_glm as glm;
use std::collections::HashMap;
use std::path::Path;

/// Import a `.gltf` / `.glb` file into a `Model`.
///
/// Only triangle-list primitives are kept. Base color factors and embedded
/// base color textures come across; everything else in the material is
/// ignored.
pub fn load_gltf(path: &Path) -> Result<Model, FolioError> {
    let (document, buffers, images) = gltf::import(path).map_err(|e| {
        FolioError::new("gltf-import")
            .with_arg("path", path.display())
            .push_std(e)
    })?;

    let name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("model")
        .to_string();
    let mut model = Model::new(name);

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| FolioError::new("gltf-no-scene").with_arg("path", path.display()))?;

    let mut ctx = ImportContext {
        buffers: &buffers,
        images: &images,
        image_slots: HashMap::new(),
    };
    for node in scene.nodes() {
        import_node(&mut ctx, &mut model, &node, None);
    }

    model.update_world_matrices();
    log::info!(
        "Loaded {}: {} nodes, {} primitives, {} embedded textures",
        model.name,
        model.nodes.len(),
        model.primitive_count(),
        model.textures.len()
    );
    Ok(model)
}

struct ImportContext<'a> {
    buffers: &'a [gltf::buffer::Data],
    images: &'a [gltf::image::Data],
    image_slots: HashMap<usize, usize>,
}

fn import_node(
    ctx: &mut ImportContext<'_>,
    model: &mut Model,
    node: &gltf::Node<'_>,
    parent: Option<NodeId>,
) {
    let (t, r, s) = node.transform().decomposed();
    let transform = Transform {
        translation: glm::make_vec3(&t),
        rotation: glm::quat(r[0], r[1], r[2], r[3]),
        scale: glm::make_vec3(&s),
    };

    let mut out = Node::new(node.name().map(str::to_string), transform);
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(prim) = import_primitive(ctx, model, &primitive) {
                out.primitives.push(prim);
            }
        }
    }

    let id = model.add_node(out, parent);
    for child in node.children() {
        import_node(ctx, model, &child, Some(id));
    }
}

fn import_primitive(
    ctx: &mut ImportContext<'_>,
    model: &mut Model,
    primitive: &gltf::Primitive<'_>,
) -> Option<Primitive> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::debug!("Skipping primitive with mode {:?}", primitive.mode());
        return None;
    }

    let buffers = ctx.buffers;
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    let mut prim = Primitive::new(positions, indices);
    match reader.read_normals() {
        Some(normals) => prim.normals = normals.collect(),
        None => prim.compute_normals(),
    }
    if let Some(uvs) = reader.read_tex_coords(0) {
        prim.uvs = uvs.into_f32().collect();
    }

    let pbr = primitive.material().pbr_metallic_roughness();
    prim.base_color = pbr.base_color_factor();
    if let Some(info) = pbr.base_color_texture() {
        let image_index = info.texture().source().index();
        prim.texture = embedded_texture_slot(ctx, model, image_index);
    }

    Some(prim)
}

fn embedded_texture_slot(
    ctx: &mut ImportContext<'_>,
    model: &mut Model,
    image_index: usize,
) -> Option<usize> {
    if let Some(&slot) = ctx.image_slots.get(&image_index) {
        return Some(slot);
    }
    let data = ctx.images.get(image_index)?;
    let Some(rgba) = to_rgba8(data) else {
        log::warn!(
            "Unsupported embedded image format {:?} (image {})",
            data.format,
            image_index
        );
        return None;
    };
    let slot = model.add_texture(TextureImage::new(
        format!("embedded-{image_index}"),
        rgba,
        data.width,
        data.height,
    ));
    ctx.image_slots.insert(image_index, slot);
    Some(slot)
}

fn to_rgba8(data: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;
    match data.format {
        Format::R8G8B8A8 => Some(data.pixels.clone()),
        Format::R8G8B8 => Some(
            data.pixels
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
        ),
        Format::R8G8 => Some(
            data.pixels
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
        ),
        Format::R8 => Some(data.pixels.iter().flat_map(|&v| [v, v, v, 255]).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = load_gltf(Path::new("does/not/exist.glb")).unwrap_err();
        assert_eq!(err.key, "gltf-import");
        assert_eq!(err.args.get("path").map(String::as_str), Some("does/not/exist.glb"));
    }

    #[test]
    fn rgb_images_gain_opaque_alpha() {
        let data = gltf::image::Data {
            pixels: vec![10, 20, 30, 40, 50, 60],
            format: gltf::image::Format::R8G8B8,
            width: 2,
            height: 1,
        };
        assert_eq!(to_rgba8(&data), Some(vec![10, 20, 30, 255, 40, 50, 60, 255]));
    }
}
