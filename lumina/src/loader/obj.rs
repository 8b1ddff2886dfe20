use fxhash::FxHashMap;
use glam::{vec2, vec3, Vec2, Vec3};

use super::{load_options, LoadError};
use crate::gpu;

/// Geometry parsed from an `.obj` source.
#[derive(Clone, Debug, Default)]
pub struct ParsedObj {
    pub vertices: Vec<gpu::Vertex>,
    pub triangles: Vec<gpu::Triangle>,
}

/// Parses an `.obj` file from memory; material libraries are not loaded.
pub fn parse_obj(src: &str) -> Result<ParsedObj, LoadError> {
    let (models, _) =
        tobj::load_obj_buf(&mut src.as_bytes(), &load_options(), |_| {
            Ok(Default::default())
        })
        .map_err(LoadError::Parse)?;

    let (vertices, triangles) = flatten(&models)?;

    Ok(ParsedObj {
        vertices,
        triangles,
    })
}

/// Converts triangulated models into a single vertex + triangle list.
///
/// Vertices that are identical bit-for-bit (position, normal and UV) get
/// merged, also across models. UVs get their `v` flipped; missing normals
/// and UVs are zero.
pub(super) fn flatten(
    models: &[tobj::Model],
) -> Result<(Vec<gpu::Vertex>, Vec<gpu::Triangle>), LoadError> {
    let mut vertices = Vec::new();
    let mut triangles = Vec::new();
    let mut unique = FxHashMap::default();

    for (model_id, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        let has_normals = mesh.normal_indices.len() == mesh.indices.len();
        let has_uvs = mesh.texcoord_indices.len() == mesh.indices.len();

        let mut ids = Vec::with_capacity(mesh.indices.len());

        for (corner, &position) in mesh.indices.iter().enumerate() {
            let position =
                fetch(model_id, "position", &mesh.positions, 3, position)?;

            let normal = if has_normals {
                Vec3::from_slice(fetch(
                    model_id,
                    "normal",
                    &mesh.normals,
                    3,
                    mesh.normal_indices[corner],
                )?)
            } else {
                Vec3::ZERO
            };

            let uv = if has_uvs {
                let uv = fetch(
                    model_id,
                    "texcoord",
                    &mesh.texcoords,
                    2,
                    mesh.texcoord_indices[corner],
                )?;

                vec2(uv[0], 1.0 - uv[1])
            } else {
                Vec2::ZERO
            };

            let vertex = gpu::Vertex::new(
                vec3(position[0], position[1], position[2]),
                normal,
                uv,
            );

            let key: [u32; 8] = bytemuck::cast(vertex);

            let vertex_id = *unique.entry(key).or_insert_with(|| {
                vertices.push(vertex);
                (vertices.len() - 1) as u32
            });

            ids.push(vertex_id);
        }

        triangles.extend(
            ids.chunks_exact(3)
                .map(|ids| gpu::Triangle::new(ids[0], ids[1], ids[2])),
        );
    }

    log::debug!(
        "Flattened {} model(s); unique vertices = {}, triangles = {}",
        models.len(),
        vertices.len(),
        triangles.len(),
    );

    Ok((vertices, triangles))
}

/// Returns the `index`-th group of `width` floats.
fn fetch<'a>(
    model: usize,
    kind: &'static str,
    data: &'a [f32],
    width: usize,
    index: u32,
) -> Result<&'a [f32], LoadError> {
    let start = index as usize * width;

    data.get(start..(start + width))
        .ok_or(LoadError::IndexOutOfRange {
            model,
            kind,
            index,
            count: data.len() / width,
        })
}
