use std::path::PathBuf;

use glam::Vec3;

use super::LoadError;
use crate::Material;

/// Parses an `.mtl` file into a list of named materials, in the order they
/// were defined.
pub fn parse_mtl(src: &str) -> Result<Vec<(String, Material)>, LoadError> {
    let (materials, _) =
        tobj::load_mtl_buf(&mut src.as_bytes()).map_err(LoadError::Parse)?;

    Ok(materials
        .iter()
        .map(|mat| (mat.name.clone(), convert_material(mat)))
        .collect())
}

/// Converts a parsed material, reading the PBR extensions (`Ke`, `Pr`, `Pm`,
/// `map_Pr`, `map_Pm`) that `tobj` leaves as unknown parameters.
///
/// Scalars a material doesn't define are zero, same as the diffuse color.
pub fn convert_material(mat: &tobj::Material) -> Material {
    let scalar = |key: &str| -> f32 {
        let Some(value) = mat.unknown_param.get(key) else {
            return 0.0;
        };

        // `Ke` is a color, of which only the first component is used
        let first = value.split_whitespace().next().unwrap_or_default();

        first.parse().unwrap_or_else(|_| {
            log::warn!(
                "Material `{}` has invalid `{key}`: `{value}`",
                mat.name
            );

            0.0
        })
    };

    // Texture statements may carry options (e.g. `-bm 1.0`) before the file
    // name, so only the last token is used
    let texture = |key: &str| {
        mat.unknown_param
            .get(key)
            .and_then(|value| value.split_whitespace().last())
            .map(PathBuf::from)
    };

    Material {
        color: mat.diffuse.map(Vec3::from).unwrap_or(Vec3::ZERO),
        emissive_strength: scalar("Ke"),
        roughness: scalar("Pr"),
        metallic: scalar("Pm"),
        color_map: mat.diffuse_texture.as_ref().map(PathBuf::from),
        roughness_map: texture("map_Pr"),
        metallic_map: texture("map_Pm"),
    }
}

/// Folds materials into the single one used by a mesh.
///
/// Scalars of later materials always override earlier ones, while texture
/// maps only override when the later material actually has one.
pub fn fold_materials(
    materials: impl IntoIterator<Item = Material>,
) -> Option<Material> {
    materials.into_iter().reduce(|acc, mat| Material {
        color_map: mat.color_map.or(acc.color_map),
        roughness_map: mat.roughness_map.or(acc.roughness_map),
        metallic_map: mat.metallic_map.or(acc.metallic_map),
        ..mat
    })
}
