//! Wavefront OBJ / MTL loading.
//!
//! Parsing itself is done by `tobj`; this module turns its output into
//! deduplicated GPU vertices and resolves the mesh's material.

mod mtl;
mod obj;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use self::mtl::*;
pub use self::obj::*;
use crate::{gpu, utils, Material};

/// Geometry and material read from an `.obj` file.
#[derive(Clone, Debug, Default)]
pub struct ObjData {
    pub vertices: Vec<gpu::Vertex>,
    pub triangles: Vec<gpu::Triangle>,

    /// All materials of the referenced libraries folded into one (see
    /// [`fold_materials()`]), if there were any.
    pub material: Option<Material>,
}

/// Loads an `.obj` file together with the material libraries it refers to.
///
/// Material libraries are resolved relative to the model's directory; if
/// they can't be loaded, the model is returned without a material.
pub fn load_obj(path: impl AsRef<Path>) -> Result<ObjData, LoadError> {
    let path = path.as_ref();

    utils::measure("OBJ load", || -> Result<ObjData, LoadError> {
        let (models, materials) = tobj::load_obj(path, &load_options())
            .map_err(|source| LoadError::Load {
                path: path.to_owned(),
                source,
            })?;

        let (vertices, triangles) = flatten(&models)?;

        let material = match materials {
            Ok(materials) => {
                fold_materials(materials.iter().map(convert_material))
            }

            Err(err) => {
                log::warn!(
                    "Couldn't load materials of `{}`: {err}",
                    path.display()
                );

                None
            }
        };

        log::info!(
            "Loaded `{}`; vertices = {}, triangles = {}, material = {}",
            path.display(),
            vertices.len(),
            triangles.len(),
            material.is_some(),
        );

        Ok(ObjData {
            vertices,
            triangles,
            material,
        })
    })
}

/// Faces get triangulated, while positions, normals and UVs keep their own
/// index streams, so that vertices can be merged afterwards.
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't load `{}`", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("couldn't parse model")]
    Parse(#[source] tobj::LoadError),

    #[error(
        "model #{model} refers to {kind} #{index}, but there are only \
         {count} of them"
    )]
    IndexOutOfRange {
        model: usize,
        kind: &'static str,
        index: u32,
        count: usize,
    },
}
