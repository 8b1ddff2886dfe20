use std::path::Path;

use crate::bvh::default_max_depth;
use crate::loader::{self, LoadError};
use crate::{gpu, Geometry, GeometryError, Material};

/// A mesh ready to be uploaded: geometry with its BVH already built, plus
/// the material it's shaded with.
#[derive(Clone, Debug)]
pub struct Mesh {
    geometry: Geometry,
    material: Material,
}

impl Mesh {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn into_parts(self) -> (Geometry, Material) {
        (self.geometry, self.material)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    vertices: Vec<gpu::Vertex>,
    triangles: Vec<gpu::Triangle>,
    material: Option<Material>,
    max_depth: Option<u32>,
    parallel: bool,
}

impl MeshBuilder {
    pub fn new(
        vertices: Vec<gpu::Vertex>,
        triangles: Vec<gpu::Triangle>,
    ) -> Self {
        Self {
            vertices,
            triangles,
            ..Default::default()
        }
    }

    /// Loads geometry (and material, if the model references one) from an
    /// `.obj` file.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let obj = loader::load_obj(path)?;

        Ok(Self {
            vertices: obj.vertices,
            triangles: obj.triangles,
            material: obj.material,
            ..Default::default()
        })
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Overrides the BVH's depth budget; by default it's derived from the
    /// triangle count (see [`default_max_depth()`]).
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<Mesh, GeometryError> {
        let max_depth = self
            .max_depth
            .unwrap_or_else(|| default_max_depth(self.triangles.len()));

        let mut geometry = Geometry::new(self.vertices, self.triangles)?;

        geometry.compute_tangents();

        if self.parallel {
            geometry.build_bvh_par(max_depth);
        } else {
            geometry.build_bvh(max_depth);
        }

        log::info!(
            "Mesh built; triangles = {}, nodes = {}, max_depth = {}",
            geometry.triangles().len(),
            geometry.nodes().len(),
            max_depth,
        );

        Ok(Mesh {
            geometry,
            material: self.material.unwrap_or_default(),
        })
    }
}
