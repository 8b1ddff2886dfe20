//! Mesh preparation for a GPU path tracer: loads models, computes per
//! triangle tangents, builds a bounding volume hierarchy over the triangles
//! and flattens everything into buffers the shaders can consume directly.
//!
//! ```no_run
//! use lumina::{MeshBuilder, SceneUpload};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mesh = MeshBuilder::from_obj("models/bunny.obj")?.build()?;
//!
//! mesh.geometry().validate_bvh()?;
//!
//! let upload = SceneUpload::new(mesh.geometry());
//! # Ok(())
//! # }
//! ```

pub mod bvh;
mod geometry;
pub mod loader;
mod material;
mod mesh;
mod staging;
pub mod utils;

pub use lumina_gpu as gpu;

pub use self::bvh::{default_max_depth, BvhError, BvhPrinter, BvhStats};
pub use self::geometry::*;
pub use self::loader::{load_obj, LoadError};
pub use self::material::*;
pub use self::mesh::*;
pub use self::staging::*;
pub use self::utils::{BoundingBox, TriangleExt};
