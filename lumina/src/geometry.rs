use thiserror::Error;

use crate::bvh::{self, BvhError, BvhPrinter, BvhStats};
use crate::{gpu, utils, TriangleExt};

/// A mesh's vertices, triangles and the BVH built over them.
///
/// The triangle array gets reordered by [`Geometry::build_bvh()`], so any
/// mapping from triangle slots to anything else should be established only
/// after the tree has been built.
#[derive(Clone, Debug)]
pub struct Geometry {
    vertices: Vec<gpu::Vertex>,
    triangles: Vec<gpu::Triangle>,
    nodes: Vec<gpu::BvhNode>,
    max_depth: u32,
}

impl Geometry {
    pub fn new(
        vertices: Vec<gpu::Vertex>,
        triangles: Vec<gpu::Triangle>,
    ) -> Result<Self, GeometryError> {
        if triangles.is_empty() {
            return Err(GeometryError::Empty);
        }

        if u32::try_from(triangles.len()).is_err() {
            return Err(GeometryError::TooManyTriangles {
                count: triangles.len(),
            });
        }

        for (triangle_id, triangle) in triangles.iter().enumerate() {
            for vertex in triangle.indices() {
                if vertex as usize >= vertices.len() {
                    return Err(GeometryError::VertexOutOfRange {
                        triangle: triangle_id,
                        vertex,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }

        Ok(Self {
            vertices,
            triangles,
            nodes: Vec::new(),
            max_depth: 0,
        })
    }

    pub fn vertices(&self) -> &[gpu::Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[gpu::Triangle] {
        &self.triangles
    }

    /// Returns the BVH arena; empty until [`Self::build_bvh()`] is called.
    pub fn nodes(&self) -> &[gpu::BvhNode] {
        &self.nodes
    }

    /// Returns the depth budget of the most recent build.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Fills each triangle's tangent from its UV gradients.
    pub fn compute_tangents(&mut self) {
        for triangle in &mut self.triangles {
            triangle.tangent = triangle.tangent(&self.vertices);
        }
    }

    /// Builds the BVH, allowing at most `max_depth` splits between the root
    /// and any leaf.
    ///
    /// Calling this again rebuilds the tree from scratch.
    pub fn build_bvh(&mut self, max_depth: u32) {
        self.build_bvh_with(max_depth, false);
    }

    /// Same as [`Self::build_bvh()`], but grows independent subtrees on
    /// rayon's thread pool; the resulting arrays are identical.
    pub fn build_bvh_par(&mut self, max_depth: u32) {
        self.build_bvh_with(max_depth, true);
    }

    fn build_bvh_with(&mut self, max_depth: u32, parallel: bool) {
        if !self.nodes.is_empty() {
            log::debug!("Rebuilding BVH from scratch");
        }

        log::debug!(
            "Building BVH; triangles = {}, max_depth = {}, parallel = {}",
            self.triangles.len(),
            max_depth,
            parallel,
        );

        self.max_depth = max_depth;

        let Self {
            vertices,
            triangles,
            nodes,
            ..
        } = self;

        utils::measure("BVH build", || {
            if parallel {
                bvh::build_par(vertices, triangles, nodes, max_depth);
            } else {
                bvh::build(vertices, triangles, nodes, max_depth);
            }
        });

        log::debug!("BVH built; nodes = {}", self.nodes.len());
    }

    /// Prints the subtree rooted at `node_id` to stdout; used for debugging
    /// only.
    ///
    /// # Panics
    ///
    /// Panics if `node_id` is out of bounds.
    pub fn traverse_bvh(&self, node_id: u32) {
        print!("{}", BvhPrinter::print(&self.nodes, node_id));
    }

    pub fn validate_bvh(&self) -> Result<BvhStats, BvhError> {
        bvh::validate(
            &self.vertices,
            &self.triangles,
            &self.nodes,
            self.max_depth,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("geometry has no triangles")]
    Empty,

    #[error("geometry has {count} triangles, which is more than supported")]
    TooManyTriangles { count: usize },

    #[error(
        "triangle #{triangle} refers to vertex #{vertex}, but there are \
         {vertex_count} vertices"
    )]
    VertexOutOfRange {
        triangle: usize,
        vertex: u32,
        vertex_count: usize,
    },
}
