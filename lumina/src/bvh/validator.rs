use std::mem;

use thiserror::Error;

use super::triangle_bounds;
use crate::{gpu, BoundingBox};

/// Shape of a successfully validated tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,

    /// Number of splits between the root and the deepest leaf.
    pub depth: u32,

    pub min_leaf_size: u32,
    pub max_leaf_size: u32,
    pub mean_leaf_size: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BvhError {
    #[error("tree has no nodes")]
    Empty,

    #[error("node #{node} points at child #{child}, but there are {len} nodes")]
    ChildOutOfBounds { node: u32, child: usize, len: usize },

    #[error("node #{node} is reachable more than once")]
    NodeRevisited { node: usize },

    #[error("node #{node} is not reachable from the root")]
    NodeUnreachable { node: usize },

    #[error(
        "leaf #{node} spans triangles {first}..{end}, but there are {len} \
         triangles"
    )]
    RangeOutOfBounds {
        node: u32,
        first: usize,
        end: usize,
        len: usize,
    },

    #[error("triangle #{triangle} belongs to more than one leaf")]
    TriangleShared { triangle: usize },

    #[error(
        "triangle #{triangle} refers to vertex #{vertex}, but there are \
         {vertex_count} vertices"
    )]
    VertexOutOfRange {
        triangle: usize,
        vertex: u32,
        vertex_count: usize,
    },

    #[error("triangle #{triangle} doesn't belong to any leaf")]
    TriangleOrphaned { triangle: usize },

    #[error("leaf #{node} has bounds that don't match its triangles")]
    LeafBoundsMismatch { node: u32 },

    #[error("internal node #{node} has bounds that don't match its children")]
    InternalBoundsMismatch { node: u32 },

    #[error(
        "leaf #{node} lies at depth {depth}, but the budget is {max_depth}"
    )]
    TooDeep { node: u32, depth: u32, max_depth: u32 },
}

/// Walks the entire tree and checks that it's safe to traverse:
///
/// - every node is reachable from the root exactly once,
/// - leaf ranges partition the triangle array (no gaps, no overlaps),
/// - triangles only refer to existing vertices,
/// - each leaf's box is exactly the box of its triangles,
/// - each internal node's box is exactly the union of its children's boxes,
/// - no leaf lies deeper than `max_depth`.
pub fn validate(
    vertices: &[gpu::Vertex],
    triangles: &[gpu::Triangle],
    nodes: &[gpu::BvhNode],
    max_depth: u32,
) -> Result<BvhStats, BvhError> {
    if nodes.is_empty() {
        return Err(BvhError::Empty);
    }

    let mut visited = vec![false; nodes.len()];
    let mut covered = vec![false; triangles.len()];

    let mut stats = BvhStats {
        nodes: nodes.len(),
        leaves: 0,
        depth: 0,
        min_leaf_size: u32::MAX,
        max_leaf_size: 0,
        mean_leaf_size: 0.0,
    };

    let mut stack = vec![(0, 0)];

    visited[0] = true;

    while let Some((node_id, depth)) = stack.pop() {
        let node = nodes[node_id as usize];
        let bounds = BoundingBox::new(node.aabb_min, node.aabb_max);

        match node.kind() {
            gpu::BvhNodeKind::Internal { first_child } => {
                let first_child = first_child as usize;
                let mut children_bounds = BoundingBox::default();

                // Right child goes onto the stack first, so that the left
                // subtree gets visited first
                for child in [first_child + 1, first_child] {
                    if child >= nodes.len() {
                        return Err(BvhError::ChildOutOfBounds {
                            node: node_id,
                            child,
                            len: nodes.len(),
                        });
                    }

                    if mem::replace(&mut visited[child], true) {
                        return Err(BvhError::NodeRevisited { node: child });
                    }

                    children_bounds += BoundingBox::new(
                        nodes[child].aabb_min,
                        nodes[child].aabb_max,
                    );

                    stack.push((child as u32, depth + 1));
                }

                if children_bounds != bounds {
                    return Err(BvhError::InternalBoundsMismatch {
                        node: node_id,
                    });
                }
            }

            gpu::BvhNodeKind::Leaf {
                first_triangle,
                triangle_count,
            } => {
                let first = first_triangle as usize;
                let end = first + triangle_count as usize;

                if end > triangles.len() {
                    return Err(BvhError::RangeOutOfBounds {
                        node: node_id,
                        first,
                        end,
                        len: triangles.len(),
                    });
                }

                if depth > max_depth {
                    return Err(BvhError::TooDeep {
                        node: node_id,
                        depth,
                        max_depth,
                    });
                }

                for triangle in first..end {
                    if mem::replace(&mut covered[triangle], true) {
                        return Err(BvhError::TriangleShared { triangle });
                    }

                    let dangling = triangles[triangle]
                        .indices()
                        .into_iter()
                        .find(|&vertex| vertex as usize >= vertices.len());

                    if let Some(vertex) = dangling {
                        return Err(BvhError::VertexOutOfRange {
                            triangle,
                            vertex,
                            vertex_count: vertices.len(),
                        });
                    }
                }

                if triangle_bounds(vertices, &triangles[first..end]) != bounds {
                    return Err(BvhError::LeafBoundsMismatch { node: node_id });
                }

                stats.leaves += 1;
                stats.depth = stats.depth.max(depth);
                stats.min_leaf_size = stats.min_leaf_size.min(triangle_count);
                stats.max_leaf_size = stats.max_leaf_size.max(triangle_count);
            }
        }
    }

    if let Some(node) = visited.iter().position(|visited| !visited) {
        return Err(BvhError::NodeUnreachable { node });
    }

    if let Some(triangle) = covered.iter().position(|covered| !covered) {
        return Err(BvhError::TriangleOrphaned { triangle });
    }

    stats.mean_leaf_size = (triangles.len() as f32) / (stats.leaves as f32);

    Ok(stats)
}
