//! Fork-join flavour of the builder.
//!
//! Once a node gets partitioned, its two halves are disjoint slices of the
//! triangle array (`split_at_mut()`), so both subtrees can be grown
//! independently. Each subtree collects its nodes into a private list with
//! child indices relative to that list; lists are then spliced so that the
//! final arena is identical to the one produced by the sequential builder.

use super::builder::{leaf, partition_node};
use crate::gpu;

/// Subtrees smaller than this are grown on the current thread.
const FORK_THRESHOLD: usize = 4 * 1024;

pub fn run(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    nodes: &mut Vec<gpu::BvhNode>,
    max_depth: u32,
) {
    let root = leaf(vertices, triangles, 0);
    let (root, descendants) = grow(vertices, triangles, root, 0, max_depth);

    nodes.clear();
    nodes.reserve(1 + descendants.len());
    nodes.push(relocate(root, 1));
    nodes.extend(descendants.into_iter().map(|node| relocate(node, 1)));
}

/// Grows the subtree rooted at `node` (a leaf spanning all of `triangles`).
///
/// Returns the node's final form together with its descendants; indices of
/// internal nodes (including the returned one) point into the descendants.
fn grow(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    node: gpu::BvhNode,
    depth: u32,
    max_depth: u32,
) -> (gpu::BvhNode, Vec<gpu::BvhNode>) {
    let Some(left_count) =
        partition_node(vertices, triangles, &node, depth, max_depth)
    else {
        return (node, Vec::new());
    };

    let fork = triangles.len() >= FORK_THRESHOLD;
    let (left_tris, right_tris) = triangles.split_at_mut(left_count);
    let left = leaf(vertices, left_tris, node.index);
    let right = leaf(vertices, right_tris, node.index + left_count as u32);

    let mut grow_left =
        move || grow(vertices, left_tris, left, depth + 1, max_depth);
    let mut grow_right =
        move || grow(vertices, right_tris, right, depth + 1, max_depth);

    let ((left, left_desc), (right, right_desc)) = if fork {
        rayon::join(grow_left, grow_right)
    } else {
        (grow_left(), grow_right())
    };

    // Layout: [left, right, ...left's descendants, ...right's descendants]
    let left_base = 2;
    let right_base = left_base + left_desc.len() as u32;
    let mut out = Vec::with_capacity(2 + left_desc.len() + right_desc.len());

    out.push(relocate(left, left_base));
    out.push(relocate(right, right_base));
    out.extend(left_desc.into_iter().map(|node| relocate(node, left_base)));
    out.extend(right_desc.into_iter().map(|node| relocate(node, right_base)));

    let node =
        gpu::BvhNode::internal(0).with_bounds(node.aabb_min, node.aabb_max);

    (node, out)
}

/// Shifts child index of an internal node by `offset`; leaves refer to
/// triangles, so they're left as-is.
fn relocate(mut node: gpu::BvhNode, offset: u32) -> gpu::BvhNode {
    if !node.is_leaf() {
        node.index += offset;
    }

    node
}
