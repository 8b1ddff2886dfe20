use crate::utils::Axis;
use crate::{gpu, BoundingBox, TriangleExt};

/// Grows a BVH over `triangles`, replacing whatever `nodes` contained.
///
/// Triangles get reordered in place so that each leaf owns a contiguous
/// range of them; vertices are left untouched.
pub fn run(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    nodes: &mut Vec<gpu::BvhNode>,
    max_depth: u32,
) {
    nodes.clear();
    nodes.push(leaf(vertices, triangles, 0));

    // Children get pushed right-first, so the left subtree is always grown
    // (and appended to the arena) before the right one
    let mut stack = vec![(0, 0)];

    while let Some((node_id, depth)) = stack.pop() {
        if let Some(first_child) =
            split_node(vertices, triangles, nodes, node_id, depth, max_depth)
        {
            stack.push((first_child + 1, depth + 1));
            stack.push((first_child, depth + 1));
        }
    }
}

/// Returns the tightest box containing all vertices of `triangles`.
///
/// For an empty slice the box stays inverted (see [`BoundingBox`]).
pub fn triangle_bounds(
    vertices: &[gpu::Vertex],
    triangles: &[gpu::Triangle],
) -> BoundingBox {
    triangles
        .iter()
        .flat_map(|triangle| triangle.positions(vertices))
        .collect()
}

/// Creates a leaf spanning all of `triangles`, which start at
/// `first_triangle` in the global triangle array.
pub(super) fn leaf(
    vertices: &[gpu::Vertex],
    triangles: &[gpu::Triangle],
    first_triangle: u32,
) -> gpu::BvhNode {
    let mut node = gpu::BvhNode::leaf(first_triangle, triangles.len() as u32);

    update_node_bounds(vertices, triangles, &mut node);
    node
}

fn update_node_bounds(
    vertices: &[gpu::Vertex],
    triangles: &[gpu::Triangle],
    node: &mut gpu::BvhNode,
) {
    assert!(
        !triangles.is_empty(),
        "tried to compute bounds of an empty node"
    );

    let bounds = triangle_bounds(vertices, triangles);

    node.aabb_min = bounds.min();
    node.aabb_max = bounds.max();
}

/// Evaluates a freshly-created leaf: either turns it into an internal node
/// (returning the slot of its first child) or keeps it as a final leaf.
fn split_node(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    nodes: &mut Vec<gpu::BvhNode>,
    node_id: u32,
    depth: u32,
    max_depth: u32,
) -> Option<u32> {
    let node = nodes[node_id as usize];

    let gpu::BvhNodeKind::Leaf {
        first_triangle,
        triangle_count,
    } = node.kind()
    else {
        unreachable!("tried to split an internal node (#{node_id})");
    };

    let first = first_triangle as usize;
    let range = first..(first + triangle_count as usize);
    let triangles = &mut triangles[range];
    let left_count =
        partition_node(vertices, triangles, &node, depth, max_depth)?;
    let (left, right) = triangles.split_at(left_count);
    let first_child = nodes.len() as u32;

    nodes.push(leaf(vertices, left, first_triangle));
    nodes.push(leaf(vertices, right, first_triangle + left_count as u32));

    // The node's own triangle range is now described by its children
    nodes[node_id as usize] = gpu::BvhNode::internal(first_child)
        .with_bounds(node.aabb_min, node.aabb_max);

    Some(first_child)
}

/// Partitions the node's `triangles` around its split plane and returns the
/// size of the left half, if the node should be split there.
///
/// Triangles get reordered even if the split is rejected.
pub(super) fn partition_node(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    node: &gpu::BvhNode,
    depth: u32,
    max_depth: u32,
) -> Option<usize> {
    let bounds = BoundingBox::new(node.aabb_min, node.aabb_max);
    let split_by = Axis::widest(bounds.extent());
    let split_at = split_position(vertices, triangles, split_by);
    let left_count = partition(vertices, triangles, split_by, split_at);
    let right_count = triangles.len() - left_count;

    log::trace!(
        "Partitioned node; depth = {depth}, axis = {split_by:?}, \
         left = {left_count}, right = {right_count}"
    );

    (depth < max_depth && left_count > 1 && right_count > 1)
        .then_some(left_count)
}

/// Returns the mean triangle center along `axis`.
fn split_position(
    vertices: &[gpu::Vertex],
    triangles: &[gpu::Triangle],
    axis: Axis,
) -> f32 {
    let sum: f32 = triangles
        .iter()
        .map(|triangle| triangle.center(vertices)[axis])
        .sum();

    sum / (triangles.len() as f32)
}

/// Moves triangles whose centers lie before `split_at` to the front of the
/// slice, returning how many there are.
fn partition(
    vertices: &[gpu::Vertex],
    triangles: &mut [gpu::Triangle],
    axis: Axis,
    split_at: f32,
) -> usize {
    let mut left = 0;
    let mut right = triangles.len();

    while left < right {
        if triangles[left].center(vertices)[axis] < split_at {
            left += 1;
        } else {
            right -= 1;
            triangles.swap(left, right);
        }
    }

    left
}
