use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Flat BVH node, as consumed by the tracing shaders.
///
/// `index` means different things depending on `triangle_count`:
///
/// - `triangle_count == 0` - internal node; `index` is the slot of the left
///   child and the right child lives at `index + 1`,
/// - `triangle_count > 0` - leaf; `index` is the first triangle of the
///   contiguous range `index .. index + triangle_count`.
///
/// Use [`BvhNode::kind()`] instead of reading `index` directly.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct BvhNode {
    pub aabb_min: Vec3,
    pub index: u32,
    pub aabb_max: Vec3,
    pub triangle_count: u32,
}

impl BvhNode {
    pub fn leaf(first_triangle: u32, triangle_count: u32) -> Self {
        Self {
            aabb_min: Vec3::ZERO,
            index: first_triangle,
            aabb_max: Vec3::ZERO,
            triangle_count,
        }
    }

    pub fn internal(first_child: u32) -> Self {
        Self {
            aabb_min: Vec3::ZERO,
            index: first_child,
            aabb_max: Vec3::ZERO,
            triangle_count: 0,
        }
    }

    pub fn with_bounds(mut self, min: Vec3, max: Vec3) -> Self {
        self.aabb_min = min;
        self.aabb_max = max;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.triangle_count != 0
    }

    pub fn kind(&self) -> BvhNodeKind {
        if self.is_leaf() {
            BvhNodeKind::Leaf {
                first_triangle: self.index,
                triangle_count: self.triangle_count,
            }
        } else {
            BvhNodeKind::Internal {
                first_child: self.index,
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub enum BvhNodeKind {
    Leaf {
        first_triangle: u32,
        triangle_count: u32,
    },

    Internal {
        first_child: u32,
    },
}

impl BvhNodeKind {
    /// Returns slots of both children of an internal node.
    pub fn children(&self) -> Option<[u32; 2]> {
        match *self {
            BvhNodeKind::Internal { first_child } => {
                Some([first_child, first_child + 1])
            }
            BvhNodeKind::Leaf { .. } => None,
        }
    }
}
