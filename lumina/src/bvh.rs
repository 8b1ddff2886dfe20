//! Bounding volume hierarchy over a mesh's triangles.
//!
//! The tree is stored as a flat arena of [`crate::gpu::BvhNode`]s, addressed by
//! index: the root lives in slot zero and the children of an internal node
//! always occupy two consecutive slots. Leaves refer to contiguous ranges of
//! the (reordered) triangle array.
//!
//! Splits are made at the mean triangle center along the widest axis of
//! the node's bounding box.

mod builder;
mod parallel;
mod printer;
mod validator;

pub use self::builder::triangle_bounds;
pub(crate) use self::builder::run as build;
pub(crate) use self::parallel::run as build_par;
pub use self::printer::*;
pub use self::validator::*;

/// Returns the depth budget that yields roughly four triangles per leaf
/// at the deepest level, i.e. `ceil(log2(triangle_count / 4))`.
pub fn default_max_depth(triangle_count: usize) -> u32 {
    triangle_count
        .div_ceil(4)
        .next_power_of_two()
        .trailing_zeros()
}
