//! Records shared by Lumina's BVH builder and the tracing shaders.
//!
//! Every record here is exactly 32 bytes and gets copied verbatim into
//! device buffers, so field order and sizes must stay in sync with the
//! shader-side declarations.

#![cfg_attr(target_arch = "spirv", no_std)]

mod bvh_node;
mod triangle;
mod vertex;

pub use self::bvh_node::*;
pub use self::triangle::*;
pub use self::vertex::*;
