use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Triangle referencing three entries of the vertex buffer.
///
/// The builder physically reorders these records, so a triangle's slot is
/// only meaningful after the BVH has been built.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Triangle {
    pub v0: u32,
    pub v1: u32,
    pub v2: u32,
    pub _pad0: u32,
    pub tangent: Vec3,
    pub _pad1: f32,
}

impl Triangle {
    pub fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            v0,
            v1,
            v2,
            ..Default::default()
        }
    }

    pub fn with_tangent(mut self, tangent: Vec3) -> Self {
        self.tangent = tangent;
        self
    }

    pub fn indices(&self) -> [u32; 3] {
        [self.v0, self.v1, self.v2]
    }
}
