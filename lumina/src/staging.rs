use std::ops::Range;

use crate::Geometry;

/// Geometry flattened into a single byte buffer, ready to be copied into
/// GPU memory in one go.
///
/// Vertices, triangles and BVH nodes are laid out back-to-back, in this
/// order; since each record is 32 bytes, every region stays 32-byte aligned.
#[derive(Clone, Debug)]
pub struct SceneUpload {
    bytes: Vec<u8>,
    vertices: BufferRegion,
    triangles: BufferRegion,
    nodes: BufferRegion,
    triangle_count: u32,
}

impl SceneUpload {
    pub fn new(geometry: &Geometry) -> Self {
        let mut bytes = Vec::new();

        let vertices = BufferRegion::append(&mut bytes, geometry.vertices());
        let triangles = BufferRegion::append(&mut bytes, geometry.triangles());
        let nodes = BufferRegion::append(&mut bytes, geometry.nodes());

        log::debug!(
            "Staged scene; vertices = {:?}, triangles = {:?}, nodes = {:?}",
            vertices,
            triangles,
            nodes,
        );

        Self {
            bytes,
            vertices,
            triangles,
            nodes,
            triangle_count: geometry.triangles().len() as u32,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn vertices(&self) -> BufferRegion {
        self.vertices
    }

    pub fn triangles(&self) -> BufferRegion {
        self.triangles
    }

    pub fn nodes(&self) -> BufferRegion {
        self.nodes
    }

    /// Number of triangles, as passed to the shaders.
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }
}

/// Location of a single array within [`SceneUpload::bytes()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferRegion {
    pub offset: usize,
    pub size: usize,
}

impl BufferRegion {
    fn append<T>(bytes: &mut Vec<u8>, items: &[T]) -> Self
    where
        T: bytemuck::Pod,
    {
        let offset = bytes.len();

        bytes.extend_from_slice(bytemuck::cast_slice(items));

        Self {
            offset,
            size: bytes.len() - offset,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..(self.offset + self.size)
    }
}
