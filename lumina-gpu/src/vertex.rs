use bytemuck::{Pod, Zeroable};
use glam::{vec2, Vec2, Vec3};

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Vertex {
    pub position: Vec3,
    pub uv_u: f32,
    pub normal: Vec3,
    pub uv_v: f32,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            uv_u: uv.x,
            normal,
            uv_v: uv.y,
        }
    }

    pub fn uv(&self) -> Vec2 {
        vec2(self.uv_u, self.uv_v)
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(32, core::mem::size_of::<Vertex>());

        let vertex = Vertex::new(
            vec3(1.0, 2.0, 3.0),
            vec3(0.0, 1.0, 0.0),
            vec2(0.25, 0.75),
        );

        let words: &[f32] =
            bytemuck::cast_slice(core::slice::from_ref(&vertex));

        assert_eq!(&[1.0, 2.0, 3.0, 0.25, 0.0, 1.0, 0.0, 0.75], words);
        assert_eq!(vec2(0.25, 0.75), vertex.uv());
    }
}
