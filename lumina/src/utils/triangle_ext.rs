use glam::Vec3;

use crate::{gpu, BoundingBox};

pub trait TriangleExt {
    fn positions(&self, vertices: &[gpu::Vertex]) -> [Vec3; 3];

    /// Arithmetic mean of the triangle's vertex positions; used as the
    /// triangle's stand-in when choosing and applying split planes.
    fn center(&self, vertices: &[gpu::Vertex]) -> Vec3 {
        let [p0, p1, p2] = self.positions(vertices);

        (p0 + p1 + p2) / 3.0
    }

    fn bounds(&self, vertices: &[gpu::Vertex]) -> BoundingBox {
        self.positions(vertices).into_iter().collect()
    }

    fn tangent(&self, vertices: &[gpu::Vertex]) -> Vec3;
}

impl TriangleExt for gpu::Triangle {
    fn positions(&self, vertices: &[gpu::Vertex]) -> [Vec3; 3] {
        self.indices().map(|idx| vertices[idx as usize].position)
    }

    fn tangent(&self, vertices: &[gpu::Vertex]) -> Vec3 {
        compute_tangent(self.indices().map(|idx| vertices[idx as usize]))
    }
}

/// Computes the tangent of a triangle from its UV gradients, for use in
/// normal mapping.
///
/// Triangles with degenerate UVs get their first edge as the tangent, or
/// `+X` if that edge is degenerate too.
pub fn compute_tangent([v0, v1, v2]: [gpu::Vertex; 3]) -> Vec3 {
    let e1 = v1.position - v0.position;
    let e2 = v2.position - v0.position;
    let d1 = v1.uv() - v0.uv();
    let d2 = v2.uv() - v0.uv();
    let det = d1.x * d2.y - d2.x * d1.y;

    if det != 0.0 && det.is_finite() {
        let tangent = (e1 * d2.y - e2 * d1.y) / det;

        if let Some(tangent) = tangent.try_normalize() {
            return tangent;
        }
    }

    e1.try_normalize().unwrap_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec2, vec3, Vec2};

    use super::*;

    fn vertex(position: Vec3, uv: Vec2) -> gpu::Vertex {
        gpu::Vertex::new(position, Vec3::Z, uv)
    }

    #[test]
    fn center_and_bounds() {
        let vertices = [
            vertex(vec3(0.0, 0.0, 0.0), Vec2::ZERO),
            vertex(vec3(3.0, 0.0, 0.0), Vec2::ZERO),
            vertex(vec3(0.0, 6.0, -3.0), Vec2::ZERO),
        ];

        let tri = gpu::Triangle::new(0, 1, 2);

        assert_eq!(vec3(1.0, 2.0, -1.0), tri.center(&vertices));

        let bb = tri.bounds(&vertices);

        assert_eq!(vec3(0.0, 0.0, -3.0), bb.min());
        assert_eq!(vec3(3.0, 6.0, 0.0), bb.max());
    }

    #[test]
    fn tangent_follows_u() {
        let vertices = [
            vertex(vec3(0.0, 0.0, 0.0), vec2(0.0, 0.0)),
            vertex(vec3(2.0, 0.0, 0.0), vec2(1.0, 0.0)),
            vertex(vec3(0.0, 2.0, 0.0), vec2(0.0, 1.0)),
        ];

        let tangent = gpu::Triangle::new(0, 1, 2).tangent(&vertices);

        assert_relative_eq!(tangent.x, 1.0);
        assert_relative_eq!(tangent.y, 0.0);
        assert_relative_eq!(tangent.z, 0.0);
    }

    #[test]
    fn tangent_with_rotated_uvs() {
        // u grows along +y here
        let vertices = [
            vertex(vec3(0.0, 0.0, 0.0), vec2(0.0, 0.0)),
            vertex(vec3(1.0, 0.0, 0.0), vec2(0.0, 1.0)),
            vertex(vec3(0.0, 1.0, 0.0), vec2(1.0, 0.0)),
        ];

        let tangent = gpu::Triangle::new(0, 1, 2).tangent(&vertices);

        assert_relative_eq!(tangent.x, 0.0);
        assert_relative_eq!(tangent.y, 1.0);
    }

    #[test]
    fn tangent_with_degenerate_uvs() {
        let vertices = [
            vertex(vec3(0.0, 0.0, 0.0), Vec2::ZERO),
            vertex(vec3(0.0, 0.0, 4.0), Vec2::ZERO),
            vertex(vec3(0.0, 1.0, 0.0), Vec2::ZERO),
        ];

        assert_eq!(Vec3::Z, gpu::Triangle::new(0, 1, 2).tangent(&vertices));

        let collapsed = [vertex(Vec3::ONE, Vec2::ZERO); 3];

        assert_eq!(Vec3::X, gpu::Triangle::new(0, 1, 2).tangent(&collapsed));
    }
}
