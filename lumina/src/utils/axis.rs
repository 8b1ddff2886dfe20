use std::ops::{Index, IndexMut};

use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::X, Self::Y, Self::Z].into_iter()
    }

    /// Returns the axis along which `extent` is the largest.
    ///
    /// Ties are resolved towards the earlier axis (x, then y, then z) - an
    /// axis only wins if it's strictly larger than the current choice.
    pub fn widest(extent: Vec3) -> Self {
        let mut axis = Self::X;

        if extent.y > extent.x {
            axis = Self::Y;
        }

        if extent.z > extent[axis] {
            axis = Self::Z;
        }

        axis
    }
}

impl Index<Axis> for Vec3 {
    type Output = f32;

    fn index(&self, index: Axis) -> &Self::Output {
        match index {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl IndexMut<Axis> for Vec3 {
    fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
        match index {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn widest() {
        assert_eq!(Axis::X, Axis::widest(vec3(3.0, 2.0, 1.0)));
        assert_eq!(Axis::Y, Axis::widest(vec3(1.0, 3.0, 2.0)));
        assert_eq!(Axis::Z, Axis::widest(vec3(1.0, 2.0, 3.0)));
    }

    #[test]
    fn widest_prefers_earlier_axis_on_ties() {
        assert_eq!(Axis::X, Axis::widest(Vec3::ONE));
        assert_eq!(Axis::X, Axis::widest(vec3(2.0, 2.0, 1.0)));
        assert_eq!(Axis::X, Axis::widest(vec3(2.0, 1.0, 2.0)));
        assert_eq!(Axis::Y, Axis::widest(vec3(1.0, 2.0, 2.0)));
        assert_eq!(Axis::X, Axis::widest(Vec3::ZERO));
    }

    #[test]
    fn index() {
        let mut v = vec3(1.0, 2.0, 3.0);

        v[Axis::Y] = 5.0;

        let values: Vec<_> = Axis::all().map(|axis| v[axis]).collect();

        assert_eq!(vec![1.0, 5.0, 3.0], values);
    }
}
