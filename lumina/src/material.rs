use std::path::PathBuf;

use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub emissive_strength: f32,
    pub roughness: f32,
    pub metallic: f32,
    pub color_map: Option<PathBuf>,
    pub roughness_map: Option<PathBuf>,
    pub metallic_map: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            emissive_strength: 0.0,
            roughness: 1.0,
            metallic: 0.0,
            color_map: None,
            roughness_map: None,
            metallic_map: None,
        }
    }
}
