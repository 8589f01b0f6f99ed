//! The renderable scene: one shader-driven mesh and the camera viewing it.

use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;
use crate::geometry::PlaneGeometry;
use crate::shader::ShaderSource;
use crate::uniforms::{Color, Uniforms};

#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    pub source: ShaderSource,
    pub uniforms: Uniforms,
    /// Both faces are rasterised; the flag is visible from behind.
    pub double_sided: bool,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: PlaneGeometry,
    pub material: ShaderMaterial,
    pub scale: Vec3,
}

impl Mesh {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    pub mesh: Mesh,
    pub camera: PerspectiveCamera,
}
