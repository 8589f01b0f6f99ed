//! Startup constants for the scene, camera and debug panel.

use glam::{Vec2, Vec3};

use crate::params::Slider;
use crate::textures::FlagTexture;
use crate::uniforms::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

/// Everything [`crate::Demo::new`] needs to assemble the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub plane: PlaneConfig,
    pub camera: CameraConfig,
    /// Initial `uFrequency`.
    pub frequency: Vec2,
    /// `uColor`.
    pub color: Color,
    pub background: Color,
    pub initial_texture: FlagTexture,
    /// Range and step of both frequency sliders.
    pub frequency_slider: Slider,
    pub mesh_scale: Vec3,
    pub max_pixel_ratio: f64,
    /// Fraction of pending orbit motion applied per frame.
    pub damping_factor: f32,
    /// Size used until the first resize event arrives.
    pub initial_size: (u32, u32),
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            plane: PlaneConfig {
                width: 1.0,
                height: 1.0,
                width_segments: 32,
                height_segments: 32,
            },
            camera: CameraConfig {
                fov_degrees: 75.0,
                near: 0.1,
                far: 100.0,
                position: Vec3::new(0.25, -0.25, 1.0),
                target: Vec3::ZERO,
            },
            frequency: Vec2::new(10.0, 5.0),
            color: Color::MAGENTA,
            background: Color::from_hex(0x87ceeb),
            initial_texture: FlagTexture::Norway,
            frequency_slider: Slider::new(0.0, 20.0, 0.01),
            mesh_scale: Vec3::new(1.0, 2.0 / 3.0, 1.0),
            max_pixel_ratio: crate::viewport::MAX_PIXEL_RATIO,
            damping_factor: 0.05,
            initial_size: (800, 600),
        }
    }
}
