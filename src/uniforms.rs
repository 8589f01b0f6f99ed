//! Values fed to the shader program each draw.

use glam::Vec2;

use crate::textures::FlagTexture;

pub const U_FREQUENCY: &str = "uFrequency";
pub const U_TIME: &str = "uTime";
pub const U_COLOR: &str = "uColor";
pub const U_TEXTURE: &str = "uTexture";

/// Uniforms owned by the material. Matrices are set by the renderer.
pub const MATERIAL_UNIFORMS: [&str; 4] = [U_FREQUENCY, U_TIME, U_COLOR, U_TEXTURE];

pub const U_PROJECTION: &str = "projectionMatrix";
pub const U_VIEW: &str = "viewMatrix";
pub const U_MODEL: &str = "modelMatrix";

pub const ENGINE_UNIFORMS: [&str; 3] = [U_PROJECTION, U_VIEW, U_MODEL];

/// Display (sRGB-encoded) RGB in `[0, 1]`, passed to GL unconverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`, e.g. `0x87ceeb` for sky blue.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Uniforms {
    /// `uFrequency`: wave frequency along X and Y.
    pub frequency: Vec2,
    /// `uTime`: seconds since the render loop started.
    pub time: f32,
    /// `uColor`: fixed tint.
    pub color: Color,
    /// `uTexture`: which flag is sampled.
    pub texture: FlagTexture,
}
