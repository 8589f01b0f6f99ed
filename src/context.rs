//! The render context: owns the scene, controls and viewport, and is the
//! only place they are mutated.
//!
//! Event callbacks never touch the context directly. They hold an
//! [`UpdateSender`] and enqueue [`Update`]s, which [`Demo::advance`] drains at
//! the start of the next frame.

use std::sync::mpsc::{self, Receiver, Sender};

use glam::Mat4;
use rand::Rng;

use crate::camera::PerspectiveCamera;
use crate::config::DemoConfig;
use crate::controls::{OrbitControls, OrbitInput};
use crate::error::Result;
use crate::geometry::PlaneGeometry;
use crate::params::{FrequencyAxis, ParamUpdate};
use crate::scene::{Mesh, Scene, ShaderMaterial};
use crate::shader::ShaderSource;
use crate::uniforms::Uniforms;
use crate::viewport::Viewport;

/// Anything that can change between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Update {
    Param(ParamUpdate),
    Orbit(OrbitInput),
    Resize {
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    },
}

/// Cloneable handle given to event callbacks.
#[derive(Debug, Clone)]
pub struct UpdateSender(Sender<Update>);

impl UpdateSender {
    pub fn send(&self, update: Update) {
        if self.0.send(update).is_err() {
            log::warn!("render context gone; dropping {update:?}");
        }
    }
}

/// Per-frame snapshot handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub time: f32,
    pub projection: Mat4,
    pub view: Mat4,
    pub model: Mat4,
    /// Set when the drawing surface must be resized before drawing.
    pub resized: Option<Viewport>,
}

pub struct Demo {
    config: DemoConfig,
    scene: Scene,
    controls: OrbitControls,
    viewport: Viewport,
    pending_resize: Option<Viewport>,
    sender: Sender<Update>,
    updates: Receiver<Update>,
}

impl Demo {
    /// Assembles the scene with the built-in shaders.
    pub fn new<R: Rng>(config: DemoConfig, rng: &mut R) -> Result<Self> {
        Self::with_shaders(config, ShaderSource::default(), rng)
    }

    /// Builds geometry, material, mesh, camera and controls, in that order.
    /// Fails if the shader sources do not match the geometry or uniforms.
    pub fn with_shaders<R: Rng>(config: DemoConfig, source: ShaderSource, rng: &mut R) -> Result<Self> {
        let plane = &config.plane;
        let geometry = PlaneGeometry::new(
            plane.width,
            plane.height,
            plane.width_segments,
            plane.height_segments,
        )
        .with_random_attribute(rng);

        source.validate(&geometry.attribute_names())?;
        let material = ShaderMaterial {
            source,
            uniforms: Uniforms {
                frequency: config.frequency,
                time: 0.0,
                color: config.color,
                texture: config.initial_texture,
            },
            double_sided: true,
        };

        let mesh = Mesh {
            geometry,
            material,
            scale: config.mesh_scale,
        };

        let (width, height) = config.initial_size;
        let viewport = Viewport::new(width, height, 1.0, config.max_pixel_ratio);
        let camera = PerspectiveCamera::new(&config.camera, viewport.aspect());
        let controls = OrbitControls::new(config.damping_factor);

        log::info!(
            "scene ready: {} vertices, {} triangles",
            mesh.geometry.vertex_count(),
            mesh.geometry.indices.len() / 3
        );

        let (sender, updates) = mpsc::channel();
        Ok(Self {
            scene: Scene {
                background: config.background,
                mesh,
                camera,
            },
            controls,
            viewport,
            pending_resize: Some(viewport),
            sender,
            updates,
            config,
        })
    }

    pub fn updates(&self) -> UpdateSender {
        UpdateSender(self.sender.clone())
    }

    /// Runs one frame: applies queued updates, advances `uTime` by `delta`
    /// seconds (negative deltas count as zero) and steps the orbit damping.
    pub fn advance(&mut self, delta: f32) -> Frame {
        while let Ok(update) = self.updates.try_recv() {
            self.apply(update);
        }

        if delta.is_finite() && delta > 0.0 {
            self.scene.mesh.material.uniforms.time += delta;
        }

        self.controls.update(&mut self.scene.camera);

        Frame {
            time: self.uniforms().time,
            projection: self.scene.camera.projection_matrix(),
            view: self.scene.camera.view_matrix(),
            model: self.scene.mesh.model_matrix(),
            resized: self.pending_resize.take(),
        }
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Param(param) => self.apply_param(param),
            Update::Orbit(input) => {
                let height = self.viewport.height as f32;
                self.controls.handle(input, &self.scene.camera, height);
            }
            Update::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                self.resize(width, height, device_pixel_ratio);
            }
        }
    }

    fn apply_param(&mut self, param: ParamUpdate) {
        let slider = self.config.frequency_slider;
        let uniforms = &mut self.scene.mesh.material.uniforms;
        match param {
            ParamUpdate::Frequency(FrequencyAxis::X, v) => uniforms.frequency.x = slider.quantize(v),
            ParamUpdate::Frequency(FrequencyAxis::Y, v) => uniforms.frequency.y = slider.quantize(v),
            ParamUpdate::Texture(texture) => uniforms.texture = texture,
        }
        log::debug!("uniforms now {:?} / {}", uniforms.frequency, uniforms.texture);
    }

    /// Reacts to a viewport change: camera aspect, projection and the
    /// drawing-surface size (with the pixel ratio capped).
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> Viewport {
        let viewport = Viewport::new(width, height, device_pixel_ratio, self.config.max_pixel_ratio);
        self.scene.camera.set_aspect(viewport.aspect());
        self.viewport = viewport;
        self.pending_resize = Some(viewport);
        viewport
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.scene.camera
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.scene.mesh.material.uniforms
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
