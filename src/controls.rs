//! Orbit camera controls: drag to rotate, pan and dolly around a target,
//! wheel to zoom. With damping enabled the pending motion is released a
//! fraction at a time, so [`OrbitControls::update`] must run every frame even
//! when no input arrives.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;
const SETTLE: f32 = 1e-9;

/// Pointer button as reported by `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(Self::Primary),
            1 => Some(Self::Auxiliary),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Raw pointer input in CSS pixels relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Wheel { delta_y: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Idle,
    Rotate { x: f32, y: f32 },
    Dolly { y: f32 },
    Pan { x: f32, y: f32 },
}

/// Radius, polar angle from +Y and azimuth around +Y measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    drag: Drag,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: Vec3,
    scale: f32,
}

impl OrbitControls {
    pub fn new(damping_factor: f32) -> Self {
        Self {
            enable_damping: true,
            damping_factor,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            drag: Drag::Idle,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != Drag::Idle
    }

    /// Feeds one pointer event. `viewport_height` is the canvas height in
    /// CSS pixels; drag distances are measured against it.
    pub fn handle(&mut self, input: OrbitInput, camera: &PerspectiveCamera, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        match input {
            OrbitInput::PointerDown { button, x, y } => {
                self.drag = match button {
                    PointerButton::Primary => Drag::Rotate { x, y },
                    PointerButton::Auxiliary => Drag::Dolly { y },
                    PointerButton::Secondary => Drag::Pan { x, y },
                };
            }
            OrbitInput::PointerMove { x, y } => match self.drag {
                Drag::Idle => {}
                Drag::Rotate { x: x0, y: y0 } => {
                    let (dx, dy) = ((x - x0) * self.rotate_speed, (y - y0) * self.rotate_speed);
                    self.rotate_left(TAU * dx / height);
                    self.rotate_up(TAU * dy / height);
                    self.drag = Drag::Rotate { x, y };
                }
                Drag::Dolly { y: y0 } => {
                    let dy = y - y0;
                    if dy > 0.0 {
                        self.dolly_out(self.zoom_scale());
                    } else if dy < 0.0 {
                        self.dolly_in(self.zoom_scale());
                    }
                    self.drag = Drag::Dolly { y };
                }
                Drag::Pan { x: x0, y: y0 } => {
                    let (dx, dy) = ((x - x0) * self.pan_speed, (y - y0) * self.pan_speed);
                    self.pan(dx, dy, camera, height);
                    self.drag = Drag::Pan { x, y };
                }
            },
            OrbitInput::PointerUp => self.drag = Drag::Idle,
            OrbitInput::Wheel { delta_y } => {
                if delta_y < 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if delta_y > 0.0 {
                    self.dolly_out(self.zoom_scale());
                }
            }
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Moves the camera closer to the target on the next update.
    pub fn dolly_in(&mut self, scale: f32) {
        self.scale *= scale;
    }

    pub fn dolly_out(&mut self, scale: f32) {
        self.scale /= scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    /// Screen-space pan: a drag across the full canvas height moves the target
    /// by the visible height at the target's distance.
    fn pan(&mut self, dx: f32, dy: f32, camera: &PerspectiveCamera, height: f32) {
        let offset = camera.position - camera.target;
        let target_distance = offset.length() * (camera.fov_degrees.to_radians() / 2.0).tan();
        let left = 2.0 * dx * target_distance / height;
        let up = 2.0 * dy * target_distance / height;
        self.pan_offset += camera.right() * -left + camera.camera_up() * up;
    }

    fn has_pending_motion(&self) -> bool {
        self.delta_theta != 0.0 || self.delta_phi != 0.0 || self.pan_offset != Vec3::ZERO || self.scale != 1.0
    }

    /// Applies pending motion to `camera`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        if !self.has_pending_motion() {
            return;
        }
        let mut spherical = Spherical::from_offset(camera.position - camera.target);
        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };

        spherical.theta += self.delta_theta * factor;
        spherical.phi += self.delta_phi * factor;
        spherical.phi = spherical.phi.clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.target += self.pan_offset * factor;
        camera.position = camera.target + spherical.to_offset();

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
            // settle once the remainder is far below a pixel
            if self.delta_theta.abs() < SETTLE && self.delta_phi.abs() < SETTLE && self.pan_offset.length() < SETTLE {
                self.delta_theta = 0.0;
                self.delta_phi = 0.0;
                self.pan_offset = Vec3::ZERO;
            }
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn spherical_round_trips_offset() {
        let v = Vec3::new(0.25, -0.25, 1.0);
        let back = Spherical::from_offset(v).to_offset();
        assert_relative_eq!(back.x, v.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, v.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, v.z, epsilon = 1e-5);
    }
}
