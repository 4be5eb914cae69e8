//! Free-fly perspective camera.
//!
//! Euler-angle camera driven by keyboard movement, mouse look and scroll zoom.
//! State lives in the camera value; callers feed it the frame's input
//! explicitly via [`FlyCamera::update`].

use glam::{Mat4, Vec3};

use crate::input::{InputFrame, InputState, Key};

/// Movement direction relative to the camera basis.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    /// Degrees. -90 looks down -Z.
    pub yaw: f32,
    /// Degrees, clamped to ±89 by mouse look.
    pub pitch: f32,

    /// World units per second.
    pub speed: f32,
    /// Degrees per mouse count.
    pub sensitivity: f32,
    /// Vertical field of view in degrees.
    pub zoom: f32,

    pub near: f32,
    pub far: f32,
}

impl FlyCamera {
    pub const DEFAULT_YAW: f32 = -90.0;
    pub const DEFAULT_PITCH: f32 = 0.0;
    pub const DEFAULT_SPEED: f32 = 2.5;
    pub const DEFAULT_SENSITIVITY: f32 = 0.1;
    pub const DEFAULT_ZOOM: f32 = 45.0;
    pub const PITCH_LIMIT: f32 = 89.0;
    pub const ZOOM_RANGE: (f32, f32) = (1.0, 45.0);

    pub fn new(position: Vec3) -> Self {
        let mut cam = Self {
            position,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: Self::DEFAULT_YAW,
            pitch: Self::DEFAULT_PITCH,
            speed: Self::DEFAULT_SPEED,
            sensitivity: Self::DEFAULT_SENSITIVITY,
            zoom: Self::DEFAULT_ZOOM,
            near: 0.1,
            far: 100.0,
        };
        cam.update_vectors();
        cam
    }

    /// Sets yaw/pitch in degrees; pitch is clamped like mouse look.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection for the given width/height ratio (wgpu depth range).
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect.max(1e-4), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }

    pub fn process_keyboard(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.speed * dt;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Applies a mouse offset; `dy` is positive upwards.
    pub fn process_mouse(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity)
            .clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn process_scroll(&mut self, lines: f32) {
        let (min, max) = Self::ZOOM_RANGE;
        self.zoom = (self.zoom - lines).clamp(min, max);
    }

    /// Applies one frame of input: WASD/arrow movement, raw mouse look and
    /// wheel zoom.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, dt: f32) {
        const BINDINGS: [(Key, Key, CameraMovement); 4] = [
            (Key::W, Key::ArrowUp, CameraMovement::Forward),
            (Key::S, Key::ArrowDown, CameraMovement::Backward),
            (Key::A, Key::ArrowLeft, CameraMovement::Left),
            (Key::D, Key::ArrowRight, CameraMovement::Right),
        ];

        for (key, alt, movement) in BINDINGS {
            if input.key_down(key) || input.key_down(alt) {
                self.process_keyboard(movement, dt);
            }
        }

        let delta = frame.mouse_delta;
        if delta.x != 0.0 || delta.y != 0.0 {
            // Raw motion is +Y down; pitch goes up with upward motion.
            self.process_mouse(delta.x, -delta.y);
        }

        if frame.wheel_lines != 0.0 {
            self.process_scroll(frame.wheel_lines);
        }
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos())
            .normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
