/*
 * Camera Module
 *
 * This module defines an orbit camera for the viewer. It circles a target
 * point (the center of the flock's domain), and projects world positions
 * to pixel offsets from the window center with a perspective divide.
 *
 * Screen positions are plain `[f32; 2]` so this module does not depend on
 * nannou's own vector types.
 */

use glam::{Quat, Vec3};

const NEAR_PLANE: f32 = 0.05;
const ORBIT_SPEED: f32 = 0.01;
const MAX_PITCH: f32 = 1.5;

pub struct Camera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub focal_length: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: [f32; 2],
}

impl Camera {
    pub fn new(target: Vec3, scene_size: f32) -> Self {
        Self {
            target,
            yaw: 0.6,
            pitch: 0.4,
            distance: scene_size * 2.0,
            focal_length: 600.0,
            min_distance: scene_size * 0.25,
            max_distance: scene_size * 10.0,
            is_dragging: false,
            last_cursor_pos: [0.0, 0.0],
        }
    }

    fn view_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch) * Quat::from_rotation_y(-self.yaw)
    }

    /// Pixel offset from the window center, or `None` behind the camera.
    pub fn project(&self, point: Vec3) -> Option<[f32; 2]> {
        let view = self.view_rotation() * (point - self.target);

        // The eye sits on +z at `distance`, looking towards the target
        let depth = self.distance - view.z;
        if depth <= NEAR_PLANE {
            return None;
        }

        let scale = self.focal_length / depth;
        Some([view.x * scale, view.y * scale])
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll: f32) {
        let factor = (1.0 - scroll * 0.1).max(0.1);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn start_drag(&mut self, position: [f32; 2]) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Orbit while dragging
    pub fn drag(&mut self, position: [f32; 2]) {
        if !self.is_dragging {
            return;
        }

        let dx = position[0] - self.last_cursor_pos[0];
        let dy = position[1] - self.last_cursor_pos[1];
        self.yaw += dx * ORBIT_SPEED;
        self.pitch = (self.pitch - dy * ORBIT_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
        self.last_cursor_pos = position;
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_camera() -> Camera {
        Camera {
            yaw: 0.0,
            pitch: 0.0,
            ..Camera::new(Vec3::ZERO, 10.0)
        }
    }

    #[test]
    fn target_projects_to_center() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 10.0);
        let [x, y] = camera.project(Vec3::new(1.0, 2.0, 3.0)).unwrap();
        assert!(x.abs() < 1.0e-4 && y.abs() < 1.0e-4);
    }

    #[test]
    fn nearer_points_appear_larger() {
        let camera = level_camera();
        let [far, _] = camera.project(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let [near, _] = camera.project(Vec3::new(1.0, 0.0, 5.0)).unwrap();
        assert!(near > far && far > 0.0);
    }

    #[test]
    fn points_behind_the_eye_are_culled() {
        let camera = level_camera();
        assert!(camera.project(Vec3::new(0.0, 0.0, 25.0)).is_none());
    }

    #[test]
    fn zoom_and_pitch_are_clamped() {
        let mut camera = level_camera();
        camera.zoom(100.0);
        assert_eq!(camera.distance, camera.min_distance);

        camera.start_drag([0.0, 0.0]);
        camera.drag([0.0, -10_000.0]);
        assert_eq!(camera.pitch, MAX_PITCH);
        camera.end_drag();
    }
}
