use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::camera::{
    MAX_DISTANCE, MAX_PITCH, MIN_DISTANCE, ORBIT_DAMPING_FACTOR, ORBIT_SENSITIVITY, ZOOM_SPEED,
};
use constants::interaction::{LINE_SCROLL_SCALE, PIXEL_SCROLL_SCALE};

/// Damped orbit around a fixed target. Lives on the viewer camera and is
/// despawned with it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub damping_factor: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl OrbitCamera {
    /// Derive the orbit from a camera position. Distance is clamped into the
    /// allowed range straight away.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let length = offset.length();

        let (yaw, pitch) = if length > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / length).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            target,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance: length.clamp(MIN_DISTANCE, MAX_DISTANCE),
            damping_factor: ORBIT_DAMPING_FACTOR,
            zoom_speed: ZOOM_SPEED,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    /// Queue an orbit from a pointer delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pending_pitch += delta.y * ORBIT_SENSITIVITY;
    }

    /// Positive steps move towards the target.
    pub fn zoom(&mut self, steps: f32) {
        let scale = 0.95_f32.powf(self.zoom_speed * steps);
        self.distance = (self.distance * scale).clamp(self.min_distance, self.max_distance);
    }

    /// Apply one frame of damping.
    pub fn update(&mut self) {
        let yaw_step = self.pending_yaw * self.damping_factor;
        let pitch_step = self.pending_pitch * self.damping_factor;

        self.yaw += yaw_step;
        self.pitch = (self.pitch + pitch_step).clamp(-MAX_PITCH, MAX_PITCH);

        self.pending_yaw -= yaw_step;
        self.pending_pitch -= pitch_step;
    }

    pub fn position(&self) -> Vec3 {
        let direction = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + direction * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.target, Vec3::Y)
    }
}

/// Right drag orbits, wheel zooms. Left drag belongs to the model.
pub fn orbit_camera_controller(
    mut cameras: Query<(&mut Transform, &mut OrbitCamera)>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();

    let mut scroll_accum = 0.0;
    for ev in scroll_events.read() {
        scroll_accum += match ev.unit {
            MouseScrollUnit::Line => ev.y * LINE_SCROLL_SCALE,
            MouseScrollUnit::Pixel => ev.y * PIXEL_SCROLL_SCALE,
        };
    }

    for (mut transform, mut orbit) in &mut cameras {
        if mouse_button.pressed(MouseButton::Right) && mouse_delta != Vec2::ZERO {
            orbit.rotate(mouse_delta);
        }
        if scroll_accum.abs() > f32::EPSILON {
            orbit.zoom(scroll_accum);
        }

        orbit.update();
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::camera::CAMERA_POSITION;

    #[test]
    fn from_position_clamps_distance_and_keeps_direction() {
        let orbit = OrbitCamera::from_position(CAMERA_POSITION, Vec3::ZERO);

        assert_eq!(orbit.distance, MAX_DISTANCE);
        let expected = CAMERA_POSITION.normalize() * MAX_DISTANCE;
        assert!(orbit.position().abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn zoom_stays_within_limits() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        orbit.zoom(1.0);
        assert!(orbit.distance < 10.0);

        orbit.zoom(500.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);

        orbit.zoom(-500.0);
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn damping_converges_on_queued_rotation() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.rotate(Vec2::new(-100.0, 0.0));

        orbit.update();
        let first = orbit.yaw;
        assert!((first - 100.0 * ORBIT_SENSITIVITY * ORBIT_DAMPING_FACTOR).abs() < 1e-6);

        for _ in 0..1000 {
            orbit.update();
        }
        assert!((orbit.yaw - 100.0 * ORBIT_SENSITIVITY).abs() < 1e-4);
    }

    #[test]
    fn pitch_never_reaches_the_pole() {
        let mut orbit = OrbitCamera::from_position(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        orbit.rotate(Vec2::new(0.0, 1.0e6));
        for _ in 0..500 {
            orbit.update();
        }
        assert!(orbit.pitch <= MAX_PITCH);
        assert!(orbit.transform().translation.is_finite());
    }
}
