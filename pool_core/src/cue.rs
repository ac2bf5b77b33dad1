use glam::{Vec2, Vec3};

use crate::components::planar;

/// Cue stick: aim direction plus a power offset that charges back and forth
#[derive(Debug, Clone, Copy)]
pub struct Cue {
    yaw: f32,
    offset: f32,
    charge_rate: f32,
    max_offset: f32,
}

impl Cue {
    pub fn new(max_offset: f32, charge_speed: f32) -> Self {
        Self {
            yaw: 0.0,
            offset: 0.0,
            charge_rate: charge_speed,
            max_offset,
        }
    }

    /// Aim angle in the table plane; 0 points up the table (-z)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current shot power
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Unit direction the cue ball will travel
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn rotate(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Point the cue from `from` toward `target`
    pub fn aim_at(&mut self, from: Vec3, target: Vec3) {
        let d = planar(target - from);
        if d != Vec2::ZERO {
            // direction() is (sin yaw, -cos yaw) in (x, z)
            self.yaw = d.x.atan2(-d.y).rem_euclid(std::f32::consts::TAU);
        }
    }

    /// Draw the cue back or push it forward; bounces between 0 and max
    pub fn charge(&mut self, dt: f32) {
        self.offset = (self.offset + self.charge_rate * dt).clamp(0.0, self.max_offset);
        if self.offset >= self.max_offset {
            self.charge_rate = -self.charge_rate.abs();
        } else if self.offset <= 0.0 {
            self.charge_rate = self.charge_rate.abs();
        }
    }

    /// Lay the cue down, keeping the aim
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.charge_rate = self.charge_rate.abs();
    }
}
