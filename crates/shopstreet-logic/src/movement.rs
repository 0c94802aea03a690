//! Player walker: horizontal motion, jumping and gravity.
//!
//! Algorithm per tick:
//! 1. Damp the horizontal velocity
//! 2. Turn the held directions into a camera-relative unit vector
//! 3. If any direction is held, replace the velocity with that vector scaled
//!    by speed × delta
//! 4. Propose `position + velocity`; the street decides whether to commit it
//!
//! Vertical motion is separate and never collides with shops.

use crate::config::StreetConfig;
use crate::geometry::Vec3;

/// Directions and modifiers held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub running: bool,
    /// Jump was pressed this tick.
    pub jump: bool,
}

impl MoveInput {
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Walker tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub move_scale: f32,
    pub damping: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub ground_level: f32,
}

impl WalkParams {
    pub fn from_config(config: &StreetConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            move_scale: config.move_scale,
            damping: config.damping,
            jump_speed: config.jump_speed,
            gravity: config.gravity,
            ground_level: config.ground_level,
        }
    }
}

impl Default for WalkParams {
    fn default() -> Self {
        Self::from_config(&StreetConfig::default())
    }
}

/// The player's body: camera position plus velocities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    pub position: Vec3,
    /// Horizontal displacement per tick (Y unused).
    pub velocity: Vec3,
    pub vertical_velocity: f32,
    pub jumping: bool,
}

impl Walker {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            vertical_velocity: 0.0,
            jumping: false,
        }
    }

    /// Update the horizontal velocity for this tick and return where the
    /// walker would end up. `facing` is the camera's look direction.
    pub fn propose(
        &mut self,
        input: &MoveInput,
        facing: Vec3,
        delta: f32,
        params: &WalkParams,
    ) -> Vec3 {
        self.velocity.x -= self.velocity.x * params.damping * delta;
        self.velocity.z -= self.velocity.z * params.damping * delta;

        let dz = input.forward as i32 - input.backward as i32;
        let dx = input.right as i32 - input.left as i32;

        if dx != 0 || dz != 0 {
            let forward = facing.flattened().normalize();
            let right = forward.cross(&Vec3::UP);
            let direction = (forward * dz as f32 + right * dx as f32).normalize();

            let speed = if input.running {
                params.run_speed
            } else {
                params.walk_speed
            };
            let scale = speed * params.move_scale * delta;
            self.velocity.x = direction.x * scale;
            self.velocity.z = direction.z * scale;
        }

        Vec3::new(
            self.position.x + self.velocity.x,
            self.position.y,
            self.position.z + self.velocity.z,
        )
    }

    /// Start a jump if standing on the ground. Returns whether it started.
    pub fn try_jump(&mut self, params: &WalkParams) -> bool {
        if self.jumping || self.position.y > params.ground_level {
            return false;
        }
        self.jumping = true;
        self.vertical_velocity = params.jump_speed;
        true
    }

    /// Apply gravity while airborne; lands on `ground_level`.
    pub fn update_vertical(&mut self, delta: f32, params: &WalkParams) {
        if !self.jumping && self.position.y <= params.ground_level {
            return;
        }
        self.vertical_velocity -= params.gravity * delta;
        self.position.y += self.vertical_velocity * delta;

        if self.position.y <= params.ground_level {
            self.position.y = params.ground_level;
            self.jumping = false;
            self.vertical_velocity = 0.0;
        }
    }
}
