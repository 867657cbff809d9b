//! Movement integration for the three actor kinds
//!
//! Per-frame speeds scale by `dt / 16` so tuning holds across frame rates;
//! ballistic shells integrate in real seconds under constant gravity.
//!
//! All functions are pure: they take current state and return the next
//! position/velocity pair, and the tick commits the result.

use glam::Vec3;

use super::state::{Enemy, Player};
use crate::config::ClassConfig;
use crate::consts::*;
use crate::flat_distance;

/// Parsed movement intent for one tick (diagonal input pre-normalized)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub x: f32,
    pub z: f32,
}

impl MoveIntent {
    pub fn is_moving(self) -> bool {
        self.x != 0.0 || self.z != 0.0
    }
}

/// Integrate player velocity and position for one tick.
///
/// Velocity is damped, accelerated along the intent axes, snapped to zero
/// per idle axis so damping converges instead of leaving a drift residue,
/// then clamped to the class speed cap. Position advances by the resulting
/// velocity.
pub fn integrate_player(
    player: &Player,
    intent: MoveIntent,
    cfg: &ClassConfig,
    dt_ms: f32,
) -> (Vec3, Vec3) {
    let mut velocity = Vec3::new(
        player.velocity.x * PLAYER_VELOCITY_DAMPING,
        player.velocity.y,
        player.velocity.z * PLAYER_VELOCITY_DAMPING,
    );

    if intent.is_moving() {
        let accel = cfg.move_speed * (dt_ms / BASE_FRAME_MS);
        velocity.x += intent.x * accel;
        velocity.z += intent.z * accel;
    }

    if intent.x == 0.0 && velocity.x.abs() < PLAYER_VELOCITY_SNAP {
        velocity.x = 0.0;
    }
    if intent.z == 0.0 && velocity.z.abs() < PLAYER_VELOCITY_SNAP {
        velocity.z = 0.0;
    }

    let magnitude = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
    if magnitude > cfg.max_velocity {
        let scale = cfg.max_velocity / magnitude;
        velocity.x *= scale;
        velocity.z *= scale;
    }

    (player.position + velocity, velocity)
}

/// Integrate one enemy: seek step toward the player plus damped knockback.
///
/// The seek step is full speed regardless of knockback, so a pushed enemy
/// keeps fighting its way back in while the impulse decays. The y axis
/// stays on the ground plane.
pub fn integrate_enemy(enemy: &Enemy, player_position: Vec3, dt_ms: f32) -> (Vec3, Vec3) {
    let mut velocity = Vec3::new(
        enemy.velocity.x * ENEMY_VELOCITY_DAMPING,
        enemy.velocity.y,
        enemy.velocity.z * ENEMY_VELOCITY_DAMPING,
    );
    if velocity.x.abs() < ENEMY_VELOCITY_SNAP {
        velocity.x = 0.0;
    }
    if velocity.z.abs() < ENEMY_VELOCITY_SNAP {
        velocity.z = 0.0;
    }

    let seek = (player_position - enemy.position).normalize_or_zero();
    let step = enemy.speed * (dt_ms / BASE_FRAME_MS);
    let target = enemy.position + seek * step;

    let position = Vec3::new(target.x + velocity.x, enemy.position.y, target.z + velocity.z);
    (position, velocity)
}

/// Advance a straight-line projectile
#[inline]
pub fn step_standard(position: Vec3, direction: Vec3, speed: f32, dt_ms: f32) -> Vec3 {
    position + direction * (speed * (dt_ms / BASE_FRAME_MS))
}

/// Solve the launch velocity that lands a shell at `target` (y = 0).
///
/// Flight time grows with horizontal distance and is floored so point-blank
/// shots still arc; the vertical component solves projectile motion back to
/// the ground exactly at that time: `vy = 0.5*g*t - y0/t`.
pub fn solve_launch_velocity(spawn: Vec3, target: Vec3) -> Vec3 {
    let flight_time = mortar_flight_time(spawn, target);
    Vec3::new(
        (target.x - spawn.x) / flight_time,
        0.5 * MORTAR_GRAVITY * flight_time - spawn.y / flight_time,
        (target.z - spawn.z) / flight_time,
    )
}

/// Flight time for a mortar launch, floored at the minimum
pub fn mortar_flight_time(spawn: Vec3, target: Vec3) -> f32 {
    (flat_distance(spawn, target) / MORTAR_FLIGHT_TIME_DIVISOR).max(MORTAR_MIN_FLIGHT_TIME)
}

/// Advance a ballistic shell one tick: move, then apply gravity
pub fn step_ballistic(position: Vec3, velocity: Vec3, dt_ms: f32) -> (Vec3, Vec3) {
    let dt = dt_ms / 1000.0;
    let position = position + velocity * dt;
    let velocity = Vec3::new(velocity.x, velocity.y - MORTAR_GRAVITY * dt, velocity.z);
    (position, velocity)
}
