//! Sandstorm Arena - a top-down desert wave-survival shooter
//!
//! Core modules:
//! - `sim`: Headless simulation (kinematics, weapons, collisions, game state)
//! - `config`: Player class configuration table
//!
//! Rendering, UI and raw input capture live outside this crate: they read
//! entity snapshots off [`sim::GameState`] between ticks and feed parsed key
//! state, aim yaw and frame timing back in through [`sim::TickInput`].

pub mod config;
pub mod sim;

pub use config::{ClassConfig, PlayerClass};

use glam::Vec3;

/// Game tuning constants
pub mod consts {
    /// Reference frame duration; per-frame speeds scale by `dt / 16`.
    pub const BASE_FRAME_MS: f32 = 16.0;

    /// Player physics
    pub const PLAYER_VELOCITY_DAMPING: f32 = 0.9;
    pub const PLAYER_VELOCITY_SNAP: f32 = 0.02;
    pub const PLAYER_KNOCKBACK_FORCE: f32 = 4.0;
    pub const PLAYER_INVINCIBILITY_MS: f64 = 800.0;

    /// Enemy defaults
    pub const ENEMY_BASE_HEALTH: i32 = 3;
    pub const ENEMY_BASE_DAMAGE: i32 = 1;
    pub const ENEMY_BASE_SPEED: f32 = 0.02;
    pub const ENEMY_VELOCITY_DAMPING: f32 = 0.9;
    pub const ENEMY_VELOCITY_SNAP: f32 = 0.01;

    /// Spawner cadence and spawn ring
    pub const SPAWN_INTERVAL_MS: f64 = 200.0;
    pub const SPAWN_DISTANCE_MIN: f32 = 15.0;
    pub const SPAWN_DISTANCE_MAX: f32 = 20.0;

    /// Projectile limits and hit radii
    pub const PROJECTILE_LIFETIME_MS: f64 = 3000.0;
    pub const PROJECTILE_HIT_RADIUS: f32 = 0.6;
    pub const PLAYER_HIT_RADIUS: f32 = 1.0;
    pub const GROUND_EPSILON: f32 = 0.1;

    /// Mortar ballistics
    pub const MORTAR_SPAWN_HEIGHT: f32 = 1.5;
    pub const MORTAR_GRAVITY: f32 = 9.8;
    pub const MORTAR_MIN_FLIGHT_TIME: f32 = 0.5;
    pub const MORTAR_FLIGHT_TIME_DIVISOR: f32 = 10.0;
    pub const EXPLOSION_FALLBACK_RADIUS: f32 = 4.0;
    pub const EXPLOSION_DURATION_MS: f64 = 500.0;

    /// Targeting cone half-angle
    pub const MAX_TARGET_ANGLE: f32 = std::f32::consts::PI / 3.0;

    /// Scoring
    pub const POINTS_PER_KILL: u64 = 100;
}

/// Distance in the ground plane (x, z), ignoring height.
#[inline]
pub fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Angle between two vectors in radians.
///
/// Both inputs go through a zero-safe normalize and the dot product is
/// clamped before `acos`, so the result is always finite.
pub fn angle_between(a: Vec3, b: Vec3) -> f32 {
    let dot = a.normalize_or_zero().dot(b.normalize_or_zero());
    dot.clamp(-1.0, 1.0).acos()
}

/// Unit facing direction in the ground plane for a yaw angle.
#[inline]
pub fn yaw_direction(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Yaw that faces `target` from `from` (used for pointer aim).
#[inline]
pub fn yaw_toward(from: Vec3, target: Vec3) -> f32 {
    (target.x - from.x).atan2(target.z - from.z)
}
