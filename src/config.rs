//! Player class configuration
//!
//! The three classes are a closed set; each maps to a static tuning record
//! resolved at selection time. Vision radii are consumed by the rendering
//! layer only (distance fog around the player) but travel with the class so
//! the whole loadout lives in one table.

use serde::{Deserialize, Serialize};

/// Selectable player classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerClass {
    /// Fast-firing short-range rifle
    Assault,
    /// Slow, penetrating long-range shots; cannot fire while moving
    Sniper,
    /// Arcing shells that detonate on ground contact
    Mortar,
}

/// Static tuning for one player class
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassConfig {
    pub max_health: i32,
    pub move_speed: f32,
    pub max_velocity: f32,
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_knockback: f32,
    pub bullet_penetration: bool,
    pub bullet_range: f32,
    pub auto_shoot_interval_ms: f64,
    pub vision_clear: f32,
    pub vision_fade: f32,
    pub vision_max: f32,
    /// Blast radius for classes whose shells explode on landing
    pub explosion_radius: Option<f32>,
}

const ASSAULT: ClassConfig = ClassConfig {
    max_health: 10,
    move_speed: 0.03,
    max_velocity: 0.2,
    bullet_speed: 0.5,
    bullet_damage: 1,
    bullet_knockback: 0.1,
    bullet_penetration: false,
    bullet_range: 20.0,
    auto_shoot_interval_ms: 50.0,
    vision_clear: 15.0,
    vision_fade: 25.0,
    vision_max: 30.0,
    explosion_radius: None,
};

const SNIPER: ClassConfig = ClassConfig {
    max_health: 7,
    move_speed: 0.015,
    max_velocity: 0.15,
    bullet_speed: 1.2,
    bullet_damage: 2,
    bullet_knockback: 0.5,
    bullet_penetration: true,
    bullet_range: 40.0,
    auto_shoot_interval_ms: 800.0,
    vision_clear: 25.0,
    vision_fade: 40.0,
    vision_max: 50.0,
    explosion_radius: None,
};

const MORTAR: ClassConfig = ClassConfig {
    max_health: 8,
    move_speed: 0.02,
    max_velocity: 0.15,
    bullet_speed: 0.4,
    bullet_damage: 3,
    bullet_knockback: 0.8,
    bullet_penetration: false,
    bullet_range: 15.0,
    auto_shoot_interval_ms: 1500.0,
    vision_clear: 18.0,
    vision_fade: 30.0,
    vision_max: 35.0,
    explosion_radius: Some(4.0),
};

impl PlayerClass {
    pub const ALL: [PlayerClass; 3] =
        [PlayerClass::Assault, PlayerClass::Sniper, PlayerClass::Mortar];

    /// Tuning record for this class
    pub fn config(self) -> &'static ClassConfig {
        match self {
            PlayerClass::Assault => &ASSAULT,
            PlayerClass::Sniper => &SNIPER,
            PlayerClass::Mortar => &MORTAR,
        }
    }

    /// Sniper shots require planted feet
    pub fn fires_while_moving(self) -> bool {
        !matches!(self, PlayerClass::Sniper)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerClass::Assault => "Assault",
            PlayerClass::Sniper => "Sniper",
            PlayerClass::Mortar => "Mortar",
        }
    }
}
