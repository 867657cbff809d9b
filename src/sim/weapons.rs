//! Weapon fire control and targeting

use glam::Vec3;

use super::kinematics;
use super::state::{Enemy, Player, Projectile, ProjectileKind};
use crate::config::PlayerClass;
use crate::consts::*;
use crate::{angle_between, yaw_direction};

/// Cooldown and motion gate for auto-fire
pub fn should_fire(class: PlayerClass, is_moving: bool, now_ms: f64, last_shot_at: f64) -> bool {
    if is_moving && !class.fires_while_moving() {
        return false;
    }
    now_ms - last_shot_at > class.config().auto_shoot_interval_ms
}

/// Build the projectile for one trigger pull.
///
/// Fire direction comes from the player's facing yaw and the aim point sits
/// at the class bullet range. Mortar shells launch from raised height toward
/// a ground-level target and carry a solved ballistic velocity; everything
/// else flies flat along the facing direction.
pub fn fire(id: u32, player: &Player, now_ms: f64) -> Projectile {
    let cfg = player.class.config();
    let facing = yaw_direction(player.rotation);
    let is_mortar = player.class == PlayerClass::Mortar;

    let spawn_position = if is_mortar {
        player.position + Vec3::new(0.0, MORTAR_SPAWN_HEIGHT, 0.0)
    } else {
        player.position
    };

    let target = Vec3::new(
        player.position.x + facing.x * cfg.bullet_range,
        if is_mortar { 0.0 } else { player.position.y },
        player.position.z + facing.z * cfg.bullet_range,
    );

    Projectile {
        id,
        kind: if is_mortar {
            ProjectileKind::Mortar
        } else {
            ProjectileKind::Standard
        },
        position: spawn_position,
        spawn_position,
        direction: (target - spawn_position).normalize_or_zero(),
        speed: cfg.bullet_speed,
        damage: cfg.bullet_damage,
        knockback_force: cfg.bullet_knockback,
        can_penetrate: cfg.bullet_penetration,
        range: cfg.bullet_range,
        hit_enemy_ids: Vec::new(),
        created_at: now_ms,
        velocity: is_mortar.then(|| kinematics::solve_launch_velocity(spawn_position, target)),
        explosion_radius: cfg.explosion_radius,
    }
}

/// Enemy with the smallest angle off `facing`, below `max_angle`.
///
/// The scan keeps the strictly smallest angle, so on an exact tie the
/// earlier entry wins and the selection stays deterministic.
pub fn find_nearest_target<'a>(
    player_position: Vec3,
    facing: Vec3,
    enemies: &'a [Enemy],
    max_angle: f32,
) -> Option<&'a Enemy> {
    let mut best: Option<&Enemy> = None;
    let mut best_angle = f32::INFINITY;

    for enemy in enemies {
        let to_enemy = Vec3::new(
            enemy.position.x - player_position.x,
            0.0,
            enemy.position.z - player_position.z,
        );
        let angle = angle_between(facing, to_enemy);
        if angle < max_angle && angle < best_angle {
            best_angle = angle;
            best = Some(enemy);
        }
    }

    best
}
