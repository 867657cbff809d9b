//! Action resolution pipeline
//!
//! Detection functions are pure: they read a snapshot of the state plus the
//! frame timestamps and return an ordered intent list. A single executor
//! applies the list to the owned state, in emission order: damage lands
//! before the kill that reads its result, and a dying enemy still receives
//! its knockback impulse before removal.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision;
use super::state::{Enemy, Explosion, GamePhase, GameState, Player, Projectile};
use crate::consts::*;
use crate::flat_distance;

/// A committed state change, applied by [`execute`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    DamageEnemy { id: u32, damage: i32 },
    /// Replaces the enemy's stored velocity; detection folds the old one in
    KnockbackEnemy { id: u32, velocity: Vec3 },
    KillEnemy { id: u32 },
    RemoveProjectile { id: u32 },
    /// Records a penetration hit so the same enemy is never struck twice
    MarkProjectileHit { id: u32, enemy_id: u32 },
    AddScore,
    SpawnExplosion(Explosion),
    DamagePlayer { damage: i32 },
    KnockbackPlayer { velocity: Vec3 },
    UpdateLastDamageAt { at: f64 },
    GameOver,
}

/// Resolve a standard projectile against the arena for this tick.
///
/// At most one enemy is struck per tick (first in enumeration order);
/// enemies already on the projectile's hit list are skipped. Range and
/// lifetime expiry are checked on every tick, hit or not.
pub fn resolve_standard_projectile(
    projectile: &Projectile,
    enemies: &[Enemy],
    now_ms: f64,
) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(enemy) = collision::projectile_hit(projectile, enemies) {
        if !projectile.has_hit(enemy.id) {
            if projectile.can_penetrate {
                actions.push(Action::MarkProjectileHit {
                    id: projectile.id,
                    enemy_id: enemy.id,
                });
            } else {
                actions.push(Action::RemoveProjectile { id: projectile.id });
            }

            actions.push(Action::DamageEnemy {
                id: enemy.id,
                damage: projectile.damage,
            });
            actions.push(Action::KnockbackEnemy {
                id: enemy.id,
                velocity: Vec3::new(
                    enemy.velocity.x + projectile.direction.x * projectile.knockback_force,
                    0.0,
                    enemy.velocity.z + projectile.direction.z * projectile.knockback_force,
                ),
            });

            if enemy.health - projectile.damage <= 0 {
                actions.push(Action::AddScore);
                actions.push(Action::KillEnemy { id: enemy.id });
            }
        }
    }

    if projectile.travel_distance() > projectile.range {
        actions.push(Action::RemoveProjectile { id: projectile.id });
    }
    if now_ms - projectile.created_at > PROJECTILE_LIFETIME_MS {
        actions.push(Action::RemoveProjectile { id: projectile.id });
    }

    actions
}

/// Resolve a mortar shell that has touched the ground.
///
/// Spawns the explosion record, damages every enemy inside the blast disc
/// (survivors are pushed away from the center; a victim sitting exactly on
/// the center gets a unit +x push instead of a zero direction), applies
/// halved self-damage and reduced self-knockback to the player, and always
/// removes the shell.
pub fn resolve_mortar_impact(
    projectile: &Projectile,
    enemies: &[Enemy],
    player: &Player,
    explosion_id: u32,
    now_ms: f64,
) -> Vec<Action> {
    let mut actions = Vec::new();

    let radius = projectile.explosion_radius.unwrap_or(EXPLOSION_FALLBACK_RADIUS);
    let center = projectile.position;

    actions.push(Action::SpawnExplosion(Explosion {
        id: explosion_id,
        position: center,
        radius,
        damage: projectile.damage,
        created_at: now_ms,
        duration_ms: EXPLOSION_DURATION_MS,
    }));

    for enemy in collision::enemies_in_blast(center, radius, enemies) {
        let lethal = enemy.health - projectile.damage <= 0;
        if lethal {
            actions.push(Action::AddScore);
        } else {
            let dx = enemy.position.x - center.x;
            let dz = enemy.position.z - center.z;
            let dist = (dx * dx + dz * dz).sqrt();
            let away = if dist > 0.0 {
                Vec3::new(dx / dist, 0.0, dz / dist)
            } else {
                Vec3::new(1.0, 0.0, 0.0)
            };
            actions.push(Action::KnockbackEnemy {
                id: enemy.id,
                velocity: Vec3::new(
                    enemy.velocity.x + away.x * projectile.knockback_force,
                    0.0,
                    enemy.velocity.z + away.z * projectile.knockback_force,
                ),
            });
        }

        actions.push(Action::DamageEnemy {
            id: enemy.id,
            damage: projectile.damage,
        });
        if lethal {
            actions.push(Action::KillEnemy { id: enemy.id });
        }
    }

    let player_dist = flat_distance(player.position, center);
    if player_dist <= radius {
        let self_knockback = projectile.knockback_force * 0.5;
        let away = if player_dist > 0.0 {
            Vec3::new(
                (player.position.x - center.x) / player_dist,
                0.0,
                (player.position.z - center.z) / player_dist,
            )
        } else {
            Vec3::new(1.0, 0.0, 0.0)
        };
        actions.push(Action::KnockbackPlayer {
            velocity: away * self_knockback * 2.0,
        });

        let self_damage = projectile.damage / 2;
        if self_damage > 0 {
            actions.push(Action::DamagePlayer {
                damage: self_damage,
            });
            if player.health - self_damage <= 0 {
                actions.push(Action::GameOver);
            }
        }
    }

    actions.push(Action::RemoveProjectile { id: projectile.id });

    actions
}

/// Resolve player/enemy contact for this tick.
///
/// Knockback applies on every contact tick, invincible or not; damage only
/// lands once the invincibility window has fully elapsed, and re-arms it.
pub fn resolve_player_contact(
    player: &Player,
    enemies: &[Enemy],
    now_ms: f64,
    last_damage_at: f64,
) -> Vec<Action> {
    let Some(enemy) = collision::player_contact(player, enemies) else {
        return Vec::new();
    };

    let mut actions = Vec::new();

    let dx = player.position.x - enemy.position.x;
    let dz = player.position.z - enemy.position.z;
    let dist = (dx * dx + dz * dz).sqrt();
    if dist > 0.0 {
        actions.push(Action::KnockbackPlayer {
            velocity: Vec3::new(
                dx / dist * PLAYER_KNOCKBACK_FORCE,
                0.0,
                dz / dist * PLAYER_KNOCKBACK_FORCE,
            ),
        });
    }

    if now_ms - last_damage_at >= PLAYER_INVINCIBILITY_MS {
        actions.push(Action::DamagePlayer {
            damage: enemy.damage,
        });
        actions.push(Action::UpdateLastDamageAt { at: now_ms });
        if player.health - enemy.damage <= 0 {
            actions.push(Action::GameOver);
        }
    }

    actions
}

/// Apply an action list to the state, in emission order.
///
/// Intents aimed at ids that no longer exist are silent no-ops, so a
/// projectile removed twice or an enemy knocked back after its kill cannot
/// corrupt anything.
pub fn execute(state: &mut GameState, actions: &[Action]) {
    for action in actions {
        match action {
            Action::DamageEnemy { id, damage } => {
                if let Some(enemy) = state.enemy_mut(*id) {
                    enemy.health -= damage;
                }
            }
            Action::KnockbackEnemy { id, velocity } => {
                if let Some(enemy) = state.enemy_mut(*id) {
                    enemy.velocity = *velocity;
                }
            }
            Action::KillEnemy { id } => {
                state.enemies.retain(|e| e.id != *id);
            }
            Action::RemoveProjectile { id } => {
                state.projectiles.retain(|p| p.id != *id);
            }
            Action::MarkProjectileHit { id, enemy_id } => {
                if let Some(projectile) = state.projectile_mut(*id) {
                    if !projectile.has_hit(*enemy_id) {
                        projectile.hit_enemy_ids.push(*enemy_id);
                    }
                }
            }
            Action::AddScore => {
                state.score += POINTS_PER_KILL;
            }
            Action::SpawnExplosion(explosion) => {
                log::debug!(
                    "explosion {} at ({:.1}, {:.1}) r={}",
                    explosion.id,
                    explosion.position.x,
                    explosion.position.z,
                    explosion.radius
                );
                state.explosions.push(explosion.clone());
            }
            Action::DamagePlayer { damage } => {
                if let Some(player) = state.player.as_mut() {
                    player.health = (player.health - damage).max(0);
                }
            }
            Action::KnockbackPlayer { velocity } => {
                if let Some(player) = state.player.as_mut() {
                    player.velocity = *velocity;
                }
            }
            Action::UpdateLastDamageAt { at } => {
                state.last_damage_at = *at;
            }
            Action::GameOver => {
                log::info!("game over, final score {}", state.score);
                state.phase = GamePhase::GameOver;
            }
        }
    }
}
