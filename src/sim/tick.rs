//! Per-frame simulation tick
//!
//! One call per rendered frame. The step order is fixed: enemies spawn
//! before the movement pass so a newcomer never steps twice in its first
//! tick, and projectiles move before their collision checks so hits are
//! tested against post-move positions.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::actions::{self, execute};
use super::collision;
use super::kinematics::{self, MoveIntent};
use super::state::{Enemy, GamePhase, GameState, ProjectileKind};
use super::weapons;
use crate::consts::*;

/// Held-key and aim state for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Facing yaw derived from the pointer, radians
    pub aim_yaw: f32,
}

impl TickInput {
    /// Movement intent with diagonal input normalized to unit length
    pub fn move_intent(&self) -> MoveIntent {
        let mut x = 0.0f32;
        let mut z = 0.0f32;
        if self.move_forward {
            z -= 1.0;
        }
        if self.move_left {
            x -= 1.0;
        }
        if self.move_back {
            z += 1.0;
        }
        if self.move_right {
            x += 1.0;
        }

        if x != 0.0 && z != 0.0 {
            let len = (x * x + z * z).sqrt();
            x /= len;
            z /= len;
        }

        MoveIntent { x, z }
    }
}

/// Advance the simulation by one frame.
///
/// No-ops unless the phase is `Playing` and a player exists. `dt_ms` is the
/// frame delta; `now_ms` is the caller's wall clock, used for every
/// time-gated threshold (cooldowns, invincibility, lifetimes, spawning).
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32, now_ms: f64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // 1. Movement intent and aim
    let intent = input.move_intent();

    // 2. Player kinematics
    let Some(player) = state.player.as_mut() else {
        return;
    };
    player.rotation = input.aim_yaw;
    let cfg = player.class.config();
    let (position, velocity) = kinematics::integrate_player(player, intent, cfg, dt_ms);
    player.position = position;
    player.velocity = velocity;
    let player_position = player.position;
    let player_class = player.class;

    // 3. Spawn
    if now_ms - state.last_spawn_at > SPAWN_INTERVAL_MS {
        let position = spawn_position(&mut state.rng);
        let id = state.next_entity_id();
        log::debug!(
            "enemy {} spawned at ({:.1}, {:.1})",
            id,
            position.x,
            position.z
        );
        state.enemies.push(Enemy::new(id, position));
        state.last_spawn_at = now_ms;
    }

    // 4. Enemy kinematics
    for enemy in &mut state.enemies {
        let (position, velocity) = kinematics::integrate_enemy(enemy, player_position, dt_ms);
        enemy.position = position;
        enemy.velocity = velocity;
    }

    // 5. Auto-fire
    if weapons::should_fire(player_class, intent.is_moving(), now_ms, state.last_shot_at) {
        let id = state.next_entity_id();
        if let Some(player) = state.player.as_ref() {
            let projectile = weapons::fire(id, player, now_ms);
            log::debug!("projectile {} fired ({:?})", id, projectile.kind);
            state.projectiles.push(projectile);
            state.last_shot_at = now_ms;
        }
    }

    // 6. Projectiles: integrate, then resolve and commit immediately
    let ids: Vec<u32> = state.projectiles.iter().map(|p| p.id).collect();
    for id in ids {
        let Some(projectile) = state.projectile_mut(id) else {
            continue;
        };
        match projectile.kind {
            ProjectileKind::Standard => {
                projectile.position = kinematics::step_standard(
                    projectile.position,
                    projectile.direction,
                    projectile.speed,
                    dt_ms,
                );
            }
            ProjectileKind::Mortar => {
                let (position, velocity) = kinematics::step_ballistic(
                    projectile.position,
                    projectile.velocity.unwrap_or(Vec3::ZERO),
                    dt_ms,
                );
                projectile.position = position;
                projectile.velocity = Some(velocity);
            }
        }
        let projectile = projectile.clone();

        let actions = match projectile.kind {
            ProjectileKind::Standard => {
                actions::resolve_standard_projectile(&projectile, &state.enemies, now_ms)
            }
            ProjectileKind::Mortar if collision::ground_contact(projectile.position) => {
                let explosion_id = state.next_entity_id();
                match state.player.as_ref() {
                    Some(player) => actions::resolve_mortar_impact(
                        &projectile,
                        &state.enemies,
                        player,
                        explosion_id,
                        now_ms,
                    ),
                    None => Vec::new(),
                }
            }
            ProjectileKind::Mortar => Vec::new(),
        };
        execute(state, &actions);
    }

    // 7. Player contact
    if let Some(player) = state.player.as_ref() {
        let actions =
            actions::resolve_player_contact(player, &state.enemies, now_ms, state.last_damage_at);
        execute(state, &actions);
    }

    // 8. Expire finished explosion visuals
    state
        .explosions
        .retain(|e| now_ms - e.created_at < e.duration_ms);
}

/// Random point on the spawn ring around the arena center
fn spawn_position(rng: &mut Pcg32) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = rng.random_range(SPAWN_DISTANCE_MIN..SPAWN_DISTANCE_MAX);
    Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerClass;
    use rand::SeedableRng;

    const DT: f32 = 16.0;

    fn playing_state(class: PlayerClass) -> GameState {
        let mut state = GameState::new(7);
        state.open_character_select();
        state.select_class(class);
        state
    }

    #[test]
    fn test_tick_noops_outside_playing() {
        let mut state = GameState::new(7);
        tick(&mut state, &TickInput::default(), DT, 1000.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_move_intent_normalizes_diagonals() {
        let input = TickInput {
            move_forward: true,
            move_right: true,
            ..TickInput::default()
        };
        let intent = input.move_intent();
        assert!((intent.x * intent.x + intent.z * intent.z - 1.0).abs() < 1e-5);
        assert!(intent.x > 0.0);
        assert!(intent.z < 0.0);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..TickInput::default()
        };
        assert!(!input.move_intent().is_moving());
    }

    #[test]
    fn test_spawner_respects_cadence() {
        let mut state = playing_state(PlayerClass::Sniper);
        let mut now = 1000.0;

        tick(&mut state, &TickInput::default(), DT, now);
        assert_eq!(state.enemies.len(), 1);

        // Next frame is inside the interval
        now += DT as f64;
        tick(&mut state, &TickInput::default(), DT, now);
        assert_eq!(state.enemies.len(), 1);

        now += SPAWN_INTERVAL_MS;
        tick(&mut state, &TickInput::default(), DT, now);
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_spawn_ring_distance_band() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..100 {
            let position = spawn_position(&mut rng);
            let distance = position.length();
            assert_eq!(position.y, 0.0);
            assert!(distance >= SPAWN_DISTANCE_MIN - 1e-3);
            assert!(distance < SPAWN_DISTANCE_MAX + 1e-3);
        }
    }

    #[test]
    fn test_auto_fire_pushes_projectile_and_rearms() {
        let mut state = playing_state(PlayerClass::Assault);
        tick(&mut state, &TickInput::default(), DT, 1000.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.last_shot_at, 1000.0);

        // Within the cooldown nothing new is fired
        tick(&mut state, &TickInput::default(), DT, 1010.0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_moving_sniper_holds_fire() {
        let mut state = playing_state(PlayerClass::Sniper);
        let running = TickInput {
            move_forward: true,
            ..TickInput::default()
        };
        tick(&mut state, &running, DT, 1000.0);
        assert!(state.projectiles.is_empty());

        tick(&mut state, &TickInput::default(), DT, 2000.0);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_projectiles_move_every_tick() {
        let mut state = playing_state(PlayerClass::Assault);
        tick(&mut state, &TickInput::default(), DT, 1000.0);
        let start = state.projectiles[0].position;
        tick(&mut state, &TickInput::default(), DT, 1016.0);
        let moved = state.projectiles[0].position;
        assert!(start.distance(moved) > 0.0);
    }

    #[test]
    fn test_standard_projectile_kills_and_scores() {
        let mut state = playing_state(PlayerClass::Assault);
        // A weakened enemy right on the default firing line (+z)
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, Vec3::new(0.0, 0.0, 3.0));
        enemy.health = 1;
        enemy.speed = 0.0;
        state.enemies.push(enemy);
        // Hold the spawner back so the arena stays controlled
        state.last_spawn_at = 1000.0;

        let mut now = 1000.0;
        for _ in 0..200 {
            state.last_spawn_at = now;
            tick(&mut state, &TickInput::default(), DT, now);
            now += DT as f64;
            if state.score > 0 {
                break;
            }
        }

        assert_eq!(state.score, POINTS_PER_KILL);
        assert!(state.enemy(id).is_none());
    }

    #[test]
    fn test_mortar_shell_lands_and_explodes() {
        let mut state = playing_state(PlayerClass::Mortar);
        let mut now = 1000.0;
        let mut exploded = false;

        for _ in 0..400 {
            state.last_spawn_at = now; // keep the arena empty
            tick(&mut state, &TickInput::default(), DT, now);
            if !state.projectiles.is_empty() {
                // One shell is enough; hold fire for the rest of the test
                state.last_shot_at = f64::MAX;
            }
            now += DT as f64;
            if !state.explosions.is_empty() {
                exploded = true;
                break;
            }
        }

        assert!(exploded);
        // The landed shell is gone and nothing else was fired
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_explosions_expire_after_duration() {
        let mut state = playing_state(PlayerClass::Mortar);
        state.explosions.push(crate::sim::state::Explosion {
            id: 1,
            position: Vec3::ZERO,
            radius: 4.0,
            damage: 3,
            created_at: 1000.0,
            duration_ms: EXPLOSION_DURATION_MS,
        });
        state.last_spawn_at = 1000.0;
        state.last_shot_at = 1000.0;

        tick(&mut state, &TickInput::default(), DT, 1100.0);
        assert_eq!(state.explosions.len(), 1);

        tick(&mut state, &TickInput::default(), DT, 1000.0 + EXPLOSION_DURATION_MS);
        assert!(state.explosions.is_empty());
    }

    #[test]
    fn test_contact_damage_and_invincibility_window() {
        let mut state = playing_state(PlayerClass::Assault);
        let start_health = state.player.as_ref().unwrap().health;
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, Vec3::new(0.3, 0.0, 0.0));
        enemy.speed = 0.0;
        state.enemies.push(enemy);

        state.last_spawn_at = 1000.0;
        state.last_shot_at = f64::MAX; // silence the gun
        state.last_damage_at = 0.0;

        tick(&mut state, &TickInput::default(), DT, 1000.0);
        let player = state.player.as_ref().unwrap();
        assert_eq!(player.health, start_health - 1);
        assert_eq!(state.last_damage_at, 1000.0);
        // Contact knockback landed as well
        assert!(player.velocity.length() > 0.0);

        // Still invincible on the next contact tick
        state.last_spawn_at = 1016.0;
        let id2 = state.next_entity_id();
        let mut chaser = Enemy::new(id2, Vec3::new(0.3, 0.0, 0.0));
        chaser.speed = 0.0;
        state.enemies.push(chaser);
        tick(&mut state, &TickInput::default(), DT, 1016.0);
        assert_eq!(state.player.as_ref().unwrap().health, start_health - 1);
    }

    #[test]
    fn test_lethal_contact_flips_to_game_over() {
        let mut state = playing_state(PlayerClass::Assault);
        state.player.as_mut().unwrap().health = 1;
        let id = state.next_entity_id();
        let mut enemy = Enemy::new(id, Vec3::new(0.2, 0.0, 0.0));
        enemy.speed = 0.0;
        state.enemies.push(enemy);
        state.last_spawn_at = 1000.0;
        state.last_shot_at = f64::MAX;

        tick(&mut state, &TickInput::default(), DT, 1000.0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.as_ref().unwrap().health, 0);

        // A dead session no longer advances
        tick(&mut state, &TickInput::default(), DT, 2000.0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_penetrating_shot_hits_each_enemy_once() {
        let mut state = playing_state(PlayerClass::Sniper);
        // Two enemies planted on the firing line, offset so the shot's
        // per-tick stride lands inside both hit radii
        for z in [3.1, 6.1] {
            let id = state.next_entity_id();
            let mut enemy = Enemy::new(id, Vec3::new(0.0, 0.0, z));
            enemy.speed = 0.0;
            enemy.health = 10;
            state.enemies.push(enemy);
        }

        let mut now = 1000.0;
        for _ in 0..300 {
            state.last_spawn_at = now;
            tick(&mut state, &TickInput::default(), DT, now);
            now += DT as f64;
            if state.projectiles.is_empty() && state.last_shot_at > 0.0 {
                state.last_shot_at = f64::MAX; // one shot only
            }
        }

        let sniper_damage = PlayerClass::Sniper.config().bullet_damage;
        for enemy in &state.enemies {
            assert_eq!(enemy.health, 10 - sniper_damage);
        }
    }
}
