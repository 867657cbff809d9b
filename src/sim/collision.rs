//! Proximity tests and area queries
//!
//! Exhaustive scans over the live collections; entity counts stay small
//! enough that no broad phase is warranted. Proximity hits report the
//! first enemy in enumeration order, which is stable because ids are
//! handed out sequentially and the collections only push.

use glam::Vec3;

use super::state::{Enemy, Player, Projectile};
use crate::consts::*;
use crate::flat_distance;

/// First enemy within the projectile hit radius
pub fn projectile_hit<'a>(projectile: &Projectile, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    enemies
        .iter()
        .find(|e| projectile.position.distance(e.position) < PROJECTILE_HIT_RADIUS)
}

/// First enemy in contact with the player
pub fn player_contact<'a>(player: &Player, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    enemies
        .iter()
        .find(|e| player.position.distance(e.position) < PLAYER_HIT_RADIUS)
}

/// Shell has reached the ground
#[inline]
pub fn ground_contact(position: Vec3) -> bool {
    position.y <= GROUND_EPSILON
}

/// Whether a point sits inside a blast disc; the y axis is ignored
#[inline]
pub fn in_blast_radius(center: Vec3, radius: f32, point: Vec3) -> bool {
    flat_distance(center, point) <= radius
}

/// Enemies caught in a blast disc, in enumeration order
pub fn enemies_in_blast<'a>(center: Vec3, radius: f32, enemies: &'a [Enemy]) -> Vec<&'a Enemy> {
    enemies
        .iter()
        .filter(|e| in_blast_radius(center, radius, e.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerClass;
    use crate::sim::state::ProjectileKind;

    fn test_projectile(position: Vec3) -> Projectile {
        Projectile {
            id: 1,
            kind: ProjectileKind::Standard,
            position,
            spawn_position: position,
            direction: Vec3::new(1.0, 0.0, 0.0),
            speed: 0.5,
            damage: 1,
            knockback_force: 0.1,
            can_penetrate: false,
            range: 20.0,
            hit_enemy_ids: Vec::new(),
            created_at: 0.0,
            velocity: None,
            explosion_radius: None,
        }
    }

    #[test]
    fn test_projectile_hit_within_radius() {
        let projectile = test_projectile(Vec3::ZERO);
        let enemies = vec![Enemy::new(1, Vec3::new(0.5, 0.0, 0.0))];
        assert_eq!(projectile_hit(&projectile, &enemies).map(|e| e.id), Some(1));
    }

    #[test]
    fn test_projectile_misses_outside_radius() {
        let projectile = test_projectile(Vec3::ZERO);
        let enemies = vec![Enemy::new(1, Vec3::new(10.0, 0.0, 10.0))];
        assert!(projectile_hit(&projectile, &enemies).is_none());
    }

    #[test]
    fn test_projectile_hit_reports_first_in_order() {
        let projectile = test_projectile(Vec3::ZERO);
        // Both in range; the closer one comes second
        let enemies = vec![
            Enemy::new(1, Vec3::new(0.5, 0.0, 0.0)),
            Enemy::new(2, Vec3::new(0.1, 0.0, 0.0)),
        ];
        assert_eq!(projectile_hit(&projectile, &enemies).map(|e| e.id), Some(1));
    }

    #[test]
    fn test_player_contact_radius() {
        let player = Player::new(PlayerClass::Assault);
        let near = vec![Enemy::new(1, Vec3::new(0.9, 0.0, 0.0))];
        let far = vec![Enemy::new(2, Vec3::new(1.1, 0.0, 0.0))];
        assert!(player_contact(&player, &near).is_some());
        assert!(player_contact(&player, &far).is_none());
    }

    #[test]
    fn test_ground_contact_epsilon() {
        assert!(ground_contact(Vec3::new(5.0, 0.05, 5.0)));
        assert!(ground_contact(Vec3::new(5.0, -0.2, 5.0)));
        assert!(!ground_contact(Vec3::new(5.0, 0.2, 5.0)));
    }

    #[test]
    fn test_blast_radius_boundary_is_inclusive() {
        let center = Vec3::ZERO;
        assert!(in_blast_radius(center, 4.0, Vec3::new(4.0, 0.0, 0.0)));
        assert!(!in_blast_radius(center, 4.0, Vec3::new(4.01, 0.0, 0.0)));
    }

    #[test]
    fn test_blast_ignores_height() {
        let center = Vec3::ZERO;
        assert!(in_blast_radius(center, 4.0, Vec3::new(3.0, 50.0, 0.0)));
    }

    #[test]
    fn test_enemies_in_blast_filters_by_flat_distance() {
        let enemies = vec![
            Enemy::new(1, Vec3::new(2.0, 0.0, 0.0)),
            Enemy::new(2, Vec3::new(0.0, 0.0, 4.0)),
            Enemy::new(3, Vec3::new(3.0, 0.0, 3.0)),
        ];
        let hit: Vec<u32> = enemies_in_blast(Vec3::ZERO, 4.0, &enemies)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(hit, vec![1, 2]);
    }
}
