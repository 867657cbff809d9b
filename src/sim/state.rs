//! Game state and entity records
//!
//! Everything the simulation owns lives here. The rendering layer reads
//! these collections between ticks, keyed by entity id, and never writes
//! them; mutation happens inside the tick via the action executor.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::PlayerClass;
use crate::consts::*;
use crate::flat_distance;

/// Coarse session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Menu,
    CharacterSelect,
    /// Active gameplay; the only phase the tick advances
    Playing,
    GameOver,
}

/// The player character (single instance)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    /// Facing yaw in radians
    pub rotation: f32,
    pub health: i32,
    pub max_health: i32,
    pub velocity: Vec3,
    pub class: PlayerClass,
}

impl Player {
    pub fn new(class: PlayerClass) -> Self {
        let cfg = class.config();
        Self {
            position: Vec3::ZERO,
            rotation: 0.0,
            health: cfg.max_health,
            max_health: cfg.max_health,
            velocity: Vec3::ZERO,
            class,
        }
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub position: Vec3,
    /// Knockback residual, damped every tick
    pub velocity: Vec3,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub speed: f32,
}

impl Enemy {
    /// Spawn with base tuning at the given position
    pub fn new(id: u32, position: Vec3) -> Self {
        Self {
            id,
            position,
            velocity: Vec3::ZERO,
            health: ENEMY_BASE_HEALTH,
            max_health: ENEMY_BASE_HEALTH,
            damage: ENEMY_BASE_DAMAGE,
            speed: ENEMY_BASE_SPEED,
        }
    }
}

/// Projectile flight model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Constant-velocity bolt along a fixed direction
    Standard,
    /// Ballistic shell that detonates on ground contact
    Mortar,
}

/// An in-flight projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub position: Vec3,
    /// Launch point, kept for range accounting
    pub spawn_position: Vec3,
    /// Unit flight direction
    pub direction: Vec3,
    pub speed: f32,
    pub damage: i32,
    pub knockback_force: f32,
    pub can_penetrate: bool,
    pub range: f32,
    /// Enemies already struck; penetrating shots never hit an id twice
    pub hit_enemy_ids: Vec<u32>,
    pub created_at: f64,
    /// Ballistic velocity; `None` for straight-line flight
    pub velocity: Option<Vec3>,
    pub explosion_radius: Option<f32>,
}

impl Projectile {
    pub fn has_hit(&self, enemy_id: u32) -> bool {
        self.hit_enemy_ids.contains(&enemy_id)
    }

    /// Ground-plane distance travelled since launch
    pub fn travel_distance(&self) -> f32 {
        flat_distance(self.position, self.spawn_position)
    }
}

/// A detonation record
///
/// Area damage resolves once at creation; the record itself only drives the
/// blast visual and expires after `duration_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub position: Vec3,
    pub radius: f32,
    pub damage: i32,
    pub created_at: f64,
    pub duration_ms: f64,
}

/// Complete owned simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// `None` until a class is selected
    pub player: Option<Player>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Cooldown gates, wall-clock ms
    pub last_shot_at: f64,
    pub last_spawn_at: f64,
    pub last_damage_at: f64,
    /// Next entity id
    next_id: u32,
    /// Spawner randomness
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            player: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            last_shot_at: 0.0,
            last_spawn_at: 0.0,
            last_damage_at: 0.0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn open_character_select(&mut self) {
        self.phase = GamePhase::CharacterSelect;
    }

    /// Create the player from the class table and start play
    pub fn select_class(&mut self, class: PlayerClass) {
        log::info!("class selected: {}", class.as_str());
        self.player = Some(Player::new(class));
        self.phase = GamePhase::Playing;
    }

    /// Clear the arena and return to character select
    pub fn restart(&mut self) {
        log::info!("restart, final score {}", self.score);
        self.score = 0;
        self.player = None;
        self.enemies.clear();
        self.projectiles.clear();
        self.explosions.clear();
        self.last_shot_at = 0.0;
        self.last_spawn_at = 0.0;
        self.last_damage_at = 0.0;
        self.phase = GamePhase::CharacterSelect;
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: u32) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn projectile_mut(&mut self, id: u32) -> Option<&mut Projectile> {
        self.projectiles.iter_mut().find(|p| p.id == id)
    }
}
