//! Headless simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - State mutation only inside `tick`, in fixed step order
//! - Pure detection functions feeding a single action executor
//! - Stable entity iteration order (sequential ids, push-only collections)

pub mod actions;
pub mod collision;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod weapons;

pub use actions::{Action, execute, resolve_mortar_impact, resolve_player_contact,
    resolve_standard_projectile};
pub use kinematics::MoveIntent;
pub use state::{Enemy, Explosion, GamePhase, GameState, Player, Projectile, ProjectileKind};
pub use tick::{TickInput, tick};
pub use weapons::find_nearest_target;
