//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (enemy list order)
//! - No rendering or platform dependencies

pub mod grid;
pub mod movement;
pub mod particles;
pub mod projectile;
pub mod score;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use grid::{CARDINALS, DEFAULT_MAP, Grid, MapTemplate, Spawns, Tile};
pub use movement::{Direction, MoveSelector, Mover, Steer, Wander};
pub use particles::{Confetti, Particle, ParticleKind, ParticleSystem};
pub use projectile::{hits_enemy, step_projectile, update_projectiles};
pub use score::ScoreTracker;
pub use snapshot::Snapshot;
pub use state::{
    ENEMY_COLOR, Enemy, FROZEN_ENEMY_COLOR, GamePhase, GameState, Player, Projectile,
};
pub use tick::{TickInput, tick};
