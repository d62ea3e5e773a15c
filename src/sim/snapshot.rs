//! Read-only per-frame view handed to a renderer
//!
//! Everything is borrowed from `GameState`, so building a snapshot is free
//! and it cannot outlive the frame it was taken on.

use super::grid::Grid;
use super::particles::ParticleSystem;
use super::state::{Enemy, GamePhase, GameState, Player, Projectile};
use crate::settings::Difficulty;

/// What a frontend needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub particles: &'a ParticleSystem,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Items collected / items on the level
    pub items: (u32, u32),
    pub time_ticks: u64,
}

impl Snapshot<'_> {
    /// HUD status line
    pub fn hud_line(&self) -> String {
        format!(
            "Score: {}  High: {}  Health: {}  Items: {}/{}",
            self.score, self.high_score, self.player.health, self.items.0, self.items.1
        )
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            player: &self.player,
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            particles: &self.particles,
            score: self.score.current(),
            high_score: self.score.high_score(),
            phase: self.phase,
            difficulty: self.difficulty,
            items: (self.player.inventory, self.total_items),
            time_ticks: self.time_ticks,
        }
    }
}
