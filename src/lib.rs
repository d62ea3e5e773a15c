//! Tile Dash - A grid maze arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, projectiles, particles, score)
//! - `persistence`: High score storage backends
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Player preferences and difficulty

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Frames per second the simulation is tuned for
    pub const FRAME_RATE: u32 = 60;

    /// Maze dimensions (tiles)
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 15;
    /// Tile edge in pixels (particle space)
    pub const TILE_SIZE: f32 = 40.0;
    /// Viewport dimensions in pixels
    pub const VIEWPORT_WIDTH: f32 = GRID_WIDTH as f32 * TILE_SIZE;
    pub const VIEWPORT_HEIGHT: f32 = GRID_HEIGHT as f32 * TILE_SIZE;

    /// Frames between player moves
    pub const PLAYER_MOVE_DELAY: u32 = 8;
    /// Visual interpolation factor per frame (0-1, higher = snappier)
    pub const MOVE_SMOOTHING: f32 = 0.25;
    /// Starting health
    pub const PLAYER_HEALTH: u8 = 3;

    /// Projectile travel per frame (tiles)
    pub const PROJECTILE_SPEED: f32 = 0.5;
    /// Half-extent of the projectile/enemy hit box (tiles, per axis)
    pub const PROJECTILE_HIT_EXTENT: f32 = 0.5;
    /// Frames an enemy stays frozen (2 seconds at 60 Hz)
    pub const FREEZE_DURATION: u32 = 120;

    /// Points per collected item
    pub const ITEM_POINTS: i64 = 100;
    /// Points lost per enemy hit
    pub const HIT_PENALTY: i64 = -50;
    /// Level-complete bonus before time decay
    pub const TIME_BONUS_BASE: u64 = 1000;
    /// Bonus lost per elapsed second
    pub const TIME_BONUS_PER_SECOND: u64 = 10;

    /// Default particle pool capacity
    pub const MAX_PARTICLES: usize = 500;
}

/// Pixel-space center of a tile position (integer or interpolated)
#[inline]
pub fn tile_center(pos: Vec2) -> Vec2 {
    pos * consts::TILE_SIZE + Vec2::splat(consts::TILE_SIZE / 2.0)
}

/// Floor a continuous tile-space position to its grid cell
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}
