//! Game state and core simulation types
//!
//! `GameState` is the single owned world the frame step mutates. Session
//! control (start, restart, exit) lives here too since each one is a reset.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{DEFAULT_MAP, Grid, MapTemplate};
use super::movement::Mover;
use super::particles::ParticleSystem;
use super::score::ScoreTracker;
use crate::consts::*;
use crate::persistence::ScoreStore;
use crate::settings::Difficulty;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, choosing difficulty
    Menu,
    /// Active gameplay
    Playing,
    /// Gameplay suspended
    Paused,
    /// Health exhausted
    GameOver,
    /// Every item collected
    LevelComplete,
}

/// Render color for an enemy in its normal state
pub const ENEMY_COLOR: u32 = 0xE94560;
/// Render color for a frozen enemy
pub const FROZEN_ENEMY_COLOR: u32 = 0x00D9FF;

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub mover: Mover,
    pub health: u8,
    /// Items collected this level
    pub inventory: u32,
    /// Unit facing, used as projectile direction
    pub facing: IVec2,
}

impl Player {
    pub fn new(pos: IVec2) -> Self {
        Self {
            mover: Mover::new(pos, PLAYER_MOVE_DELAY),
            health: PLAYER_HEALTH,
            inventory: 0,
            facing: IVec2::new(0, -1),
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.mover.pos
    }
}

/// A roaming ghost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub mover: Mover,
    pub frozen: bool,
    /// Frames of freeze left (0 when not frozen)
    pub freeze_timer: u32,
}

impl Enemy {
    pub fn new(pos: IVec2, move_delay: u32) -> Self {
        Self {
            mover: Mover::new(pos, move_delay),
            frozen: false,
            freeze_timer: 0,
        }
    }

    #[inline]
    pub fn pos(&self) -> IVec2 {
        self.mover.pos
    }

    /// Stun for the full freeze duration (re-freezing restarts the timer)
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.freeze_timer = FREEZE_DURATION;
    }

    /// Count the freeze down one frame; thaws with the timer at exactly 0
    pub fn tick_freeze(&mut self) {
        if !self.frozen {
            return;
        }
        self.freeze_timer = self.freeze_timer.saturating_sub(1);
        if self.freeze_timer == 0 {
            self.frozen = false;
        }
    }

    /// Render color, a function of the frozen flag only
    pub fn color(&self) -> u32 {
        if self.frozen {
            FROZEN_ENEMY_COLOR
        } else {
            ENEMY_COLOR
        }
    }
}

/// A stun shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Tile-space position
    pub pos: Vec2,
    /// Cardinal unit direction
    pub dir: IVec2,
    pub speed: f32,
    pub active: bool,
}

impl Projectile {
    pub fn new(pos: IVec2, dir: IVec2) -> Self {
        Self {
            pos: pos.as_vec2(),
            dir,
            speed: PROJECTILE_SPEED,
            active: true,
        }
    }
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Seed of the current session RNG
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Difficulty selected on the menu and used by the running session
    pub difficulty: Difficulty,
    /// Frames simulated this session
    pub time_ticks: u64,
    /// Working copy of the level
    pub grid: Grid,
    /// Where the player (re)spawns
    pub player_start: IVec2,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Items present when the level started
    pub total_items: u32,
    pub particles: ParticleSystem,
    pub score: ScoreTracker,
    template: MapTemplate,
}

impl GameState {
    /// Create a state sitting on the menu, high score loaded from `store`
    pub fn new(seed: u64, max_particles: usize, store: Box<dyn ScoreStore>) -> Self {
        Self::with_template(seed, max_particles, store, DEFAULT_MAP)
    }

    pub fn with_template(
        seed: u64,
        max_particles: usize,
        store: Box<dyn ScoreStore>,
        template: MapTemplate,
    ) -> Self {
        let (grid, spawns) = Grid::from_template(&template);
        let total_items = grid.count_items();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            difficulty: Difficulty::default(),
            time_ticks: 0,
            grid,
            player_start: spawns.player,
            player: Player::new(spawns.player),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            total_items,
            particles: ParticleSystem::new(max_particles),
            score: ScoreTracker::new(store),
            template,
        }
    }

    /// Begin a session at the given difficulty
    pub fn start(&mut self, difficulty: Difficulty, now_ms: f64) {
        self.difficulty = difficulty;
        self.reset_level(now_ms);
        self.phase = GamePhase::Playing;
        log::info!(
            "Session started: difficulty={}, enemies={}, items={}",
            difficulty.as_str(),
            self.enemies.len(),
            self.total_items
        );
    }

    /// Start over with the current difficulty
    pub fn restart(&mut self, now_ms: f64) {
        self.start(self.difficulty, now_ms);
    }

    /// Abandon the session and return to the title screen
    pub fn exit_to_menu(&mut self) {
        self.reset_level(0.0);
        self.phase = GamePhase::Menu;
        log::info!("Returned to menu");
    }

    /// Full reinitialization of everything but the high score
    fn reset_level(&mut self, now_ms: f64) {
        let (grid, spawns) = Grid::from_template(&self.template);
        let enemy_delay = self.difficulty.enemy_move_delay();

        self.total_items = grid.count_items();
        self.grid = grid;
        self.player_start = spawns.player;
        self.player = Player::new(spawns.player);
        self.enemies = spawns
            .enemies
            .iter()
            .map(|&pos| Enemy::new(pos, enemy_delay))
            .collect();
        self.projectiles.clear();
        self.particles.clear();
        self.score.reset(now_ms);
        self.time_ticks = 0;
    }

    /// Apply a score delta, celebrating the first high-score crossing
    pub fn award(&mut self, points: i64, now_ms: f64) {
        if self.score.add_points(points, now_ms) {
            log::info!("New high score: {}", self.score.high_score());
            self.particles.start_confetti();
        }
    }

    /// Spawn a projectile from the player's tile along its facing
    pub fn fire(&mut self) {
        self.projectiles
            .push(Projectile::new(self.player.pos(), self.player.facing));
    }

    /// Pixel center of the player's interpolated position
    pub fn player_visual_center(&self) -> Vec2 {
        crate::tile_center(self.player.mover.visual)
    }
}
