//! Timed tile movement shared by the player and enemies
//!
//! A `Mover` owns the grid position, the smoothed visual position and the
//! move cooldown. What it moves toward is decided by a `MoveSelector`.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use crate::consts::MOVE_SMOOTHING;

/// Cardinal input directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in grid space (y grows downward)
    pub fn step(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Chooses the next tile for a mover whose cooldown has elapsed
pub trait MoveSelector {
    /// Return a legal destination, or `None` to stay put
    fn select(&mut self, from: IVec2, grid: &Grid) -> Option<IVec2>;
}

/// Deterministic selector driven by a held direction
#[derive(Debug, Clone, Copy, Default)]
pub struct Steer(pub Option<Direction>);

impl MoveSelector for Steer {
    fn select(&mut self, from: IVec2, grid: &Grid) -> Option<IVec2> {
        let target = from + self.0?.step();
        grid.can_move(target).then_some(target)
    }
}

/// Uniform random choice among the legal cardinal moves
pub struct Wander<'a, R: Rng>(pub &'a mut R);

impl<R: Rng> MoveSelector for Wander<'_, R> {
    fn select(&mut self, from: IVec2, grid: &Grid) -> Option<IVec2> {
        let steps: Vec<IVec2> = grid.legal_steps(from).collect();
        steps.choose(&mut *self.0).map(|&step| from + step)
    }
}

/// Grid position plus cooldown-gated stepping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    /// Logical tile position (used for every collision check)
    pub pos: IVec2,
    /// Interpolated render position in tile units
    pub visual: Vec2,
    /// Frames left before the next move is allowed
    pub cooldown: u32,
    /// Frames between moves, fixed for the entity's lifetime
    move_delay: u32,
}

impl Mover {
    pub fn new(pos: IVec2, move_delay: u32) -> Self {
        Self {
            pos,
            visual: pos.as_vec2(),
            cooldown: 0,
            move_delay,
        }
    }

    pub fn move_delay(&self) -> u32 {
        self.move_delay
    }

    /// Advance the cooldown by one frame.
    ///
    /// While cooling down the counter decrements and nothing moves. Once it
    /// is 0 the selector is consulted; a destination moves the entity and
    /// re-arms the cooldown, no destination leaves everything unchanged.
    /// Returns the tile moved from on a successful move.
    pub fn step<S: MoveSelector>(&mut self, grid: &Grid, selector: &mut S) -> Option<IVec2> {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return None;
        }

        let target = selector.select(self.pos, grid)?;
        let from = self.pos;
        self.pos = target;
        self.cooldown = self.move_delay;
        Some(from)
    }

    /// Ease the visual position toward the grid position
    pub fn smooth(&mut self) {
        let target = self.pos.as_vec2();
        self.visual += (target - self.visual) * MOVE_SMOOTHING;
    }

    /// Jump to a tile with no interpolation (spawn/respawn)
    pub fn teleport(&mut self, pos: IVec2) {
        self.pos = pos;
        self.visual = pos.as_vec2();
    }
}
