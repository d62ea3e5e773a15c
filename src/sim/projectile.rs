//! Projectile flight, wall impact and enemy freezing

use glam::Vec2;

use super::grid::Grid;
use super::state::{Enemy, Projectile};
use crate::cell_of;
use crate::consts::PROJECTILE_HIT_EXTENT;

/// Axis-independent half-tile box test between a projectile and an enemy.
///
/// Deliberately a box, not a radius: both axes must be strictly within
/// half a tile.
#[inline]
pub fn hits_enemy(pos: Vec2, enemy: &Enemy) -> bool {
    let delta = (pos - enemy.pos().as_vec2()).abs();
    delta.x < PROJECTILE_HIT_EXTENT && delta.y < PROJECTILE_HIT_EXTENT
}

/// Freeze the first enemy (list order) overlapping `pos`.
/// Returns its index.
fn freeze_first_hit(pos: Vec2, enemies: &mut [Enemy]) -> Option<usize> {
    let index = enemies.iter().position(|e| hits_enemy(pos, e))?;
    enemies[index].freeze();
    Some(index)
}

/// Advance one projectile a single frame. Returns the index of the enemy it
/// froze, if any. The projectile is deactivated on any impact.
pub fn step_projectile(
    proj: &mut Projectile,
    enemies: &mut [Enemy],
    grid: &Grid,
) -> Option<usize> {
    if !proj.active {
        return None;
    }

    // Fired point-blank into an enemy
    if let Some(hit) = freeze_first_hit(proj.pos, enemies) {
        proj.active = false;
        return Some(hit);
    }

    proj.pos += proj.dir.as_vec2() * proj.speed;

    let cell = cell_of(proj.pos);
    if !grid.in_bounds(cell) || grid.is_wall(cell) {
        proj.active = false;
        return None;
    }

    let hit = freeze_first_hit(proj.pos, enemies);
    if hit.is_some() {
        proj.active = false;
    }
    hit
}

/// Advance every projectile, then drop the inactive ones.
/// Returns how many enemies were frozen this frame.
pub fn update_projectiles(
    projectiles: &mut Vec<Projectile>,
    enemies: &mut [Enemy],
    grid: &Grid,
) -> u32 {
    let mut frozen = 0;
    for proj in projectiles.iter_mut() {
        if let Some(index) = step_projectile(proj, enemies, grid) {
            log::debug!("Enemy {} frozen at {:?}", index, enemies[index].pos());
            frozen += 1;
        }
    }
    projectiles.retain(|p| p.active);
    frozen
}
