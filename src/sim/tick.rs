//! Per-frame simulation step
//!
//! One call to `tick` is one full ordered pass: session input, player
//! movement and pickups, enemy movement, contact damage, projectiles,
//! particles.

use super::movement::{Direction, Steer, Wander};
use super::projectile::update_projectiles;
use super::state::{GamePhase, GameState};
use crate::Difficulty;
use crate::consts::*;
use crate::tile_center;

/// Input intents for a single frame (already debounced)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement direction
    pub direction: Option<Direction>,
    /// Fire a projectile
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the session for the menu
    pub exit: bool,
    /// Menu: pick a difficulty directly
    pub select: Option<Difficulty>,
    /// Start from the menu, or restart after the session ended
    pub start: bool,
    /// Wall clock (ms) for score timing and persistence timestamps
    pub now_ms: f64,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Menu => {
            handle_menu(state, input);
            return;
        }
        GamePhase::GameOver | GamePhase::LevelComplete => {
            if input.start {
                state.restart(input.now_ms);
            }
            return;
        }
        GamePhase::Paused => {
            if input.exit {
                state.exit_to_menu();
            } else if input.pause {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            return;
        }
        GamePhase::Playing => {
            if input.exit {
                state.exit_to_menu();
                return;
            }
            if input.pause {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
        }
    }

    state.time_ticks += 1;

    if input.fire {
        state.fire();
    }

    update_player(state, input);
    update_enemies(state);
    check_enemy_contact(state, input.now_ms);

    let frozen = update_projectiles(&mut state.projectiles, &mut state.enemies, &state.grid);
    if frozen > 0 {
        log::debug!("{} enemies frozen on tick {}", frozen, state.time_ticks);
    }

    if state.grid.is_adjacent_to_wall(state.player.pos()) {
        let at = state.player_visual_center();
        state.particles.emit_sparkle(&mut state.rng, at);
    }

    state.particles.update(&mut state.rng);
}

/// Difficulty selection and session start on the title screen
fn handle_menu(state: &mut GameState, input: &TickInput) {
    if let Some(difficulty) = input.select {
        state.difficulty = difficulty;
    }
    match input.direction {
        Some(Direction::Left) => state.difficulty = state.difficulty.prev(),
        Some(Direction::Right) => state.difficulty = state.difficulty.next(),
        _ => {}
    }
    if input.start {
        state.start(state.difficulty, input.now_ms);
    }
}

fn update_player(state: &mut GameState, input: &TickInput) {
    // Facing follows input only on frames where a move may happen
    if state.player.mover.cooldown == 0 {
        if let Some(direction) = input.direction {
            state.player.facing = direction.step();
        }
    }

    let trail_from = state.player_visual_center();
    let moved = state
        .player
        .mover
        .step(&state.grid, &mut Steer(input.direction))
        .is_some();

    if moved {
        if state.phase == GamePhase::Playing {
            state.particles.emit_trail(&mut state.rng, trail_from);
        }

        let pos = state.player.pos();
        if state.grid.take_item(pos) {
            state.player.inventory += 1;
            state.award(ITEM_POINTS, input.now_ms);
            log::debug!(
                "Item collected at {:?} ({}/{})",
                pos,
                state.player.inventory,
                state.total_items
            );

            if state.player.inventory == state.total_items {
                let (bonus, crossed) = state.score.apply_time_bonus(input.now_ms);
                if crossed {
                    state.particles.start_confetti();
                }
                state.phase = GamePhase::LevelComplete;
                log::info!(
                    "Level complete: time bonus {}, score {}",
                    bonus,
                    state.score.current()
                );
            }
        }

        check_enemy_contact(state, input.now_ms);
    }

    state.player.mover.smooth();
}

fn update_enemies(state: &mut GameState) {
    for enemy in state.enemies.iter_mut() {
        if enemy.frozen {
            enemy.tick_freeze();
        } else {
            enemy.mover.step(&state.grid, &mut Wander(&mut state.rng));
        }
        enemy.mover.smooth();
    }
}

/// Damage the player for every unfrozen enemy sharing its tile
fn check_enemy_contact(state: &mut GameState, now_ms: f64) {
    for i in 0..state.enemies.len() {
        let enemy = &state.enemies[i];
        if enemy.frozen || enemy.pos() != state.player.pos() {
            continue;
        }

        let at = tile_center(state.player.pos().as_vec2());
        state.particles.emit_explosion(&mut state.rng, at);
        state.player.health = state.player.health.saturating_sub(1);
        state.award(HIT_PENALTY, now_ms);
        log::debug!("Player hit by enemy {}, health {}", i, state.player.health);

        if state.player.health == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over, score {}", state.score.current());
            return;
        }
        state.player.mover.teleport(state.player_start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::state::Enemy;
    use glam::IVec2;
    use proptest::prelude::*;

    fn playing(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(12345, MAX_PARTICLES, Box::new(MemoryStore::default()));
        state.start(difficulty, 0.0);
        state
    }

    #[test]
    fn test_menu_selection_and_start() {
        let mut state = GameState::new(1, MAX_PARTICLES, Box::new(MemoryStore::default()));
        tick(
            &mut state,
            &TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
        );
        assert_eq!(state.difficulty, Difficulty::Slow);
        tick(
            &mut state,
            &TickInput {
                select: Some(Difficulty::Fast),
                ..Default::default()
            },
        );
        assert_eq!(state.difficulty, Difficulty::Fast);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemies.iter().all(|e| e.mover.move_delay() == 8));
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = playing(Difficulty::Normal);
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Paused);

        let enemies_before = state.enemies.clone();
        let ticks_before = state.time_ticks;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies, enemies_before);
        assert_eq!(state.time_ticks, ticks_before);

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_exit_returns_to_menu() {
        let mut state = playing(Difficulty::Normal);
        tick(
            &mut state,
            &TickInput {
                exit: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_player_moves_and_faces() {
        let mut state = playing(Difficulty::Slow);
        state.enemies.clear();
        let input = TickInput {
            direction: Some(Direction::Down),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos(), IVec2::new(3, 3));
        assert_eq!(state.player.facing, IVec2::new(0, 1));
        assert_eq!(state.player.mover.cooldown, PLAYER_MOVE_DELAY);
        // Trail emitted on the move
        assert!(state.particles.iter().any(|p| p.kind == crate::sim::ParticleKind::Trail));
    }

    #[test]
    fn test_slow_difficulty_freeze_scenario() {
        let mut state = playing(Difficulty::Slow);
        assert!(state.enemies.iter().all(|e| e.mover.move_delay() == 16));

        // One enemy parked on the player's tile
        let spot = state.player.pos();
        state.enemies = vec![Enemy::new(spot, 16)];

        // Fire from the shared tile: the shot resolves within the same update
        state.projectiles.clear();
        state.fire();
        update_projectiles(&mut state.projectiles, &mut state.enemies, &state.grid);
        assert!(state.enemies[0].frozen);
        assert_eq!(state.enemies[0].freeze_timer, 120);
        assert!(state.projectiles.is_empty());

        // Step away so the thaw does not land on the player
        state.player.mover.teleport(IVec2::new(1, 1));
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.enemies[0].pos(), spot);
        }
        assert!(!state.enemies[0].frozen);
        assert_eq!(state.enemies[0].freeze_timer, 0);
    }

    #[test]
    fn test_point_blank_shot_refreezes() {
        let mut state = playing(Difficulty::Normal);
        let player = state.player.pos();
        let mut enemy = Enemy::new(player, 11);
        enemy.freeze();
        enemy.freeze_timer = 50;
        state.enemies = vec![enemy];

        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        assert!(state.enemies[0].frozen);
        assert_eq!(state.enemies[0].freeze_timer, FREEZE_DURATION);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.health, PLAYER_HEALTH);
    }

    #[test]
    fn test_enemy_contact_damages_and_respawns() {
        let mut state = playing(Difficulty::Normal);
        state.award(200, 0.0);
        let spot = IVec2::new(3, 3);
        state.player.mover.teleport(spot);
        let mut enemy = Enemy::new(spot, 11);
        // Keep it from wandering off this frame
        enemy.mover.cooldown = 5;
        state.enemies = vec![enemy];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, PLAYER_HEALTH - 1);
        // Respawn is the level's own spawn marker, not a fixed corner
        assert_eq!(state.player_start, IVec2::new(3, 2));
        assert_eq!(state.player.pos(), IVec2::new(3, 2));
        assert_eq!(state.player.mover.visual, state.player_start.as_vec2());
        assert_eq!(state.score.current(), 150);
        assert!(state.particles.iter().any(|p| p.kind == crate::sim::ParticleKind::Explosion));
    }

    #[test]
    fn test_last_hit_ends_session() {
        let mut state = playing(Difficulty::Normal);
        state.player.health = 1;
        let spot = IVec2::new(3, 3);
        state.player.mover.teleport(spot);
        let mut enemy = Enemy::new(spot, 11);
        enemy.mover.cooldown = 5;
        state.enemies = vec![enemy];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.score.current(), 0);

        // Frozen until restart
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, PLAYER_HEALTH);
    }

    #[test]
    fn test_frozen_enemy_is_harmless() {
        let mut state = playing(Difficulty::Normal);
        let spot = IVec2::new(3, 3);
        state.player.mover.teleport(spot);
        let mut enemy = Enemy::new(spot, 11);
        enemy.freeze();
        state.enemies = vec![enemy];

        for _ in 0..60 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.player.health, PLAYER_HEALTH);
        assert_eq!(state.player.pos(), spot);
    }

    #[test]
    fn test_collecting_all_items_completes_level() {
        let mut state = playing(Difficulty::Slow);
        state.enemies.clear();
        // Stand next to the last item with the others already taken
        state.grid.take_item(IVec2::new(15, 2));
        state.grid.take_item(IVec2::new(3, 12));
        state.player.inventory = 2;
        state.player.mover.teleport(IVec2::new(14, 13));

        let input = TickInput {
            direction: Some(Direction::Right),
            now_ms: 30_000.0,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.player.inventory, 3);
        // 100 for the item, 1000 - 30 * 10 for time
        assert_eq!(state.score.current(), 800);
        assert_eq!(state.score.high_score(), 800);
        assert!(state.particles.confetti().active);
    }

    #[test]
    fn test_sparkles_near_walls() {
        let mut state = playing(Difficulty::Normal);
        state.enemies.clear();
        state.player.mover.teleport(IVec2::new(1, 1));
        tick(&mut state, &TickInput::default());
        assert!(state.particles.iter().any(|p| p.kind == crate::sim::ParticleKind::Sparkle));

        let mut state = playing(Difficulty::Normal);
        state.enemies.clear();
        state.player.mover.teleport(IVec2::new(3, 3));
        tick(&mut state, &TickInput::default());
        assert!(state.particles.iter().all(|p| p.kind != crate::sim::ParticleKind::Sparkle));
    }

    proptest! {
        #[test]
        fn prop_frozen_enemy_stays_put(
            timer in 2u32..=120,
            cooldown in 0u32..=8,
            seed in any::<u64>(),
        ) {
            let mut state = GameState::new(seed, MAX_PARTICLES, Box::new(MemoryStore::default()));
            state.start(Difficulty::Fast, 0.0);
            let pos = IVec2::new(9, 7);
            let mut enemy = Enemy::new(pos, 8);
            enemy.mover.cooldown = cooldown;
            enemy.freeze();
            enemy.freeze_timer = timer;
            state.enemies = vec![enemy];

            for expected in (0..timer).rev() {
                tick(&mut state, &TickInput::default());
                prop_assert_eq!(state.enemies[0].pos(), pos);
                prop_assert_eq!(state.enemies[0].freeze_timer, expected);
                prop_assert_eq!(state.enemies[0].frozen, expected > 0);
                // Cooldown neither ticks nor re-arms while frozen
                prop_assert_eq!(state.enemies[0].mover.cooldown, cooldown);
            }
        }

        #[test]
        fn prop_fire_follows_facing(x in 1i32..19, y in 1i32..14, dir in 0usize..4) {
            let mut state = playing(Difficulty::Normal);
            state.enemies.clear();
            let start = IVec2::new(x, y);
            prop_assume!(state.grid.can_move(start));
            let direction =
                [Direction::Up, Direction::Down, Direction::Left, Direction::Right][dir];
            state.player.mover.teleport(start);
            state.player.facing = direction.step();

            // Spawned at the player's tile, heading along the facing
            state.fire();
            prop_assert_eq!(state.projectiles.len(), 1);
            prop_assert_eq!(state.projectiles[0].pos, start.as_vec2());
            prop_assert_eq!(state.projectiles[0].dir, direction.step());
            state.projectiles.clear();

            // Through the frame step the shot has already advanced half a tile
            tick(
                &mut state,
                &TickInput {
                    fire: true,
                    ..Default::default()
                },
            );
            prop_assert_eq!(state.player.pos(), start);
            match state.projectiles.first() {
                Some(proj) => {
                    prop_assert_eq!(proj.dir, direction.step());
                    let expected = start.as_vec2() + direction.step().as_vec2() * PROJECTILE_SPEED;
                    prop_assert_eq!(proj.pos, expected);
                }
                None => prop_assert!(state.grid.is_wall(start + direction.step())),
            }
        }

        #[test]
        fn prop_all_enemies_share_session_delay(idx in 0usize..3, frames in 0usize..200) {
            let difficulty = Difficulty::ALL[idx];
            let mut state = playing(difficulty);
            for _ in 0..frames {
                tick(&mut state, &TickInput::default());
            }
            let delay = difficulty.enemy_move_delay();
            prop_assert!(state.enemies.iter().all(|e| e.mover.move_delay() == delay));
        }
    }
}
