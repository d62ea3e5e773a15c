//! Tile Dash entry point
//!
//! Native builds run a headless demo session driven by a scripted pilot and
//! log the outcome. The web build only wires up logging and storage; drawing
//! is left to the hosting page.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use tile_dash::Settings;
    use tile_dash::consts::FRAME_RATE;
    use tile_dash::persistence::FileStore;
    use tile_dash::platform;
    use tile_dash::sim::{Direction, GamePhase, GameState, TickInput, tick};

    /// Two minutes of simulated play
    const MAX_FRAMES: u64 = FRAME_RATE as u64 * 120;
    /// Frames spent holding each direction of the scripted pattern
    const LEG_FRAMES: u64 = 40;
    const FIRE_EVERY: u64 = 25;

    const PATTERN: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Input for a given frame of the demo
    fn scripted_input(frame: u64, now_ms: f64) -> TickInput {
        let leg = (frame / LEG_FRAMES) as usize;
        TickInput {
            direction: Some(PATTERN[leg % PATTERN.len()]),
            fire: frame % FIRE_EVERY == 0,
            now_ms,
            ..Default::default()
        }
    }

    pub fn run() {
        platform::init_logging();
        log::info!("Tile Dash (native) starting...");

        let settings = Settings::load();
        // Write back so a fresh install gets an editable (and clamped) file
        settings.save();
        let seed = settings.seed.unwrap_or_else(|| platform::now_ms() as u64);
        let store = FileStore::new(&settings.high_score_path);
        log::info!(
            "Seed {}, difficulty {}, high scores in {}",
            seed,
            settings.difficulty.as_str(),
            store.path().display()
        );

        let mut state = GameState::new(seed, settings.max_particles, Box::new(store));
        let started_ms = platform::now_ms();
        let frame_ms = 1000.0 / FRAME_RATE as f64;

        tick(
            &mut state,
            &TickInput {
                select: Some(settings.difficulty),
                start: true,
                now_ms: started_ms,
                ..Default::default()
            },
        );

        let mut frame = 0;
        while frame < MAX_FRAMES && state.phase == GamePhase::Playing {
            frame += 1;
            let now_ms = started_ms + frame as f64 * frame_ms;
            tick(&mut state, &scripted_input(frame, now_ms));
        }

        let snap = state.snapshot();
        log::info!(
            "Demo ended after {} frames in {:?}: {}",
            snap.time_ticks,
            snap.phase,
            snap.hud_line()
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use tile_dash::persistence::LocalStorageStore;
    use tile_dash::sim::GameState;
    use tile_dash::{Settings, highscores, platform};

    platform::init_logging();
    log::info!("Tile Dash starting...");

    let settings = Settings::load();
    settings.save();
    let seed = settings.seed.unwrap_or_else(|| platform::now_ms() as u64);
    let store = LocalStorageStore::new(highscores::STORAGE_KEY);
    let state = GameState::new(seed, settings.max_particles, Box::new(store));
    log::info!("Ready, high score {}", state.score.high_score());
}
