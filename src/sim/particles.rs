//! Bounded particle effects engine
//!
//! Four effect kinds share one `Particle` shape; confetti carries its own
//! rotation payload. The pool is FIFO: when it overflows the oldest
//! particles are dropped first.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::consts::{MAX_PARTICLES, TILE_SIZE, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Player trail colors (brand purples)
pub const TRAIL_COLORS: [u32; 3] = [0x790ECB, 0x9D4EDD, 0xC77DFF];
/// Explosion colors (danger)
pub const EXPLOSION_COLORS: [u32; 3] = [0xE94560, 0xFF6B6B, 0xFF9900];
/// Sparkle colors (bright)
pub const SPARKLE_COLORS: [u32; 3] = [0xFFD700, 0xFFFF00, 0xFFFFFF];
/// Confetti colors
pub const CONFETTI_COLORS: [u32; 5] = [0x790ECB, 0xFF6B6B, 0xFFD700, 0x00D9FF, 0x7FFF00];

/// Downward acceleration applied to confetti each frame
pub const CONFETTI_GRAVITY: f32 = 0.3;
/// Confetti spawned per frame while a celebration runs
pub const CONFETTI_PER_FRAME: usize = 5;
/// Frames a celebration keeps emitting
pub const CONFETTI_DURATION: u32 = 60;
/// Confetti lifetime in frames
pub const CONFETTI_LIFE: u32 = 200;

/// Effect kind with kind-specific payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleKind {
    Trail,
    Explosion,
    Sparkle,
    Confetti { rotation: f32, rotation_speed: f32 },
}

/// A single visual particle (pixel space)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left to live
    pub life: u32,
    /// Reference life for fading
    pub max_life: u32,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Render opacity, 1.0 fresh to 0.0 expired
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Advance one frame. Returns false when the particle should be pruned.
    fn update(&mut self, floor_y: f32) -> bool {
        if let ParticleKind::Confetti { .. } = self.kind {
            self.vel.y += CONFETTI_GRAVITY;
        }

        self.pos += self.vel;

        if let ParticleKind::Confetti {
            ref mut rotation,
            rotation_speed,
        } = self.kind
        {
            *rotation += rotation_speed;
        }

        self.life = self.life.saturating_sub(1);

        let fell_off = matches!(self.kind, ParticleKind::Confetti { .. }) && self.pos.y > floor_y;
        self.life > 0 && !fell_off
    }
}

/// Continuous confetti emission state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Confetti {
    pub active: bool,
    pub frame: u32,
}

/// The particle pool
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    capacity: usize,
    viewport: Vec2,
    confetti: Confetti,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(MAX_PARTICLES)
    }
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self::with_viewport(capacity, Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT))
    }

    pub fn with_viewport(capacity: usize, viewport: Vec2) -> Self {
        Self {
            particles: VecDeque::with_capacity(capacity.min(MAX_PARTICLES)),
            capacity,
            viewport,
            confetti: Confetti::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn confetti(&self) -> Confetti {
        self.confetti
    }

    /// Drop everything and stop any celebration
    pub fn clear(&mut self) {
        self.particles.clear();
        self.confetti = Confetti::default();
    }

    /// Insert a particle as-is (newest position), honoring the cap
    pub fn push(&mut self, particle: Particle) {
        self.particles.push_back(particle);
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        while self.particles.len() > self.capacity {
            self.particles.pop_front();
        }
    }

    /// One frame: integrate and prune, run the confetti session, then cap
    pub fn update<R: Rng>(&mut self, rng: &mut R) {
        let floor_y = self.viewport.y;
        self.particles.retain_mut(|p| p.update(floor_y));

        if self.confetti.active {
            self.confetti.frame += 1;
            for _ in 0..CONFETTI_PER_FRAME {
                let particle = self.confetti_particle(rng);
                self.particles.push_back(particle);
            }
            if self.confetti.frame >= CONFETTI_DURATION {
                self.confetti = Confetti::default();
            }
        }

        self.enforce_capacity();
    }

    /// Arm (or re-arm) the celebration
    pub fn start_confetti(&mut self) {
        self.confetti = Confetti {
            active: true,
            frame: 0,
        };
    }

    /// 2-3 fading motes behind a moving player
    pub fn emit_trail<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        let count = rng.random_range(2..=3);
        let spread = TILE_SIZE * 0.5;
        for _ in 0..count {
            let particle = Particle {
                pos: at + jitter(rng, spread),
                vel: jitter(rng, 0.5),
                life: rng.random_range(20..30),
                max_life: 30,
                size: rng.random_range(3.0..5.0),
                color: pick(rng, &TRAIL_COLORS),
                kind: ParticleKind::Trail,
            };
            self.particles.push_back(particle);
        }
        self.enforce_capacity();
    }

    /// 12-16 particles fanned evenly around the impact point
    pub fn emit_explosion<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        let count = rng.random_range(12..=16);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + rng.random_range(-0.25..0.25);
            let speed = rng.random_range(2.0..4.0);
            let particle = Particle {
                pos: at,
                vel: Vec2::from_angle(angle) * speed,
                life: rng.random_range(20..=30),
                max_life: 30,
                size: rng.random_range(3.0..5.0),
                color: pick(rng, &EXPLOSION_COLORS),
                kind: ParticleKind::Explosion,
            };
            self.particles.push_back(particle);
        }
        self.enforce_capacity();
    }

    /// 3-5 motes drifting upward near a wall
    pub fn emit_sparkle<R: Rng>(&mut self, rng: &mut R, at: Vec2) {
        let count = rng.random_range(3..=5);
        for _ in 0..count {
            let particle = Particle {
                pos: at + jitter(rng, 15.0),
                vel: Vec2::new(rng.random_range(-0.25..0.25), rng.random_range(-1.0..=-0.5)),
                life: rng.random_range(15..=25),
                max_life: 25,
                size: rng.random_range(2.0..6.0),
                color: pick(rng, &SPARKLE_COLORS),
                kind: ParticleKind::Sparkle,
            };
            self.particles.push_back(particle);
        }
        self.enforce_capacity();
    }

    fn confetti_particle<R: Rng>(&self, rng: &mut R) -> Particle {
        Particle {
            pos: Vec2::new(rng.random_range(0.0..self.viewport.x), 0.0),
            vel: Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(0.0..2.0)),
            life: CONFETTI_LIFE,
            max_life: CONFETTI_LIFE,
            size: rng.random_range(4.0..8.0),
            color: pick(rng, &CONFETTI_COLORS),
            kind: ParticleKind::Confetti {
                rotation: rng.random_range(0.0..TAU),
                rotation_speed: rng.random_range(-0.1..0.1),
            },
        }
    }
}

/// Symmetric random offset, each axis in [-extent/2, extent/2)
fn jitter<R: Rng>(rng: &mut R, extent: f32) -> Vec2 {
    let half = extent / 2.0;
    Vec2::new(rng.random_range(-half..half), rng.random_range(-half..half))
}

fn pick<R: Rng>(rng: &mut R, colors: &[u32]) -> u32 {
    colors.choose(rng).copied().unwrap_or(0xFFFFFF)
}
