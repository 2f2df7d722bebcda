//! Game session state and core simulation types
//!
//! One `GameState` is owned per play session; the tick and click
//! operations borrow it mutably. Nothing here is process-global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::consts::*;
use crate::error::SessionError;

/// Current session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Title screen, nothing ticks
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Lives exhausted; terminal until restart
    GameOver,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Playing => "playing",
            GameMode::GameOver => "game-over",
        }
    }
}

/// Geometric variant of a falling shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

/// Static per-variant data: (color, points)
const SHAPE_TABLE: [(ShapeKind, &str, u32); 3] = [
    (ShapeKind::Circle, "#3b82f6", 10),
    (ShapeKind::Square, "#10b981", 15),
    (ShapeKind::Triangle, "#f59e0b", 20),
];

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    /// Fill color as a CSS hex string
    pub fn color(&self) -> &'static str {
        SHAPE_TABLE[*self as usize].1
    }

    /// Score awarded for clicking this shape
    pub fn points(&self) -> u32 {
        SHAPE_TABLE[*self as usize].2
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Uniformly random variant
    pub fn random(rng: &mut Pcg32) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    pub kind: ShapeKind,
    /// Center position in playfield coordinates
    pub pos: Vec2,
    /// Radius for circles, half-extent for squares and triangles
    pub size: f32,
    /// Fall speed per tick, fixed at spawn
    pub speed: f32,
}

impl Shape {
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Pure vertical translation by one tick
    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }

    /// True once the shape has fallen fully past the bottom edge
    pub fn is_past(&self, height: f32) -> bool {
        self.pos.y > height + self.size
    }
}

/// A decorative burst fragment
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: u32,
    pub max_life: u32,
    pub color: &'static str,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: &'static str, rng: &mut Pcg32) -> Self {
        let half = PARTICLE_SPREAD / 2.0;
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            ),
            life: PARTICLE_LIFETIME,
            max_life: PARTICLE_LIFETIME,
            color,
            size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
        }
    }

    /// Integrate one tick: move, fall, age
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life = self.life.saturating_sub(1);
    }

    /// Fade-out fraction in [0, 1]
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// Playfield bounds in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: DEFAULT_PLAYFIELD_WIDTH,
            height: DEFAULT_PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject dimensions no session can run in
    pub fn validate(&self, difficulty: Difficulty) -> Result<(), SessionError> {
        let Playfield { width, height } = *self;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(SessionError::InvalidPlayfield { width, height });
        }
        let required = difficulty.size_range().end * 2.0;
        if width < required {
            return Err(SessionError::PlayfieldTooNarrow { width, required });
        }
        Ok(())
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current session
    pub seed: u64,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub playfield: Playfield,
    pub score: u64,
    pub lives: u32,
    /// Simulation ticks since session start
    pub time_ticks: u64,
    /// Multiplier applied to base speed of new spawns
    pub speed_multiplier: f32,
    /// Per-tick chance of a new spawn
    pub spawn_probability: f32,
    /// Whether hits emit particle bursts
    pub particles_enabled: bool,
    /// Live shapes, sorted by id (oldest first)
    pub shapes: Vec<Shape>,
    /// Live particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in menu mode. Fails if the playfield can't host the tier.
    pub fn new(
        difficulty: Difficulty,
        playfield: Playfield,
        seed: u64,
    ) -> Result<Self, SessionError> {
        playfield.validate(difficulty)?;
        Ok(Self {
            seed,
            mode: GameMode::Menu,
            difficulty,
            playfield,
            score: 0,
            lives: difficulty.initial_lives(),
            time_ticks: 0,
            speed_multiplier: difficulty.speed_multiplier(0),
            spawn_probability: difficulty.spawn_probability(0),
            particles_enabled: true,
            shapes: Vec::new(),
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Reset all counters and collections and begin playing
    pub fn start(&mut self, difficulty: Difficulty, seed: u64) -> Result<(), SessionError> {
        self.playfield.validate(difficulty)?;

        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.difficulty = difficulty;
        self.score = 0;
        self.lives = difficulty.initial_lives();
        self.time_ticks = 0;
        self.speed_multiplier = difficulty.speed_multiplier(0);
        self.spawn_probability = difficulty.spawn_probability(0);
        self.shapes.clear();
        self.particles.clear();
        self.next_id = 1;
        self.mode = GameMode::Playing;

        log::info!(
            "Session started: tier={} lives={} seed={}",
            difficulty.as_str(),
            self.lives,
            seed
        );
        Ok(())
    }

    /// Restart with the current tier
    pub fn restart(&mut self, seed: u64) -> Result<(), SessionError> {
        self.start(self.difficulty, seed)
    }

    /// Halt gameplay and go back to the title screen
    pub fn return_to_menu(&mut self) {
        if self.mode != GameMode::Menu {
            log::info!("Returning to menu (score {})", self.score);
        }
        self.mode = GameMode::Menu;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Sample a new shape at the top edge using the current multiplier
    pub fn spawn_shape(&mut self) -> &Shape {
        let id = self.next_entity_id();
        let kind = ShapeKind::random(&mut self.rng);
        let size = self.rng.random_range(self.difficulty.size_range());
        // Validated width is at least twice the largest size, so the range is non-empty
        let x = self.rng.random_range(size..self.playfield.width - size);
        let base = self.rng.random_range(self.difficulty.speed_range());

        self.shapes.push(Shape {
            id,
            kind,
            pos: Vec2::new(x, -size),
            size,
            speed: base * self.speed_multiplier,
        });
        &self.shapes[self.shapes.len() - 1]
    }

    /// Emit a particle burst at `pos`
    pub fn spawn_burst(&mut self, pos: Vec2, color: &'static str) {
        for _ in 0..BURST_PARTICLES {
            let particle = Particle::new(pos, color, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Recompute difficulty knobs from the current score
    pub fn refresh_difficulty(&mut self) {
        self.speed_multiplier = self.difficulty.speed_multiplier(self.score);
        self.spawn_probability = self.difficulty.spawn_probability(self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(difficulty: Difficulty) -> GameState {
        let mut state = GameState::new(difficulty, Playfield::default(), 7).unwrap();
        state.start(difficulty, 7).unwrap();
        state
    }

    #[test]
    fn test_shape_table() {
        assert_eq!(ShapeKind::Circle.points(), 10);
        assert_eq!(ShapeKind::Square.points(), 15);
        assert_eq!(ShapeKind::Triangle.points(), 20);
        assert_eq!(ShapeKind::Circle.color(), "#3b82f6");
        assert_eq!(ShapeKind::Square.color(), "#10b981");
        assert_eq!(ShapeKind::Triangle.color(), "#f59e0b");
    }

    #[test]
    fn test_mode_serializes_as_str() {
        for mode in [GameMode::Menu, GameMode::Playing, GameMode::GameOver] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
            assert_eq!(serde_json::from_str::<GameMode>(&json).unwrap(), mode);
        }
        assert_eq!(serde_json::to_string(&GameMode::GameOver).unwrap(), "\"game-over\"");
    }

    #[test]
    fn test_new_session_in_menu() {
        let state = GameState::new(Difficulty::Hard, Playfield::default(), 1).unwrap();
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.lives, 3);
        assert!(state.shapes.is_empty());
    }

    #[test]
    fn test_rejects_bad_playfield() {
        let zero = Playfield::new(0.0, 600.0);
        assert!(matches!(
            GameState::new(Difficulty::Normal, zero, 1),
            Err(SessionError::InvalidPlayfield { .. })
        ));

        let nan = Playfield::new(800.0, f32::NAN);
        assert!(matches!(
            GameState::new(Difficulty::Normal, nan, 1),
            Err(SessionError::InvalidPlayfield { .. })
        ));

        let narrow = Playfield::new(60.0, 600.0);
        assert!(matches!(
            GameState::new(Difficulty::Normal, narrow, 1),
            Err(SessionError::PlayfieldTooNarrow { .. })
        ));
    }

    #[test]
    fn test_spawn_within_bounds() {
        let mut state = playing(Difficulty::Normal);
        let (min_size, max_size) = (25.0, 45.0);
        for _ in 0..500 {
            let shape = state.spawn_shape().clone();
            assert!(shape.size >= min_size && shape.size < max_size);
            assert!(shape.pos.x >= shape.size);
            assert!(shape.pos.x <= state.playfield.width - shape.size);
            assert_eq!(shape.pos.y, -shape.size);
            assert!(shape.speed >= 1.0 && shape.speed < 3.0);
        }
    }

    #[test]
    fn test_spawn_ids_increase() {
        let mut state = playing(Difficulty::Easy);
        let a = state.spawn_shape().id;
        let b = state.spawn_shape().id;
        assert!(b > a);
    }

    #[test]
    fn test_speed_fixed_at_spawn() {
        let mut state = playing(Difficulty::Normal);
        state.speed_multiplier = 2.0;
        let speed = state.spawn_shape().speed;
        assert!((2.0..6.0).contains(&speed));

        state.score = 1000;
        state.refresh_difficulty();
        assert_eq!(state.shapes[0].speed, speed);
    }

    #[test]
    fn test_particle_lifecycle() {
        let mut state = playing(Difficulty::Normal);
        state.spawn_burst(Vec2::new(100.0, 100.0), ShapeKind::Square.color());
        assert_eq!(state.particles.len(), BURST_PARTICLES);

        let mut p = state.particles[0].clone();
        assert_eq!(p.opacity(), 1.0);
        let vy = p.vel.y;
        p.update();
        assert!((p.vel.y - (vy + PARTICLE_GRAVITY)).abs() < 1e-6);
        assert_eq!(p.life, PARTICLE_LIFETIME - 1);
        for _ in 0..PARTICLE_LIFETIME {
            p.update();
        }
        assert!(p.is_expired());
        assert_eq!(p.opacity(), 0.0);
    }

    #[test]
    fn test_start_resets() {
        let mut state = playing(Difficulty::Normal);
        state.score = 120;
        state.lives = 1;
        state.spawn_shape();
        state.spawn_burst(Vec2::ZERO, "#fff");
        state.mode = GameMode::GameOver;

        state.restart(9).unwrap();
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, Difficulty::Normal.initial_lives());
        assert!(state.shapes.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.speed_multiplier, 1.0);
    }

    #[test]
    fn test_return_to_menu() {
        let mut state = playing(Difficulty::Easy);
        state.return_to_menu();
        assert_eq!(state.mode, GameMode::Menu);
    }
}
