//! Render-ready snapshot of a session
//!
//! Everything a presentation layer needs to draw one frame, with no
//! references back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GameMode, GameState, ShapeKind};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u32,
    /// Speed multiplier formatted for display, e.g. `"1.5x"`
    pub speed: String,
    pub mode: GameMode,
}

/// One drawable item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Sprite {
    Shape {
        kind: ShapeKind,
        pos: Vec2,
        size: f32,
        color: &'static str,
    },
    Particle {
        pos: Vec2,
        size: f32,
        color: &'static str,
        /// Remaining lifetime fraction, used as alpha
        opacity: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub hud: Hud,
    /// Shapes oldest first, then particles, in draw order
    pub sprites: Vec<Sprite>,
}

/// Display form of the speed multiplier
pub fn format_speed(multiplier: f32) -> String {
    format!("{:.1}x", multiplier)
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let shapes = state.shapes.iter().map(|s| Sprite::Shape {
            kind: s.kind,
            pos: s.pos,
            size: s.size,
            color: s.color(),
        });
        let particles = state.particles.iter().map(|p| Sprite::Particle {
            pos: p.pos,
            size: p.size,
            color: p.color,
            opacity: p.opacity(),
        });

        Self {
            width: state.playfield.width,
            height: state.playfield.height,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                speed: format_speed(state.speed_multiplier),
                mode: state.mode,
            },
            sprites: shapes.chain(particles).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn shape_count(&self) -> usize {
        self.sprites
            .iter()
            .filter(|s| matches!(s, Sprite::Shape { .. }))
            .count()
    }
}
