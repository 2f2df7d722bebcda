//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the session by exactly one frame. The
//! presentation layer decides the cadence; nothing here reads a clock.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::pick_shape;
use super::state::{GameMode, GameState, ShapeKind};

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ShapeSpawned { id: u32, kind: ShapeKind },
    ShapeMissed { id: u32, lives_left: u32 },
    GameOver { final_score: u64 },
}

/// Events produced by a single tick, in order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn lives_lost(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::ShapeMissed { .. }))
            .count()
    }

    pub fn game_over(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. }))
    }
}

/// Result of a successful click
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub id: u32,
    pub kind: ShapeKind,
    pub points: u32,
    pub pos: Vec2,
    /// Score after the hit was applied
    pub score: u64,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) -> TickReport {
    let mut report = TickReport::default();

    if state.mode != GameMode::Playing {
        return report;
    }

    state.time_ticks += 1;

    // Spawn check: one Bernoulli draw per tick
    let roll: f32 = state.rng().random();
    if roll < state.spawn_probability {
        let shape = state.spawn_shape();
        log::debug!(
            "Spawned {} #{} at x={:.1} speed={:.2}",
            shape.kind.as_str(),
            shape.id,
            shape.pos.x,
            shape.speed
        );
        report.events.push(GameEvent::ShapeSpawned {
            id: shape.id,
            kind: shape.kind,
        });
    }

    // Fall and miss detection
    let height = state.playfield.height;
    let mut i = 0;
    while i < state.shapes.len() {
        let shape = &mut state.shapes[i];
        shape.fall();
        if !shape.is_past(height) {
            i += 1;
            continue;
        }

        let missed = state.shapes.remove(i);
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Missed {} #{}, lives={}", missed.kind.as_str(), missed.id, state.lives);
        report.events.push(GameEvent::ShapeMissed {
            id: missed.id,
            lives_left: state.lives,
        });

        if state.lives == 0 {
            state.mode = GameMode::GameOver;
            log::info!("Game over: score={} ticks={}", state.score, state.time_ticks);
            report.events.push(GameEvent::GameOver {
                final_score: state.score,
            });
            // Nothing else moves on the tick that ends the run
            return report;
        }
    }

    // Particles
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| !p.is_expired());

    // Difficulty applies to later spawns only
    state.refresh_difficulty();

    report
}

/// Register a click at playfield coordinate `(x, y)`
///
/// Only the topmost shape under the pointer is consumed. Returns `None`
/// when not playing or when nothing is under the pointer.
pub fn click(state: &mut GameState, x: f32, y: f32) -> Option<Hit> {
    if state.mode != GameMode::Playing {
        return None;
    }

    let index = pick_shape(&state.shapes, Vec2::new(x, y))?;
    let shape = state.shapes.remove(index);
    state.score += u64::from(shape.points());

    if state.particles_enabled {
        state.spawn_burst(shape.pos, shape.color());
    }

    log::debug!(
        "Hit {} #{} (+{}), score={}",
        shape.kind.as_str(),
        shape.id,
        shape.points(),
        state.score
    );

    Some(Hit {
        id: shape.id,
        kind: shape.kind,
        points: shape.points(),
        pos: shape.pos,
        score: state.score,
    })
}
