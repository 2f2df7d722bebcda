//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, cadence chosen by the caller
//! - Seeded RNG only
//! - Stable iteration order (shapes sorted by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::{pick_shape, shape_contains};
pub use difficulty::{Difficulty, TierTuning};
pub use state::{GameMode, GameState, Particle, Playfield, Shape, ShapeKind};
pub use tick::{GameEvent, Hit, TickReport, click, tick};
