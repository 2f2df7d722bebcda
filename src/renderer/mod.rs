//! Rendering module
//!
//! `scene` is a pure snapshot usable from any front end (and serialisable to
//! JSON for a JavaScript one). `canvas` paints a scene with the browser's
//! 2D context.

pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use scene::{Hud, Scene, Sprite, format_speed};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
