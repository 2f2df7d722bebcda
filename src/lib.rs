//! Shape Catch - click the falling shapes before they hit the floor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, hit testing, difficulty)
//! - `renderer`: Render-ready scene snapshots and the browser canvas painter
//! - `platform`: Frame clock driving fixed ticks from display callbacks
//! - `settings`: Player preferences and playfield configuration

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SessionError, SettingsError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the clock (tab switches, debugger stalls)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default playfield size in canvas pixels
    pub const DEFAULT_PLAYFIELD_WIDTH: f32 = 800.0;
    pub const DEFAULT_PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Particles per hit burst
    pub const BURST_PARTICLES: usize = 8;
    /// Particle lifetime in ticks
    pub const PARTICLE_LIFETIME: u32 = 30;
    /// Downward acceleration added to particle vy each tick
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    /// Full width of the initial velocity range per axis
    pub const PARTICLE_SPREAD: f32 = 10.0;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 6.0;
}
