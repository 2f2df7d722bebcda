//! Command line for the native headless runner

use std::path::PathBuf;

use clap::Parser;

use crate::error::SettingsError;
use crate::settings::Settings;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "shape-catch",
    version,
    about = "Run a seeded headless Shape Catch session with an autoplay bot"
)]
pub struct Args {
    /// RNG seed; the same seed replays the same session (default: wall clock)
    pub seed: Option<u64>,

    /// JSON settings file (default: built-in settings)
    pub settings: Option<PathBuf>,
}

impl Args {
    /// Explicit seed, or the current time in milliseconds
    pub fn seed_or_now(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
    }

    /// Settings from the given file; a missing or invalid file is an error
    pub fn load_settings(&self) -> Result<Settings, SettingsError> {
        match &self.settings {
            Some(path) => Settings::from_file(path),
            None => Ok(Settings::default()),
        }
    }
}
