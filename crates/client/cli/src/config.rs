//! Environment overrides for the headless driver.
use std::env;
use std::path::{Path, PathBuf};

use skirmish::SessionConfig;

/// Settings given on the command line.
#[derive(Clone, Debug, Default)]
pub struct Flags {
    pub session_file: Option<PathBuf>,
    pub max_frames: Option<usize>,
    pub show_frames: bool,
}

/// Effective settings for one run.
#[derive(Clone, Debug)]
pub struct Settings {
    pub session: SessionConfig,
    pub show_frames: bool,
}

/// Settings read from the process environment. Command-line flags win.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub session_file: Option<PathBuf>,
    pub max_frames: Option<usize>,
    pub show_frames: bool,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_SESSION` - Session TOML file (default: built-in session)
    /// - `SKIRMISH_MAX_FRAMES` - Frame budget per turn (default: from the session)
    /// - `SKIRMISH_SHOW_FRAMES` - Print every frame, not just settled turns (default: false)
    pub fn from_env() -> Self {
        let mut config = Self {
            session_file: env::var("SKIRMISH_SESSION").ok().map(PathBuf::from),
            ..Self::default()
        };

        if let Some(frames) = read_env::<usize>("SKIRMISH_MAX_FRAMES") {
            config.max_frames = Some(frames.max(1));
        }

        if let Some(enable) = read_env::<bool>("SKIRMISH_SHOW_FRAMES") {
            config.show_frames = enable;
        } else if env::var("SKIRMISH_SHOW_FRAMES").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.show_frames = true;
        }

        config
    }

    /// Session file to load. The flag wins over `SKIRMISH_SESSION`.
    pub fn session_file<'a>(&'a self, flags: &'a Flags) -> Option<&'a Path> {
        flags
            .session_file
            .as_deref()
            .or(self.session_file.as_deref())
    }

    /// Layers flags over the environment over the loaded `session`.
    ///
    /// The frame budget is clamped to at least one frame.
    pub fn resolve(&self, flags: &Flags, mut session: SessionConfig) -> Settings {
        if let Some(frames) = flags.max_frames.or(self.max_frames) {
            session.max_frames = frames.max(1);
        }
        Settings {
            session,
            show_frames: flags.show_frames || self.show_frames,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
