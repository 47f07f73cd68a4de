//! Space Shooter - dodge and shoot falling meteors
//!
//! Core modules:
//! - `sim`: Headless simulation (entities, collisions, round state)
//! - `assets`: Image, font and sound loading
//! - `audio`: Fire-and-forget sound playback
//! - `renderer`: Sprite and overlay drawing
//! - `settings`: Optional JSON configuration

pub mod assets;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window dimensions
    pub const WINDOW_WIDTH: f32 = 1920.0;
    pub const WINDOW_HEIGHT: f32 = 950.0;
    pub const WINDOW_TITLE: &str = "Space Shooter";

    /// Frame rate cap
    pub const TARGET_FPS: f64 = 60.0;
    /// Longest frame the simulation will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Player movement speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Minimum time between shots (ms)
    pub const SHOOT_COOLDOWN_MS: f64 = 400.0;

    /// Laser upward speed (pixels/s)
    pub const LASER_SPEED: f32 = 400.0;

    /// Meteor lifetime before despawn (ms), independent of position
    pub const METEOR_LIFETIME_MS: f64 = 3000.0;
    /// Meteor speed range (pixels/s, inclusive)
    pub const METEOR_MIN_SPEED: u32 = 400;
    pub const METEOR_MAX_SPEED: u32 = 500;
    /// Meteor spin range (degrees/s, inclusive)
    pub const METEOR_MIN_SPIN: u32 = 40;
    pub const METEOR_MAX_SPIN: u32 = 80;
    /// Maximum horizontal drift per unit of downward motion
    pub const METEOR_MAX_DRIFT: f32 = 0.5;
    /// Interval between meteor spawns (ms)
    pub const METEOR_SPAWN_INTERVAL_MS: f64 = 200.0;

    /// Background stars per round
    pub const STAR_COUNT: usize = 20;

    /// Explosion playback rate (frames/s)
    pub const EXPLOSION_FPS: f32 = 20.0;
    /// Number of explosion frames shipped with the game
    pub const EXPLOSION_FRAME_COUNT: usize = 21;
}
