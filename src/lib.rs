//! Cube Arena - a top-down arena shooter simulation
//!
//! Core modules:
//! - `math`: 2D vector helpers on top of `glam::Vec2`
//! - `sim`: Deterministic simulation (movement, spawning, combat, game state)
//! - `tuning`: Data-driven game balance and rule policies
//! - `game_loop`: Host-side driver (frame clock, spawn timer, restart)
//!
//! Rendering, input capture and HUD layout live outside this crate. The host
//! feeds a [`sim::TickInput`] each frame and reads back a [`sim::Snapshot`].

pub mod game_loop;
pub mod math;
pub mod sim;
pub mod tuning;

pub use game_loop::GameLoop;
pub use math::{Vec2Ext, Vector2};
pub use tuning::{Tuning, TuningError};

/// Default balance constants (game units, seconds, 60 Hz reference frames)
pub mod consts {
    /// Nominal frame length used for the first frame and for per-frame rates
    pub const NOMINAL_DT: f32 = 1.0 / 60.0;
    /// Frame rate the per-tick constants were balanced for
    pub const REFERENCE_HZ: f32 = 60.0;
    /// Largest frame delta the loop will simulate in one tick
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 100.0;
    pub const WORLD_HEIGHT: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 5.0;
    /// Velocity gained per reference frame while a direction is held
    pub const PLAYER_ACCEL_PER_FRAME: f32 = 0.2;
    pub const PLAYER_MAX_SPEED: f32 = 0.45;
    pub const PLAYER_FRICTION: f32 = 0.40;
    pub const PLAYER_HEALTH: f32 = 100.0;

    /// Sprint resource
    pub const SPRINT_MAX: f32 = 100.0;
    /// Units per second (recharge while idle, drain per moving axis while sprinting)
    pub const SPRINT_RECHARGE_RATE: f32 = 10.0;
    pub const SPRINT_MULTIPLIER: f32 = 1.5;

    /// Weapon defaults
    pub const BULLET_DAMAGE: f32 = 10.0;
    pub const BULLET_RANGE: f32 = 25.0;
    /// Seconds between shots
    pub const FIRE_RATE: f32 = 0.5;
    pub const SHOT_SPEED: f32 = 0.7;
    pub const BULLET_WIDTH: f32 = 2.0;
    pub const BULLET_HEIGHT: f32 = 1.0;
    /// Range multiplier per unit of player speed (|dx| + |dy|) at firing time
    pub const RANGE_BOOST_FACTOR: f32 = 0.75;
    /// Max angle between aim and target for auto-fire (radians, ~5 degrees)
    pub const AIM_TOLERANCE: f32 = 5.0 * std::f32::consts::PI / 180.0;
    /// First-order low-pass factor applied to the looking angle each tick
    pub const AIM_SMOOTHING: f32 = 0.5;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 5.0;
    pub const ENEMY_HEALTH: f32 = 10.0;
    pub const ENEMY_SPEED: f32 = 0.1;
    pub const ENEMY_MAX_SPEED: f32 = 0.2;
    /// Damage an enemy takes for each tick it touches the player
    pub const ENEMY_CONTACT_DAMAGE: f32 = 5.0;
    /// RGBA, semi-transparent yellow
    pub const ENEMY_COLOR: u32 = 0xFFFF_0080;

    /// Spawning
    pub const ENEMY_LIMIT: usize = 3;
    /// Seconds between spawn attempts
    pub const SPAWN_INTERVAL: f32 = 0.5;
    pub const SPAWN_MARGIN: f32 = 2.0;
    pub const SPAWN_ATTEMPTS: u32 = 8;
    /// Side length of the probe used to locate the player's quadrant
    pub const QUADRANT_PROBE: f32 = 0.5;
    /// Upper bound on spawn cycles processed in a single frame
    pub const MAX_SPAWNS_PER_FRAME: u32 = 4;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    PI - (PI - angle).rem_euclid(TAU)
}

/// Shortest signed rotation from `from` to `to`, in (-π, π]
#[inline]
pub fn angle_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}
