//! Data-driven game balance
//!
//! Every section defaults to the values in [`crate::consts`], and partial JSON
//! files only override the fields they name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive, got {value}")))
    }
}

fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("must be zero or more, got {value}")))
    }
}

/// How much damage the player takes per tick of enemy contact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactDamage {
    /// Damage equals the touching enemy's remaining health
    EnemyHealth,
    /// Constant damage per contact tick
    Fixed(f32),
}

/// How per-tick steps react to variable frame times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameScaling {
    /// Enemy steps, bullet steps and aim smoothing advance a fixed amount per
    /// tick regardless of Δt
    PerTick,
    /// Those steps are scaled as if balanced for 60 ticks per second
    #[serde(rename = "reference_60hz")]
    Reference60Hz,
}

impl FrameScaling {
    /// Multiplier applied to per-tick distances for a tick of `dt` seconds
    pub fn step_scale(self, dt: f32) -> f32 {
        match self {
            FrameScaling::PerTick => 1.0,
            FrameScaling::Reference60Hz => dt * REFERENCE_HZ,
        }
    }

    /// Smoothing factor for a tick of `dt` seconds given the per-tick factor
    pub fn smoothing(self, per_tick: f32, dt: f32) -> f32 {
        match self {
            FrameScaling::PerTick => per_tick,
            FrameScaling::Reference60Hz => 1.0 - (1.0 - per_tick).powf(dt * REFERENCE_HZ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    /// Velocity gained per second while a direction is held
    pub acceleration: f32,
    /// Per-axis speed cap (units per tick) outside sprint
    pub max_speed: f32,
    /// Velocity kept per reference frame on an axis with no input
    pub friction: f32,
    pub health: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: PLAYER_SIZE,
            acceleration: PLAYER_ACCEL_PER_FRAME * REFERENCE_HZ,
            max_speed: PLAYER_MAX_SPEED,
            friction: PLAYER_FRICTION,
            health: PLAYER_HEALTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SprintTuning {
    pub max: f32,
    pub recharge_rate: f32,
    pub multiplier: f32,
}

impl Default for SprintTuning {
    fn default() -> Self {
        Self {
            max: SPRINT_MAX,
            recharge_rate: SPRINT_RECHARGE_RATE,
            multiplier: SPRINT_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub damage: f32,
    pub range: f32,
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub range_boost_factor: f32,
    /// Radians
    pub aim_tolerance: f32,
    pub aim_smoothing: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            damage: BULLET_DAMAGE,
            range: BULLET_RANGE,
            fire_rate: FIRE_RATE,
            projectile_speed: SHOT_SPEED,
            projectile_width: BULLET_WIDTH,
            projectile_height: BULLET_HEIGHT,
            range_boost_factor: RANGE_BOOST_FACTOR,
            aim_tolerance: AIM_TOLERANCE,
            aim_smoothing: AIM_SMOOTHING,
        }
    }
}

/// Template for newly spawned enemies
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub size: f32,
    pub health: f32,
    pub speed: f32,
    pub max_speed: f32,
    /// Damage the enemy takes per tick of contact with the player
    pub contact_damage: f32,
    pub color: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: ENEMY_SIZE,
            health: ENEMY_HEALTH,
            speed: ENEMY_SPEED,
            max_speed: ENEMY_MAX_SPEED,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            color: ENEMY_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Population cap
    pub limit: usize,
    /// Seconds between spawn cycles
    pub interval: f32,
    /// Inset from quadrant edges
    pub margin: f32,
    /// Placement attempts per cycle before giving up
    pub attempts: u32,
    pub probe_size: f32,
    pub max_per_frame: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            limit: ENEMY_LIMIT,
            interval: SPAWN_INTERVAL,
            margin: SPAWN_MARGIN,
            attempts: SPAWN_ATTEMPTS,
            probe_size: QUADRANT_PROBE,
            max_per_frame: MAX_SPAWNS_PER_FRAME,
        }
    }
}

/// Key names per action, compared case-insensitively
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub sprint: String,
    pub fire: String,
    pub pause: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "w".into(),
            down: "s".into(),
            left: "a".into(),
            right: "d".into(),
            sprint: "shift".into(),
            fire: "k".into(),
            pause: "p".into(),
        }
    }
}

/// Rule policies that differ between game variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub contact_damage: ContactDamage,
    pub frame_scaling: FrameScaling,
    /// Keep spawning during a manual pause
    pub spawn_while_paused: bool,
    /// Push overlapping enemies apart after they move
    pub separate_enemies: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            contact_damage: ContactDamage::EnemyHealth,
            frame_scaling: FrameScaling::PerTick,
            spawn_while_paused: true,
            separate_enemies: true,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldTuning,
    pub player: PlayerTuning,
    pub sprint: SprintTuning,
    pub weapon: WeaponTuning,
    pub enemy: EnemyTuning,
    pub spawn: SpawnTuning,
    pub keys: KeyBindings,
    pub rules: Rules,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Check that every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        ensure_positive("world.width", self.world.width)?;
        ensure_positive("world.height", self.world.height)?;

        ensure_positive("player.size", self.player.size)?;
        ensure_non_negative("player.acceleration", self.player.acceleration)?;
        ensure_positive("player.max_speed", self.player.max_speed)?;
        if !(0.0..=1.0).contains(&self.player.friction) {
            return Err(invalid("player.friction", "must be within [0, 1]"));
        }
        ensure_positive("player.health", self.player.health)?;
        if self.player.size > self.world.width || self.player.size > self.world.height {
            return Err(invalid("player.size", "player does not fit in the world"));
        }

        ensure_non_negative("sprint.max", self.sprint.max)?;
        ensure_non_negative("sprint.recharge_rate", self.sprint.recharge_rate)?;
        if self.sprint.multiplier < 1.0 || !self.sprint.multiplier.is_finite() {
            return Err(invalid("sprint.multiplier", "must be at least 1"));
        }

        ensure_non_negative("weapon.damage", self.weapon.damage)?;
        ensure_positive("weapon.range", self.weapon.range)?;
        ensure_non_negative("weapon.fire_rate", self.weapon.fire_rate)?;
        ensure_positive("weapon.projectile_speed", self.weapon.projectile_speed)?;
        ensure_positive("weapon.projectile_width", self.weapon.projectile_width)?;
        ensure_positive("weapon.projectile_height", self.weapon.projectile_height)?;
        ensure_non_negative("weapon.range_boost_factor", self.weapon.range_boost_factor)?;
        ensure_non_negative("weapon.aim_tolerance", self.weapon.aim_tolerance)?;
        if !(0.0..=1.0).contains(&self.weapon.aim_smoothing) {
            return Err(invalid("weapon.aim_smoothing", "must be within [0, 1]"));
        }

        ensure_positive("enemy.size", self.enemy.size)?;
        ensure_positive("enemy.health", self.enemy.health)?;
        ensure_non_negative("enemy.speed", self.enemy.speed)?;
        ensure_non_negative("enemy.max_speed", self.enemy.max_speed)?;
        ensure_non_negative("enemy.contact_damage", self.enemy.contact_damage)?;

        ensure_positive("spawn.interval", self.spawn.interval)?;
        ensure_non_negative("spawn.margin", self.spawn.margin)?;
        ensure_positive("spawn.probe_size", self.spawn.probe_size)?;
        if self.spawn.attempts == 0 {
            return Err(invalid("spawn.attempts", "must be at least 1"));
        }
        let quadrant_w = self.world.width / 2.0;
        let quadrant_h = self.world.height / 2.0;
        let needed = self.enemy.size + 2.0 * self.spawn.margin;
        if needed > quadrant_w || needed > quadrant_h {
            return Err(invalid(
                "spawn.margin",
                "enemy plus margins does not fit inside a quadrant",
            ));
        }

        if let ContactDamage::Fixed(amount) = self.rules.contact_damage {
            ensure_non_negative("rules.contact_damage", amount)?;
        }

        let keys = [
            ("keys.up", &self.keys.up),
            ("keys.down", &self.keys.down),
            ("keys.left", &self.keys.left),
            ("keys.right", &self.keys.right),
            ("keys.sprint", &self.keys.sprint),
            ("keys.fire", &self.keys.fire),
            ("keys.pause", &self.keys.pause),
        ];
        for (field, key) in keys {
            if key.trim().is_empty() {
                return Err(invalid(field, "key binding is empty"));
            }
        }

        Ok(())
    }
}
