//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; subsystems take
//! it by `&mut` and nothing keeps references into it between ticks.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Circle};
use crate::tuning::{EnemyTuning, PlayerTuning, Tuning, WeaponTuning};

/// Why the simulation is paused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseKind {
    /// Toggled by the player, resumes on the next toggle
    Manual,
    /// Player health ran out; only a restart leaves this state
    GameOver,
}

/// Current phase of the simulation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused(PauseKind),
}

impl GamePhase {
    pub fn is_running(self) -> bool {
        self == GamePhase::Running
    }

    pub fn is_game_over(self) -> bool {
        self == GamePhase::Paused(PauseKind::GameOver)
    }
}

/// Sprint resource: drains while sprinting, recharges while idle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sprint {
    pub current: f32,
    pub max: f32,
    /// Units per second, used for both recharge and drain
    pub recharge_rate: f32,
    /// Acceleration and speed-cap multiplier while active
    pub multiplier: f32,
    pub active: bool,
}

impl Sprint {
    /// Speed multiplier for the current sprint state
    #[inline]
    pub fn factor(&self) -> f32 {
        if self.active { self.multiplier } else { 1.0 }
    }

    /// Remove `amount`, never going below zero
    pub fn drain(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Add `amount`, never going above max
    pub fn recharge(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Facing state, smoothed toward a target bearing each tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aim {
    /// Current looking angle (radians)
    pub looking: f32,
    /// Last chosen target bearing, kept when nothing new is available
    pub target: f32,
}

/// Weapon stats and fire-rate timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: f32,
    pub range: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_size: Vec2,
    /// Simulation time of the last shot
    pub last_fired: Option<f64>,
}

impl Weapon {
    pub fn from_tuning(t: &WeaponTuning) -> Self {
        Self {
            damage: t.damage,
            range: t.range,
            fire_rate: t.fire_rate,
            projectile_speed: t.projectile_speed,
            projectile_size: Vec2::new(t.projectile_width, t.projectile_height),
            last_fired: None,
        }
    }

    /// Whether the cooldown has elapsed at simulation time `now`
    pub fn ready(&self, now: f64) -> bool {
        self.last_fired
            .is_none_or(|t| now - t >= f64::from(self.fire_rate))
    }
}

/// The player-controlled square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    /// Game units per tick
    pub vel: Vec2,
    /// Velocity gained per second of held input
    pub acceleration: f32,
    pub max_speed: f32,
    /// Per-reference-frame velocity retention on idle axes
    pub friction: f32,
    pub health: f32,
    pub max_health: f32,
    pub sprint: Sprint,
    pub aim: Aim,
    pub weapon: Weapon,
}

impl Player {
    /// Player centered in the world with full health and sprint
    pub fn new(tuning: &Tuning) -> Self {
        let PlayerTuning {
            size,
            acceleration,
            max_speed,
            friction,
            health,
        } = tuning.player;
        let size = Vec2::splat(size);
        let world_center = Vec2::new(tuning.world.width, tuning.world.height) * 0.5;
        Self {
            bounds: Aabb::centered(world_center, size),
            vel: Vec2::ZERO,
            acceleration,
            max_speed,
            friction,
            health,
            max_health: health,
            sprint: Sprint {
                current: tuning.sprint.max,
                max: tuning.sprint.max,
                recharge_rate: tuning.sprint.recharge_rate,
                multiplier: tuning.sprint.multiplier,
                active: false,
            },
            aim: Aim::default(),
            weapon: Weapon::from_tuning(&tuning.weapon),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Current speed cap, including the sprint multiplier
    #[inline]
    pub fn speed_cap(&self) -> f32 {
        self.max_speed * self.sprint.factor()
    }

    /// Circle covering the weapon's reach
    pub fn range_circle(&self) -> Circle {
        Circle::new(self.center(), self.weapon.range)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage, keeping health within [0, max]
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }
}

/// A pursuing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub bounds: Aabb,
    /// Last pursuit step, clamped to `max_speed` per axis (display only)
    pub vel: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// Distance moved toward the player per tick
    pub speed: f32,
    pub max_speed: f32,
    /// Box touches the weapon range circle this tick (display only)
    pub in_range: bool,
    /// RGBA tint for the renderer
    pub color: u32,
}

impl Enemy {
    /// Enemy from the spawn template, top-left corner at `pos`
    pub fn new(id: u32, pos: Vec2, t: &EnemyTuning) -> Self {
        Self {
            id,
            bounds: Aabb::new(pos, Vec2::splat(t.size)),
            vel: Vec2::ZERO,
            health: t.health,
            max_health: t.health,
            speed: t.speed,
            max_speed: t.max_speed,
            in_range: false,
            color: t.color,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub bounds: Aabb,
    pub vel: Vec2,
    /// Firing angle, frozen at creation
    pub angle: f32,
    /// Units per tick, including the firing-speed boost
    pub speed: f32,
    pub damage: f32,
    /// Travel budget, including the range boost
    pub range: f32,
    pub distance_traveled: f32,
}

impl Bullet {
    pub fn expired(&self) -> bool {
        self.distance_traveled > self.range
    }
}

/// RNG state wrapper for serialization
///
/// Every draw site asks for the next stream, so replays with the same seed
/// reproduce the same spawns without storing generator internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Generator for the next stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.stream);
        self.stream = self.stream.wrapping_add(1);
        rng
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub seed: u64,
    pub rng_state: RngState,
    pub phase: GamePhase,
    /// Simulated seconds while running
    pub time: f64,
    pub time_ticks: u64,
    /// Playable area, anchored at the origin
    pub world: Aabb,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub kills: u32,
    next_id: u32,
}

impl GameState {
    /// Fresh state for `tuning`, seeded for deterministic spawning
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            phase: GamePhase::Running,
            time: 0.0,
            time_ticks: 0,
            world: Aabb::new(
                Vec2::ZERO,
                Vec2::new(tuning.world.width, tuning.world.height),
            ),
            player: Player::new(tuning),
            enemies: Vec::new(),
            bullets: Vec::new(),
            kills: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an enemy built from the template at `pos`, returning its id
    pub fn add_enemy(&mut self, pos: Vec2, template: &EnemyTuning) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy::new(id, pos, template));
        id
    }

    /// Read-only view for renderers and HUDs
    pub fn snapshot(&self) -> Snapshot {
        let p = &self.player;
        Snapshot {
            phase: self.phase,
            time: self.time,
            kills: self.kills,
            player: PlayerView {
                pos: p.bounds.pos,
                size: p.bounds.size,
                vel: p.vel,
                speed: p.vel.length(),
                health: p.health,
                max_health: p.max_health,
                sprint: p.sprint.current,
                sprint_max: p.sprint.max,
                sprinting: p.sprint.active,
                looking_angle: p.aim.looking,
                weapon_range: p.weapon.range,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    pos: e.bounds.pos,
                    size: e.bounds.size,
                    health: e.health,
                    max_health: e.max_health,
                    in_range: e.in_range,
                    color: e.color,
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView {
                    id: b.id,
                    pos: b.bounds.pos,
                    size: b.bounds.size,
                    angle: b.angle,
                })
                .collect(),
        }
    }
}

/// Player fields exposed to the renderer/HUD
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub sprint: f32,
    pub sprint_max: f32,
    pub sprinting: bool,
    pub looking_angle: f32,
    pub weapon_range: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub in_range: bool,
    pub color: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub angle: f32,
}

/// Per-frame state handed to external renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub time: f64,
    pub kills: u32,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
}
