//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - State is a flat set of owned records in [`GameState`]
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod input;
pub mod movement;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Circle, circle_circle, rect_circle, rect_rect, resolve_penetration};
pub use input::{HeldKeys, TickInput};
pub use spawn::try_spawn;
pub use state::{
    Bullet, Enemy, GamePhase, GameState, PauseKind, Player, Snapshot, Sprint, Weapon,
};
pub use tick::tick;
