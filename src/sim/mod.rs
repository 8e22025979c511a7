//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each entity list)
//! - No rendering or platform dependencies
//!
//! Per-tick ordering is load-bearing: integrate physics, resolve static
//! collisions, resolve dynamic overlaps, apply combat/pickup effects,
//! evaluate terminal conditions, then events are available to drain.

pub mod body;
pub mod collision;
pub mod progress;
pub mod state;
pub mod tick;

pub use body::{Aabb, KinematicBody};
pub use collision::resolve_static;
pub use state::{
    Enemy, Fireball, FireballKind, GameEvent, GamePhase, GameState, Level, MovingPlatform, Pickup,
    PickupKind, Player, PlayerStats,
};
pub use tick::{TickInput, tick};
