//! Roguebolt - deterministic core for a side-scrolling action platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, combat, game state)
//! - `levels`: Static level geometry tables and the level provider
//! - `upgrades`: Upgrade card catalog and draw logic
//! - `highscores`: Best-effort score/coin persistence
//!
//! Rendering, audio and UI are external consumers: they feed a `TickInput`
//! snapshot into [`sim::tick`] each frame and drain [`sim::GameEvent`]s back
//! out. The core never depends on them completing.

pub mod highscores;
pub mod levels;
pub mod sim;
pub mod upgrades;

pub use highscores::HighScores;
pub use levels::LevelData;
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Game tuning constants
///
/// Coordinates are y-down: gravity is positive, jumps are negative velocity.
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Gravity acceleration (u/s², downward)
    pub const GRAVITY: f32 = 900.0;

    /// Player collision box half-extents (28x28 body)
    pub const PLAYER_HALF: Vec2 = Vec2::new(14.0, 14.0);
    /// Invulnerability window after taking contact damage (seconds)
    pub const INVULN_DURATION: f32 = 1.0;
    /// Horizontal knockback speed applied away from the enemy on contact
    pub const KNOCKBACK_X: f32 = 200.0;
    /// Vertical knockback velocity on contact (upward)
    pub const KNOCKBACK_Y: f32 = -150.0;

    /// Charge accumulator cap (seconds)
    pub const CHARGE_MAX: f32 = 1.0;
    /// Charge fraction above which the released shot is large
    pub const LARGE_CHARGE_THRESHOLD: f32 = 0.6;
    /// Minimum energy required to begin charging / fire a small shot
    pub const SMALL_SHOT_COST: f32 = 5.0;
    /// Energy cost of a large shot
    pub const LARGE_SHOT_COST: f32 = 25.0;
    /// Damage multiplier for a large shot
    pub const LARGE_DAMAGE_MULT: f32 = 3.0;
    /// Fireball spawn offset in front of the player
    pub const SHOT_SPAWN_OFFSET: f32 = 20.0;

    /// Fireball defaults
    pub const FIREBALL_SPEED: f32 = 500.0;
    /// Large fireballs fly at 0.8x the small speed
    pub const FIREBALL_LARGE_SCALE: f32 = 0.8;
    /// Fireball lifetime (seconds)
    pub const FIREBALL_TTL: f32 = 2.0;
    pub const FIREBALL_SMALL_HALF: Vec2 = Vec2::new(8.0, 8.0);
    pub const FIREBALL_LARGE_HALF: Vec2 = Vec2::new(12.0, 12.0);
    /// Margin beyond level bounds before a projectile (or the player) is gone
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 50.0;

    /// Enemy defaults
    pub const ENEMY_HALF: Vec2 = Vec2::new(14.0, 14.0);
    pub const ENEMY_HEALTH: i32 = 30;
    pub const ENEMY_DAMAGE: i32 = 20;
    pub const ENEMY_SPEED: f32 = 80.0;
    /// Death animation window: collider off, body lingers for the effect
    pub const ENEMY_DEATH_DURATION: f32 = 0.3;
    /// Visual damage-flash window (does not gate further damage)
    pub const ENEMY_FLASH_DURATION: f32 = 0.1;

    /// Pickup defaults
    pub const PICKUP_HALF: Vec2 = Vec2::new(12.0, 12.0);
    pub const LIGHTNING_ENERGY: f32 = 20.0;
    pub const HEART_HEALTH: f32 = 50.0;

    /// Exit trigger zone half-extents. Authored exit positions sit the zone's
    /// bottom edge flush with its platform top (center 64 above it).
    pub const EXIT_HALF: Vec2 = Vec2::new(24.0, 64.0);

    /// Scoring
    pub const SCORE_KILL_SMALL: u64 = 100;
    pub const SCORE_KILL_LARGE: u64 = 250;
    pub const SCORE_PICKUP: u64 = 50;
    /// Seconds under which finishing a level still earns a time bonus
    pub const LEVEL_TIME_LIMIT: f32 = 120.0;
    pub const TIME_BONUS_PER_SECOND: u64 = 10;

    /// Number of upgrade cards offered between levels
    pub const CARD_OFFER_COUNT: usize = 3;
}
