//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. Entities are
//! plain data owning a [`KinematicBody`]; the tick drives them uniformly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, KinematicBody};
use crate::consts::*;
use crate::levels::LevelData;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level is being instantiated from its data
    Loading,
    /// Active gameplay
    Playing,
    /// Physics and timers frozen; narrow input set still accepted
    Paused,
    /// Between levels: an upgrade card must be chosen
    CardSelect,
    /// Player died; retry or return to menu
    GameOver,
    /// All levels complete
    Victory,
}

/// Player stat block, persisted by value across levels within a run.
///
/// Invariant after every mutation: `0 <= health <= max_health` and
/// `0 <= energy <= max_energy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub speed: f32,
    pub jump_power: f32,
    pub max_health: f32,
    pub health: f32,
    pub max_energy: f32,
    pub energy: f32,
    pub energy_regen: f32,
    pub damage: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            speed: 300.0,
            jump_power: 580.0,
            max_health: 100.0,
            health: 100.0,
            max_energy: 100.0,
            energy: 100.0,
            energy_regen: 0.0,
            damage: 10.0,
        }
    }
}

impl PlayerStats {
    pub fn take_damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, self.max_health);
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, self.max_health);
    }

    pub fn gain_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).clamp(0.0, self.max_energy);
    }

    /// Deduct `cost` if affordable. No partial spend, no negative energy.
    pub fn spend_energy(&mut self, cost: f32) -> bool {
        if self.energy >= cost {
            self.energy -= cost;
            true
        } else {
            false
        }
    }

    /// Clamp health/energy back under their maxima after an upgrade effect
    /// shrank a maximum.
    pub fn clamp_to_maxima(&mut self) {
        self.health = self.health.clamp(0.0, self.max_health);
        self.energy = self.energy.clamp(0.0, self.max_energy);
    }
}

/// The player entity. Stats live on [`GameState`] so they survive the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub facing_right: bool,
    /// Charge accumulator state; `None` while idle
    pub charge: Option<f32>,
    /// Seconds of contact-damage immunity remaining
    pub invuln_timer: f32,
    /// Set exactly once; suppresses re-triggering death
    pub dead: bool,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            body: KinematicBody::new(spawn, PLAYER_HALF),
            facing_right: true,
            charge: None,
            invuln_timer: 0.0,
            dead: false,
        }
    }

    pub fn invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }
}

/// Patrolling enemy. Spawned airborne and inert; begins patrolling from
/// wherever it first lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: KinematicBody,
    pub health: i32,
    pub damage: i32,
    pub patrol_distance: f32,
    /// Patrol anchor x, recorded at the landing point
    pub anchor_x: f32,
    /// +1.0 right, -1.0 left
    pub dir: f32,
    pub landed: bool,
    /// Visual damage flash; does not gate further damage
    pub flash_timer: f32,
    /// Death animation countdown. `Some` disables the collider immediately;
    /// the enemy is removed when it reaches zero.
    pub dying: Option<f32>,
}

impl Enemy {
    pub fn new(spawn: Vec2, patrol_distance: f32) -> Self {
        Self {
            body: KinematicBody::new(spawn, ENEMY_HALF),
            health: ENEMY_HEALTH,
            damage: ENEMY_DAMAGE,
            patrol_distance,
            anchor_x: spawn.x,
            dir: 1.0,
            landed: false,
            flash_timer: 0.0,
            dying: None,
        }
    }

    /// Collider and behavior are active only while alive.
    pub fn alive(&self) -> bool {
        self.dying.is_none()
    }

    /// Apply damage; returns true iff this hit killed the enemy.
    ///
    /// Damage can stack arbitrarily fast while alive; once dying, further
    /// hits are absorbed upstream because the collider is off.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        debug_assert!(self.alive());
        self.health -= amount;
        self.flash_timer = ENEMY_FLASH_DURATION;
        if self.health <= 0 {
            self.dying = Some(ENEMY_DEATH_DURATION);
            return true;
        }
        false
    }

    /// Set patrol velocity, reversing at patrol bounds or on wall contact.
    pub fn patrol(&mut self) {
        if self.body.blocked_right {
            self.dir = -1.0;
        } else if self.body.blocked_left {
            self.dir = 1.0;
        } else if self.dir > 0.0 && self.body.pos.x >= self.anchor_x + self.patrol_distance {
            self.dir = -1.0;
        } else if self.dir < 0.0 && self.body.pos.x <= self.anchor_x - self.patrol_distance {
            self.dir = 1.0;
        }
        self.body.vel.x = self.dir * ENEMY_SPEED;
    }
}

/// Projectile tier, chosen by hold duration at release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireballKind {
    Small,
    Large,
}

impl FireballKind {
    pub fn speed(&self) -> f32 {
        match self {
            FireballKind::Small => FIREBALL_SPEED,
            FireballKind::Large => FIREBALL_SPEED * FIREBALL_LARGE_SCALE,
        }
    }

    pub fn energy_cost(&self) -> f32 {
        match self {
            FireballKind::Small => SMALL_SHOT_COST,
            FireballKind::Large => LARGE_SHOT_COST,
        }
    }

    pub fn half_extent(&self) -> Vec2 {
        match self {
            FireballKind::Small => FIREBALL_SMALL_HALF,
            FireballKind::Large => FIREBALL_LARGE_HALF,
        }
    }
}

/// Player projectile. No gravity, single-use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fireball {
    pub body: KinematicBody,
    pub kind: FireballKind,
    pub damage: i32,
    /// Seconds of life remaining
    pub ttl: f32,
    /// Consumed by a hit this tick; removed at cleanup
    pub spent: bool,
}

impl Fireball {
    pub fn new(pos: Vec2, direction: f32, kind: FireballKind, damage: i32) -> Self {
        let mut body = KinematicBody::new_floating(pos, kind.half_extent());
        body.vel.x = direction * kind.speed();
        Self {
            body,
            kind,
            damage,
            ttl: FIREBALL_TTL,
            spent: false,
        }
    }

    /// Gone once expired, or past the level bounds by the margin.
    pub fn expired(&self, level_width: f32, level_height: f32) -> bool {
        let p = self.body.pos;
        self.ttl <= 0.0
            || p.x < -OUT_OF_BOUNDS_MARGIN
            || p.x > level_width + OUT_OF_BOUNDS_MARGIN
            || p.y < -OUT_OF_BOUNDS_MARGIN
            || p.y > level_height + OUT_OF_BOUNDS_MARGIN
    }
}

/// Resource pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// +20 energy
    Lightning,
    /// +50 health
    Heart,
}

impl PickupKind {
    pub fn amount(&self) -> f32 {
        match self {
            PickupKind::Lightning => LIGHTNING_ENERGY,
            PickupKind::Heart => HEART_HEALTH,
        }
    }
}

/// Static pickup with a sinusoidal float animation (visual only: the
/// collider stays at the authored position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
    /// Randomized float phase so pickups don't bob in lockstep
    pub float_phase: f32,
    /// Collider disabled synchronously on first contact
    pub collected: bool,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: PickupKind, float_phase: f32) -> Self {
        Self {
            pos,
            kind,
            float_phase,
            collected: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, PICKUP_HALF)
    }

    /// Collect exactly once: the first call disables the collider and
    /// returns the resource kind; later calls are no-ops.
    pub fn try_collect(&mut self) -> Option<PickupKind> {
        if self.collected {
            return None;
        }
        self.collected = true;
        Some(self.kind)
    }

    /// Display-only vertical bob for the presentation layer.
    pub fn display_offset(&self, time: f32) -> f32 {
        let rate = match self.kind {
            PickupKind::Lightning => 2.0,
            PickupKind::Heart => 1.7,
        };
        let range = match self.kind {
            PickupKind::Lightning => 10.0,
            PickupKind::Heart => 8.0,
        };
        (time * rate + self.float_phase).sin() * range
    }
}

/// Vertically oscillating platform. Static for collision purposes but
/// carries riders by its per-tick displacement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub rect: Aabb,
    /// Upper bound of the oscillation (y of the rect center at the top)
    pub origin_y: f32,
    /// Travel distance below `origin_y`
    pub range: f32,
    pub speed: f32,
    pub moving_down: bool,
}

impl MovingPlatform {
    pub fn new(rect: Aabb, range: f32, speed: f32, start_down: bool) -> Self {
        Self {
            origin_y: rect.center.y,
            rect,
            range,
            speed,
            moving_down: start_down,
        }
    }

    /// Advance the scripted motion; returns the actual displacement applied,
    /// which riders must also receive.
    pub fn step(&mut self, dt: f32) -> f32 {
        let before = self.rect.center.y;
        let dir = if self.moving_down { 1.0 } else { -1.0 };
        let mut y = before + dir * self.speed * dt;
        if y >= self.origin_y + self.range {
            y = self.origin_y + self.range;
            self.moving_down = false;
        } else if y <= self.origin_y {
            y = self.origin_y;
            self.moving_down = true;
        }
        self.rect.center.y = y;
        y - before
    }
}

/// A live level: geometry plus entity collections, owned by the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<Aabb>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub fireballs: Vec<Fireball>,
    pub exit: Aabb,
    pub player: Player,
    /// Simulation-time seconds in this level; pause never advances it
    pub elapsed: f32,
    /// Set on the first terminal trigger; freezes all gameplay processing
    pub frozen: bool,
}

/// Discrete events emitted for the presentation layer (audio, VFX, camera
/// shake, HUD). Drained once per tick; fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { id: u32, name: String },
    PlayerJump,
    PlayerShoot { x: f32, y: f32, direction: f32, kind: FireballKind, damage: i32 },
    EnergyCollected,
    HealthCollected,
    PlayerDamaged { remaining_health: f32 },
    PlayerDeath,
    EnemyKilled { x: f32, y: f32 },
    ExitReached,
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only randomness source in the core
    pub rng: Pcg32,
    /// Level catalog for this run (injectable for tests)
    pub levels: Vec<LevelData>,
    /// Current level number, 1-based
    pub current_level: u32,
    pub stats: PlayerStats,
    /// Applied upgrade ids, in order; never repeats within a run
    pub collected_upgrades: Vec<String>,
    pub score: u64,
    pub phase: GamePhase,
    /// Card ids offered while in `CardSelect`
    pub offered_cards: Vec<String>,
    pub level: Option<Level>,
    /// Debug: suppress player damage and death
    pub god_mode: bool,
    /// Debug: shots cost no energy
    pub unlimited_ammo: bool,
    /// Outgoing event queue, drained by the presentation layer
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new run over the built-in level catalog.
    pub fn new(seed: u64) -> Self {
        Self::with_levels(seed, crate::levels::all_levels())
    }

    /// Start a new run over an injected level catalog.
    pub fn with_levels(seed: u64, levels: Vec<LevelData>) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            levels,
            current_level: 1,
            stats: PlayerStats::default(),
            collected_upgrades: Vec::new(),
            score: 0,
            phase: GamePhase::Loading,
            offered_cards: Vec::new(),
            level: None,
            god_mode: false,
            unlimited_ammo: false,
            events: Vec::new(),
        };
        state.start_level();
        state
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this tick's events, preserving emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_clamp_at_bounds() {
        let mut stats = PlayerStats::default();
        stats.take_damage(150.0);
        assert_eq!(stats.health, 0.0);
        stats.heal(20.0);
        assert_eq!(stats.health, 20.0);
        stats.heal(500.0);
        assert_eq!(stats.health, stats.max_health);

        stats.gain_energy(50.0);
        assert_eq!(stats.energy, stats.max_energy);
        assert!(stats.spend_energy(25.0));
        assert_eq!(stats.energy, 75.0);
        assert!(!stats.spend_energy(100.0));
        assert_eq!(stats.energy, 75.0);
    }

    #[test]
    fn enemy_dies_exactly_on_lethal_hit() {
        let mut enemy = Enemy::new(glam::Vec2::ZERO, 100.0);
        assert!(!enemy.take_damage(10));
        assert!(!enemy.take_damage(10));
        assert!(enemy.take_damage(10));
        assert!(!enemy.alive());
    }

    #[test]
    fn pickup_collects_at_most_once() {
        let mut pickup = Pickup::new(glam::Vec2::ZERO, PickupKind::Lightning, 0.0);
        assert_eq!(pickup.try_collect(), Some(PickupKind::Lightning));
        assert_eq!(pickup.try_collect(), None);
        assert_eq!(pickup.try_collect(), None);
    }

    #[test]
    fn moving_platform_reverses_at_bounds() {
        let rect = Aabb::from_rect(100.0, 300.0, 120.0, 20.0);
        let mut platform = MovingPlatform::new(rect, 60.0, 40.0, true);
        let top = platform.origin_y;

        let mut total = 0.0;
        for _ in 0..1200 {
            total += platform.step(1.0 / 60.0);
            assert!(platform.rect.center.y >= top - 1e-3);
            assert!(platform.rect.center.y <= top + 60.0 + 1e-3);
        }
        // Net displacement stays inside the oscillation band
        assert!(total.abs() <= 60.0 + 1e-3);
    }

    #[test]
    fn enemy_patrol_reverses_at_range_and_walls() {
        let mut enemy = Enemy::new(glam::Vec2::new(500.0, 400.0), 60.0);
        enemy.landed = true;
        enemy.anchor_x = 500.0;
        enemy.dir = 1.0;

        enemy.body.pos.x = 561.0;
        enemy.patrol();
        assert_eq!(enemy.dir, -1.0);
        assert_eq!(enemy.body.vel.x, -ENEMY_SPEED);

        // Wall contact overrides patrol bounds
        enemy.body.blocked_left = true;
        enemy.patrol();
        assert_eq!(enemy.dir, 1.0);
    }
}
