//! Fixed-order simulation tick
//!
//! Advances one level by one timestep. The in-tick ordering is a contract:
//! entity intent, platform motion, integration, static resolution, dynamic
//! overlaps with their effects, then terminal conditions. Checking terminal
//! conditions any earlier produces one-tick-stale behavior.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::body::Aabb;
use super::collision::{resolve_static, standing_on};
use super::state::{Fireball, FireballKind, GameEvent, GamePhase, GameState, Level, PlayerStats};
use crate::consts::*;

/// Normalized input snapshot for a single tick.
///
/// The core is agnostic to the physical device; `fire_just_released` is an
/// edge, the rest are level states sampled by the host each frame.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub fire_held: bool,
    pub fire_just_released: bool,
    /// Pause toggle request (edge)
    pub pause: bool,
}

/// Advance the game state by one timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Pause toggle: re-entrant safe, only meaningful in gameplay phases
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }
    if state.phase != GamePhase::Playing {
        return;
    }

    let mut exit_hit = false;
    let mut fell_out = false;

    {
        let GameState {
            rng,
            stats,
            level,
            score,
            god_mode,
            unlimited_ammo,
            events,
            ..
        } = state;
        let Some(level) = level.as_mut() else {
            return;
        };
        if level.frozen {
            return;
        }

        level.elapsed += dt;

        update_player(level, stats, input, *unlimited_ammo, events, dt);
        update_enemies(level, dt);
        let platform_deltas = step_platforms(level, dt);
        integrate_and_resolve(level, dt);
        land_enemies(level, rng);
        carry_riders(level, &platform_deltas);

        resolve_fireball_hits(level, score, events);
        resolve_contact_damage(level, stats, *god_mode, events);
        collect_pickups(level, stats, score, events);

        exit_hit = level.player.body.aabb().overlaps(&level.exit);
        fell_out = level.player.body.pos.y > level.height + OUT_OF_BOUNDS_MARGIN;

        cleanup(level);
    }

    // Terminal conditions last; the exit freeze wins over a same-tick death.
    if exit_hit {
        state.push_event(GameEvent::ExitReached);
        state.complete_level();
    } else if fell_out || state.stats.health <= 0.0 {
        state.on_player_death();
    }
}

/// Input response, jump, charge-shot handling and energy regen.
fn update_player(
    level: &mut Level,
    stats: &mut PlayerStats,
    input: &TickInput,
    unlimited_ammo: bool,
    events: &mut Vec<GameEvent>,
    dt: f32,
) {
    let Level {
        player, fireballs, ..
    } = level;

    if player.invuln_timer > 0.0 {
        player.invuln_timer = (player.invuln_timer - dt).max(0.0);
    }

    // Horizontal velocity is set directly: instant response, no friction
    if input.move_left {
        player.body.vel.x = -stats.speed;
        player.facing_right = false;
    } else if input.move_right {
        player.body.vel.x = stats.speed;
        player.facing_right = true;
    } else {
        player.body.vel.x = 0.0;
    }

    // Jump only from resting contact; no double-jump
    if input.jump && player.body.on_floor {
        player.body.vel.y = -stats.jump_power;
        events.push(GameEvent::PlayerJump);
    }

    // Charge accumulates while held, capped; begins only with enough energy
    // for at least a small shot
    if input.fire_held && player.charge.is_none() && stats.energy >= SMALL_SHOT_COST {
        player.charge = Some(0.0);
    }
    if let Some(charge) = player.charge.as_mut() {
        *charge = (*charge + dt).min(CHARGE_MAX);
    }
    if input.fire_just_released {
        if let Some(charge) = player.charge.take() {
            let kind = if charge / CHARGE_MAX > LARGE_CHARGE_THRESHOLD {
                FireballKind::Large
            } else {
                FireballKind::Small
            };
            let cost = if unlimited_ammo { 0.0 } else { kind.energy_cost() };
            // Insufficient energy cancels the shot silently
            if stats.spend_energy(cost) {
                let direction = if player.facing_right { 1.0 } else { -1.0 };
                let mult = match kind {
                    FireballKind::Small => 1.0,
                    FireballKind::Large => LARGE_DAMAGE_MULT,
                };
                let damage = (stats.damage * mult).round() as i32;
                let pos = player.body.pos + Vec2::new(direction * SHOT_SPAWN_OFFSET, 0.0);
                fireballs.push(Fireball::new(pos, direction, kind, damage));
                events.push(GameEvent::PlayerShoot {
                    x: pos.x,
                    y: pos.y,
                    direction,
                    kind,
                    damage,
                });
            }
        }
    }

    if stats.energy_regen > 0.0 && stats.energy < stats.max_energy {
        stats.gain_energy(stats.energy_regen * dt);
    }
}

/// Enemy timers and patrol intent. Dying enemies have physics disabled and
/// only run down their removal timer.
fn update_enemies(level: &mut Level, dt: f32) {
    for enemy in &mut level.enemies {
        if enemy.flash_timer > 0.0 {
            enemy.flash_timer = (enemy.flash_timer - dt).max(0.0);
        }
        if let Some(timer) = enemy.dying.as_mut() {
            *timer -= dt;
            continue;
        }
        if enemy.landed {
            enemy.patrol();
        }
    }
}

/// Advance scripted platform motion; returns per-platform y displacement.
fn step_platforms(level: &mut Level, dt: f32) -> Vec<f32> {
    level
        .moving_platforms
        .iter_mut()
        .map(|platform| platform.step(dt))
        .collect()
}

/// Gravity + velocity integration, then static collision resolution.
/// Fireballs fly through geometry and only age here.
fn integrate_and_resolve(level: &mut Level, dt: f32) {
    let solids: Vec<Aabb> = level
        .platforms
        .iter()
        .copied()
        .chain(level.moving_platforms.iter().map(|p| p.rect))
        .collect();

    level.player.body.integrate(dt);
    resolve_static(&mut level.player.body, &solids);
    clamp_to_world(&mut level.player.body, level.width);

    for enemy in &mut level.enemies {
        if !enemy.alive() {
            continue;
        }
        enemy.body.integrate(dt);
        resolve_static(&mut enemy.body, &solids);
        clamp_to_world(&mut enemy.body, level.width);
    }

    for fireball in &mut level.fireballs {
        fireball.body.integrate(dt);
        fireball.ttl -= dt;
    }
}

/// The level's side edges act as walls. Bottom stays open: falling out is
/// the out-of-bounds death, handled by the terminal check.
fn clamp_to_world(body: &mut super::body::KinematicBody, width: f32) {
    if body.pos.x < body.half.x {
        body.pos.x = body.half.x;
        body.vel.x = 0.0;
        body.blocked_left = true;
    } else if body.pos.x > width - body.half.x {
        body.pos.x = width - body.half.x;
        body.vel.x = 0.0;
        body.blocked_right = true;
    }
}

/// Dormant enemies begin patrolling from wherever they first rest, in a
/// randomly chosen initial direction.
fn land_enemies(level: &mut Level, rng: &mut Pcg32) {
    for enemy in &mut level.enemies {
        if enemy.alive() && !enemy.landed && enemy.body.on_floor {
            enemy.landed = true;
            enemy.anchor_x = enemy.body.pos.x;
            enemy.dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        }
    }
}

/// Entities resting on a moving platform follow its displacement.
fn carry_riders(level: &mut Level, deltas: &[f32]) {
    let Level {
        player,
        enemies,
        moving_platforms,
        ..
    } = level;

    for (platform, &delta) in moving_platforms.iter().zip(deltas) {
        if delta == 0.0 {
            continue;
        }
        if standing_on(&player.body.aabb(), &platform.rect) {
            player.body.pos.y = platform.rect.top() - player.body.half.y;
            player.body.on_floor = true;
        }
        for enemy in enemies.iter_mut() {
            if enemy.alive() && standing_on(&enemy.body.aabb(), &platform.rect) {
                enemy.body.pos.y = platform.rect.top() - enemy.body.half.y;
                enemy.body.on_floor = true;
            }
        }
    }
}

/// Projectile vs enemy overlaps, each pair processed independently.
///
/// Lethality is pre-checked against the enemy's health at the instant of
/// this overlap: it selects the kill score (large shots are worth more)
/// before the damage is applied. The projectile is consumed by its first
/// hit; no pass-through.
fn resolve_fireball_hits(level: &mut Level, score: &mut u64, events: &mut Vec<GameEvent>) {
    let Level {
        fireballs, enemies, ..
    } = level;

    for fireball in fireballs.iter_mut() {
        if fireball.spent {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if !enemy.alive() || !fireball.body.aabb().overlaps(&enemy.body.aabb()) {
                continue;
            }
            let lethal = enemy.health <= fireball.damage;
            enemy.take_damage(fireball.damage);
            if lethal {
                *score += match fireball.kind {
                    FireballKind::Small => SCORE_KILL_SMALL,
                    FireballKind::Large => SCORE_KILL_LARGE,
                };
                events.push(GameEvent::EnemyKilled {
                    x: enemy.body.pos.x,
                    y: enemy.body.pos.y,
                });
            }
            fireball.spent = true;
            break;
        }
    }
}

/// Player vs enemy contact: damage, knockback away from the enemy, and the
/// invulnerability window that gates repeated contact.
fn resolve_contact_damage(
    level: &mut Level,
    stats: &mut PlayerStats,
    god_mode: bool,
    events: &mut Vec<GameEvent>,
) {
    if god_mode {
        return;
    }
    let Level {
        player, enemies, ..
    } = level;

    for enemy in enemies.iter() {
        if !enemy.alive() || !player.body.aabb().overlaps(&enemy.body.aabb()) {
            continue;
        }
        if player.invulnerable() {
            continue;
        }
        stats.take_damage(enemy.damage as f32);
        events.push(GameEvent::PlayerDamaged {
            remaining_health: stats.health,
        });
        player.body.vel.x = if player.body.pos.x < enemy.body.pos.x {
            -KNOCKBACK_X
        } else {
            KNOCKBACK_X
        };
        player.body.vel.y = KNOCKBACK_Y;
        player.invuln_timer = INVULN_DURATION;
    }
}

/// Pickup collection: the collider is disabled synchronously on first
/// contact, so a second overlap in the same tick is a no-op.
fn collect_pickups(
    level: &mut Level,
    stats: &mut PlayerStats,
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) {
    let Level {
        player, pickups, ..
    } = level;

    for pickup in pickups.iter_mut() {
        if !player.body.aabb().overlaps(&pickup.aabb()) {
            continue;
        }
        if let Some(kind) = pickup.try_collect() {
            match kind {
                super::state::PickupKind::Lightning => {
                    stats.gain_energy(kind.amount());
                    events.push(GameEvent::EnergyCollected);
                }
                super::state::PickupKind::Heart => {
                    stats.heal(kind.amount());
                    events.push(GameEvent::HealthCollected);
                }
            }
            *score += SCORE_PICKUP;
        }
    }
}

/// Remove spent projectiles, finished death animations and collected
/// pickups.
fn cleanup(level: &mut Level) {
    let (width, height) = (level.width, level.height);
    level
        .fireballs
        .retain(|f| !f.spent && !f.expired(width, height));
    level.enemies.retain(|e| e.dying.is_none_or(|t| t > 0.0));
    level.pickups.retain(|p| !p.collected);
}
