//! Run progression: level lifecycle, card selection and terminal transitions
//!
//! The tick reports terminal triggers; the methods here perform the phase
//! transitions. Persistence is left to the host so the core stays pure.

use rand::Rng;
use rand_pcg::Pcg32;

use super::body::Aabb;
use super::state::{
    Enemy, GameEvent, GamePhase, GameState, Level, MovingPlatform, Pickup, PickupKind, Player,
};
use crate::consts::*;
use crate::levels::LevelData;
use crate::upgrades;

impl GameState {
    /// Instantiate the current level from its data and enter `Playing`.
    ///
    /// A level number past the end of the catalog resolves to victory, so
    /// short injected catalogs terminate cleanly.
    pub fn start_level(&mut self) {
        self.phase = GamePhase::Loading;
        let Some(data) = (self.current_level as usize)
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .cloned()
        else {
            self.phase = GamePhase::Victory;
            return;
        };
        let level = build_level(&data, &mut self.rng);
        log::info!(
            "level {} '{}' started ({} enemies, {} pickups)",
            level.id,
            level.name,
            level.enemies.len(),
            level.pickups.len()
        );
        self.push_event(GameEvent::LevelStarted {
            id: level.id,
            name: level.name.clone(),
        });
        self.level = Some(level);
        self.phase = GamePhase::Playing;
    }

    /// Exit reached: freeze the level, bank the time bonus, then either offer
    /// upgrade cards or finish the run.
    pub(crate) fn complete_level(&mut self) {
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.frozen {
            return;
        }
        level.frozen = true;

        let bonus = time_bonus(level.elapsed);
        self.score += bonus;
        log::info!(
            "level {} complete in {:.1}s, time bonus {}, score {}",
            level.id,
            level.elapsed,
            bonus,
            self.score
        );

        if (self.current_level as usize) < self.levels.len() {
            let cards = upgrades::draw_cards(&mut self.rng, CARD_OFFER_COUNT, &self.collected_upgrades);
            self.offered_cards = cards.iter().map(|c| c.id.to_string()).collect();
            self.phase = GamePhase::CardSelect;
        } else {
            log::info!("run complete, final score {}", self.score);
            self.phase = GamePhase::Victory;
        }
    }

    /// Pick one of the offered cards by index. Applies the effect, records
    /// the card and starts the next level. Returns false for an invalid
    /// index or when not selecting.
    pub fn choose_upgrade(&mut self, index: usize) -> bool {
        if self.phase != GamePhase::CardSelect {
            return false;
        }
        let Some(id) = self.offered_cards.get(index) else {
            return false;
        };
        let Some(card) = upgrades::card_by_id(id) else {
            return false;
        };
        log::info!("upgrade chosen: {}", card.name);
        (card.effect)(&mut self.stats);
        // A shrunken maximum must drag the current value down with it
        self.stats.clamp_to_maxima();
        self.collected_upgrades.push(card.id.to_string());
        self.offered_cards.clear();
        self.current_level += 1;
        self.start_level();
        true
    }

    /// Player death: freeze the level, emit the event once, end the run.
    pub(crate) fn on_player_death(&mut self) {
        if self.god_mode {
            return;
        }
        let Some(level) = self.level.as_mut() else {
            return;
        };
        if level.frozen || level.player.dead {
            return;
        }
        level.player.dead = true;
        level.frozen = true;
        log::info!(
            "player died on level {}, final score {}",
            level.id,
            self.score
        );
        self.push_event(GameEvent::PlayerDeath);
        self.phase = GamePhase::GameOver;
    }

    /// Start the run over from level 1 with fresh stats. Valid from a
    /// terminal phase or from pause (abandoning the paused run); the RNG
    /// stream continues, so layouts reroll.
    pub fn restart(&mut self) {
        if !matches!(
            self.phase,
            GamePhase::Paused | GamePhase::GameOver | GamePhase::Victory
        ) {
            return;
        }
        self.stats = Default::default();
        self.collected_upgrades.clear();
        self.offered_cards.clear();
        self.score = 0;
        self.current_level = 1;
        self.start_level();
    }
}

/// Score bonus for clearing a level under the par time.
pub(crate) fn time_bonus(elapsed: f32) -> u64 {
    (LEVEL_TIME_LIMIT - elapsed).max(0.0) as u64 * TIME_BONUS_PER_SECOND
}

fn build_level(data: &LevelData, rng: &mut Pcg32) -> Level {
    let platforms = data
        .platforms
        .iter()
        .map(|p| Aabb::from_rect(p.x, p.y, p.width, p.height))
        .collect();

    let moving_platforms = data
        .moving_platforms
        .iter()
        .map(|m| {
            MovingPlatform::new(
                Aabb::from_rect(m.x, m.y, m.width, m.height),
                m.range,
                m.speed,
                m.start_down,
            )
        })
        .collect();

    let enemies = data
        .enemies
        .iter()
        .map(|e| Enemy::new(glam::Vec2::new(e.x, e.y), e.patrol_distance))
        .collect();

    let mut pickups: Vec<Pickup> = Vec::new();
    for &pos in &data.lightnings {
        let phase = rng.random_range(0.0..std::f32::consts::TAU);
        pickups.push(Pickup::new(pos, PickupKind::Lightning, phase));
    }
    for &pos in &data.hearts {
        let phase = rng.random_range(0.0..std::f32::consts::TAU);
        pickups.push(Pickup::new(pos, PickupKind::Heart, phase));
    }

    Level {
        id: data.id,
        name: data.name.clone(),
        width: data.width,
        height: data.height,
        platforms,
        moving_platforms,
        enemies,
        pickups,
        fireballs: Vec::new(),
        exit: Aabb::new(data.exit, EXIT_HALF),
        player: Player::new(data.player_start),
        elapsed: 0.0,
        frozen: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{LevelData, PlatformData};
    use glam::Vec2;

    fn tiny_level(id: u32) -> LevelData {
        LevelData {
            id,
            name: format!("Taso {id}"),
            width: 1280.0,
            height: 720.0,
            platforms: vec![PlatformData {
                x: 0.0,
                y: 688.0,
                width: 1280.0,
                height: 32.0,
            }],
            moving_platforms: Vec::new(),
            enemies: Vec::new(),
            lightnings: Vec::new(),
            hearts: Vec::new(),
            player_start: Vec2::new(100.0, 674.0),
            exit: Vec2::new(1200.0, 656.0),
        }
    }

    #[test]
    fn time_bonus_rewards_fast_clears() {
        assert_eq!(time_bonus(90.0), 300);
        assert_eq!(time_bonus(130.0), 0);
        assert_eq!(time_bonus(0.0), 1200);
    }

    #[test]
    fn new_run_starts_playing_on_level_one() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level, 1);
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::LevelStarted { id: 1, .. }]
        ));
    }

    #[test]
    fn completing_a_level_offers_distinct_cards() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.complete_level();
        assert_eq!(state.phase, GamePhase::CardSelect);
        assert_eq!(state.offered_cards.len(), CARD_OFFER_COUNT);
        let mut ids = state.offered_cards.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CARD_OFFER_COUNT);
    }

    #[test]
    fn choosing_a_card_advances_to_the_next_level() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.complete_level();
        state.drain_events();

        let chosen = state.offered_cards[0].clone();
        assert!(state.choose_upgrade(0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level, 2);
        assert_eq!(state.collected_upgrades, vec![chosen]);
        assert!(state.offered_cards.is_empty());
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::LevelStarted { id: 2, .. }]
        ));
    }

    #[test]
    fn invalid_card_index_is_rejected() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.complete_level();
        assert!(!state.choose_upgrade(CARD_OFFER_COUNT));
        assert_eq!(state.phase, GamePhase::CardSelect);
    }

    #[test]
    fn completing_the_final_level_is_victory() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1)]);
        let fast_bonus = time_bonus(0.0);
        state.complete_level();
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.score, fast_bonus);
        // A second trigger must not double-count the bonus
        state.complete_level();
        assert_eq!(state.score, fast_bonus);
    }

    #[test]
    fn restart_resets_the_run() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.score = 1234;
        state.stats.health = 5.0;
        state.collected_upgrades.push("jump_boost".to_string());
        state.on_player_death();
        assert_eq!(state.phase, GamePhase::GameOver);

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.stats.health, state.stats.max_health);
        assert!(state.collected_upgrades.is_empty());
    }

    #[test]
    fn restart_from_pause_abandons_the_run() {
        use crate::sim::tick::{TickInput, tick};

        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.score = 700;
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, crate::consts::SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.current_level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.level.as_ref().unwrap().elapsed, 0.0);
    }

    #[test]
    fn restart_is_ignored_mid_run() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1), tiny_level(2)]);
        state.score = 500;
        state.restart();
        assert_eq!(state.score, 500);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn level_number_past_catalog_resolves_to_victory() {
        let mut state = GameState::with_levels(3, vec![tiny_level(1)]);
        state.current_level = 99;
        state.start_level();
        assert_eq!(state.phase, GamePhase::Victory);
    }
}
