//! Property tests: core invariants hold under arbitrary input sequences.

use proptest::prelude::*;
use roguebolt::consts::SIM_DT;
use roguebolt::sim::{GamePhase, GameState, TickInput};

/// Decode one byte into an input snapshot, covering all action combinations.
fn decode_input(code: u8) -> TickInput {
    TickInput {
        move_left: code & 0b0000_0001 != 0,
        move_right: code & 0b0000_0010 != 0,
        jump: code & 0b0000_0100 != 0,
        fire_held: code & 0b0000_1000 != 0,
        fire_just_released: code & 0b0001_0000 != 0,
        // Pause is rare so runs mostly stay in Playing
        pause: code & 0b1110_0000 == 0b1110_0000,
    }
}

fn check_invariants(state: &GameState) {
    let stats = &state.stats;
    assert!(
        stats.health >= 0.0 && stats.health <= stats.max_health,
        "health {} outside [0, {}]",
        stats.health,
        stats.max_health
    );
    assert!(
        stats.energy >= 0.0 && stats.energy <= stats.max_energy,
        "energy {} outside [0, {}]",
        stats.energy,
        stats.max_energy
    );
    if let Some(level) = &state.level {
        assert!(
            level.player.body.pos.x >= level.player.body.half.x - 1e-3
                && level.player.body.pos.x <= level.width - level.player.body.half.x + 1e-3,
            "player escaped horizontally to x {}",
            level.player.body.pos.x
        );
        for enemy in &level.enemies {
            assert!(enemy.alive() || enemy.health <= 0);
        }
        assert!(level.elapsed >= 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stats_and_bounds_hold_under_random_input(
        seed in any::<u64>(),
        codes in prop::collection::vec(any::<u8>(), 1..400),
    ) {
        let mut state = GameState::new(seed);
        for &code in &codes {
            match state.phase {
                GamePhase::CardSelect => {
                    prop_assert!(state.choose_upgrade(code as usize % 3));
                }
                GamePhase::GameOver | GamePhase::Victory => break,
                _ => {
                    roguebolt::tick(&mut state, &decode_input(code), SIM_DT);
                    state.drain_events();
                }
            }
            check_invariants(&state);
        }
    }

    #[test]
    fn score_never_decreases(
        seed in any::<u64>(),
        codes in prop::collection::vec(any::<u8>(), 1..300),
    ) {
        let mut state = GameState::new(seed);
        let mut last_score = 0;
        for &code in &codes {
            if matches!(state.phase, GamePhase::GameOver | GamePhase::Victory) {
                break;
            }
            if state.phase == GamePhase::CardSelect {
                state.choose_upgrade(0);
                continue;
            }
            roguebolt::tick(&mut state, &decode_input(code), SIM_DT);
            state.drain_events();
            prop_assert!(state.score >= last_score);
            last_score = state.score;
        }
    }
}
