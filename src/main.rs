//! Headless demo runner
//!
//! Drives the simulation with a scripted bot at the fixed timestep and logs
//! the event stream. Useful for exercising determinism and progression
//! without a renderer: the same seed always prints the same run.

use roguebolt::consts::{CARD_OFFER_COUNT, SIM_DT};
use roguebolt::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const MAX_TICKS: u64 = 120 * 60 * 10;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    log::info!("starting demo run with seed {seed}");

    let mut state = GameState::new(seed);
    let mut ticks: u64 = 0;

    while ticks < MAX_TICKS {
        match state.phase {
            GamePhase::Playing | GamePhase::Loading => {
                let input = bot_input(ticks);
                tick(&mut state, &input, SIM_DT);
                for event in state.drain_events() {
                    report(ticks, &event);
                }
                ticks += 1;
            }
            GamePhase::CardSelect => {
                let pick = (ticks as usize) % CARD_OFFER_COUNT;
                if !state.choose_upgrade(pick) {
                    state.choose_upgrade(0);
                }
            }
            GamePhase::Paused => unreachable!("bot never pauses"),
            GamePhase::GameOver | GamePhase::Victory => break,
        }
    }

    let outcome = match state.phase {
        GamePhase::Victory => "victory",
        GamePhase::GameOver => "game over",
        _ => "timed out",
    };
    println!(
        "{outcome}: level {}/{}, score {}, {:.1}s simulated",
        state.current_level,
        roguebolt::levels::total_levels(),
        state.score,
        ticks as f32 * SIM_DT
    );

    let dir = roguebolt::highscores::data_dir();
    let rank = roguebolt::highscores::record_run(&dir, state.score, state.current_level);
    println!(
        "rank #{}, {} coins banked",
        rank.rank,
        roguebolt::highscores::coins_for_score(state.score)
    );
}

/// Simple scripted inputs: run right, hop on a cadence, charge and release
/// shots on a longer cadence.
fn bot_input(ticks: u64) -> TickInput {
    let phase = ticks % 90;
    TickInput {
        move_right: true,
        jump: phase == 0,
        fire_held: (30..75).contains(&phase),
        fire_just_released: phase == 75,
        ..Default::default()
    }
}

fn report(ticks: u64, event: &GameEvent) {
    let t = ticks as f32 * SIM_DT;
    match event {
        GameEvent::LevelStarted { id, name } => println!("[{t:7.2}] level {id}: {name}"),
        GameEvent::EnemyKilled { x, y } => println!("[{t:7.2}] enemy down at ({x:.0}, {y:.0})"),
        GameEvent::PlayerDamaged { remaining_health } => {
            println!("[{t:7.2}] hit, {remaining_health:.0} hp left")
        }
        GameEvent::ExitReached => println!("[{t:7.2}] exit reached"),
        GameEvent::PlayerDeath => println!("[{t:7.2}] player died"),
        other => log::debug!("[{t:7.2}] {other:?}"),
    }
}
