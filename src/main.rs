//! Headless demo runner
//!
//! Drives both rule sets with scripted input for a fixed number of ticks,
//! then prints a JSON snapshot of each final state.
//!
//! Usage: arcade-sim [seed] [max-ticks]

use arcade_sim::FixedTimestep;
use arcade_sim::consts::SIM_DT;
use arcade_sim::sim::platformer::{
    LevelLayout, PlatformerInput, PlatformerPhase, PlatformerState,
};
use arcade_sim::sim::shooter::{PlayerInput, ShooterInput, ShooterPhase, ShooterState};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0FFEE);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);

    log::info!("arcade-sim headless run: seed={seed}, max {ticks} ticks");

    run_shooter(seed, ticks);
    run_platformer(ticks);
}

fn run_shooter(seed: u64, ticks: u64) {
    let mut state = ShooterState::new(seed, 2);
    let mut driver = FixedTimestep::new();

    for t in 0..ticks {
        if state.phase == ShooterPhase::GameOver {
            break;
        }
        let input = scripted_shooter_input(t);
        driver.advance(&mut state, &input, SIM_DT);
    }

    log::info!(
        "Shooter finished: level {}, score {}, {:.1}s elapsed",
        state.level,
        state.score,
        state.elapsed_secs()
    );
    print_snapshot("shooter", &state);
}

/// Sweep both players side to side while they fire on distinct headings
fn scripted_shooter_input(t: u64) -> ShooterInput {
    let sweep = if (t / 90) % 2 == 0 { 1.0 } else { -1.0 };
    ShooterInput {
        players: vec![
            PlayerInput {
                move_x: sweep,
                aim: -std::f32::consts::FRAC_PI_2,
                fire: true,
                ..Default::default()
            },
            PlayerInput {
                move_x: -sweep,
                aim: -std::f32::consts::FRAC_PI_4,
                fire: t % 2 == 0,
                ..Default::default()
            },
        ],
    }
}

fn run_platformer(ticks: u64) {
    let layout = LevelLayout::demo();
    let mut state = PlatformerState::new(&layout);
    let mut driver = FixedTimestep::new();

    for t in 0..ticks {
        if state.phase != PlatformerPhase::Playing {
            break;
        }
        let input = PlatformerInput {
            move_axis: 1.0,
            jump: t % 45 == 0,
        };
        driver.advance(&mut state, &input, SIM_DT);
    }

    log::info!(
        "Platformer finished: score {}, {} lives left",
        state.score,
        state.lives
    );
    print_snapshot("platformer", &state);
}

fn print_snapshot<S: serde::Serialize>(label: &str, state: &S) {
    match serde_json::to_string_pretty(state) {
        Ok(json) => println!("--- {label} ---\n{json}"),
        Err(err) => log::error!("{label} snapshot failed: {err}"),
    }
}
