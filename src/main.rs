//! Gate Runner entry point
//!
//! Runs a headless game with a simple autopilot at 60 FPS and prints a
//! JSON summary of the run.
//!
//! Usage: `gate-runner [variant | settings.json]`

use std::process::ExitCode;

use serde::Serialize;

use gate_runner::consts::FRAME_MS;
use gate_runner::sim::{GameEvent, GameState, PlayerStats, StatSummary, TickInput, tick};
use gate_runner::{Settings, SettingsError, Variant};

/// Two minutes of frames
const MAX_FRAMES: u64 = 60 * 120;

#[derive(Debug, Serialize)]
struct RunReport {
    variant: Variant,
    seed: u64,
    frames: u64,
    elapsed_ms: f64,
    defeated: bool,
    summary: StatSummary,
    gates_applied: u32,
    enemies_defeated: u32,
    hits_taken: u32,
}

fn main() -> ExitCode {
    env_logger::init();

    let settings = match settings_from_args(std::env::args().nth(1)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Could not start run: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = run(&mut state);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not encode report: {e}");
            ExitCode::FAILURE
        }
    }
}

/// A variant name, a path to a JSON settings file, or nothing for the default
fn settings_from_args(arg: Option<String>) -> Result<Settings, SettingsError> {
    match arg {
        None => Ok(Settings::default()),
        Some(arg) => match Variant::from_str(&arg) {
            Some(variant) => Ok(Settings::for_variant(variant)),
            None => Settings::load(&arg),
        },
    }
}

fn run(state: &mut GameState) -> RunReport {
    log::info!("Gate Runner starting ({})", state.settings.variant.as_str());

    let mut report = RunReport {
        variant: state.settings.variant,
        seed: state.settings.seed,
        frames: 0,
        elapsed_ms: 0.0,
        defeated: false,
        summary: state.summary(),
        gates_applied: 0,
        enemies_defeated: 0,
        hits_taken: 0,
    };

    while state.frame < MAX_FRAMES {
        let input = autopilot(state);
        let result = tick(state, &input, FRAME_MS);
        for event in &result.events {
            match event {
                GameEvent::GateApplied { .. } => report.gates_applied += 1,
                GameEvent::EnemyDefeated { .. } => report.enemies_defeated += 1,
                GameEvent::PlayerHit { .. } => report.hits_taken += 1,
                _ => {}
            }
        }
        report.summary = result.summary;
        if result.terminal {
            report.defeated = true;
            break;
        }
    }

    report.frames = state.frame;
    report.elapsed_ms = state.elapsed_ms;
    log::info!("Run finished after {} frames: {}", report.frames, report.summary);
    report
}

/// Demo AI: chase the nearest helpful gate, otherwise line up with an enemy
fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.rect.center();
    // Deadzone so the player doesn't jitter around the target
    let deadzone = state.player.speed;

    match &state.player.stats {
        PlayerStats::Tracked(_) => {
            // Lowest gate still above the player
            let target = state
                .gates
                .iter()
                .filter(|g| g.effect.is_beneficial() && g.rect.bottom() <= state.player.rect.top())
                .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y))
                .map(|g| g.rect.center().x);
            let Some(x) = target else {
                return TickInput::default();
            };
            TickInput {
                left: x < player.x - deadzone,
                right: x > player.x + deadzone,
                ..Default::default()
            }
        }
        PlayerStats::Combat(_) => {
            // Walls first (every boost helps), then the nearest enemy for the arrows
            let wall = state
                .gates
                .iter()
                .filter(|g| g.rect.right() >= state.player.rect.left())
                .min_by(|a, b| a.rect.x.total_cmp(&b.rect.x))
                .map(|g| g.rect.center().y);
            let enemy = state
                .enemies
                .iter()
                .min_by(|a, b| a.rect.x.total_cmp(&b.rect.x))
                .map(|e| e.rect.center().y);
            let Some(y) = wall.or(enemy) else {
                return TickInput::default();
            };
            TickInput {
                up: y < player.y - deadzone,
                down: y > player.y + deadzone,
                ..Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_argument() {
        let settings = settings_from_args(Some("combat".into())).unwrap();
        assert_eq!(settings.variant, Variant::Combat);
        assert_eq!(
            settings_from_args(None).unwrap().variant,
            Variant::GateCount
        );
    }

    #[test]
    fn test_missing_settings_file() {
        let err = settings_from_args(Some("/nonexistent/run.json".into())).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn test_autopilot_run_is_bounded() {
        let mut state = GameState::new(Settings::for_variant(Variant::GatePower)).unwrap();
        let report = run(&mut state);
        // Power never ends a run
        assert!(!report.defeated);
        assert_eq!(report.frames, MAX_FRAMES);
        assert!(report.gates_applied > 0);
    }
}
