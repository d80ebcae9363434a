//! Platformer - headless driver for the 2D character controller
//!
//! Runs a scripted session on a small stage: a few players share one set of
//! controller profiles and feed the fixed-step loop through the input layer.

mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec2;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use platformer_core::{EntityId, GameTime};
use platformer_game::{ControllerProfiles, InputAction, InputState, PlayerController};
use platformer_physics::{ContactReport, Stage};

use settings::Settings;

/// Stage bounds
const STAGE_HALF_WIDTH: f32 = 20.0;
const CEILING_HEIGHT: f32 = 8.0;
const PLAYER_HALF_EXTENTS: Vec2 = Vec2::new(0.4, 0.9);
const SPAWN_MARGIN: f32 = 1.0;

/// One scripted input cue
#[derive(Debug, Clone, Copy)]
enum Cue {
    Press(InputAction),
    Release(InputAction),
    /// Press and release within the same frame
    Tap(InputAction),
}

/// Input timeline shared by every player, offset per player
const SCRIPT: &[(f64, Cue)] = &[
    (0.0, Cue::Press(InputAction::MoveRight)),
    (0.6, Cue::Tap(InputAction::Jump)),
    (1.2, Cue::Tap(InputAction::Sprint)),
    (1.8, Cue::Tap(InputAction::Jump)),
    (1.9, Cue::Tap(InputAction::Jump)),
    (2.6, Cue::Tap(InputAction::ReverseGravity)),
    (3.6, Cue::Tap(InputAction::ReverseGravity)),
    (4.2, Cue::Release(InputAction::MoveRight)),
    (4.2, Cue::Press(InputAction::MoveLeft)),
    (4.8, Cue::Tap(InputAction::Jump)),
    (5.4, Cue::Release(InputAction::MoveLeft)),
];

/// Delay between players walking through the script
const SCRIPT_STAGGER: f64 = 0.15;

struct Player {
    id: EntityId,
    controller: PlayerController,
    input: InputState,
    contacts: ContactReport,
    script_offset: f64,
    cursor: usize,
}

impl Player {
    /// Feed every cue that is due at `now` into the input state
    fn play_script(&mut self, now: f64) {
        while let Some(&(at, cue)) = SCRIPT.get(self.cursor) {
            if at + self.script_offset > now {
                break;
            }
            match cue {
                Cue::Press(action) => self.input.press(action),
                Cue::Release(action) => self.input.release(action),
                Cue::Tap(action) => {
                    self.input.press(action);
                    self.input.release(action);
                }
            }
            self.cursor += 1;
        }
    }
}

fn build_stage() -> Stage {
    let mut stage = Stage::new();
    stage.create_floor(0.0, -STAGE_HALF_WIDTH, STAGE_HALF_WIDTH);
    stage.create_ceiling(CEILING_HEIGHT, -STAGE_HALF_WIDTH, STAGE_HALF_WIDTH);
    stage.create_wall(-STAGE_HALF_WIDTH - 1.0, 0.0, CEILING_HEIGHT);
    stage.create_wall(STAGE_HALF_WIDTH, 0.0, CEILING_HEIGHT);
    stage
}

/// Spawn x for player `index` of `count`, spread evenly between the walls
fn spawn_x(index: usize, count: usize) -> f32 {
    let min_x = -STAGE_HALF_WIDTH + PLAYER_HALF_EXTENTS.x + SPAWN_MARGIN;
    let max_x = STAGE_HALF_WIDTH - PLAYER_HALF_EXTENTS.x - SPAWN_MARGIN;
    let spacing = (max_x - min_x) / count.max(1) as f32;
    min_x + (index as f32 + 0.5) * spacing
}

fn load_profiles(settings: &Settings) -> Result<ControllerProfiles> {
    match &settings.profiles_path {
        Some(path) => ControllerProfiles::load(path)
            .with_context(|| format!("Failed to load controller profiles from {:?}", path)),
        None => {
            let profiles = ControllerProfiles::default();
            profiles
                .validate()
                .context("Built-in controller profiles are invalid")?;
            Ok(profiles)
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Starting platformer session");

    let settings = Settings::load();
    let profiles = Arc::new(load_profiles(&settings)?);
    let mut stage = build_stage();

    let mut players: Vec<Player> = (0..settings.scenario.players)
        .map(|index| {
            let spawn = Vec2::new(
                spawn_x(index, settings.scenario.players),
                PLAYER_HALF_EXTENTS.y,
            );
            let id = stage.spawn_body(spawn, PLAYER_HALF_EXTENTS);
            let contacts = stage
                .body(id)
                .map(|body| stage.contacts(body))
                .unwrap_or_default();
            Player {
                id,
                controller: PlayerController::new(Arc::clone(&profiles)),
                input: InputState::new(),
                contacts,
                script_offset: index as f64 * SCRIPT_STAGGER,
                cursor: 0,
            }
        })
        .collect();

    info!(
        "Spawned {} players, fixed step {:.3}s",
        players.len(),
        settings.time.fixed_timestep
    );

    let mut time = GameTime::new(settings.time.clone());
    let dt = time.config.fixed_timestep;
    let duration = f64::from(settings.scenario.duration);

    while time.total_time < duration {
        time.update(settings.scenario.frame_time);
        for player in &mut players {
            player.play_script(time.total_time);
        }

        for _ in 0..time.fixed_steps() {
            for player in &mut players {
                let body = stage
                    .body_mut(player.id)
                    .context("Player body missing from stage")?;
                if let Some(outcome) = player.controller.apply_input(&player.input, body) {
                    debug!("Player {} jump: {:?}", player.id, outcome);
                }
                player.input.clear_frame();

                let output = player.controller.step(&player.contacts, body, dt);
                if let Some(state) = output.transition {
                    info!(
                        "Player {} -> {:?} at {:?}",
                        player.id, state, body.position
                    );
                }

                player.contacts = stage
                    .step_body(player.id, dt)
                    .context("Player body missing from stage")?;

                let body = stage
                    .body_mut(player.id)
                    .context("Player body missing from stage")?;
                if player.controller.resolve_stuck(body) {
                    info!("Player {} blocked at {:?}", player.id, body.position);
                }
            }
        }
    }

    for player in &players {
        if let Some(body) = stage.body(player.id) {
            info!(
                "Player {} finished at {:?} ({:?}, reversed: {})",
                player.id,
                body.position,
                player.controller.physic_state(),
                player.controller.state().gravity_reversed
            );
        }
    }

    info!(
        "Session complete: {:.2}s simulated over {} frames",
        time.total_time, time.frame_count
    );
    Ok(())
}
