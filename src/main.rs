//! Petri Panic writer process
//!
//! Drives the Design → Play → Summary → Thanks cycle at a fixed tick rate
//! and persists finished runs to the shared leaderboard file. Keyboard and
//! window glue live outside this crate, so input comes from a small
//! autopilot that plays the shooter and cycles genome builds between runs.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use petri_panic::consts::*;
use petri_panic::genome::{GeneTrait, PromoterTier};
use petri_panic::session::{Session, SessionPhase};
use petri_panic::sim::{SimState, TickInput};
use petri_panic::store::JsonFileStore;

const STORE_PATH: &str = "data.json";

/// Demo input source: dodges falling obstacles and fires on cooldown
struct Autopilot {
    runs_started: u64,
}

impl Autopilot {
    fn new() -> Self {
        Self { runs_started: 0 }
    }

    /// Cycle through a few contrasting builds so the leaderboard shows
    /// varied gameplay circuits
    fn shape_build(&self, session: &mut Session) {
        let Some(build) = session.design_mut() else {
            return;
        };
        match self.runs_started % 3 {
            0 => {
                build.gameplay.assign_tier(GeneTrait::Life, PromoterTier::Strong);
            }
            1 => {
                build.gameplay.assign_tier(GeneTrait::Speed, PromoterTier::Strong);
                build.gameplay.assign_tier(GeneTrait::Life, PromoterTier::Medium);
            }
            _ => {
                build.gameplay.assign_tier(GeneTrait::Size, PromoterTier::Strong);
            }
        }
    }

    fn pilot_name(&self) -> String {
        format!("Microbe-{:03}", self.runs_started)
    }

    /// Steer away from the most threatening obstacle, drifting back to the
    /// field center when nothing is inbound
    fn steer(&self, sim: &SimState) -> TickInput {
        let player = &sim.player;
        let threat = sim
            .obstacles
            .iter()
            .filter(|o| o.pos.y < player.pos.y && (o.pos.x - player.pos.x).abs() < 120.0)
            .min_by(|a, b| {
                (player.pos.y - a.pos.y)
                    .partial_cmp(&(player.pos.y - b.pos.y))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let move_x = match threat {
            Some(obstacle) => {
                // Sidestep, pushing toward whichever side has more room
                if obstacle.pos.x > player.pos.x || player.pos.x > FIELD_WIDTH - 80.0 {
                    -1.0
                } else {
                    1.0
                }
            }
            None => ((FIELD_WIDTH / 2.0 - player.pos.x) / 100.0).clamp(-1.0, 1.0),
        };

        TickInput {
            move_dir: Vec2::new(move_x, 0.0),
            fire: true,
        }
    }
}

fn main() {
    env_logger::init();

    let store = JsonFileStore::new(STORE_PATH);
    let mut session = Session::new();
    let mut autopilot = Autopilot::new();

    let base_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("petri-panic up, base seed {base_seed}, store {STORE_PATH}");

    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step(&mut session, &mut autopilot, &store, base_seed);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        std::thread::sleep(Duration::from_millis(2));
    }
}

fn step(session: &mut Session, autopilot: &mut Autopilot, store: &JsonFileStore, base_seed: u64) {
    let input = match session.phase() {
        SessionPhase::Design(_) => {
            autopilot.shape_build(session);
            let seed = base_seed.wrapping_add(autopilot.runs_started);
            if let Err(e) = session.start_run(seed) {
                log::error!("failed to start run: {e}");
            }
            autopilot.runs_started += 1;
            TickInput::default()
        }
        SessionPhase::Play(sim) => autopilot.steer(sim),
        SessionPhase::Summary { .. } => {
            session.set_name(&autopilot.pilot_name());
            // A store outage leaves the summary in place; retried next tick
            if let Err(e) = session.submit_name(store) {
                log::warn!("submission pending: {e}");
            }
            TickInput::default()
        }
        SessionPhase::Thanks { .. } => TickInput::default(),
    };

    session.tick(SIM_DT, &input);
}
