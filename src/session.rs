//! Session state machine: Design → Play → Summary → Thanks → Design
//!
//! The cycle never terminates on its own; the program loops until externally
//! stopped. Each phase owns exactly the data relevant to it, constructed
//! fresh from the previous phase's output, so nothing mutable leaks across
//! transitions.

use crate::consts::THANKS_SECS;
use crate::error::{GameError, GameResult};
use crate::genome::{GenomeBuild, RunConfig};
use crate::leaderboard::ScoreRecord;
use crate::sim::{SimState, TickInput, TickOutcome, tick};
use crate::store::JsonFileStore;

#[derive(Debug)]
pub enum SessionPhase {
    /// Editing the live genome
    Design(GenomeBuild),
    /// A run in progress
    Play(SimState),
    /// Post-run score entry; holds the finished run's result and the
    /// name-in-progress. Retained (with the record's ingredients) until a
    /// submission succeeds, so a store outage never loses the score.
    Summary {
        score: u64,
        config: RunConfig,
        name: String,
    },
    /// Brief acknowledgement before cycling back to the editor
    Thanks { secs_left: f32, build: GenomeBuild },
}

#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Design(GenomeBuild::default()),
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Mutable access to the genome while designing
    pub fn design_mut(&mut self) -> Option<&mut GenomeBuild> {
        match &mut self.phase {
            SessionPhase::Design(build) => Some(build),
            _ => None,
        }
    }

    /// Design → Play: snapshot the build and start the simulation.
    /// Starting anywhere else is caller misuse, not a gameplay outcome.
    pub fn start_run(&mut self, seed: u64) -> GameResult<()> {
        let SessionPhase::Design(build) = &self.phase else {
            return Err(GameError::InvalidConfig(
                "a session is already in progress".to_string(),
            ));
        };
        let sim = SimState::start(build.snapshot(), seed)?;
        self.phase = SessionPhase::Play(sim);
        Ok(())
    }

    /// Advance whatever the current phase does with time:
    /// Play runs the simulation, Thanks counts down, the rest idle.
    pub fn tick(&mut self, dt: f32, input: &TickInput) {
        let next = match &mut self.phase {
            SessionPhase::Play(sim) => match tick(sim, input, dt) {
                TickOutcome::Ended(score) => {
                    log::info!("run over, entering summary with score {score}");
                    Some(SessionPhase::Summary {
                        score,
                        config: sim.config,
                        name: String::new(),
                    })
                }
                TickOutcome::Continue => None,
            },
            SessionPhase::Thanks { secs_left, build } => {
                *secs_left -= dt;
                if *secs_left <= 0.0 {
                    Some(SessionPhase::Design(*build))
                } else {
                    None
                }
            }
            SessionPhase::Design(_) | SessionPhase::Summary { .. } => None,
        };
        if let Some(phase) = next {
            self.phase = phase;
        }
    }

    /// Replace the name-in-progress on the Summary screen
    pub fn set_name(&mut self, text: &str) {
        if let SessionPhase::Summary { name, .. } = &mut self.phase {
            *name = text.to_string();
        }
    }

    /// Summary → Thanks: validate the name, persist the record, move on.
    ///
    /// An empty (after trimming) name or a store failure leaves the phase in
    /// Summary with its data intact; the caller re-prompts or retries.
    pub fn submit_name(&mut self, store: &JsonFileStore) -> GameResult<()> {
        let SessionPhase::Summary {
            score,
            config,
            name,
        } = &self.phase
        else {
            return Err(GameError::InvalidConfig(
                "no summary awaiting submission".to_string(),
            ));
        };

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(GameError::InvalidInput(
                "name must not be empty".to_string(),
            ));
        }

        // Construct the record fully in memory before touching the store
        let record = ScoreRecord::new(trimmed.to_string(), *score, config, chrono::Utc::now());
        let build = config.to_build();
        match store.append(record) {
            Ok(_) => {
                self.phase = SessionPhase::Thanks {
                    secs_left: THANKS_SECS,
                    build,
                };
                Ok(())
            }
            Err(e) => {
                log::warn!("score submission failed, keeping record for retry: {e}");
                Err(e)
            }
        }
    }
}
