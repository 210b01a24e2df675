//! Simulation state and core entity types
//!
//! Everything that must advance deterministically lives here. Entity vectors
//! keep stable insertion order (ids are monotone) so iteration order never
//! depends on anything but the input stream and the seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::error::{GameError, GameResult};
use crate::genome::RunConfig;

/// The player's bacterium
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub lives: u8,
    /// Seconds of damage immunity remaining (counts down to 0)
    pub invincibility: f32,
    /// Collision footprint radius, already scaled by the Size effect
    pub radius: f32,
    /// Seconds until the next fire event is accepted
    pub fire_cooldown: f32,
}

impl Player {
    /// While invincible the player takes no damage and renders flashing
    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0.0
    }
}

/// A shot emitted by the player, travelling up the field
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A falling hazard
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct SimState {
    /// Frozen genome for this run
    pub config: RunConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Simulation tick counter; also the survival score numerator
    pub time_ticks: u64,
    /// Accumulated destruction bonus points
    pub bonus_points: u64,
    /// Movement multiplier derived from the Speed effect
    pub speed_mult: f32,
    pub(super) rng: Pcg32,
    pub(super) spawn_timer: f32,
    next_id: u32,
}

impl SimState {
    /// Start a session from a frozen config.
    ///
    /// The bijection check is defensive: the trait engine cannot produce an
    /// invalid assignment, so a failure here means a caller defect.
    pub fn start(config: RunConfig, seed: u64) -> GameResult<Self> {
        if !config.assignment.is_bijection() {
            return Err(GameError::InvalidConfig(
                "trait assignment is not a bijection".to_string(),
            ));
        }
        let lives = config.assignment.lives();
        let speed_mult = config.assignment.speed_mult();
        let radius = PLAYER_BASE_RADIUS * config.assignment.size_scale();
        log::info!(
            "session start: seed={seed} lives={lives} speed={speed_mult:.2} radius={radius:.1}"
        );
        Ok(Self {
            config,
            seed,
            player: Player {
                pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 60.0),
                vel: Vec2::ZERO,
                lives,
                invincibility: 0.0,
                radius,
                fire_cooldown: 0.0,
            },
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            time_ticks: 0,
            bonus_points: 0,
            speed_mult,
            rng: Pcg32::seed_from_u64(seed),
            spawn_timer: 0.0,
            next_id: 1,
        })
    }

    /// Current score: survival points plus destruction bonuses. Integer
    /// arithmetic over the tick counter keeps the base rule deterministic.
    pub fn score(&self) -> u64 {
        self.time_ticks * SCORE_PER_TICK + self.bonus_points
    }

    /// Elapsed run time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    pub(super) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{GeneTrait, GenomeBuild, PromoterTier};

    #[test]
    fn lives_follow_life_effect() {
        let mut build = GenomeBuild::default();
        // Default Life=Weak
        let sim = SimState::start(build.snapshot(), 1).unwrap();
        assert_eq!(sim.player.lives, 1);

        build.gameplay.assign_tier(GeneTrait::Life, PromoterTier::Strong);
        let sim = SimState::start(build.snapshot(), 1).unwrap();
        assert_eq!(sim.player.lives, 3);
    }

    #[test]
    fn footprint_follows_size_effect() {
        let mut build = GenomeBuild::default();
        // Default Size=Strong: small footprint
        let sim = SimState::start(build.snapshot(), 1).unwrap();
        assert!((sim.player.radius - PLAYER_BASE_RADIUS * 0.7).abs() < 1e-5);

        build.gameplay.assign_tier(GeneTrait::Size, PromoterTier::Weak);
        let sim = SimState::start(build.snapshot(), 1).unwrap();
        assert!((sim.player.radius - PLAYER_BASE_RADIUS * 1.3).abs() < 1e-5);
    }

    #[test]
    fn fresh_session_scores_zero() {
        let sim = SimState::start(GenomeBuild::default().snapshot(), 7).unwrap();
        assert_eq!(sim.score(), 0);
        assert!(!sim.player.is_invincible());
    }
}
