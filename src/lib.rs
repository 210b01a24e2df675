//! Petri Panic - build-a-bacteria arcade shooter
//!
//! Core modules:
//! - `genome`: genetic circuit editor (gameplay trait bijection + visual genes)
//! - `sim`: deterministic shooter simulation (entities, collisions, scoring)
//! - `session`: Design → Play → Summary → Thanks state machine
//! - `leaderboard`: ranked score records
//! - `store`: durable leaderboard file shared between processes
//! - `display`: read-only scoreboard view with rank-window rotation

pub mod display;
pub mod error;
pub mod genome;
pub mod leaderboard;
pub mod session;
pub mod sim;
pub mod store;

pub use error::{GameError, GameResult};
pub use genome::{GeneTrait, GenomeAssignment, GenomeBuild, PromoterTier, RunConfig};
pub use leaderboard::{Leaderboard, ScoreRecord};
pub use session::{Session, SessionPhase};
pub use store::JsonFileStore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels, origin top-left, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_BASE_RADIUS: f32 = 22.0;
    pub const PLAYER_BASE_SPEED: f32 = 320.0;
    /// Seconds of damage immunity after a hit
    pub const INVINCIBILITY_SECS: f32 = 1.0;
    /// Minimum delay between accepted fire events
    pub const FIRE_COOLDOWN_SECS: f32 = 0.35;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 480.0;

    /// Obstacle spawn policy
    pub const OBSTACLE_RADIUS: f32 = 18.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 140.0;
    /// Fall speed gained per second of elapsed run time
    pub const OBSTACLE_SPEED_RAMP: f32 = 4.0;
    pub const SPAWN_INTERVAL_SECS: f32 = 0.8;

    /// Scoring: survival points per tick plus a tunable destruction bonus
    pub const SCORE_PER_TICK: u64 = 1;
    pub const DESTROY_BONUS: u64 = 25;

    /// Thank-you screen duration before returning to the editor
    pub const THANKS_SECS: f32 = 2.0;

    /// Scoreboard display timers
    pub const POLL_INTERVAL_SECS: f32 = 5.0;
    pub const ROTATE_INTERVAL_SECS: f32 = 30.0;
    /// Ranks shown per scoreboard window
    pub const RANK_WINDOW_SIZE: usize = 10;
}
