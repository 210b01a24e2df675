//! Deterministic shooter simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (entities keep insertion order, ids are monotone)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_field, footprints_overlap, off_field};
pub use state::{Obstacle, Player, Projectile, SimState};
pub use tick::{TickInput, TickOutcome, tick};
