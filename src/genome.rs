//! Genetic circuit model: gameplay trait assignment and visual genes
//!
//! The gameplay genome assigns exactly one promoter tier to each of the three
//! gameplay traits (a bijection, enforced by construction). Visual circuits
//! only affect sprite appearance and are carried along for the leaderboard.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// Gameplay dimensions affected by the genome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneTrait {
    Life,
    Speed,
    Size,
}

impl GeneTrait {
    pub const ALL: [GeneTrait; 3] = [GeneTrait::Life, GeneTrait::Speed, GeneTrait::Size];

    /// Coding sequence id used in the durable record (the size trait is
    /// historically called "small" in the data schema)
    pub fn coding_sequence_id(self) -> &'static str {
        match self {
            GeneTrait::Life => "life",
            GeneTrait::Speed => "speed",
            GeneTrait::Size => "small",
        }
    }

    fn index(self) -> usize {
        match self {
            GeneTrait::Life => 0,
            GeneTrait::Speed => 1,
            GeneTrait::Size => 2,
        }
    }
}

/// Promoter strength levels, each held by exactly one gameplay trait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromoterTier {
    Weak,
    Medium,
    Strong,
}

impl PromoterTier {
    pub const ALL: [PromoterTier; 3] =
        [PromoterTier::Weak, PromoterTier::Medium, PromoterTier::Strong];

    pub fn as_str(self) -> &'static str {
        match self {
            PromoterTier::Weak => "weak",
            PromoterTier::Medium => "medium",
            PromoterTier::Strong => "strong",
        }
    }

    pub fn parse(s: &str) -> GameResult<Self> {
        match s {
            "weak" => Ok(PromoterTier::Weak),
            "medium" => Ok(PromoterTier::Medium),
            "strong" => Ok(PromoterTier::Strong),
            other => Err(GameError::InvalidInput(format!(
                "unknown promoter tier: {other}"
            ))),
        }
    }

    /// Expression level used to modulate visual intensity
    pub fn expression_level(self) -> f32 {
        match self {
            PromoterTier::Weak => 0.3,
            PromoterTier::Medium => 0.7,
            PromoterTier::Strong => 1.0,
        }
    }
}

/// Lives granted by the Life trait at a given tier
pub fn lives_for(tier: PromoterTier) -> u8 {
    match tier {
        PromoterTier::Weak => 1,
        PromoterTier::Medium => 2,
        PromoterTier::Strong => 3,
    }
}

/// Movement multiplier granted by the Speed trait at a given tier
pub fn speed_mult_for(tier: PromoterTier) -> f32 {
    match tier {
        PromoterTier::Weak => 0.70,
        PromoterTier::Medium => 1.00,
        PromoterTier::Strong => 1.30,
    }
}

/// Collision footprint scale granted by the Size trait at a given tier
/// (stronger expression means a smaller, harder-to-hit bacterium)
pub fn size_scale_for(tier: PromoterTier) -> f32 {
    match tier {
        PromoterTier::Weak => 1.30,
        PromoterTier::Medium => 1.00,
        PromoterTier::Strong => 0.70,
    }
}

/// Bijection from gameplay trait to promoter tier
///
/// Every tier is held by exactly one trait at all times. The only mutation is
/// `assign_tier`, which swaps tiers between two traits and therefore cannot
/// break the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedAssignment")]
pub struct GenomeAssignment {
    /// Tier per trait, indexed by `GeneTrait::index`
    tiers: [PromoterTier; 3],
}

/// Wire form of an assignment before the bijection check
#[derive(Deserialize)]
struct UncheckedAssignment {
    tiers: [PromoterTier; 3],
}

impl TryFrom<UncheckedAssignment> for GenomeAssignment {
    type Error = GameError;

    fn try_from(raw: UncheckedAssignment) -> GameResult<Self> {
        let assignment = Self { tiers: raw.tiers };
        if !assignment.is_bijection() {
            return Err(GameError::InvalidConfig(
                "trait assignment is not a bijection".to_string(),
            ));
        }
        Ok(assignment)
    }
}

impl Default for GenomeAssignment {
    fn default() -> Self {
        Self {
            tiers: [PromoterTier::Weak, PromoterTier::Medium, PromoterTier::Strong],
        }
    }
}

impl GenomeAssignment {
    /// Tier currently held by a trait
    pub fn tier_of(&self, gene: GeneTrait) -> PromoterTier {
        self.tiers[gene.index()]
    }

    /// Trait currently holding a tier
    pub fn trait_of(&self, tier: PromoterTier) -> GeneTrait {
        // Every constructor (Default, deserialization via
        // `UncheckedAssignment`) enforces the bijection and `assign_tier`
        // preserves it, so the find is total; the fallback is unreachable.
        GeneTrait::ALL
            .into_iter()
            .find(|g| self.tiers[g.index()] == tier)
            .unwrap_or(GeneTrait::Life)
    }

    /// Assign `tier` to `gene`, swapping with whichever trait held it.
    ///
    /// A no-op when the trait already holds the tier. Returns the tier the
    /// displaced trait received, for UI feedback.
    pub fn assign_tier(&mut self, gene: GeneTrait, tier: PromoterTier) -> PromoterTier {
        let previous = self.tier_of(gene);
        if previous == tier {
            return previous;
        }
        let other = self.trait_of(tier);
        self.tiers[other.index()] = previous;
        self.tiers[gene.index()] = tier;
        log::debug!(
            "assigned {:?} tier to {:?}, {:?} received {:?}",
            tier,
            gene,
            other,
            previous
        );
        previous
    }

    /// Defensive check used by the simulation: all three tiers present once
    pub fn is_bijection(&self) -> bool {
        PromoterTier::ALL
            .into_iter()
            .all(|t| self.tiers.iter().filter(|&&held| held == t).count() == 1)
    }

    pub fn lives(&self) -> u8 {
        lives_for(self.tier_of(GeneTrait::Life))
    }

    pub fn speed_mult(&self) -> f32 {
        speed_mult_for(self.tier_of(GeneTrait::Speed))
    }

    pub fn size_scale(&self) -> f32 {
        size_scale_for(self.tier_of(GeneTrait::Size))
    }
}

/// Bacteria body plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeGene {
    Rod,
    Spherical,
}

impl ShapeGene {
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeGene::Rod => "rod",
            ShapeGene::Spherical => "spherical",
        }
    }

    pub fn parse(s: &str) -> GameResult<Self> {
        match s {
            "rod" => Ok(ShapeGene::Rod),
            "spherical" => Ok(ShapeGene::Spherical),
            other => Err(GameError::InvalidInput(format!("unknown shape: {other}"))),
        }
    }
}

/// Membrane texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceGene {
    Smooth,
    Rough,
    Spiky,
}

impl SurfaceGene {
    pub fn as_str(self) -> &'static str {
        match self {
            SurfaceGene::Smooth => "smooth",
            SurfaceGene::Rough => "rough",
            SurfaceGene::Spiky => "spiky",
        }
    }

    pub fn parse(s: &str) -> GameResult<Self> {
        match s {
            "smooth" => Ok(SurfaceGene::Smooth),
            "rough" => Ok(SurfaceGene::Rough),
            "spiky" => Ok(SurfaceGene::Spiky),
            other => Err(GameError::InvalidInput(format!("unknown surface: {other}"))),
        }
    }
}

/// Fluorescent protein color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorGene {
    Cyan,
    Green,
    Yellow,
    Red,
    Blue,
}

impl ColorGene {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorGene::Cyan => "cyan",
            ColorGene::Green => "green",
            ColorGene::Yellow => "yellow",
            ColorGene::Red => "red",
            ColorGene::Blue => "blue",
        }
    }

    pub fn parse(s: &str) -> GameResult<Self> {
        match s {
            "cyan" => Ok(ColorGene::Cyan),
            "green" => Ok(ColorGene::Green),
            "yellow" => Ok(ColorGene::Yellow),
            "red" => Ok(ColorGene::Red),
            "blue" => Ok(ColorGene::Blue),
            other => Err(GameError::InvalidInput(format!("unknown color: {other}"))),
        }
    }

    /// Base RGB before expression-level modulation
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorGene::Cyan => (0, 255, 255),
            ColorGene::Green => (0, 255, 0),
            ColorGene::Yellow => (255, 255, 0),
            ColorGene::Red => (255, 0, 0),
            ColorGene::Blue => (0, 0, 255),
        }
    }
}

/// The three appearance-only circuits, each with its own promoter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualCircuits {
    pub shape_tier: PromoterTier,
    pub shape: ShapeGene,
    pub surface_tier: PromoterTier,
    pub surface: SurfaceGene,
    pub color_tier: PromoterTier,
    pub color: ColorGene,
}

impl Default for VisualCircuits {
    fn default() -> Self {
        // Matches the stock bacterium: medium rod, medium smooth, strong green
        Self {
            shape_tier: PromoterTier::Medium,
            shape: ShapeGene::Rod,
            surface_tier: PromoterTier::Medium,
            surface: SurfaceGene::Smooth,
            color_tier: PromoterTier::Strong,
            color: ColorGene::Green,
        }
    }
}

/// The live, editable genome owned by the Design screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenomeBuild {
    pub gameplay: GenomeAssignment,
    pub visuals: VisualCircuits,
}

impl GenomeBuild {
    /// Freeze the current build for one play session
    pub fn snapshot(&self) -> RunConfig {
        RunConfig {
            assignment: self.gameplay,
            visuals: self.visuals,
        }
    }
}

/// Immutable snapshot of the genome taken when a run starts.
/// Editor changes made afterward do not affect the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub assignment: GenomeAssignment,
    pub visuals: VisualCircuits,
}

impl RunConfig {
    /// Reconstitute an editable build (used when returning to Design)
    pub fn to_build(&self) -> GenomeBuild {
        GenomeBuild {
            gameplay: self.assignment,
            visuals: self.visuals,
        }
    }
}
