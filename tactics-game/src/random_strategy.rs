//! Random strategy generation: a predefined strategy with freshly rolled
//! resources.
//!
//! The rolled resources are intentionally not run through the allocator; they
//! are neither clamped beyond the draw range nor checked against the budget.
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::ops::RangeInclusive;

use crate::catalog::TacticsCatalog;
use crate::config::StrategyDraft;
use crate::constants::{RANDOM_RESOURCE_MAX, RANDOM_RESOURCE_MIN};
use crate::resources::ResourceTriple;

/// Source of the draws used by [`generate_random`].
///
/// Every [`rand::Rng`] is a `StrategyDice`; tests can script exact draws.
pub trait StrategyDice {
    /// Uniform index in `0..len`. Only called with `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
    /// Uniform integer in `range`.
    fn roll(&mut self, range: RangeInclusive<i32>) -> i32;
}

impl<R> StrategyDice for R
where
    R: Rng + ?Sized,
{
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }
}

/// Pick a predefined strategy uniformly and roll attack, midfield and
/// defense independently, in that order.
///
/// Returns `None` when the catalog has no strategies.
pub fn generate_random<D>(catalog: &TacticsCatalog, dice: &mut D) -> Option<StrategyDraft>
where
    D: StrategyDice + ?Sized,
{
    if catalog.strategies.is_empty() {
        return None;
    }
    let idx = dice.pick(catalog.strategies.len());
    let strategy = catalog.strategies.get(idx)?;
    let attack = dice.roll(RANDOM_RESOURCE_MIN..=RANDOM_RESOURCE_MAX);
    let midfield = dice.roll(RANDOM_RESOURCE_MIN..=RANDOM_RESOURCE_MAX);
    let defense = dice.roll(RANDOM_RESOURCE_MIN..=RANDOM_RESOURCE_MAX);
    Some(StrategyDraft {
        config: strategy.config.clone(),
        resources: ResourceTriple::new(attack, midfield, defense),
    })
}

/// [`generate_random`] driven by a ChaCha stream seeded from `seed`.
#[must_use]
pub fn generate_seeded(catalog: &TacticsCatalog, seed: u64) -> Option<StrategyDraft> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    generate_random(catalog, &mut rng)
}
