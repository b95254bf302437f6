//! Resource allocation: baseline + bonuses, per-axis clamp, then an even
//! budget reduction.
//!
//! The reduction takes `ceil(excess / 3)` from every axis and re-floors each
//! axis at [`RESOURCE_AXIS_MIN`]. Because of the rounding and the floor the
//! reduced total is only approximately [`RESOURCE_BUDGET`]: it can land a
//! couple of points under the cap, or above it when an axis hits the floor.
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::bonus::compute_bonus;
use crate::catalog::TacticsCatalog;
use crate::config::TacticalConfiguration;
use crate::constants::{
    RESOURCE_AXIS_COUNT, RESOURCE_AXIS_MAX, RESOURCE_AXIS_MIN, RESOURCE_BUDGET,
    RESOURCE_SLIDER_STEP,
};
use crate::numbers::ceil_div_i32;
use crate::resources::{ResourceAxis, ResourceTriple};

/// Every intermediate value of one automatic allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTrace {
    pub bonus: ResourceTriple,
    /// Baseline plus bonus, clamped per axis.
    pub clamped: ResourceTriple,
    /// Points over budget before reduction (0 when within budget).
    pub excess: i32,
    /// Points taken from each axis (0 when within budget).
    pub reduction: i32,
    pub allocated: ResourceTriple,
}

/// Clamp every axis of `values` into the allowed per-axis range.
#[must_use]
pub fn clamp_axes(values: ResourceTriple) -> ResourceTriple {
    values.map(|v| v.clamp(RESOURCE_AXIS_MIN, RESOURCE_AXIS_MAX))
}

/// Positions offered by a pro-mode slider, floor to ceiling.
///
/// The allocator itself accepts any value; this is the range the form shows.
pub fn slider_positions() -> impl Iterator<Item = i32> {
    let step = usize::try_from(RESOURCE_SLIDER_STEP).unwrap_or(1);
    (RESOURCE_AXIS_MIN..=RESOURCE_AXIS_MAX).step_by(step)
}

/// Pull an over-budget triple back towards the budget.
///
/// Returns the reduced triple together with the excess and the per-axis
/// reduction that were applied. Triples within budget come back unchanged.
#[must_use]
pub fn reduce_to_budget(values: ResourceTriple) -> (ResourceTriple, i32, i32) {
    let total = values.total();
    if total <= RESOURCE_BUDGET {
        return (values, 0, 0);
    }
    let excess = total - RESOURCE_BUDGET;
    let reduction = ceil_div_i32(excess, RESOURCE_AXIS_COUNT);
    let reduced = values.map(|v| v.saturating_sub(reduction).max(RESOURCE_AXIS_MIN));
    (reduced, excess, reduction)
}

/// Run the automatic allocation and keep every intermediate value.
#[must_use]
pub fn auto_allocate(catalog: &TacticsCatalog, config: &TacticalConfiguration) -> BudgetTrace {
    let bonus = compute_bonus(catalog, config);
    let clamped = clamp_axes(ResourceTriple::baseline() + bonus);
    let (allocated, excess, reduction) = reduce_to_budget(clamped);
    if excess > 0 {
        debug!("reducing each axis by {reduction} (excess {excess})");
    }
    BudgetTrace {
        bonus,
        clamped,
        excess,
        reduction,
        allocated,
    }
}

/// Allocator with a pro-mode bypass.
///
/// With `auto_balance` on, resources are always derived from the tactical
/// choices and the sliders are inert. With it off, resources are whatever the
/// sliders last set, unclamped and unchecked against the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAllocator {
    pub auto_balance: bool,
}

impl Default for ResourceAllocator {
    fn default() -> Self {
        Self::auto()
    }
}

impl ResourceAllocator {
    #[must_use]
    pub const fn new(auto_balance: bool) -> Self {
        Self { auto_balance }
    }

    /// Beginner-mode allocator.
    #[must_use]
    pub const fn auto() -> Self {
        Self::new(true)
    }

    /// Pro-mode allocator.
    #[must_use]
    pub const fn manual() -> Self {
        Self::new(false)
    }

    /// Resources for `config` after a non-resource edit.
    #[must_use]
    pub fn allocate(
        &self,
        catalog: &TacticsCatalog,
        config: &TacticalConfiguration,
    ) -> ResourceTriple {
        self.allocate_with_trace(catalog, config)
            .map_or(config.resources, |trace| trace.allocated)
    }

    /// Like [`Self::allocate`], keeping the intermediate values. Pro mode
    /// computes nothing and returns `None`.
    #[must_use]
    pub fn allocate_with_trace(
        &self,
        catalog: &TacticsCatalog,
        config: &TacticalConfiguration,
    ) -> Option<BudgetTrace> {
        self.auto_balance.then(|| auto_allocate(catalog, config))
    }

    /// Apply a direct slider edit to `resources`.
    ///
    /// Only one axis changes; the others are never rebalanced.
    #[must_use]
    pub fn apply_slider(
        &self,
        resources: ResourceTriple,
        axis: ResourceAxis,
        value: i32,
    ) -> ResourceTriple {
        if self.auto_balance {
            trace!("slider edit on {axis} ignored while auto-balancing");
            return resources;
        }
        let mut next = resources;
        next.set(axis, value);
        next
    }
}
