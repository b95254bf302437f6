//! Centralized balance and tuning constants for the tactics engine.
//!
//! These values define the deterministic math of the resource allocator and
//! the attribute projector. Catalog text and per-choice bonuses live in the
//! embedded JSON assets; the arithmetic lives here.

// Resource allocation ------------------------------------------------------
/// Flat per-axis starting value before bonuses are applied.
pub const RESOURCE_BASELINE: i32 = 80;
/// Lowest value any resource axis may take after clamping.
pub const RESOURCE_AXIS_MIN: i32 = 60;
/// Highest value any resource axis may take after clamping.
pub const RESOURCE_AXIS_MAX: i32 = 120;
/// Global cap on attack + midfield + defense.
pub const RESOURCE_BUDGET: i32 = 240;
/// Number of axes sharing a budget reduction.
pub(crate) const RESOURCE_AXIS_COUNT: i32 = 3;
/// Granularity of the pro-mode sliders.
pub const RESOURCE_SLIDER_STEP: i32 = 5;

// Random strategy ----------------------------------------------------------
pub const RANDOM_RESOURCE_MIN: i32 = 60;
pub const RANDOM_RESOURCE_MAX: i32 = 99;

// Specialists --------------------------------------------------------------
pub const MAX_SPECIALISTS: usize = 3;

// Attribute projection -----------------------------------------------------
/// Resource value at which a resource axis leaves its attribute unscaled.
pub const PROJECTION_NEUTRAL_RESOURCE: f64 = 90.0;
pub const ATTRIBUTE_MIN: f64 = 10.0;
pub const ATTRIBUTE_MAX: f64 = 150.0;

// Preview tiers ------------------------------------------------------------
pub(crate) const TIER_ELITE: f64 = 100.0;
pub(crate) const TIER_STRONG: f64 = 80.0;
pub(crate) const TIER_AVERAGE: f64 = 60.0;
pub(crate) const TIER_WEAK: f64 = 40.0;

// Agent drafts -------------------------------------------------------------
pub const AGENT_NAME_MAX_CHARS: usize = 30;
