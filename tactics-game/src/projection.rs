//! Final team attribute projection for the read-only preview panel.
//!
//! The projection has its own per-formation base stats and measures
//! resources against a neutral value of 90, independently of the allocator's
//! flat 80-point baseline. Steps run in a fixed order:
//!
//! 1. formation base stats (unknown formations use the default formation)
//! 2. playing style modifiers
//! 3. attack / midfield / defense scaled by `resource / 90`
//! 4. specialist effects, in selection order
//! 5. pressing, risk/reward and fouling adjustments
//! 6. clamp into `[10, 150]`
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::catalog::{CatalogError, TacticsCatalog};
use crate::config::{DEFAULT_FORMATION, TacticalConfiguration};
use crate::constants::{
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, PROJECTION_NEUTRAL_RESOURCE, TIER_AVERAGE, TIER_ELITE,
    TIER_STRONG, TIER_WEAK,
};
use crate::numbers::round_f64_to_i32;
use crate::resources::ResourceAxis;

const DEFAULT_PROJECTION_DATA: &str = include_str!("../assets/data/projection.json");

/// The ten projected team attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Attack,
    Midfield,
    Defense,
    Width,
    PressingResist,
    AerialStrength,
    Pace,
    Creativity,
    Physicality,
    Discipline,
}

impl Attribute {
    pub const ALL: [Self; 10] = [
        Self::Attack,
        Self::Midfield,
        Self::Defense,
        Self::Width,
        Self::PressingResist,
        Self::AerialStrength,
        Self::Pace,
        Self::Creativity,
        Self::Physicality,
        Self::Discipline,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Midfield => "midfield",
            Self::Defense => "defense",
            Self::Width => "width",
            Self::PressingResist => "pressing_resist",
            Self::AerialStrength => "aerial_strength",
            Self::Pace => "pace",
            Self::Creativity => "creativity",
            Self::Physicality => "physicality",
            Self::Discipline => "discipline",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.as_str() == key)
    }

    #[must_use]
    pub const fn from_axis(axis: ResourceAxis) -> Self {
        match axis {
            ResourceAxis::Attack => Self::Attack,
            ResourceAxis::Midfield => Self::Midfield,
            ResourceAxis::Defense => Self::Defense,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display band for a projected attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeTier {
    Elite,
    Strong,
    Average,
    Weak,
    Poor,
}

impl AttributeTier {
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value >= TIER_ELITE {
            Self::Elite
        } else if value >= TIER_STRONG {
            Self::Strong
        } else if value >= TIER_AVERAGE {
            Self::Average
        } else if value >= TIER_WEAK {
            Self::Weak
        } else {
            Self::Poor
        }
    }
}

/// One value per projected attribute.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FinalAttributeVector {
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub width: f64,
    pub pressing_resist: f64,
    pub aerial_strength: f64,
    pub pace: f64,
    pub creativity: f64,
    pub physicality: f64,
    pub discipline: f64,
}

impl FinalAttributeVector {
    #[must_use]
    pub const fn get(&self, attr: Attribute) -> f64 {
        match attr {
            Attribute::Attack => self.attack,
            Attribute::Midfield => self.midfield,
            Attribute::Defense => self.defense,
            Attribute::Width => self.width,
            Attribute::PressingResist => self.pressing_resist,
            Attribute::AerialStrength => self.aerial_strength,
            Attribute::Pace => self.pace,
            Attribute::Creativity => self.creativity,
            Attribute::Physicality => self.physicality,
            Attribute::Discipline => self.discipline,
        }
    }

    fn slot(&mut self, attr: Attribute) -> &mut f64 {
        match attr {
            Attribute::Attack => &mut self.attack,
            Attribute::Midfield => &mut self.midfield,
            Attribute::Defense => &mut self.defense,
            Attribute::Width => &mut self.width,
            Attribute::PressingResist => &mut self.pressing_resist,
            Attribute::AerialStrength => &mut self.aerial_strength,
            Attribute::Pace => &mut self.pace,
            Attribute::Creativity => &mut self.creativity,
            Attribute::Physicality => &mut self.physicality,
            Attribute::Discipline => &mut self.discipline,
        }
    }

    pub fn set(&mut self, attr: Attribute, value: f64) {
        *self.slot(attr) = value;
    }

    pub fn add(&mut self, attr: Attribute, delta: f64) {
        *self.slot(attr) += delta;
    }

    /// Add `delta` to the attribute named `key`; unknown names are dropped.
    pub fn add_named(&mut self, key: &str, delta: f64) -> bool {
        match Attribute::from_key(key) {
            Some(attr) => {
                self.add(attr, delta);
                true
            }
            None => false,
        }
    }

    /// Rounded value for display.
    #[must_use]
    pub fn rating(&self, attr: Attribute) -> i32 {
        round_f64_to_i32(self.get(attr))
    }

    #[must_use]
    pub fn tier(&self, attr: Attribute) -> AttributeTier {
        AttributeTier::from_value(self.get(attr))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    fn clamp_all(&mut self) {
        for attr in Attribute::ALL {
            let slot = self.slot(attr);
            *slot = (*slot).clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        }
    }
}

/// Per-formation base stats and per-style modifiers for the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTables {
    #[serde(default = "default_formation_key")]
    pub default_formation: String,
    #[serde(default)]
    pub formation_stats: BTreeMap<String, FinalAttributeVector>,
    /// Style key to attribute name to additive modifier.
    #[serde(default)]
    pub style_modifiers: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Default for ProjectionTables {
    fn default() -> Self {
        Self {
            default_formation: default_formation_key(),
            formation_stats: BTreeMap::new(),
            style_modifiers: BTreeMap::new(),
        }
    }
}

impl ProjectionTables {
    /// Load projection tables from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_PROJECTION_DATA).unwrap_or_default()
    }

    /// Base stats for `formation`, falling back to the default formation,
    /// then to the first table entry, then to all zeros.
    #[must_use]
    pub fn base_stats(&self, formation: &str) -> FinalAttributeVector {
        if let Some(stats) = self.formation_stats.get(formation) {
            return *stats;
        }
        let fallback = &self.default_formation;
        debug!("no base stats for '{formation}', using '{fallback}'");
        self.formation_stats
            .get(&self.default_formation)
            .or_else(|| self.formation_stats.values().next())
            .copied()
            .unwrap_or_default()
    }
}

fn default_formation_key() -> String {
    DEFAULT_FORMATION.to_string()
}

/// Process-wide projection tables parsed from the embedded asset on first use.
#[must_use]
pub fn projection_tables() -> &'static ProjectionTables {
    static TABLES: OnceLock<ProjectionTables> = OnceLock::new();
    TABLES.get_or_init(ProjectionTables::load_from_static)
}

type Adjustments = &'static [(Attribute, f64)];

fn pressing_adjustments(key: &str) -> Adjustments {
    match key {
        "swarm" => &[
            (Attribute::Physicality, 8.0),
            (Attribute::Pace, 5.0),
            (Attribute::Discipline, -5.0),
        ],
        "passive" => &[
            (Attribute::PressingResist, 10.0),
            (Attribute::Discipline, 8.0),
            (Attribute::Physicality, -3.0),
        ],
        _ => &[],
    }
}

fn risk_reward_adjustments(key: &str) -> Adjustments {
    match key {
        "hollywood" => &[
            (Attribute::Creativity, 12.0),
            (Attribute::Attack, 8.0),
            (Attribute::Discipline, -8.0),
        ],
        "conservative" => &[
            (Attribute::Discipline, 10.0),
            (Attribute::Defense, 6.0),
            (Attribute::Creativity, -5.0),
        ],
        _ => &[],
    }
}

fn fouling_adjustments(key: &str) -> Adjustments {
    match key {
        "aggressive" => &[
            (Attribute::Physicality, 10.0),
            (Attribute::AerialStrength, 6.0),
            (Attribute::Discipline, -12.0),
        ],
        "clean" => &[
            (Attribute::Discipline, 15.0),
            (Attribute::PressingResist, 8.0),
            (Attribute::Physicality, -4.0),
        ],
        _ => &[],
    }
}

/// Projects a configuration onto the final attribute vector.
#[derive(Debug, Clone, Copy)]
pub struct AttributeProjector<'a> {
    catalog: &'a TacticsCatalog,
    tables: &'a ProjectionTables,
}

impl<'a> AttributeProjector<'a> {
    #[must_use]
    pub const fn new(catalog: &'a TacticsCatalog, tables: &'a ProjectionTables) -> Self {
        Self { catalog, tables }
    }

    #[must_use]
    pub fn project(&self, config: &TacticalConfiguration) -> FinalAttributeVector {
        let mut stats = self.tables.base_stats(&config.formation);

        if let Some(modifiers) = self.tables.style_modifiers.get(&config.style) {
            for (key, delta) in modifiers {
                stats.add_named(key, *delta);
            }
        }

        for axis in ResourceAxis::ALL {
            let scale = f64::from(config.resources.get(axis)) / PROJECTION_NEUTRAL_RESOURCE;
            let attr = Attribute::from_axis(axis);
            stats.set(attr, stats.get(attr) * scale);
        }

        for id in &config.specialists {
            let Some(specialist) = self.catalog.specialist(id) else {
                continue;
            };
            for (key, magnitude) in &specialist.effects {
                stats.add_named(key, f64::from(*magnitude));
            }
        }

        let adjustments = pressing_adjustments(&config.pressing_intensity)
            .iter()
            .chain(risk_reward_adjustments(&config.risk_reward))
            .chain(fouling_adjustments(&config.fouling_strategy));
        for (attr, delta) in adjustments {
            stats.add(*attr, *delta);
        }

        stats.clamp_all();
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::resources::ResourceTriple;

    const EPS: f64 = 1e-9;

    fn projector() -> AttributeProjector<'static> {
        AttributeProjector::new(catalog(), projection_tables())
    }

    fn neutral() -> TacticalConfiguration {
        TacticalConfiguration::default().with_resources(ResourceTriple::splat(90))
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn neutral_resources_leave_base_plus_style() {
        let stats = projector().project(&neutral());
        // 4-4-2 base with possession modifiers
        assert_close(stats.attack, 75.0);
        assert_close(stats.midfield, 100.0);
        assert_close(stats.defense, 85.0);
        assert_close(stats.width, 70.0);
        assert_close(stats.pressing_resist, 75.0);
        assert_close(stats.aerial_strength, 80.0);
        assert_close(stats.pace, 65.0);
        assert_close(stats.creativity, 85.0);
        assert_close(stats.physicality, 75.0);
        assert_close(stats.discipline, 90.0);
    }

    #[test]
    fn resources_scale_against_ninety() {
        let resources = ResourceTriple::new(68, 93, 78);
        let config = TacticalConfiguration::default().with_resources(resources);
        let stats = projector().project(&config);
        assert_close(stats.attack, 75.0 * 68.0 / 90.0);
        assert_close(stats.midfield, 100.0 * 93.0 / 90.0);
        assert_close(stats.defense, 85.0 * 78.0 / 90.0);
        assert_close(stats.width, 70.0);
    }

    #[test]
    fn specialist_effects_drop_unknown_attributes() {
        let config = neutral().with_specialists(["target_man", "pace_merchant"]);
        let stats = projector().project(&config);
        // target_man: strength and aerial dropped, pace -15
        // pace_merchant: pace +35, attack +40, creativity -10
        assert_close(stats.pace, 65.0 - 15.0 + 35.0);
        assert_close(stats.attack, 75.0 + 40.0);
        assert_close(stats.creativity, 85.0 - 10.0);
        assert_close(stats.aerial_strength, 80.0);
    }

    #[test]
    fn specialists_apply_after_resource_scaling() {
        let config = TacticalConfiguration::default()
            .with_resources(ResourceTriple::new(45, 90, 90))
            .with_specialists(["pace_merchant"]);
        let stats = projector().project(&config);
        assert_close(stats.attack, 75.0 * 0.5 + 40.0);
    }

    #[test]
    fn categorical_adjustments_stack() {
        let mut config = neutral();
        config.pressing_intensity = "swarm".into();
        config.risk_reward = "hollywood".into();
        config.fouling_strategy = "aggressive".into();
        let stats = projector().project(&config);
        assert_close(stats.physicality, 75.0 + 8.0 + 10.0);
        assert_close(stats.pace, 65.0 + 5.0);
        assert_close(stats.discipline, 90.0 - 5.0 - 8.0 - 12.0);
        assert_close(stats.creativity, 85.0 + 12.0);
        assert_close(stats.attack, 75.0 + 8.0);
        assert_close(stats.aerial_strength, 80.0 + 6.0);

        config.pressing_intensity = "passive".into();
        config.risk_reward = "conservative".into();
        config.fouling_strategy = "clean".into();
        let stats = projector().project(&config);
        assert_close(stats.pressing_resist, 75.0 + 10.0 + 8.0);
        assert_close(stats.discipline, 90.0 + 8.0 + 10.0 + 15.0);
        assert_close(stats.physicality, 75.0 - 3.0 - 4.0);
        assert_close(stats.defense, 85.0 + 6.0);
        assert_close(stats.creativity, 85.0 - 5.0);
    }

    #[test]
    fn every_attribute_is_clamped() {
        let config = TacticalConfiguration::default()
            .with_resources(ResourceTriple::new(400, 5, 90))
            .with_specialists(["pace_merchant"]);
        let stats = projector().project(&config);
        assert_close(stats.attack, ATTRIBUTE_MAX);
        assert_close(stats.midfield, ATTRIBUTE_MIN);
        for (_, value) in stats.iter() {
            assert!((ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value));
        }
    }

    #[test]
    fn unknown_formation_and_style_fall_back() {
        let mut config = neutral();
        config.formation = "2-3-5".into();
        config.style = "route_one".into();
        let stats = projector().project(&config);
        let base = projection_tables().base_stats(DEFAULT_FORMATION);
        for attr in Attribute::ALL {
            assert_close(stats.get(attr), base.get(attr));
        }
    }

    #[test]
    fn catalog_formation_without_base_stats_uses_default() {
        let mut config = neutral();
        config.formation = "3-5-2".into();
        let fallback = projector().project(&config);
        config.formation = DEFAULT_FORMATION.into();
        assert_eq!(fallback, projector().project(&config));
    }

    #[test]
    fn empty_tables_project_from_zero() {
        let tables = ProjectionTables::default();
        let projector = AttributeProjector::new(catalog(), &tables);
        let stats = projector.project(&neutral());
        for (_, value) in stats.iter() {
            assert_close(value, ATTRIBUTE_MIN);
        }
    }

    #[test]
    fn tiers_and_ratings_round_for_display() {
        let stats = projector().project(&neutral());
        assert_eq!(stats.tier(Attribute::Midfield), AttributeTier::Elite);
        assert_eq!(stats.tier(Attribute::Defense), AttributeTier::Strong);
        assert_eq!(stats.tier(Attribute::Pace), AttributeTier::Average);
        assert_eq!(AttributeTier::from_value(45.0), AttributeTier::Weak);
        assert_eq!(AttributeTier::from_value(12.0), AttributeTier::Poor);

        let config = TacticalConfiguration::default();
        let scaled = projector().project(&config);
        assert_eq!(scaled.rating(Attribute::Attack), 67);
    }

    #[test]
    fn attribute_keys_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_key(attr.as_str()), Some(attr));
        }
        assert_eq!(Attribute::from_key("aerial"), None);
        let value = serde_json::to_value(projector().project(&neutral())).unwrap();
        assert_eq!(value.as_object().map(serde_json::Map::len), Some(10));
    }
}
