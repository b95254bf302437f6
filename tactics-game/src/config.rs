//! Tactical configuration aggregate and predefined strategy fragments.
use log::trace;
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::constants::MAX_SPECIALISTS;
use crate::resources::ResourceTriple;

pub const DEFAULT_FORMATION: &str = "4-4-2";
pub const DEFAULT_STYLE: &str = "possession";
pub const DEFAULT_TEMPO: &str = "medium";
pub const DEFAULT_MENTALITY: &str = "balanced";
pub const DEFAULT_PRESSING_INTENSITY: &str = "selective";
pub const DEFAULT_RISK_REWARD: &str = "ambitious";
pub const DEFAULT_FOULING_STRATEGY: &str = "professional";
pub const DEFAULT_DEFENSIVE_LINE: &str = "medium_line";

/// Ordered, duplicate-free list of selected specialist ids.
pub type SpecialistList = SmallVec<[String; MAX_SPECIALISTS]>;

/// The full tactical setup edited by the hosting form.
///
/// Keys are kept as plain strings: a key missing from the current catalog is
/// a valid (if inert) configuration, never an error. Specialist ids read from
/// JSON go through the same dedupe and cap as [`Self::toggle_specialist`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalConfiguration {
    #[serde(default = "default_formation")]
    pub formation: String,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default = "default_tempo")]
    pub tempo: String,
    #[serde(default = "default_mentality")]
    pub mentality: String,
    #[serde(default = "ResourceTriple::baseline")]
    pub resources: ResourceTriple,
    #[serde(default = "default_pressing_intensity")]
    pub pressing_intensity: String,
    #[serde(default = "default_risk_reward")]
    pub risk_reward: String,
    #[serde(default = "default_fouling_strategy")]
    pub fouling_strategy: String,
    #[serde(default = "default_defensive_line")]
    pub defensive_line: String,
    #[serde(default, deserialize_with = "deserialize_specialists")]
    pub specialists: SpecialistList,
}

impl Default for TacticalConfiguration {
    fn default() -> Self {
        Self {
            formation: default_formation(),
            style: default_style(),
            tempo: default_tempo(),
            mentality: default_mentality(),
            resources: ResourceTriple::baseline(),
            pressing_intensity: default_pressing_intensity(),
            risk_reward: default_risk_reward(),
            fouling_strategy: default_fouling_strategy(),
            defensive_line: default_defensive_line(),
            specialists: SpecialistList::new(),
        }
    }
}

/// Outcome of a specialist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialistToggle {
    Added,
    Removed,
    /// The list was already full; nothing changed.
    Ignored,
}

impl TacticalConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resources(mut self, resources: ResourceTriple) -> Self {
        self.resources = resources;
        self
    }

    #[must_use]
    pub fn with_specialists<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.specialists.clear();
        for id in ids {
            let id = id.as_ref();
            if !self.has_specialist(id) {
                self.toggle_specialist(id);
            }
        }
        self
    }

    #[must_use]
    pub fn has_specialist(&self, id: &str) -> bool {
        self.specialists.iter().any(|s| s == id)
    }

    /// Select or deselect a specialist.
    ///
    /// Removal keeps the relative order of the remaining ids. Adding past
    /// [`MAX_SPECIALISTS`] is silently ignored.
    pub fn toggle_specialist(&mut self, id: &str) -> SpecialistToggle {
        if let Some(idx) = self.specialists.iter().position(|s| s == id) {
            self.specialists.remove(idx);
            return SpecialistToggle::Removed;
        }
        if self.specialists.len() >= MAX_SPECIALISTS {
            trace!("specialist cap reached, ignoring {id}");
            return SpecialistToggle::Ignored;
        }
        self.specialists.push(id.to_string());
        SpecialistToggle::Added
    }

    /// Copy every field of a strategy fragment onto this configuration.
    ///
    /// Resources are left untouched; the caller decides whether to
    /// reallocate or overwrite them.
    pub fn apply_strategy(&mut self, fragment: &StrategyConfig) {
        self.formation.clone_from(&fragment.formation);
        self.style.clone_from(&fragment.style);
        self.tempo.clone_from(&fragment.tempo);
        self.mentality.clone_from(&fragment.mentality);
        self.pressing_intensity
            .clone_from(&fragment.pressing_intensity);
        self.risk_reward.clone_from(&fragment.risk_reward);
        self.fouling_strategy.clone_from(&fragment.fouling_strategy);
        self.defensive_line.clone_from(&fragment.defensive_line);
        self.specialists.clear();
        for id in &fragment.specialists {
            if self.has_specialist(id) {
                continue;
            }
            if self.toggle_specialist(id) == SpecialistToggle::Ignored {
                break;
            }
        }
    }
}

/// The configuration fields bundled by a predefined strategy.
///
/// Resources are deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StrategyConfig {
    pub formation: String,
    pub style: String,
    pub tempo: String,
    pub mentality: String,
    pub pressing_intensity: String,
    pub risk_reward: String,
    pub fouling_strategy: String,
    pub defensive_line: String,
    #[serde(default)]
    pub specialists: Vec<String>,
}

/// A strategy fragment paired with freshly drawn resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDraft {
    #[serde(flatten)]
    pub config: StrategyConfig,
    pub resources: ResourceTriple,
}

impl StrategyDraft {
    /// Materialize the draft as a full configuration, keeping its resources.
    #[must_use]
    pub fn into_configuration(self) -> TacticalConfiguration {
        let mut config = TacticalConfiguration::default().with_resources(self.resources);
        config.apply_strategy(&self.config);
        config
    }
}

fn deserialize_specialists<'de, D>(deserializer: D) -> Result<SpecialistList, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = Vec::<String>::deserialize(deserializer)?;
    let config = TacticalConfiguration::default().with_specialists(ids);
    Ok(config.specialists)
}

fn default_formation() -> String {
    DEFAULT_FORMATION.to_string()
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

fn default_tempo() -> String {
    DEFAULT_TEMPO.to_string()
}

fn default_mentality() -> String {
    DEFAULT_MENTALITY.to_string()
}

fn default_pressing_intensity() -> String {
    DEFAULT_PRESSING_INTENSITY.to_string()
}

fn default_risk_reward() -> String {
    DEFAULT_RISK_REWARD.to_string()
}

fn default_fouling_strategy() -> String {
    DEFAULT_FOULING_STRATEGY.to_string()
}

fn default_defensive_line() -> String {
    DEFAULT_DEFENSIVE_LINE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(config: &TacticalConfiguration) -> Vec<&str> {
        config.specialists.iter().map(String::as_str).collect()
    }

    #[test]
    fn default_matches_form_initial_state() {
        let config = TacticalConfiguration::default();
        assert_eq!(config.formation, "4-4-2");
        assert_eq!(config.style, "possession");
        assert_eq!(config.tempo, "medium");
        assert_eq!(config.mentality, "balanced");
        assert_eq!(config.resources, ResourceTriple::new(80, 80, 80));
        assert_eq!(config.pressing_intensity, "selective");
        assert_eq!(config.risk_reward, "ambitious");
        assert_eq!(config.fouling_strategy, "professional");
        assert_eq!(config.defensive_line, "medium_line");
        assert!(config.specialists.is_empty());
    }

    #[test]
    fn fourth_specialist_is_ignored() {
        let full = ["playmaker", "destroyer", "false_nine"];
        let mut config = TacticalConfiguration::default().with_specialists(full);
        let outcome = config.toggle_specialist("target_man");
        assert_eq!(outcome, SpecialistToggle::Ignored);
        assert_eq!(ids(&config), full);

        let outcome = config.toggle_specialist("destroyer");
        assert_eq!(outcome, SpecialistToggle::Removed);
        assert_eq!(ids(&config), ["playmaker", "false_nine"]);
        let outcome = config.toggle_specialist("target_man");
        assert_eq!(outcome, SpecialistToggle::Added);
        assert_eq!(ids(&config), ["playmaker", "false_nine", "target_man"]);
    }

    #[test]
    fn removal_preserves_order_of_remaining_ids() {
        let pair = ["playmaker", "destroyer"];
        let mut config = TacticalConfiguration::default().with_specialists(pair);
        let original = config.specialists.clone();
        let added = config.toggle_specialist("wing_back");
        let removed = config.toggle_specialist("wing_back");
        assert_eq!(added, SpecialistToggle::Added);
        assert_eq!(removed, SpecialistToggle::Removed);
        assert_eq!(config.specialists, original);
    }

    #[test]
    fn apply_strategy_copies_fields_but_keeps_resources() {
        let fragment = StrategyConfig {
            formation: "5-3-2".into(),
            style: "defensive".into(),
            tempo: "slow".into(),
            mentality: "defensive".into(),
            pressing_intensity: "passive".into(),
            risk_reward: "conservative".into(),
            fouling_strategy: "professional".into(),
            defensive_line: "deep_block".into(),
            specialists: vec![
                "destroyer".into(),
                "destroyer".into(),
                "sweeper_keeper".into(),
                "playmaker".into(),
                "false_nine".into(),
            ],
        };
        let resources = ResourceTriple::new(100, 70, 65);
        let mut config = TacticalConfiguration::default().with_resources(resources);
        config.apply_strategy(&fragment);
        assert_eq!(config.formation, "5-3-2");
        assert_eq!(config.defensive_line, "deep_block");
        assert_eq!(config.resources, resources);
        assert_eq!(ids(&config), ["destroyer", "sweeper_keeper", "playmaker"]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"formation": "3-5-2", "specialists": ["playmaker"]}"#;
        let config: TacticalConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.formation, "3-5-2");
        assert_eq!(config.style, "possession");
        assert_eq!(config.resources, ResourceTriple::baseline());
        assert_eq!(ids(&config), ["playmaker"]);
    }

    #[test]
    fn json_specialists_are_deduped_and_capped() {
        let listed = r#"["destroyer", "destroyer", "playmaker", "false_nine", "wing_back"]"#;
        let json = format!(r#"{{"specialists": {listed}}}"#);
        let config: TacticalConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(ids(&config), ["destroyer", "playmaker", "false_nine"]);

        let round_trip = serde_json::to_string(&config).unwrap();
        let reparsed: TacticalConfiguration = serde_json::from_str(&round_trip).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn draft_serializes_flat_and_materializes() {
        let draft = StrategyDraft {
            config: StrategyConfig {
                formation: "4-3-3".into(),
                specialists: vec!["pace_merchant".into()],
                ..StrategyConfig::default()
            },
            resources: ResourceTriple::new(70, 95, 61),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["formation"], "4-3-3");
        assert_eq!(value["resources"]["midfield"], 95);

        let config = draft.into_configuration();
        assert_eq!(config.formation, "4-3-3");
        assert_eq!(config.resources, ResourceTriple::new(70, 95, 61));
        assert_eq!(ids(&config), vec!["pace_merchant"]);
    }
}
