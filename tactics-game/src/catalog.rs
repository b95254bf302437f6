//! Static tactical catalogs: formations, styles, tempos, mentalities,
//! categorical instructions, specialists and predefined strategies.
//!
//! Catalogs are parsed once from the embedded JSON asset and then only ever
//! read. Lookups that miss return `None`; callers treat a miss as "no
//! contribution".
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::StrategyConfig;
use crate::resources::ResourceTriple;

const DEFAULT_CATALOG_DATA: &str = include_str!("../assets/data/catalog.json");

/// A selectable tactical option that shifts the resource allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacticalChoice {
    pub value: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub resource_bonus: ResourceTriple,
}

/// A selectable option without resource effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    pub value: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// An optional named player role with attribute effects and a resource cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Attribute name to signed magnitude. Names outside the projected
    /// attribute set are carried for display only.
    #[serde(default)]
    pub effects: BTreeMap<String, i32>,
    #[serde(default)]
    pub resource_cost: ResourceTriple,
}

/// A named bundle of tactical defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredefinedStrategy {
    pub value: String,
    pub name: String,
    pub description: String,
    pub config: StrategyConfig,
}

/// Simplified option lists shown in beginner mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BeginnerOptions {
    #[serde(default)]
    pub play_styles: Vec<CatalogOption>,
    #[serde(default)]
    pub intensity_levels: Vec<CatalogOption>,
    #[serde(default)]
    pub team_mentalities: Vec<CatalogOption>,
}

/// Errors raised when catalog data cannot be parsed or violates its
/// invariants.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{table} contains an entry with an empty key")]
    EmptyKey { table: &'static str },
    #[error("{table} contains duplicate key '{key}'")]
    DuplicateKey { table: &'static str, key: String },
}

/// Every tactical table used by the allocator, the random generator and the
/// hosting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TacticsCatalog {
    #[serde(default)]
    pub formations: Vec<TacticalChoice>,
    #[serde(default)]
    pub playing_styles: Vec<TacticalChoice>,
    #[serde(default)]
    pub tempos: Vec<TacticalChoice>,
    #[serde(default)]
    pub mentalities: Vec<TacticalChoice>,
    #[serde(default)]
    pub pressing_intensities: Vec<CatalogOption>,
    #[serde(default)]
    pub risk_rewards: Vec<CatalogOption>,
    #[serde(default)]
    pub fouling_strategies: Vec<CatalogOption>,
    #[serde(default)]
    pub defensive_lines: Vec<CatalogOption>,
    #[serde(default)]
    pub specialists: Vec<Specialist>,
    #[serde(default)]
    pub strategies: Vec<PredefinedStrategy>,
    #[serde(default)]
    pub beginner: BeginnerOptions,
}

impl TacticsCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a catalog from a JSON string and validate its keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or a table contains an
    /// empty or duplicate key.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse the embedded catalog asset, falling back to an empty catalog.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_CATALOG_DATA).unwrap_or_else(|err| {
            warn!("embedded catalog rejected: {err}");
            Self::empty()
        })
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let choices = [
            ("formations", &self.formations),
            ("playing_styles", &self.playing_styles),
            ("tempos", &self.tempos),
            ("mentalities", &self.mentalities),
        ];
        for (table, entries) in choices {
            unique_keys(table, entries.iter().map(|c| c.value.as_str()))?;
        }
        let options = [
            ("pressing_intensities", &self.pressing_intensities),
            ("risk_rewards", &self.risk_rewards),
            ("fouling_strategies", &self.fouling_strategies),
            ("defensive_lines", &self.defensive_lines),
        ];
        for (table, entries) in options {
            unique_keys(table, entries.iter().map(|o| o.value.as_str()))?;
        }
        let specialists = self.specialists.iter().map(|s| s.id.as_str());
        unique_keys("specialists", specialists)?;
        let strategies = self.strategies.iter().map(|s| s.value.as_str());
        unique_keys("strategies", strategies)?;
        Ok(())
    }

    #[must_use]
    pub fn formation(&self, key: &str) -> Option<&TacticalChoice> {
        find_choice(&self.formations, key)
    }

    #[must_use]
    pub fn style(&self, key: &str) -> Option<&TacticalChoice> {
        find_choice(&self.playing_styles, key)
    }

    #[must_use]
    pub fn tempo(&self, key: &str) -> Option<&TacticalChoice> {
        find_choice(&self.tempos, key)
    }

    #[must_use]
    pub fn mentality(&self, key: &str) -> Option<&TacticalChoice> {
        find_choice(&self.mentalities, key)
    }

    #[must_use]
    pub fn specialist(&self, id: &str) -> Option<&Specialist> {
        self.specialists.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn strategy(&self, value: &str) -> Option<&PredefinedStrategy> {
        self.strategies.iter().find(|s| s.value == value)
    }
}

fn find_choice<'a>(choices: &'a [TacticalChoice], key: &str) -> Option<&'a TacticalChoice> {
    choices.iter().find(|c| c.value == key)
}

fn unique_keys<'a>(
    table: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for key in keys {
        if key.is_empty() {
            return Err(CatalogError::EmptyKey { table });
        }
        if !seen.insert(key) {
            return Err(CatalogError::DuplicateKey {
                table,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Process-wide catalog parsed from the embedded asset on first use.
#[must_use]
pub fn catalog() -> &'static TacticsCatalog {
    static CATALOG: OnceLock<TacticsCatalog> = OnceLock::new();
    CATALOG.get_or_init(TacticsCatalog::load_from_static)
}
