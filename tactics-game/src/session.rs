//! The hosting form: one configuration plus the edits a user can make to it.
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::allocation::ResourceAllocator;
use crate::catalog::TacticsCatalog;
use crate::config::{SpecialistToggle, TacticalConfiguration};
use crate::projection::{AttributeProjector, FinalAttributeVector, ProjectionTables};
use crate::random_strategy::{StrategyDice, generate_random};
use crate::resources::{ResourceAxis, ResourceTriple};

/// Editing mode of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticsMode {
    /// Resources follow the tactical choices; sliders are disabled.
    #[default]
    Beginner,
    /// Resources only change through the sliders.
    Pro,
}

impl TacticsMode {
    #[must_use]
    pub const fn allocator(self) -> ResourceAllocator {
        match self {
            Self::Beginner => ResourceAllocator::auto(),
            Self::Pro => ResourceAllocator::manual(),
        }
    }
}

/// The categorical fields of a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalField {
    Formation,
    Style,
    Tempo,
    Mentality,
    PressingIntensity,
    RiskReward,
    FoulingStrategy,
    DefensiveLine,
}

impl TacticalField {
    pub const ALL: [Self; 8] = [
        Self::Formation,
        Self::Style,
        Self::Tempo,
        Self::Mentality,
        Self::PressingIntensity,
        Self::RiskReward,
        Self::FoulingStrategy,
        Self::DefensiveLine,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Formation => "formation",
            Self::Style => "style",
            Self::Tempo => "tempo",
            Self::Mentality => "mentality",
            Self::PressingIntensity => "pressing_intensity",
            Self::RiskReward => "risk_reward",
            Self::FoulingStrategy => "fouling_strategy",
            Self::DefensiveLine => "defensive_line",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    fn slot(self, config: &mut TacticalConfiguration) -> &mut String {
        match self {
            Self::Formation => &mut config.formation,
            Self::Style => &mut config.style,
            Self::Tempo => &mut config.tempo,
            Self::Mentality => &mut config.mentality,
            Self::PressingIntensity => &mut config.pressing_intensity,
            Self::RiskReward => &mut config.risk_reward,
            Self::FoulingStrategy => &mut config.fouling_strategy,
            Self::DefensiveLine => &mut config.defensive_line,
        }
    }
}

impl fmt::Display for TacticalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration being edited against a borrowed catalog.
///
/// Every edit except a slider move re-runs the allocator; in pro mode the
/// allocator hands the current resources back unchanged.
#[derive(Debug, Clone)]
pub struct ConfigurationSession<'a> {
    catalog: &'a TacticsCatalog,
    tables: &'a ProjectionTables,
    mode: TacticsMode,
    config: TacticalConfiguration,
}

impl<'a> ConfigurationSession<'a> {
    /// Start a beginner-mode session on the default configuration.
    #[must_use]
    pub fn new(catalog: &'a TacticsCatalog, tables: &'a ProjectionTables) -> Self {
        Self {
            catalog,
            tables,
            mode: TacticsMode::Beginner,
            config: TacticalConfiguration::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TacticsMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &TacticalConfiguration {
        &self.config
    }

    #[must_use]
    pub fn into_configuration(self) -> TacticalConfiguration {
        self.config
    }

    #[must_use]
    pub const fn mode(&self) -> TacticsMode {
        self.mode
    }

    /// Switch mode. Resources stay as they are until the next edit.
    pub const fn set_mode(&mut self, mode: TacticsMode) {
        self.mode = mode;
    }

    pub fn set_field(&mut self, field: TacticalField, value: impl Into<String>) {
        *field.slot(&mut self.config) = value.into();
        self.reallocate();
    }

    pub fn toggle_specialist(&mut self, id: &str) -> SpecialistToggle {
        let outcome = self.config.toggle_specialist(id);
        if outcome != SpecialistToggle::Ignored {
            self.reallocate();
        }
        outcome
    }

    /// Load a predefined strategy by value. Unknown values leave the session
    /// untouched and return `false`.
    pub fn apply_predefined(&mut self, value: &str) -> bool {
        let Some(strategy) = self.catalog.strategy(value) else {
            debug!("unknown strategy '{value}' ignored");
            return false;
        };
        self.config.apply_strategy(&strategy.config);
        self.reallocate();
        true
    }

    /// Replace the configuration with a random strategy and its rolled
    /// resources. The rolled resources are kept as drawn, even in beginner
    /// mode.
    pub fn randomize<D>(&mut self, dice: &mut D) -> bool
    where
        D: StrategyDice + ?Sized,
    {
        let Some(draft) = generate_random(self.catalog, dice) else {
            debug!("no predefined strategies to randomize");
            return false;
        };
        self.config.apply_strategy(&draft.config);
        self.config.resources = draft.resources;
        true
    }

    /// Move one resource slider. Only honoured in pro mode.
    pub fn set_resource(&mut self, axis: ResourceAxis, value: i32) -> bool {
        let allocator = self.mode.allocator();
        self.config.resources = allocator.apply_slider(self.config.resources, axis, value);
        !allocator.auto_balance
    }

    /// Back to the default configuration; the mode is kept.
    pub fn reset(&mut self) {
        self.config = TacticalConfiguration::default();
    }

    #[must_use]
    pub fn preview(&self) -> FinalAttributeVector {
        AttributeProjector::new(self.catalog, self.tables).project(&self.config)
    }

    #[must_use]
    pub const fn resources(&self) -> ResourceTriple {
        self.config.resources
    }

    #[must_use]
    pub const fn total_resources(&self) -> i32 {
        self.config.resources.total()
    }

    fn reallocate(&mut self) {
        self.config.resources = self.mode.allocator().allocate(self.catalog, &self.config);
    }
}
