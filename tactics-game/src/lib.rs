//! Tactics Engine
//!
//! Platform-agnostic soccer tactics logic: resource bonuses, budgeted
//! resource allocation, random strategies and the attribute preview.
//! This crate has no UI or platform-specific dependencies.

pub mod agent;
pub mod allocation;
pub mod bonus;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod numbers;
pub mod projection;
pub mod random_strategy;
pub mod resources;
pub mod session;

// Re-export commonly used types
pub use agent::{AgentDraft, AgentPayload, DraftError, SessionKind, generic_prompt, tactical_prompt};
pub use allocation::{
    BudgetTrace, ResourceAllocator, auto_allocate, clamp_axes, reduce_to_budget, slider_positions,
};
pub use bonus::compute_bonus;
pub use catalog::{
    BeginnerOptions, CatalogError, CatalogOption, PredefinedStrategy, Specialist, TacticalChoice,
    TacticsCatalog, catalog,
};
pub use config::{
    SpecialistList, SpecialistToggle, StrategyConfig, StrategyDraft, TacticalConfiguration,
};
pub use projection::{
    Attribute, AttributeProjector, AttributeTier, FinalAttributeVector, ProjectionTables,
    projection_tables,
};
pub use random_strategy::{StrategyDice, generate_random, generate_seeded};
pub use resources::{ResourceAxis, ResourceTriple};
pub use session::{ConfigurationSession, TacticalField, TacticsMode};

/// Trait for abstracting where catalogs come from
/// Platform-specific implementations can provide this
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the tactical catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<TacticsCatalog, Self::Error>;

    /// Load the projection tables
    ///
    /// # Errors
    ///
    /// Returns an error if the tables cannot be loaded.
    fn load_projection(&self) -> Result<ProjectionTables, Self::Error>;
}

/// Loader backed by the assets embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogLoader;

impl CatalogLoader for StaticCatalogLoader {
    type Error = std::convert::Infallible;

    fn load_catalog(&self) -> Result<TacticsCatalog, Self::Error> {
        Ok(catalog().clone())
    }

    fn load_projection(&self) -> Result<ProjectionTables, Self::Error> {
        Ok(projection_tables().clone())
    }
}

/// Main engine: holds the loader and the tables it produced, and answers
/// the four entry points against them.
#[derive(Debug, Clone)]
pub struct TacticsEngine<L>
where
    L: CatalogLoader,
{
    loader: L,
    catalog: TacticsCatalog,
    tables: ProjectionTables,
}

impl<L> TacticsEngine<L>
where
    L: CatalogLoader,
{
    /// Create an engine, loading both table sets from `loader`
    ///
    /// # Errors
    ///
    /// Returns an error if either table set cannot be loaded.
    pub fn new(loader: L) -> Result<Self, L::Error> {
        let catalog = loader.load_catalog()?;
        let tables = loader.load_projection()?;
        Ok(Self {
            loader,
            catalog,
            tables,
        })
    }

    /// Load fresh tables from the loader. On error the current tables are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns an error if either table set cannot be loaded.
    pub fn reload(&mut self) -> Result<(), L::Error> {
        let catalog = self.loader.load_catalog()?;
        let tables = self.loader.load_projection()?;
        self.catalog = catalog;
        self.tables = tables;
        Ok(())
    }

    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    #[must_use]
    pub const fn catalog(&self) -> &TacticsCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn tables(&self) -> &ProjectionTables {
        &self.tables
    }

    #[must_use]
    pub fn compute_bonus(&self, config: &TacticalConfiguration) -> ResourceTriple {
        compute_bonus(&self.catalog, config)
    }

    #[must_use]
    pub fn allocate(
        &self,
        allocator: ResourceAllocator,
        config: &TacticalConfiguration,
    ) -> ResourceTriple {
        allocator.allocate(&self.catalog, config)
    }

    #[must_use]
    pub fn project(&self, config: &TacticalConfiguration) -> FinalAttributeVector {
        AttributeProjector::new(&self.catalog, &self.tables).project(config)
    }

    pub fn generate_random<D>(&self, dice: &mut D) -> Option<StrategyDraft>
    where
        D: StrategyDice + ?Sized,
    {
        generate_random(&self.catalog, dice)
    }

    /// Open an editing session over this engine's tables.
    #[must_use]
    pub fn session(&self) -> ConfigurationSession<'_> {
        ConfigurationSession::new(&self.catalog, &self.tables)
    }
}
