use anyhow::Result;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tactics_game::constants::MAX_SPECIALISTS;
use tactics_game::{
    ResourceTriple, StaticCatalogLoader, TacticalConfiguration, TacticsCatalog, TacticsEngine,
};

pub mod checks;

pub type Engine = TacticsEngine<StaticCatalogLoader>;

/// One iteration of an invariant check, driven by a seeded stream.
pub type Check = fn(&Engine, &mut ChaCha20Rng) -> Result<()>;

#[derive(Clone)]
pub struct InvariantScenario {
    key: &'static str,
    name: &'static str,
    description: &'static str,
    check: Check,
}

impl InvariantScenario {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        description: &'static str,
        check: Check,
    ) -> Self {
        Self {
            key,
            name,
            description,
            check,
        }
    }

    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    pub fn run(&self, engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
        (self.check)(engine, rng)
    }
}

impl std::fmt::Debug for InvariantScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvariantScenario")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

pub fn all_scenarios() -> Vec<InvariantScenario> {
    vec![
        InvariantScenario::new(
            "smoke",
            "Smoke",
            "Catalog loads and the default configuration allocates to 68/93/78",
            checks::smoke,
        ),
        InvariantScenario::new(
            "bonus-additivity",
            "Bonus Additivity",
            "Bonus equals the sum of table lookups in any specialist order",
            checks::bonus_additivity,
        ),
        InvariantScenario::new(
            "allocation-bounds",
            "Allocation Bounds",
            "Every axis lies in [60,120] before budget reduction",
            checks::allocation_bounds,
        ),
        InvariantScenario::new(
            "budget-reduction",
            "Budget Reduction",
            "Over-budget triples lose ceil(excess/3) per axis, floored at 60",
            checks::budget_reduction,
        ),
        InvariantScenario::new(
            "unknown-keys",
            "Unknown Key Tolerance",
            "Stale catalog keys contribute nothing and never fail",
            checks::unknown_keys,
        ),
        InvariantScenario::new(
            "specialist-cap",
            "Specialist Cap",
            "Random toggle sequences never exceed three unique specialists",
            checks::specialist_cap,
        ),
        InvariantScenario::new(
            "random-strategy",
            "Random Strategy",
            "Random strategies copy a predefined fragment and roll 60-99 per axis",
            checks::random_strategy,
        ),
        InvariantScenario::new(
            "projection-bounds",
            "Projection Bounds",
            "Every projected attribute lies in [10,150]",
            checks::projection_bounds,
        ),
        InvariantScenario::new(
            "pro-mode",
            "Pro Mode Bypass",
            "Pro-mode sliders set one axis verbatim and edits never rebalance",
            checks::pro_mode,
        ),
        InvariantScenario::new(
            "agent-draft",
            "Agent Draft",
            "Generated prompts respect session limits; only soccer payloads carry tactics",
            checks::agent_draft,
        ),
    ]
}

pub fn find_scenario(key: &str) -> Option<InvariantScenario> {
    all_scenarios()
        .into_iter()
        .find(|scenario| scenario.key() == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    all_scenarios()
        .iter()
        .map(|scenario| (scenario.key(), scenario.description()))
        .collect()
}

fn pick_key<T>(rng: &mut ChaCha20Rng, entries: &[T], key: impl Fn(&T) -> &str) -> String {
    String::from(entries.choose(rng).map(key).unwrap_or_default())
}

/// Draw a configuration uniformly from the catalog's tables, with up to three
/// specialists and resources anywhere in 40..=140.
pub fn random_configuration(
    catalog: &TacticsCatalog,
    rng: &mut ChaCha20Rng,
) -> TacticalConfiguration {
    let formation = pick_key(rng, &catalog.formations, |c| c.value.as_str());
    let style = pick_key(rng, &catalog.playing_styles, |c| c.value.as_str());
    let tempo = pick_key(rng, &catalog.tempos, |c| c.value.as_str());
    let mentality = pick_key(rng, &catalog.mentalities, |c| c.value.as_str());
    let pressing = pick_key(rng, &catalog.pressing_intensities, |o| o.value.as_str());
    let risk_reward = pick_key(rng, &catalog.risk_rewards, |o| o.value.as_str());
    let fouling = pick_key(rng, &catalog.fouling_strategies, |o| o.value.as_str());
    let defensive_line = pick_key(rng, &catalog.defensive_lines, |o| o.value.as_str());
    let count = rng.gen_range(0..=MAX_SPECIALISTS);
    let specialists: Vec<&str> = catalog
        .specialists
        .choose_multiple(rng, count)
        .map(|s| s.id.as_str())
        .collect();
    let resources = ResourceTriple::new(
        rng.gen_range(40..=140),
        rng.gen_range(40..=140),
        rng.gen_range(40..=140),
    );
    let config = TacticalConfiguration {
        formation,
        style,
        tempo,
        mentality,
        resources,
        pressing_intensity: pressing,
        risk_reward,
        fouling_strategy: fouling,
        defensive_line,
        ..TacticalConfiguration::default()
    };
    config.with_specialists(specialists)
}
