use anyhow::{Context, Result, ensure};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use tactics_game::constants::{
    ATTRIBUTE_MAX, ATTRIBUTE_MIN, MAX_SPECIALISTS, RANDOM_RESOURCE_MAX, RANDOM_RESOURCE_MIN,
    RESOURCE_AXIS_MAX, RESOURCE_AXIS_MIN, RESOURCE_BUDGET,
};
use tactics_game::{
    AgentDraft, ResourceAllocator, ResourceAxis, ResourceTriple, SessionKind, SpecialistToggle,
    TacticalConfiguration, TacticalField, TacticsMode, auto_allocate, slider_positions,
};

use super::{Engine, random_configuration};

pub fn smoke(engine: &Engine, _rng: &mut ChaCha20Rng) -> Result<()> {
    let catalog = engine.catalog();
    ensure!(!catalog.formations.is_empty(), "formation table is empty");
    ensure!(!catalog.strategies.is_empty(), "strategy table is empty");
    let config = TacticalConfiguration::default();
    let bonus = engine.compute_bonus(&config);
    ensure!(
        bonus == ResourceTriple::new(10, 35, 20),
        "default bonus is {bonus}"
    );
    let allocated = engine.allocate(ResourceAllocator::auto(), &config);
    ensure!(
        allocated == ResourceTriple::new(68, 93, 78),
        "default allocation is {allocated}"
    );
    Ok(())
}

pub fn bonus_additivity(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let catalog = engine.catalog();
    let config = random_configuration(catalog, rng);
    let mut expected = ResourceTriple::ZERO;
    let choices = [
        catalog.formation(&config.formation),
        catalog.style(&config.style),
        catalog.tempo(&config.tempo),
        catalog.mentality(&config.mentality),
    ];
    for choice in choices.into_iter().flatten() {
        expected += choice.resource_bonus;
    }
    expected += config
        .specialists
        .iter()
        .filter_map(|id| catalog.specialist(id))
        .map(|s| s.resource_cost)
        .sum::<ResourceTriple>();

    let bonus = engine.compute_bonus(&config);
    ensure!(bonus == expected, "bonus {bonus} != lookup sum {expected}");

    let mut shuffled = config.clone();
    shuffled.specialists.shuffle(rng);
    let reordered = engine.compute_bonus(&shuffled);
    ensure!(
        reordered == bonus,
        "specialist order changed bonus: {bonus} vs {reordered}"
    );
    Ok(())
}

pub fn allocation_bounds(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let config = random_configuration(engine.catalog(), rng);
    let trace = auto_allocate(engine.catalog(), &config);
    for axis in ResourceAxis::ALL {
        let clamped = trace.clamped.get(axis);
        ensure!(
            (RESOURCE_AXIS_MIN..=RESOURCE_AXIS_MAX).contains(&clamped),
            "{axis} clamped to {clamped} for {}/{}/{}/{}",
            config.formation,
            config.style,
            config.tempo,
            config.mentality
        );
        let allocated = trace.allocated.get(axis);
        ensure!(
            (RESOURCE_AXIS_MIN..=RESOURCE_AXIS_MAX).contains(&allocated),
            "{axis} allocated {allocated}"
        );
    }
    Ok(())
}

pub fn budget_reduction(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let config = random_configuration(engine.catalog(), rng);
    let trace = auto_allocate(engine.catalog(), &config);
    let total = trace.clamped.total();
    if total <= RESOURCE_BUDGET {
        ensure!(
            trace.allocated == trace.clamped && trace.excess == 0,
            "within-budget triple {} was altered to {}",
            trace.clamped,
            trace.allocated
        );
        return Ok(());
    }
    let excess = total - RESOURCE_BUDGET;
    let reduction = (excess + 2) / 3;
    ensure!(
        trace.excess == excess && trace.reduction == reduction,
        "excess/reduction {}/{} expected {excess}/{reduction}",
        trace.excess,
        trace.reduction
    );
    let expected = trace
        .clamped
        .map(|v| (v - reduction).max(RESOURCE_AXIS_MIN));
    ensure!(
        trace.allocated == expected,
        "reduced {} expected {expected}",
        trace.allocated
    );
    Ok(())
}

pub fn unknown_keys(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let catalog = engine.catalog();
    let config = random_configuration(catalog, rng);
    let fields = [
        TacticalField::Formation,
        TacticalField::Style,
        TacticalField::Tempo,
        TacticalField::Mentality,
    ];
    let field = *fields.choose(rng).context("no fields to corrupt")?;
    let contribution = match field {
        TacticalField::Formation => catalog.formation(&config.formation),
        TacticalField::Style => catalog.style(&config.style),
        TacticalField::Tempo => catalog.tempo(&config.tempo),
        _ => catalog.mentality(&config.mentality),
    }
    .map_or(ResourceTriple::ZERO, |choice| choice.resource_bonus);

    let mut session = engine.session();
    for f in TacticalField::ALL {
        let value = match f {
            TacticalField::Formation => &config.formation,
            TacticalField::Style => &config.style,
            TacticalField::Tempo => &config.tempo,
            TacticalField::Mentality => &config.mentality,
            TacticalField::PressingIntensity => &config.pressing_intensity,
            TacticalField::RiskReward => &config.risk_reward,
            TacticalField::FoulingStrategy => &config.fouling_strategy,
            TacticalField::DefensiveLine => &config.defensive_line,
        };
        session.set_field(f, value.clone());
    }
    session.set_field(field, format!("stale-{}", rng.gen_range(0..1_000_000)));

    let stale = engine.compute_bonus(session.config());
    let fresh = engine.compute_bonus(&config.clone().with_specialists(Vec::<&str>::new()));
    ensure!(
        stale + contribution == fresh,
        "stale {field} changed more than its own contribution: {stale} + {contribution} != {fresh}"
    );
    let projected = session.preview();
    for (attr, value) in projected.iter() {
        ensure!(value.is_finite(), "{attr} not finite with stale {field}");
    }
    Ok(())
}

pub fn specialist_cap(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let ids: Vec<&str> = engine
        .catalog()
        .specialists
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    let mut session = engine.session();
    for _ in 0..24 {
        let id = ids.choose(rng).context("no specialists in catalog")?;
        let before = session.config().specialists.clone();
        let outcome = session.toggle_specialist(id);
        let after = &session.config().specialists;
        match outcome {
            SpecialistToggle::Added => ensure!(
                before.len() < MAX_SPECIALISTS && after.last().map(String::as_str) == Some(*id),
                "{id} added to a full list"
            ),
            SpecialistToggle::Removed => {
                let mut expected = before.clone();
                expected.retain(|s| s.as_str() != *id);
                ensure!(*after == expected, "removing {id} reordered the list");
            }
            SpecialistToggle::Ignored => ensure!(
                before.len() == MAX_SPECIALISTS && *after == before,
                "{id} ignored while room remained"
            ),
        }
        let len = after.len();
        ensure!(len <= MAX_SPECIALISTS, "list grew to {len}");
        let mut unique = after.to_vec();
        unique.sort();
        unique.dedup();
        ensure!(unique.len() == len, "duplicate in {after:?}");
    }
    Ok(())
}

pub fn random_strategy(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let draft = engine
        .generate_random(rng)
        .context("catalog has no strategies")?;
    ensure!(
        engine
            .catalog()
            .strategies
            .iter()
            .any(|s| s.config == draft.config),
        "draft config matches no predefined strategy"
    );
    for axis in ResourceAxis::ALL {
        let value = draft.resources.get(axis);
        ensure!(
            (RANDOM_RESOURCE_MIN..=RANDOM_RESOURCE_MAX).contains(&value),
            "{axis} rolled {value}"
        );
    }
    Ok(())
}

pub fn projection_bounds(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let config = random_configuration(engine.catalog(), rng);
    let stats = engine.project(&config);
    for (attr, value) in stats.iter() {
        ensure!(
            (ATTRIBUTE_MIN..=ATTRIBUTE_MAX).contains(&value),
            "{attr} projected to {value} for {}",
            config.formation
        );
    }
    Ok(())
}

pub fn pro_mode(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let positions: Vec<i32> = slider_positions().collect();
    let mut session = engine.session().with_mode(TacticsMode::Pro);
    let mut expected = session.resources();
    for _ in 0..12 {
        if rng.gen_bool(0.5) {
            let axis = *ResourceAxis::ALL.choose(rng).context("no axes")?;
            let value = *positions.choose(rng).context("no slider positions")?;
            ensure!(session.set_resource(axis, value), "pro slider refused");
            expected.set(axis, value);
        } else {
            let field = *TacticalField::ALL.choose(rng).context("no fields")?;
            session.set_field(field, format!("edit-{}", rng.gen_range(0..4)));
        }
        ensure!(
            session.resources() == expected,
            "pro resources {} expected {expected}",
            session.resources()
        );
    }
    session.set_mode(TacticsMode::Beginner);
    ensure!(
        session.resources() == expected,
        "mode switch recomputed resources"
    );
    ensure!(
        !session.set_resource(ResourceAxis::Attack, RESOURCE_AXIS_MAX),
        "beginner slider accepted"
    );
    Ok(())
}

pub fn agent_draft(engine: &Engine, rng: &mut ChaCha20Rng) -> Result<()> {
    let kind = *SessionKind::ALL.choose(rng).context("no session kinds")?;
    let mut draft = AgentDraft::new(kind);
    draft.name = format!("Agent{}", rng.gen_range(0..10_000));
    draft.set_soccer_config(random_configuration(engine.catalog(), rng));
    draft.generate_prompt();
    ensure!(
        draft.system_prompt.chars().count() <= kind.character_limit(),
        "{kind} prompt exceeds its limit"
    );
    let expected_config = draft.soccer_config().clone();
    let payload = draft.into_payload().context("draft failed validation")?;
    ensure!(payload.session_type_id == kind.id(), "wrong session id");
    if kind.is_soccer() {
        ensure!(
            payload.soccer_config.as_ref() == Some(&expected_config),
            "soccer payload lost its configuration"
        );
    } else {
        ensure!(
            payload.soccer_config.is_none(),
            "{kind} payload carries tactics"
        );
    }
    Ok(())
}
