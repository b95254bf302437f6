use std::collections::VecDeque;
use std::ops::RangeInclusive;

use tactics_game::{
    ConfigurationSession, ResourceAllocator, ResourceAxis, ResourceTriple, SpecialistToggle,
    StrategyDice, TacticalConfiguration, TacticalField, TacticsMode, auto_allocate, catalog,
    compute_bonus, generate_random, projection_tables,
};

struct Script(VecDeque<i32>);

impl StrategyDice for Script {
    fn pick(&mut self, len: usize) -> usize {
        let idx = usize::try_from(self.0.pop_front().expect("pick scripted")).unwrap();
        assert!(idx < len, "scripted index {idx} out of {len}");
        idx
    }

    fn roll(&mut self, range: RangeInclusive<i32>) -> i32 {
        let value = self.0.pop_front().expect("roll scripted");
        assert!(range.contains(&value));
        value
    }
}

#[test]
fn scenario_a_default_configuration() {
    let config = TacticalConfiguration::default();
    assert_eq!(
        compute_bonus(catalog(), &config),
        ResourceTriple::new(10, 35, 20)
    );

    let trace = auto_allocate(catalog(), &config);
    assert_eq!(trace.clamped, ResourceTriple::new(90, 115, 100));
    assert_eq!(trace.clamped.total(), 305);
    assert_eq!(trace.excess, 65);
    assert_eq!(trace.reduction, 22);
    assert_eq!(trace.allocated, ResourceTriple::new(68, 93, 78));
    assert_eq!(trace.allocated.total(), 239);
}

#[test]
fn scenario_b_double_toggle_restores_list() {
    for base in [
        Vec::new(),
        vec!["playmaker"],
        vec!["playmaker", "destroyer"],
    ] {
        let mut config = TacticalConfiguration::default().with_specialists(&base);
        let original = config.specialists.clone();
        for id in ["wing_back", "target_man"] {
            let first = config.toggle_specialist(id);
            let second = config.toggle_specialist(id);
            assert_ne!(first, SpecialistToggle::Ignored);
            assert_ne!(first, second);
            assert_eq!(config.specialists, original, "{id} on {base:?}");
        }
    }
}

#[test]
fn scenario_c_scripted_random_strategy() {
    let mut dice = Script(VecDeque::from([2, 70, 95, 61]));
    let draft = generate_random(catalog(), &mut dice).expect("catalog has strategies");
    assert_eq!(draft.config, catalog().strategies[2].config);
    assert_eq!(catalog().strategies[2].value, "defensive");
    assert_eq!(draft.resources, ResourceTriple::new(70, 95, 61));
    assert!(dice.0.is_empty());

    // no budget pass: a high roll survives verbatim
    let mut dice = Script(VecDeque::from([0, 99, 99, 99]));
    let draft = generate_random(catalog(), &mut dice).unwrap();
    assert_eq!(draft.resources.total(), 297);
}

#[test]
fn unknown_formation_contributes_nothing() {
    let known = TacticalConfiguration::default();
    let mut unknown = known.clone();
    unknown.formation = "nonexistent".into();
    let formation = catalog().formation("4-4-2").unwrap().resource_bonus;
    assert_eq!(
        compute_bonus(catalog(), &unknown) + formation,
        compute_bonus(catalog(), &known)
    );
}

#[test]
fn specialist_cap_keeps_first_three() {
    let mut session = ConfigurationSession::new(catalog(), projection_tables());
    for id in ["playmaker", "destroyer", "false_nine"] {
        assert_eq!(session.toggle_specialist(id), SpecialistToggle::Added);
    }
    let resources = session.resources();
    let fourth = session.toggle_specialist("target_man");
    assert_eq!(fourth, SpecialistToggle::Ignored);
    assert_eq!(
        session.config().specialists.as_slice(),
        ["playmaker", "destroyer", "false_nine"]
    );
    assert_eq!(session.resources(), resources);

    let removed = session.toggle_specialist("playmaker");
    assert_eq!(removed, SpecialistToggle::Removed);
    assert_eq!(
        session.config().specialists.as_slice(),
        ["destroyer", "false_nine"]
    );
}

#[test]
fn pro_mode_bypass_round_trip() {
    let mut session = ConfigurationSession::new(catalog(), projection_tables());
    session.set_mode(TacticsMode::Pro);
    session.set_field(TacticalField::Formation, "5-4-1");
    assert_eq!(session.resources(), ResourceTriple::baseline());

    session.set_resource(ResourceAxis::Attack, 120);
    session.set_resource(ResourceAxis::Midfield, 120);
    assert_eq!(session.total_resources(), 320);

    session.set_mode(TacticsMode::Beginner);
    assert_eq!(session.total_resources(), 320);
    session.set_field(TacticalField::Style, "possession");
    let expected = ResourceAllocator::auto().allocate(catalog(), session.config());
    assert_eq!(session.resources(), expected);
}

#[test]
fn extreme_pro_slider_total_saturates() {
    let mut session = ConfigurationSession::new(catalog(), projection_tables());
    session.set_mode(TacticsMode::Pro);
    assert!(session.set_resource(ResourceAxis::Attack, i32::MAX));
    assert_eq!(session.total_resources(), i32::MAX);
    let shown = session.resources().to_string();
    assert!(shown.ends_with("(total 2147483647)"));
}
