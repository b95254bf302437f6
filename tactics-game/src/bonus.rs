//! Resource bonus lookup: sums the per-choice bonus tables for a
//! configuration.
use log::debug;

use crate::catalog::{TacticalChoice, TacticsCatalog};
use crate::config::TacticalConfiguration;
use crate::resources::ResourceTriple;

/// Sum the formation, style, tempo and mentality bonuses plus the resource
/// cost of every selected specialist.
///
/// Keys missing from `catalog` contribute nothing.
#[must_use]
pub fn compute_bonus(catalog: &TacticsCatalog, config: &TacticalConfiguration) -> ResourceTriple {
    let choices = [
        ("formation", catalog.formation(&config.formation)),
        ("style", catalog.style(&config.style)),
        ("tempo", catalog.tempo(&config.tempo)),
        ("mentality", catalog.mentality(&config.mentality)),
    ];

    let mut bonus = ResourceTriple::ZERO;
    for (field, choice) in choices {
        bonus += choice_bonus(field, choice);
    }
    for id in &config.specialists {
        match catalog.specialist(id) {
            Some(specialist) => bonus += specialist.resource_cost,
            None => debug!("unknown specialist '{id}' contributes nothing"),
        }
    }
    bonus
}

fn choice_bonus(field: &str, choice: Option<&TacticalChoice>) -> ResourceTriple {
    if let Some(choice) = choice {
        return choice.resource_bonus;
    }
    debug!("unknown {field} contributes nothing");
    ResourceTriple::ZERO
}
