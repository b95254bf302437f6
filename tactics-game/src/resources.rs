//! Attack / midfield / defense point triples.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::constants::RESOURCE_BASELINE;

/// One of the three resource axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAxis {
    Attack,
    Midfield,
    Defense,
}

impl ResourceAxis {
    pub const ALL: [Self; 3] = [Self::Attack, Self::Midfield, Self::Defense];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Midfield => "midfield",
            Self::Defense => "defense",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "attack" => Some(Self::Attack),
            "midfield" => Some(Self::Midfield),
            "defense" => Some(Self::Defense),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed point triple used for bonuses, specialist costs and allocations.
///
/// Missing fields deserialize as zero so partial bonus tables stay valid.
/// Pro-mode sliders store any `i32`, so addition and [`Self::total`]
/// saturate at the `i32` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceTriple {
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub midfield: i32,
    #[serde(default)]
    pub defense: i32,
}

impl ResourceTriple {
    pub const ZERO: Self = Self::splat(0);

    #[must_use]
    pub const fn new(attack: i32, midfield: i32, defense: i32) -> Self {
        Self {
            attack,
            midfield,
            defense,
        }
    }

    #[must_use]
    pub const fn splat(value: i32) -> Self {
        Self::new(value, value, value)
    }

    /// The flat 80/80/80 starting allocation.
    #[must_use]
    pub const fn baseline() -> Self {
        Self::splat(RESOURCE_BASELINE)
    }

    #[must_use]
    pub const fn get(&self, axis: ResourceAxis) -> i32 {
        match axis {
            ResourceAxis::Attack => self.attack,
            ResourceAxis::Midfield => self.midfield,
            ResourceAxis::Defense => self.defense,
        }
    }

    pub const fn set(&mut self, axis: ResourceAxis, value: i32) {
        match axis {
            ResourceAxis::Attack => self.attack = value,
            ResourceAxis::Midfield => self.midfield = value,
            ResourceAxis::Defense => self.defense = value,
        }
    }

    /// Apply `f` to every axis.
    #[must_use]
    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        Self::new(f(self.attack), f(self.midfield), f(self.defense))
    }

    /// Sum of the three axes, saturating at `i32::MIN` / `i32::MAX`.
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.attack
            .saturating_add(self.midfield)
            .saturating_add(self.defense)
    }
}

impl Add for ResourceTriple {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.attack.saturating_add(rhs.attack),
            self.midfield.saturating_add(rhs.midfield),
            self.defense.saturating_add(rhs.defense),
        )
    }
}

impl AddAssign for ResourceTriple {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ResourceTriple {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for ResourceTriple {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for ResourceTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{} (total {})",
            self.attack,
            self.midfield,
            self.defense,
            self.total()
        )
    }
}
