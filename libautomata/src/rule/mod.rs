//! Rule variants and the registry that names them.
//!
//! A rule only ever sees a cell's own state and how many neighbors are in each
//! state, so adding an automaton means adding one [`Rule`] implementor and one
//! [`RuleKind`] variant. Neither the neighbor counter nor the step loop change.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{board::CellState, error::AutomatonError, neighbors::NeighborCounts};

pub mod brians_brain;
pub mod conway;
pub mod seeds;
pub mod wireworld;

pub use brians_brain::BriansBrain;
pub use conway::Conway;
pub use seeds::Seeds;
pub use wireworld::WireWorld;

/// RGBA, matching the pixel layout of the renderer's frame buffer.
pub type Color = [u8; 4];

pub const fn rgb(hex: u32) -> Color {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255]
}

pub trait Rule: fmt::Debug + Send + Sync {
    /// Human readable name.
    fn name(&self) -> &'static str;

    /// One display color per state, indexed by state.
    fn colors(&self) -> &'static [Color];

    fn total_states(&self) -> usize {
        self.colors().len()
    }

    /// `None` for states this rule doesn't define, e.g. leftovers from a previous rule.
    fn color_of(&self, state: CellState) -> Option<Color> {
        self.colors().get(state as usize).copied()
    }

    /// The cell's state in the next generation. Must be pure.
    fn next_state(&self, cell: CellState, counts: &NeighborCounts) -> CellState;
}

/// Registry key of every built-in rule.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    #[default]
    Conway,
    Seeds,
    BriansBrain,
    #[strum(to_string = "wireworld")]
    #[serde(rename = "wireworld")]
    WireWorld,
}

impl RuleKind {
    pub fn from_key(key: &str) -> Result<Self, AutomatonError> {
        key.parse()
            .map_err(|_| AutomatonError::UnknownRule(key.to_owned()))
    }

    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = RuleKind> {
        Self::iter()
    }

    pub fn rule(self) -> &'static dyn Rule {
        match self {
            RuleKind::Conway => &Conway,
            RuleKind::Seeds => &Seeds,
            RuleKind::BriansBrain => &BriansBrain,
            RuleKind::WireWorld => &WireWorld,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn keys_round_trip() {
        let keys = RuleKind::all().map(RuleKind::key).collect_vec();
        assert_eq!(keys, ["conway", "seeds", "brians-brain", "wireworld"]);

        for kind in RuleKind::all() {
            assert_eq!(RuleKind::from_key(kind.key()), Ok(kind));
            assert_eq!(kind.to_string(), kind.key());
        }
    }

    #[test]
    fn keys_ignore_case() {
        assert_eq!(RuleKind::from_key("WireWorld"), Ok(RuleKind::WireWorld));
        assert_eq!(RuleKind::from_key("Brians-Brain"), Ok(RuleKind::BriansBrain));
    }

    #[test]
    fn unknown_key() {
        assert_eq!(
            RuleKind::from_key("langtons-ant"),
            Err(AutomatonError::UnknownRule("langtons-ant".to_owned()))
        );
    }

    #[test]
    fn serde_uses_registry_keys() {
        let json = serde_json::to_string(&RuleKind::BriansBrain).unwrap();
        assert_eq!(json, "\"brians-brain\"");

        let kind: RuleKind = serde_json::from_str("\"wireworld\"").unwrap();
        assert_eq!(kind, RuleKind::WireWorld);
    }

    #[test]
    fn every_rule_has_a_color_per_state() {
        for kind in RuleKind::all() {
            let rule = kind.rule();
            assert_eq!(rule.colors().len(), rule.total_states());
            assert_eq!(rule.color_of(0), Some(rgb(0x242424)));
            assert_eq!(rule.color_of(rule.total_states() as CellState), None);
        }
    }

    #[test]
    fn state_counts() {
        let counts = RuleKind::all()
            .map(|kind| kind.rule().total_states())
            .collect_vec();
        assert_eq!(counts, [2, 2, 3, 4]);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(rgb(0xff4000), [0xff, 0x40, 0x00, 0xff]);
    }
}
