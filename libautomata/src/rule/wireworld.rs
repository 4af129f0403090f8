use crate::{board::CellState, neighbors::NeighborCounts};

use super::{rgb, Color, Rule};

pub const EMPTY: CellState = 0;
pub const ELECTRON_HEAD: CellState = 1;
pub const ELECTRON_TAIL: CellState = 2;
pub const CONDUCTOR: CellState = 3;

const COLORS: &[Color] = &[rgb(0x242424), rgb(0x4326cf), rgb(0xff4000), rgb(0xffff00)];

#[derive(Debug, Clone, Copy, Default)]
pub struct WireWorld;

impl Rule for WireWorld {
    fn name(&self) -> &'static str {
        "WireWorld"
    }

    fn colors(&self) -> &'static [Color] {
        COLORS
    }

    fn next_state(&self, cell: CellState, counts: &NeighborCounts) -> CellState {
        match cell {
            EMPTY => EMPTY,
            ELECTRON_HEAD => ELECTRON_TAIL,
            ELECTRON_TAIL => CONDUCTOR,
            // Anything else behaves like copper.
            _ => match counts.get(ELECTRON_HEAD) {
                1..=2 => ELECTRON_HEAD,
                _ => CONDUCTOR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn conductor_excited_by_one_or_two_heads() {
        for heads in 0..=8 {
            let counts = NeighborCounts::from(vec![0, heads, 0, 8 - heads]);
            let expected = if heads == 1 || heads == 2 {
                ELECTRON_HEAD
            } else {
                CONDUCTOR
            };

            assert_eq!(WireWorld.next_state(CONDUCTOR, &counts), expected, "{heads} heads");
        }
    }

    #[test]
    fn unknown_states_act_as_conductor() {
        let quiet = NeighborCounts::from(vec![8, 0, 0, 0]);
        let excited = NeighborCounts::from(vec![7, 1, 0, 0]);

        assert_eq!(WireWorld.next_state(9, &quiet), CONDUCTOR);
        assert_eq!(WireWorld.next_state(9, &excited), ELECTRON_HEAD);
    }

    proptest! {
        #[test]
        fn electrons_decay_regardless_of_neighbors(
            counts in proptest::collection::vec(0usize..=8, 4)
        ) {
            let counts = NeighborCounts::from(counts);

            prop_assert_eq!(WireWorld.next_state(EMPTY, &counts), EMPTY);
            prop_assert_eq!(WireWorld.next_state(ELECTRON_HEAD, &counts), ELECTRON_TAIL);
            prop_assert_eq!(WireWorld.next_state(ELECTRON_TAIL, &counts), CONDUCTOR);
        }
    }
}
