use crate::{board::CellState, neighbors::NeighborCounts};

use super::{rgb, Color, Rule};

pub const DEAD: CellState = 0;
pub const LIVE: CellState = 1;
pub const DYING: CellState = 2;

const COLORS: &[Color] = &[rgb(0x242424), rgb(0xffffff), rgb(0x3333ff)];

#[derive(Debug, Clone, Copy, Default)]
pub struct BriansBrain;

impl Rule for BriansBrain {
    fn name(&self) -> &'static str {
        "Brian's Brain"
    }

    fn colors(&self) -> &'static [Color] {
        COLORS
    }

    fn next_state(&self, cell: CellState, counts: &NeighborCounts) -> CellState {
        match cell {
            DEAD if counts.get(LIVE) == 2 => LIVE,
            LIVE => DYING,
            _ => DEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn dead_cells_fire_on_two() {
        for live in 0..=8 {
            let counts = NeighborCounts::from(vec![8 - live, live, 0]);
            let expected = if live == 2 { LIVE } else { DEAD };

            assert_eq!(BriansBrain.next_state(DEAD, &counts), expected);
        }
    }

    proptest! {
        #[test]
        fn firing_and_dying_ignore_neighbors(dead in 0usize..=8, live in 0usize..=8) {
            let dying = 8usize.saturating_sub(dead + live);
            let counts = NeighborCounts::from(vec![dead, live, dying]);

            prop_assert_eq!(BriansBrain.next_state(LIVE, &counts), DYING);
            prop_assert_eq!(BriansBrain.next_state(DYING, &counts), DEAD);
        }
    }
}
