use crate::{board::CellState, neighbors::NeighborCounts};

use super::{rgb, Color, Rule};

pub const DEAD: CellState = 0;
pub const LIVE: CellState = 1;

const COLORS: &[Color] = &[rgb(0x242424), rgb(0xffffff)];

/// Conway's Game of Life, B3/S23.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conway;

impl Rule for Conway {
    fn name(&self) -> &'static str {
        "Conway's Game of Life"
    }

    fn colors(&self) -> &'static [Color] {
        COLORS
    }

    fn next_state(&self, cell: CellState, counts: &NeighborCounts) -> CellState {
        match (cell, counts.get(LIVE)) {
            (LIVE, 2..=3) => LIVE, // Survives
            (DEAD, 3) => LIVE,     // Born
            _ => DEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_live(live: usize) -> NeighborCounts {
        NeighborCounts::from(vec![8 - live, live])
    }

    #[test]
    fn survival_and_birth() {
        for live in 0..=8 {
            let counts = with_live(live);

            let expected_survivor = if live == 2 || live == 3 { LIVE } else { DEAD };
            assert_eq!(Conway.next_state(LIVE, &counts), expected_survivor, "live with {live}");

            let expected_birth = if live == 3 { LIVE } else { DEAD };
            assert_eq!(Conway.next_state(DEAD, &counts), expected_birth, "dead with {live}");
        }
    }

    #[test]
    fn unknown_states_die() {
        assert_eq!(Conway.next_state(3, &with_live(3)), DEAD);
    }
}
