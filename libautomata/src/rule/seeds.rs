use crate::{board::CellState, neighbors::NeighborCounts};

use super::{rgb, Color, Rule};

pub const DEAD: CellState = 0;
pub const LIVE: CellState = 1;

const COLORS: &[Color] = &[rgb(0x242424), rgb(0xffffff)];

/// Seeds, B2/S. Every live cell dies each generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seeds;

impl Rule for Seeds {
    fn name(&self) -> &'static str {
        "Seeds"
    }

    fn colors(&self) -> &'static [Color] {
        COLORS
    }

    fn next_state(&self, _cell: CellState, counts: &NeighborCounts) -> CellState {
        if counts.get(LIVE) == 2 {
            LIVE
        } else {
            DEAD
        }
    }
}
