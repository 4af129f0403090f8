use crate::{
    board::{CellState, GameBoard, BACKGROUND},
    error::AutomatonError,
    pos::Position,
};

/// The Moore neighborhood: every cell sharing an edge or corner with the center.
const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

/// How many of a cell's eight neighbors are in each state, indexed by state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    counts: Vec<usize>,
}

impl NeighborCounts {
    pub fn zeroed(total_states: usize) -> Self {
        Self {
            counts: vec![0; total_states],
        }
    }

    /// Count for `state`, or 0 if the state is outside the counted range.
    pub fn get(&self, state: CellState) -> usize {
        self.counts.get(state as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    fn record(&mut self, state: CellState) {
        // Stale states from a rule with more states have no slot and are skipped.
        if let Some(count) = self.counts.get_mut(state as usize) {
            *count += 1;
        }
    }
}

impl From<Vec<usize>> for NeighborCounts {
    fn from(counts: Vec<usize>) -> Self {
        Self { counts }
    }
}

/// Counts the states around `pos`. Neighbors past the board edge count as background.
pub fn count_neighbors(
    board: &GameBoard,
    pos: Position,
    total_states: usize,
) -> Result<NeighborCounts, AutomatonError> {
    if total_states == 0 {
        return Err(AutomatonError::NoStates);
    }

    if !board.contains(pos) {
        return Err(AutomatonError::OutOfBounds {
            pos,
            width: board.width(),
            height: board.height(),
        });
    }

    Ok(tally(board, pos, total_states))
}

pub(crate) fn tally(board: &GameBoard, pos: Position, total_states: usize) -> NeighborCounts {
    let mut counts = NeighborCounts::zeroed(total_states);

    for rel_pos in NEIGHBOR_RELATIVE_POSITIONS {
        let neighbor = pos
            .offset(rel_pos[0], rel_pos[1])
            .and_then(|neighbor_pos| board.tile(neighbor_pos))
            .copied()
            .unwrap_or(BACKGROUND);

        counts.record(neighbor);
    }

    counts
}
