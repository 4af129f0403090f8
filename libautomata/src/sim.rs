use itertools::Itertools;

use crate::{board::GameBoard, neighbors::tally, rule::Rule};

/// Computes the next generation. Every cell reads only the previous board, so the
/// update is synchronous.
pub fn step(board: &GameBoard, rule: &dyn Rule) -> GameBoard {
    let total_states = rule.total_states();

    let next_tiles = board
        .enumerate_tiles()
        .map(|(tile_pos, &tile)| rule.next_state(tile, &tally(board, tile_pos, total_states)))
        .collect_vec();

    board.with_same_shape(next_tiles)
}
