use crate::State;

use super::Ticker;

/// Advances the game by one generation per tick.
pub struct GenerationTicker;

impl Ticker for GenerationTicker {
    fn tick(&mut self, state: &mut State) {
        state.game.tick();
    }
}
