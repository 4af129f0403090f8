use std::{
    env,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread,
};

use anyhow::Context;
use config::Config;
use libautomata::{
    board::{CellState, GameBoard},
    Game,
};
use ticker::TickerHost;

mod cli;
mod config;
mod renderer;
mod ticker;

pub type SharedState = Arc<RwLock<State>>;

pub struct State {
    game: Game,
    ticker: Option<TickerHost>,
    brush: CellState,
    config: Config,
}

impl State {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let board = GameBoard::new(config.board_width, config.board_height)
            .context("Creating board")?;

        Ok(Self {
            game: Game::new(board, config.rule),
            ticker: None,
            brush: 1,
            config,
        })
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Randomizes with the given density, falling back to the configured one.
    pub fn randomize(&mut self, density: Option<f64>) -> anyhow::Result<()> {
        let density = density.unwrap_or(self.config.random_density);
        self.game
            .randomize(density, &mut rand::rng())
            .context("Randomizing board")?;
        Ok(())
    }

    /// Cycles the brush through the active rule's states, skipping the background.
    pub fn cycle_brush(&mut self) {
        let total_states = self.game.rule().total_states().max(2);
        let next = (self.brush as usize % (total_states - 1)) + 1;
        self.brush = next as CellState;
    }
}

// The game is only ever replaced wholesale, so a panicked holder can't leave it half-written.
pub fn read_state(state_arc: &SharedState) -> RwLockReadGuard<'_, State> {
    state_arc.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write_state(state_arc: &SharedState) -> RwLockWriteGuard<'_, State> {
    state_arc.write().unwrap_or_else(PoisonError::into_inner)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match env::args().nth(1) {
        Some(config_path) => Config::load(&config_path)
            .with_context(|| format!("Loading config from {config_path}"))?,
        None => Config::default(),
    };

    let mut state = State::new(config)?;
    state.randomize(None)?;

    log::info!(
        "Starting {}x{} board with rule {}",
        state.game.board().width(),
        state.game.board().height(),
        state.game.rule_kind()
    );

    let state_arc = Arc::new(RwLock::new(state));

    let cli_state_arc = state_arc.clone();
    thread::spawn(move || cli::run_cli(cli_state_arc));

    renderer::run(state_arc)
}
