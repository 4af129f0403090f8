use board::{CellState, GameBoard, BACKGROUND};
use pos::Position;
use rand::Rng;
use rule::{Rule, RuleKind};

pub mod board;
pub mod error;
pub mod neighbors;
pub mod pos;
pub mod rule;
pub mod sim;

pub use error::AutomatonError;

/// Owns everything a running automaton needs: the board, the active rule and
/// how many generations have passed since the last reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: GameBoard,
    rule: RuleKind,
    generation: u64,
}

impl Game {
    pub fn new(board: GameBoard, rule: RuleKind) -> Self {
        Self {
            board,
            rule,
            generation: 0,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn rule_kind(&self) -> RuleKind {
        self.rule
    }

    pub fn rule(&self) -> &'static dyn Rule {
        self.rule.rule()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tick(&mut self) {
        self.board = sim::step(&self.board, self.rule());
        self.generation += 1;
    }

    pub fn step_many(&mut self, generations: usize) {
        for _ in 0..generations {
            self.tick();
        }
    }

    /// Swaps the rule. Cells keep their states even if the new rule doesn't define them.
    pub fn set_rule(&mut self, rule: RuleKind) {
        if rule != self.rule {
            log::debug!("Switching rule from {} to {}", self.rule, rule);
        }

        self.rule = rule;
    }

    pub fn clear(&mut self) {
        self.board.fill(BACKGROUND);
        self.generation = 0;
    }

    pub fn randomize<R>(&mut self, density: f64, rng: &mut R) -> Result<(), AutomatonError>
    where
        R: Rng + ?Sized,
    {
        let total_states = self.rule().total_states();
        self.board.randomize(total_states, density, rng)?;
        self.generation = 0;

        Ok(())
    }

    /// Writes any state into an on-board cell. The state isn't checked against the rule.
    pub fn paint<P>(&mut self, pos: P, state: CellState) -> Result<(), AutomatonError>
    where
        P: Into<Position>,
    {
        self.board.set(pos, state)
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), AutomatonError> {
        self.board = self.board.resized(width, height)?;
        Ok(())
    }

    pub fn population(&self) -> Vec<usize> {
        self.board.population()
    }
}
