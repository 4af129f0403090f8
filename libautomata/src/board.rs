use itertools::Itertools;
use rand::Rng;

use crate::error::AutomatonError;

use super::pos::Position;

/// Index of a cell's state within the active rule's state space.
pub type CellState = u8;

/// State 0 is the background of every rule, and what off-board neighbors count as.
pub const BACKGROUND: CellState = 0;

/// A fixed-size rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameBoard {
    width: usize,
    height: usize,
    tiles: Vec<CellState>,
}

impl GameBoard {
    pub fn new(width: usize, height: usize) -> Result<Self, AutomatonError> {
        let tiles = vec![BACKGROUND; width * height];
        Self::with_tiles(width, height, tiles)
    }

    pub fn with_tiles(
        width: usize,
        height: usize,
        tiles: Vec<CellState>,
    ) -> Result<Self, AutomatonError> {
        if width == 0 || height == 0 {
            return Err(AutomatonError::ZeroDimensions { width, height });
        }

        if tiles.len() != width * height {
            return Err(AutomatonError::TileCountMismatch {
                expected: width * height,
                got: tiles.len(),
            });
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Builds a board from nested rows, rejecting anything that isn't a true rectangle.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, AutomatonError>
    where
        R: AsRef<[CellState]>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        if let Some((row, len)) = rows
            .iter()
            .map(|row| row.as_ref().len())
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(AutomatonError::RaggedRows {
                row,
                len,
                expected: width,
            });
        }

        let tiles = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect_vec();

        Self::with_tiles(width, height, tiles)
    }

    /// A board of this shape holding `tiles`, which must have one entry per cell.
    pub(crate) fn with_same_shape(&self, tiles: Vec<CellState>) -> Self {
        debug_assert_eq!(tiles.len(), self.tiles.len());

        Self {
            width: self.width,
            height: self.height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[CellState] {
        &self.tiles
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn tile<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get(index)
    }

    pub fn tile_mut<P>(&mut self, pos: P) -> Option<&mut CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.tiles.get_mut(index)
    }

    /// Writes a state without checking it against any rule.
    pub fn set<P>(&mut self, pos: P, state: CellState) -> Result<(), AutomatonError>
    where
        P: Into<Position>,
    {
        let pos = pos.into();
        let (width, height) = (self.width, self.height);

        let tile = self.tile_mut(pos).ok_or(AutomatonError::OutOfBounds {
            pos,
            width,
            height,
        })?;
        *tile = state;

        Ok(())
    }

    pub fn enumerate_tiles(&self) -> impl Iterator<Item = (Position, &CellState)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (self.index_to_pos(index), tile))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.tiles.chunks_exact(self.width)
    }

    pub fn fill(&mut self, state: CellState) {
        self.tiles.fill(state);
    }

    /// Makes each cell non-background with probability `density`, picking its state
    /// uniformly from `1..total_states`.
    pub fn randomize<R>(
        &mut self,
        total_states: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<(), AutomatonError>
    where
        R: Rng + ?Sized,
    {
        if !(0.0..=1.0).contains(&density) {
            return Err(AutomatonError::InvalidDensity(density));
        }

        if total_states == 0 {
            return Err(AutomatonError::NoStates);
        }

        let state_count = total_states.min(CellState::MAX as usize + 1);

        for tile in &mut self.tiles {
            *tile = if state_count > 1 && rng.random_bool(density) {
                rng.random_range(1..state_count) as CellState
            } else {
                BACKGROUND
            };
        }

        Ok(())
    }

    /// Returns a board of the new size holding the overlapping top-left region of this one.
    pub fn resized(&self, width: usize, height: usize) -> Result<Self, AutomatonError> {
        let mut board = Self::new(width, height)?;

        for y in 0..height.min(self.height) {
            for x in 0..width.min(self.width) {
                let pos = Position { x, y };
                // Both positions are inside the overlap, so neither lookup can miss.
                if let (Some(src), Some(dst)) = (self.tile(pos), board.tile_mut(pos)) {
                    *dst = *src;
                }
            }
        }

        Ok(board)
    }

    /// Number of cells per state, indexed by state. Long enough to hold the highest
    /// state present, including stale ones.
    pub fn population(&self) -> Vec<usize> {
        let len = self.tiles.iter().max().map_or(0, |&max| max as usize + 1);
        let mut population = vec![0; len];

        for &tile in &self.tiles {
            population[tile as usize] += 1;
        }

        population
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width {
            return None;
        }

        if y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let y = index / self.width;
        let x = index % self.width;
        Position { x, y }
    }
}
