use crate::error::LifeError;
use crate::types::{Cell, CellView, Player, Scores};

/// Fixed-size board stored as a flat array indexed by `y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::dead(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index for (x, y), or None when the coordinate is off the board
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some()
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell, LifeError> {
        self.index_of(x, y)
            .map(|i| self.cells[i])
            .ok_or(LifeError::OutOfBounds { x, y })
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), LifeError> {
        let i = self.index_of(x, y).ok_or(LifeError::OutOfBounds { x, y })?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Liveness at (x, y); off-board coordinates read as dead.
    #[inline]
    pub fn is_alive_at(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).is_some_and(|i| self.cells[i].is_alive())
    }

    /// Cell at (x, y); off-board coordinates read as dead.
    #[inline]
    pub(crate) fn cell_or_dead(&self, x: i32, y: i32) -> Cell {
        self.index_of(x, y).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Row-major `(x, y, cell)` iterator. Calling it again restarts from (0, 0).
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| ((i % width) as i32, (i / width) as i32, cell))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Kill every cell. Always a full re-initialization, never partial.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::dead());
    }

    pub fn alive_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_alive()).count() as u32
    }

    pub fn count_owned_by(&self, player: Player) -> u32 {
        self.cells.iter().filter(|c| c.is_owned_by(player)).count() as u32
    }

    /// Full rescan of live cells per owner
    pub fn scores(&self) -> Scores {
        let mut scores = Scores::default();
        for cell in &self.cells {
            match cell.owner().player() {
                Some(Player::A) if cell.is_alive() => scores.player_a += 1,
                Some(Player::B) if cell.is_alive() => scores.player_b += 1,
                _ => {}
            }
        }
        scores
    }

    pub fn views(&self) -> Vec<CellView> {
        self.cells.iter().map(|c| (*c).into()).collect()
    }

    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }
}
