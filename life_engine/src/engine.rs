//! B3/S23 transition, in standard and territorial flavors.
//!
//! Every generation reads one immutable snapshot and writes a separate
//! buffer, so the order cells are visited in never affects the result.

use candid::{CandidType, Deserialize};
use serde::Serialize;

use crate::grid::Grid;
use crate::rules::{count_alive_neighbors, majority_owner};
use crate::types::{Cell, Owner};

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleMode {
    /// Births are unclaimed
    Standard,
    /// Births take the orthogonal majority color
    Territorial,
}

/// Cell fate during generation processing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFate {
    Survives,
    Birth(Owner),
    Death,
    StaysDead,
}

impl CellFate {
    #[inline]
    fn apply(self, current: Cell) -> Cell {
        match self {
            CellFate::Survives => current,
            CellFate::Birth(owner) => Cell::alive(owner),
            CellFate::Death | CellFate::StaysDead => Cell::dead(),
        }
    }
}

/// Decide what happens to (x, y) given the current snapshot
pub fn compute_cell_fate(grid: &Grid, x: i32, y: i32, mode: RuleMode) -> CellFate {
    let neighbor_count = count_alive_neighbors(grid, x, y);

    if grid.is_alive_at(x, y) {
        // Living cell survives with 2 or 3 neighbors
        if neighbor_count == 2 || neighbor_count == 3 {
            CellFate::Survives
        } else {
            CellFate::Death
        }
    } else if neighbor_count == 3 {
        // Dead cell born with exactly 3 neighbors
        let owner = match mode {
            RuleMode::Standard => Owner::Unclaimed,
            RuleMode::Territorial => majority_owner(grid, x, y).owner(),
        };
        CellFate::Birth(owner)
    } else {
        CellFate::StaysDead
    }
}

/// Process all cells from `read_grid` into `write_grid`.
///
/// Both grids must have the same dimensions; every cell of `write_grid` is
/// overwritten.
pub fn process_generation(read_grid: &Grid, write_grid: &mut Grid, mode: RuleMode) {
    debug_assert!(read_grid.same_dimensions(write_grid));

    let width = read_grid.width();
    let read_cells = read_grid.cells();
    for (i, out) in write_grid.cells_mut().iter_mut().enumerate() {
        let x = (i % width) as i32;
        let y = (i / width) as i32;
        *out = compute_cell_fate(read_grid, x, y, mode).apply(read_cells[i]);
    }
}

/// Pure single-step transition
pub fn next_grid(grid: &Grid, mode: RuleMode) -> Grid {
    let mut next = Grid::new(grid.width() as u32, grid.height() as u32);
    process_generation(grid, &mut next, mode);
    next
}

/// Two same-sized grids: readers always see `front`, a step writes `back`
/// and then swaps, so a half-computed generation is never visible.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    front: Grid,
    back: Grid,
}

impl DoubleBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            front: Grid::new(width, height),
            back: Grid::new(width, height),
        }
    }

    pub fn current(&self) -> &Grid {
        &self.front
    }

    /// Direct edits (placement, toggling) go to the published grid
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.front
    }

    pub fn step(&mut self, mode: RuleMode) {
        process_generation(&self.front, &mut self.back, mode);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    pub fn clear(&mut self) {
        self.front.clear();
        self.back.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::MOORE_OFFSETS;
    use crate::types::Player;

    fn grid_from(width: u32, height: u32, alive: &[(i32, i32)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &(x, y) in alive {
            grid.set(x, y, Cell::alive(Owner::Unclaimed)).unwrap();
        }
        grid
    }

    fn alive_set(grid: &Grid) -> Vec<(i32, i32)> {
        grid.iter().filter(|(_, _, c)| c.is_alive()).map(|(x, y, _)| (x, y)).collect()
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let grid = Grid::new(8, 8);
        assert_eq!(next_grid(&grid, RuleMode::Standard), grid);
        assert_eq!(next_grid(&grid, RuleMode::Territorial), grid);
    }

    #[test]
    fn test_live_cell_fate_for_every_neighbor_count() {
        for n in 0..=8usize {
            let mut alive = vec![(2, 2)];
            alive.extend(MOORE_OFFSETS[..n].iter().map(|&(dx, dy)| (2 + dx, 2 + dy)));
            let grid = grid_from(5, 5, &alive);

            let next = next_grid(&grid, RuleMode::Standard);
            let expected = n == 2 || n == 3;
            assert_eq!(
                next.get(2, 2).unwrap().is_alive(),
                expected,
                "live cell with {} neighbors",
                n
            );
        }
    }

    #[test]
    fn test_dead_cell_fate_for_every_neighbor_count() {
        for n in 0..=8usize {
            let alive: Vec<(i32, i32)> =
                MOORE_OFFSETS[..n].iter().map(|&(dx, dy)| (2 + dx, 2 + dy)).collect();
            let grid = grid_from(5, 5, &alive);

            let fate = compute_cell_fate(&grid, 2, 2, RuleMode::Standard);
            if n == 3 {
                assert_eq!(fate, CellFate::Birth(Owner::Unclaimed));
            } else {
                assert_eq!(fate, CellFate::StaysDead, "dead cell with {} neighbors", n);
            }
        }
    }

    #[test]
    fn test_block_is_fixed_point() {
        let block = grid_from(6, 6, &[(2, 2), (3, 2), (2, 3), (3, 3)]);
        assert_eq!(next_grid(&block, RuleMode::Standard), block);
        assert_eq!(next_grid(&block, RuleMode::Territorial), block);
    }

    /// Blinker: 3 cells in a row, oscillates between horizontal/vertical
    ///   .X.     ...
    ///   .X.  -> XXX -> (back to vertical)
    ///   .X.     ...
    #[test]
    fn test_blinker_has_period_two() {
        let vertical = grid_from(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        let gen1 = next_grid(&vertical, RuleMode::Standard);
        assert_eq!(alive_set(&gen1), vec![(1, 2), (2, 2), (3, 2)]);
        assert_ne!(gen1, vertical);

        let gen2 = next_grid(&gen1, RuleMode::Standard);
        assert_eq!(gen2, vertical);
    }

    #[test]
    fn test_glider_keeps_five_cells_and_moves() {
        // .X.
        // ..X
        // XXX
        let initial = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut grid = grid_from(10, 10, &initial);

        for gen in 0..4 {
            grid = next_grid(&grid, RuleMode::Standard);
            assert_eq!(grid.alive_count(), 5, "generation {} should have 5 cells", gen + 1);
        }

        let shifted: Vec<(i32, i32)> = {
            let mut v: Vec<(i32, i32)> = initial.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
            v.sort_by_key(|&(x, y)| (y, x));
            v
        };
        assert_eq!(alive_set(&grid), shifted);
    }

    #[test]
    fn test_survivor_keeps_owner_and_births_follow_mode() {
        // Vertical blinker: A on top, B in the middle, B at the bottom
        let mut grid = Grid::new(5, 5);
        grid.set(2, 1, Cell::alive(Owner::PlayerA)).unwrap();
        grid.set(2, 2, Cell::alive(Owner::PlayerB)).unwrap();
        grid.set(2, 3, Cell::alive(Owner::PlayerB)).unwrap();

        let territorial = next_grid(&grid, RuleMode::Territorial);
        assert_eq!(territorial.get(2, 2).unwrap(), Cell::alive(Owner::PlayerB));
        // Births at (1,2) and (3,2): only orthogonal live neighbor is the B center
        assert_eq!(territorial.get(1, 2).unwrap(), Cell::alive(Owner::PlayerB));
        assert_eq!(territorial.get(3, 2).unwrap(), Cell::alive(Owner::PlayerB));
        assert!(!territorial.get(2, 1).unwrap().is_alive());

        let standard = next_grid(&grid, RuleMode::Standard);
        assert_eq!(standard.get(2, 2).unwrap(), Cell::alive(Owner::PlayerB));
        assert_eq!(standard.get(1, 2).unwrap(), Cell::alive(Owner::Unclaimed));
        assert_eq!(standard.get(3, 2).unwrap(), Cell::alive(Owner::Unclaimed));
    }

    #[test]
    fn test_territorial_birth_tie_goes_to_player_a() {
        // Dead center (2,2) with 3 live Moore neighbors: A north, B east, plus
        // an unclaimed diagonal. Orthogonal tally is 1-1.
        let mut grid = Grid::new(5, 5);
        grid.set(2, 1, Cell::alive(Owner::PlayerA)).unwrap();
        grid.set(3, 2, Cell::alive(Owner::PlayerB)).unwrap();
        grid.set(1, 3, Cell::alive(Owner::Unclaimed)).unwrap();

        assert_eq!(
            compute_cell_fate(&grid, 2, 2, RuleMode::Territorial),
            CellFate::Birth(Player::A.owner())
        );
    }

    #[test]
    fn test_dead_cells_never_carry_owner() {
        let mut grid = Grid::new(6, 6);
        grid.set(0, 0, Cell::alive(Owner::PlayerA)).unwrap();
        grid.set(5, 5, Cell::alive(Owner::PlayerB)).unwrap();

        let next = next_grid(&grid, RuleMode::Territorial);
        for (_, _, cell) in next.iter() {
            if !cell.is_alive() {
                assert_eq!(cell.owner(), Owner::Unclaimed);
            }
        }
        assert_eq!(next.alive_count(), 0);
    }

    #[test]
    fn test_double_buffer_matches_pure_step() {
        let mut buffers = DoubleBuffer::new(5, 5);
        for &(x, y) in &[(2, 1), (2, 2), (2, 3)] {
            buffers.current_mut().set(x, y, Cell::alive(Owner::Unclaimed)).unwrap();
        }
        let expected = next_grid(buffers.current(), RuleMode::Standard);

        buffers.step(RuleMode::Standard);
        assert_eq!(buffers.current(), &expected);

        buffers.clear();
        assert_eq!(buffers.current().alive_count(), 0);
    }
}
