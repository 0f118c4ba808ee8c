//! Neighborhood queries against a read-only grid snapshot.
//!
//! Liveness uses the 8-cell Moore neighborhood; birth color uses only the 4
//! orthogonal neighbors. Off-board neighbors are never counted (no wrapping).

use crate::grid::Grid;
use crate::types::{Owner, Player};

/// (dx, dy) for NW, N, NE, W, E, SW, S, SE
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// (dx, dy) for N, E, S, W
pub const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Number of live Moore neighbors of (x, y), 0..=8
#[inline]
pub fn count_alive_neighbors(grid: &Grid, x: i32, y: i32) -> u8 {
    MOORE_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| grid.is_alive_at(x + dx, y + dy))
        .count() as u8
}

/// Color for a cell being born at (x, y).
///
/// Tallies live orthogonal neighbors by owner. Ties, including no colored
/// neighbors at all, go to player A.
pub fn majority_owner(grid: &Grid, x: i32, y: i32) -> Player {
    let mut owner_counts = [0u8; 2];
    for &(dx, dy) in &ORTHOGONAL_OFFSETS {
        let neighbor = grid.cell_or_dead(x + dx, y + dy);
        if !neighbor.is_alive() {
            continue;
        }
        match neighbor.owner() {
            Owner::PlayerA => owner_counts[Player::A.slot()] += 1,
            Owner::PlayerB => owner_counts[Player::B.slot()] += 1,
            Owner::Unclaimed => {}
        }
    }

    if owner_counts[Player::A.slot()] >= owner_counts[Player::B.slot()] {
        Player::A
    } else {
        Player::B
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn grid_with(cells: &[(i32, i32, Owner)]) -> Grid {
        let mut grid = Grid::new(5, 5);
        for &(x, y, owner) in cells {
            grid.set(x, y, Cell::alive(owner)).unwrap();
        }
        grid
    }

    #[test]
    fn test_neighbor_offsets_are_unique_and_exclude_center() {
        let mut unique = std::collections::HashSet::new();
        for offset in MOORE_OFFSETS {
            assert_ne!(offset, (0, 0));
            assert!(unique.insert(offset), "Duplicate neighbor offset");
        }
        for offset in ORTHOGONAL_OFFSETS {
            assert!(MOORE_OFFSETS.contains(&offset));
            assert!(offset.0 == 0 || offset.1 == 0);
        }
    }

    #[test]
    fn test_count_full_ring() {
        let mut cells = Vec::new();
        for (dx, dy) in MOORE_OFFSETS {
            cells.push((2 + dx, 2 + dy, Owner::Unclaimed));
        }
        let grid = grid_with(&cells);
        assert_eq!(count_alive_neighbors(&grid, 2, 2), 8);
    }

    #[test]
    fn test_count_ignores_self() {
        let grid = grid_with(&[(2, 2, Owner::Unclaimed), (3, 2, Owner::Unclaimed)]);
        assert_eq!(count_alive_neighbors(&grid, 2, 2), 1);
        assert_eq!(count_alive_neighbors(&grid, 3, 2), 1);
    }

    #[test]
    fn test_count_does_not_wrap_at_edges() {
        // Opposite corners would be neighbors on a torus
        let grid = grid_with(&[(4, 4, Owner::Unclaimed), (4, 0, Owner::Unclaimed), (0, 4, Owner::Unclaimed)]);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 0);

        let grid = grid_with(&[(1, 0, Owner::Unclaimed), (0, 1, Owner::Unclaimed), (1, 1, Owner::Unclaimed)]);
        assert_eq!(count_alive_neighbors(&grid, 0, 0), 3);
    }

    #[test]
    fn test_majority_simple_winner() {
        let grid = grid_with(&[(2, 1, Owner::PlayerB), (3, 2, Owner::PlayerB), (1, 2, Owner::PlayerA)]);
        assert_eq!(majority_owner(&grid, 2, 2), Player::B);
    }

    #[test]
    fn test_majority_two_two_tie_goes_to_player_a() {
        let grid = grid_with(&[
            (2, 1, Owner::PlayerB),
            (3, 2, Owner::PlayerA),
            (2, 3, Owner::PlayerB),
            (1, 2, Owner::PlayerA),
        ]);
        assert_eq!(majority_owner(&grid, 2, 2), Player::A);
    }

    #[test]
    fn test_majority_ignores_diagonals() {
        // Three B cells on the diagonals, one A cell orthogonal
        let grid = grid_with(&[
            (1, 1, Owner::PlayerB),
            (3, 1, Owner::PlayerB),
            (3, 3, Owner::PlayerB),
            (2, 3, Owner::PlayerA),
        ]);
        assert_eq!(majority_owner(&grid, 2, 2), Player::A);

        let grid = grid_with(&[(1, 1, Owner::PlayerA), (3, 3, Owner::PlayerA), (2, 1, Owner::PlayerB)]);
        assert_eq!(majority_owner(&grid, 2, 2), Player::B);
    }

    #[test]
    fn test_majority_without_colored_neighbors_defaults_to_a() {
        let grid = grid_with(&[(2, 1, Owner::Unclaimed), (1, 1, Owner::PlayerB)]);
        assert_eq!(majority_owner(&grid, 2, 2), Player::A);
        assert_eq!(majority_owner(&Grid::new(3, 3), 1, 1), Player::A);
    }
}
