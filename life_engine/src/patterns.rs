use std::collections::HashSet;

use candid::{CandidType, Deserialize};
use serde::Serialize;

use crate::error::{LifeError, RejectReason};
use crate::grid::Grid;
use crate::types::{Cell, Owner};

/// Named set of (dx, dy) offsets stamped relative to an anchor cell
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub cells: Vec<(i32, i32)>,
}

impl Pattern {
    pub fn new(name: &str, cells: &[(i32, i32)]) -> Self {
        Self { name: name.to_string(), cells: cells.to_vec() }
    }

    /// A single cell at the anchor
    pub fn single() -> Self {
        Self::new("cell", &[(0, 0)])
    }

    pub fn size(&self) -> u32 {
        self.cells.len() as u32
    }

    fn validate(&self) -> Result<(), LifeError> {
        if self.name.trim().is_empty() {
            return Err(LifeError::InvalidConfig("pattern name must not be empty".to_string()));
        }
        if self.cells.is_empty() {
            return Err(LifeError::InvalidConfig(format!("pattern '{}' has no cells", self.name)));
        }
        let mut unique = HashSet::new();
        for offset in &self.cells {
            if !unique.insert(*offset) {
                return Err(LifeError::InvalidConfig(format!(
                    "pattern '{}' repeats offset {:?}",
                    self.name, offset
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Why `pattern` cannot go at (anchor_x, anchor_y), or None if it fits
pub fn placement_issue(grid: &Grid, pattern: &Pattern, anchor_x: i32, anchor_y: i32) -> Option<RejectReason> {
    if pattern.cells.is_empty() {
        return Some(RejectReason::EmptyPattern);
    }
    // k offsets must cover exactly k cells
    let mut seen = HashSet::with_capacity(pattern.cells.len());
    if !pattern.cells.iter().all(|offset| seen.insert(*offset)) {
        return Some(RejectReason::DuplicateOffset);
    }
    for &(dx, dy) in &pattern.cells {
        let (x, y) = (anchor_x.saturating_add(dx), anchor_y.saturating_add(dy));
        if !grid.contains(x, y) {
            return Some(RejectReason::OutOfBounds);
        }
        if grid.is_alive_at(x, y) {
            return Some(RejectReason::Occupied);
        }
    }
    None
}

/// True iff every offset lands on the board on a dead cell
pub fn can_place(grid: &Grid, pattern: &Pattern, anchor_x: i32, anchor_y: i32) -> bool {
    placement_issue(grid, pattern, anchor_x, anchor_y).is_none()
}

/// Stamp `pattern` with `owner`. All-or-nothing: on error the grid is untouched.
pub fn place(
    grid: &mut Grid,
    pattern: &Pattern,
    anchor_x: i32,
    anchor_y: i32,
    owner: Owner,
) -> Result<u32, LifeError> {
    if let Some(reason) = placement_issue(grid, pattern, anchor_x, anchor_y) {
        return Err(LifeError::InvalidPlacement(reason));
    }

    let mut placed_count = 0u32;
    for &(dx, dy) in &pattern.cells {
        grid.set(anchor_x + dx, anchor_y + dy, Cell::alive(owner))?;
        placed_count += 1;
    }
    Ok(placed_count)
}

// =============================================================================
// CATALOG
// =============================================================================

/// Ordered list of stampable patterns. Index 0 is always "glider" and index 1
/// "spaceship" in the built-in catalog, matching the selection shortcuts.
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self {
            patterns: vec![
                // .X.
                // ..X
                // XXX
                Pattern::new("glider", &[(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)]),
                // Lightweight spaceship
                // .X..X
                // X....
                // X...X
                // XXXX.
                Pattern::new(
                    "spaceship",
                    &[(-1, -1), (2, -1), (-2, 0), (-2, 1), (2, 1), (-2, 2), (-1, 2), (0, 2), (1, 2)],
                ),
                Pattern::new("block", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
                Pattern::new("blinker", &[(-1, 0), (0, 0), (1, 0)]),
                Pattern::new("toad", &[(0, 0), (1, 0), (2, 0), (-1, 1), (0, 1), (1, 1)]),
                Pattern::new(
                    "beacon",
                    &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
                ),
                Pattern::new("r-pentomino", &[(0, -1), (1, -1), (-1, 0), (0, 0), (0, 1)]),
            ],
        }
    }
}

impl PatternCatalog {
    pub fn new(patterns: Vec<Pattern>) -> Result<Self, LifeError> {
        let mut names = HashSet::new();
        for pattern in &patterns {
            pattern.validate()?;
            if !names.insert(pattern.name.to_lowercase()) {
                return Err(LifeError::InvalidConfig(format!("duplicate pattern '{}'", pattern.name)));
            }
        }
        Ok(Self { patterns })
    }

    /// Load a catalog from a JSON array of `{ "name": ..., "cells": [[dx, dy], ...] }`
    pub fn from_json(json: &str) -> Result<Self, LifeError> {
        let patterns: Vec<Pattern> =
            serde_json::from_str(json).map_err(|e| LifeError::InvalidConfig(e.to_string()))?;
        Self::new(patterns)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Case-insensitive lookup
    pub fn find(&self, name: &str) -> Result<&Pattern, LifeError> {
        self.patterns
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| LifeError::UnknownPattern(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }
}
