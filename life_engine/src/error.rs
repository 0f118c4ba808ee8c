use candid::{CandidType, Deserialize};
use serde::Serialize;
use thiserror::Error;

use crate::types::GamePhase;

/// Why a placement was refused. No cell is touched and no budget is spent.
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    OutOfBounds,
    Occupied,
    BudgetExceeded,
    EmptyPattern,
    DuplicateOffset,
}

#[derive(CandidType, Deserialize, Serialize, Error, Clone, Debug, PartialEq, Eq)]
pub enum LifeError {
    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("placement rejected: {0:?}")]
    InvalidPlacement(RejectReason),
    #[error("command not allowed during {phase:?}")]
    IllegalPhaseTransition { phase: GamePhase },
    #[error("grid is locked while the simulation runs")]
    SimulationRunning,
    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),
    #[error("speed level {0} does not exist")]
    InvalidSpeedLevel(u64),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LifeError {
    /// True for errors that leave the board untouched because the input was
    /// simply not applicable right now (click-spam, wrong phase).
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            LifeError::OutOfBounds { .. }
                | LifeError::InvalidPlacement(_)
                | LifeError::IllegalPhaseTransition { .. }
                | LifeError::SimulationRunning
        )
    }
}
