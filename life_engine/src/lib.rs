//! Life Engine - Conway's Game of Life with a two-player territorial mode
//!
//! A bounded (non-wrapping) grid running B3/S23. The sandbox mode runs the
//! classic rules indefinitely; the territorial mode lets two hotseat players
//! seed colored cells, then runs a fixed number of generations in which newborn
//! cells take the color of their orthogonal neighbors.
//!
//! Rendering, input and scheduling belong to the host: it feeds grid
//! coordinates and commands in, reads cell and score views out, and calls
//! `tick()` on a timer (or hands the session to [`SimulationDriver`]).

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod grid;
pub mod hub;
pub mod patterns;
pub mod rules;
pub mod single_player;
pub mod speed;
pub mod territorial;
pub mod types;

pub use config::GameConfig;
pub use driver::{SimulationDriver, Tickable};
pub use engine::{next_grid, RuleMode};
pub use error::{LifeError, RejectReason};
pub use grid::Grid;
pub use hub::{GameHub, GameMode};
pub use patterns::{Pattern, PatternCatalog};
pub use single_player::SinglePlayerSession;
pub use speed::SpeedControl;
pub use territorial::TerritorialSession;
pub use types::{
    Cell, CellView, GamePhase, MatchResult, MatchStatus, Owner, PlacementTool, Player, Scores,
};
