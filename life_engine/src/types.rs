use candid::{CandidType, Deserialize};
use serde::Serialize;

// =============================================================================
// CONSTANTS
// =============================================================================

pub const DEFAULT_GRID_WIDTH: u32 = 20;
pub const DEFAULT_GRID_HEIGHT: u32 = 20;
pub const DEFAULT_CELLS_PER_PLAYER: u32 = 20;
pub const DEFAULT_TOTAL_GENERATIONS: u32 = 25;

// =============================================================================
// OWNERSHIP
// =============================================================================

/// One of the two hotseat players of a territorial match.
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    A,
    B,
}

impl Player {
    pub fn owner(self) -> Owner {
        match self {
            Player::A => Owner::PlayerA,
            Player::B => Owner::PlayerB,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    #[inline]
    pub(crate) fn slot(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

/// Color carried by a live cell. Single-player cells are always `Unclaimed`.
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Owner {
    #[default]
    Unclaimed,
    PlayerA,
    PlayerB,
}

impl Owner {
    pub fn player(self) -> Option<Player> {
        match self {
            Owner::Unclaimed => None,
            Owner::PlayerA => Some(Player::A),
            Owner::PlayerB => Some(Player::B),
        }
    }

    #[inline]
    fn bits(self) -> u8 {
        match self {
            Owner::Unclaimed => 0,
            Owner::PlayerA => 1,
            Owner::PlayerB => 2,
        }
    }

    #[inline]
    fn from_bits(bits: u8) -> Owner {
        match bits {
            1 => Owner::PlayerA,
            2 => Owner::PlayerB,
            _ => Owner::Unclaimed,
        }
    }
}

impl From<Player> for Owner {
    fn from(player: Player) -> Self {
        player.owner()
    }
}

// =============================================================================
// CELL ENCODING
// =============================================================================
//
// Each cell is 1 byte:
// ┌──────────┬──────────┬────────┐
// │ bits 7-3 │ bits 2-1 │ bit 0  │
// │  unused  │  owner   │ alive  │
// └──────────┴──────────┴────────┘
//
// Only `Cell::dead()` and `Cell::alive(owner)` build cells, so the owner bits
// are always zero when the alive bit is clear.

const ALIVE_BIT: u8 = 0x01;
const OWNER_SHIFT: u8 = 1;
const OWNER_MASK: u8 = 0x06;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell(u8);

impl Cell {
    #[inline]
    pub const fn dead() -> Self {
        Cell(0)
    }

    #[inline]
    pub fn alive(owner: Owner) -> Self {
        Cell(ALIVE_BIT | (owner.bits() << OWNER_SHIFT))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.0 & ALIVE_BIT != 0
    }

    #[inline]
    pub fn owner(&self) -> Owner {
        Owner::from_bits((self.0 & OWNER_MASK) >> OWNER_SHIFT)
    }

    #[inline]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.is_alive() && self.owner() == player.owner()
    }
}

/// External cell representation (what the renderer sees)
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellView {
    pub alive: bool,
    pub owner: Owner,
}

impl From<Cell> for CellView {
    fn from(c: Cell) -> Self {
        CellView { alive: c.is_alive(), owner: c.owner() }
    }
}

// =============================================================================
// GAME STATE VIEWS
// =============================================================================

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Setup,
    Simulation,
    GameOver,
}

/// Live cell count per player
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub player_a: u32,
    pub player_b: u32,
}

impl Scores {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::A => self.player_a,
            Player::B => self.player_b,
        }
    }
}

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchResult {
    Winner(Player),
    Draw,
}

impl MatchResult {
    pub fn from_scores(scores: Scores) -> Self {
        if scores.player_a > scores.player_b {
            MatchResult::Winner(Player::A)
        } else if scores.player_b > scores.player_a {
            MatchResult::Winner(Player::B)
        } else {
            MatchResult::Draw
        }
    }
}

/// Headline shown above a territorial board
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    Placing { player: Player, remaining: u32 },
    ReadyToStart,
    Simulating { generation: u32, total: u32 },
    Paused { generation: u32, total: u32 },
    GameOver { result: MatchResult },
}

/// Full territorial state returned to the renderer - flat array for efficiency
#[derive(CandidType, Deserialize, Serialize, Clone, Debug)]
pub struct TerritorialSnapshot {
    pub cells: Vec<CellView>,
    pub width: u32,
    pub height: u32,
    pub phase: GamePhase,
    pub generation: u32,
    pub total_generations: u32,
    pub scores: Scores,
    pub active_player: Player,
    pub remaining_a: u32,
    pub remaining_b: u32,
    pub is_running: bool,
    pub speed: SpeedView,
}

/// Full single-player state returned to the renderer
#[derive(CandidType, Deserialize, Serialize, Clone, Debug)]
pub struct SinglePlayerSnapshot {
    pub cells: Vec<CellView>,
    pub width: u32,
    pub height: u32,
    pub generation: u64,
    pub alive_count: u32,
    pub is_running: bool,
    pub speed: SpeedView,
}

#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SpeedView {
    pub index: u32,
    pub label: String,
    pub multiplier: f64,
    pub interval_ms: u64,
}

/// What a click on the board does
#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementTool {
    #[default]
    SingleCell,
    Pattern(u32),
}
