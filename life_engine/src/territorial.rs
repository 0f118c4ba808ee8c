//! Two-player territorial match: `Setup -> Simulation -> GameOver`.
//!
//! During setup player A seeds its whole budget, then player B. Once both
//! budgets are spent `start_simulation` runs a fixed number of territorial
//! generations; whoever owns more live cells at the end wins.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::driver::Tickable;
use crate::engine::{DoubleBuffer, RuleMode};
use crate::error::{LifeError, RejectReason};
use crate::grid::Grid;
use crate::patterns::{self, Pattern, PatternCatalog};
use crate::speed::SpeedControl;
use crate::types::{
    CellView, GamePhase, MatchResult, MatchStatus, PlacementTool, Player, Scores,
    TerritorialSnapshot,
};

#[derive(Clone, Debug)]
pub struct TerritorialSession {
    config: GameConfig,
    catalog: PatternCatalog,
    buffers: DoubleBuffer,
    phase: GamePhase,
    generation: u32,
    scores: Scores,
    active_player: Player,
    /// Cells seeded so far, indexed by `Player::slot`
    placed: [u32; 2],
    running: bool,
    speed: SpeedControl,
    tool: PlacementTool,
}

impl TerritorialSession {
    pub fn new(config: GameConfig, catalog: PatternCatalog) -> Result<Self, LifeError> {
        config.validate()?;
        let speed = SpeedControl::new(config.default_speed_index as usize)?;
        info!(
            width = config.width,
            height = config.height,
            budget = config.budget_per_player,
            generations = config.total_generations,
            "territorial session initialized"
        );
        Ok(Self {
            buffers: DoubleBuffer::new(config.width, config.height),
            config,
            catalog,
            phase: GamePhase::Setup,
            generation: 0,
            scores: Scores::default(),
            active_player: Player::A,
            placed: [0; 2],
            running: false,
            speed,
            tool: PlacementTool::SingleCell,
        })
    }

    /// Return to a fresh setup phase from any state. The speed setting is kept.
    pub fn reset(&mut self) {
        self.buffers.clear();
        self.phase = GamePhase::Setup;
        self.generation = 0;
        self.scores = Scores::default();
        self.active_player = Player::A;
        self.placed = [0; 2];
        self.running = false;
        self.tool = PlacementTool::SingleCell;
        info!("territorial session reset");
    }

    // =========================================================================
    // SETUP
    // =========================================================================

    /// Seed one cell for the active player
    pub fn place_at(&mut self, x: i32, y: i32) -> Result<u32, LifeError> {
        self.seed(&Pattern::single(), x, y)
    }

    pub fn place_pattern(&mut self, name: &str, x: i32, y: i32) -> Result<u32, LifeError> {
        let pattern = self.catalog.find(name)?.clone();
        self.seed(&pattern, x, y)
    }

    pub fn place_pattern_at_index(&mut self, index: usize, x: i32, y: i32) -> Result<u32, LifeError> {
        let pattern = self
            .catalog
            .get(index)
            .cloned()
            .ok_or_else(|| LifeError::UnknownPattern(format!("#{}", index)))?;
        self.seed(&pattern, x, y)
    }

    /// Validation order: phase, budget, then board. Any rejection leaves the
    /// grid, budgets and turn untouched.
    fn seed(&mut self, pattern: &Pattern, x: i32, y: i32) -> Result<u32, LifeError> {
        if self.phase != GamePhase::Setup {
            return Err(LifeError::IllegalPhaseTransition { phase: self.phase });
        }

        let player = self.active_player;
        if pattern.size() > self.remaining_budget(player) {
            return Err(LifeError::InvalidPlacement(RejectReason::BudgetExceeded));
        }

        let placed_count = patterns::place(self.buffers.current_mut(), pattern, x, y, player.owner())?;

        self.placed[player.slot()] += placed_count;
        if player == Player::A && self.placed[Player::A.slot()] >= self.config.budget_per_player {
            self.active_player = Player::B;
            info!("player A budget spent, player B to place");
        }
        self.recalculate_scores();
        Ok(placed_count)
    }

    pub fn select_tool(&mut self, tool: PlacementTool) -> Result<(), LifeError> {
        if let PlacementTool::Pattern(index) = tool {
            if self.catalog.get(index as usize).is_none() {
                return Err(LifeError::UnknownPattern(format!("#{}", index)));
            }
        }
        self.tool = tool;
        Ok(())
    }

    /// Apply the selected tool for the active player. Rejected clicks are
    /// logged and otherwise ignored; returns whether anything was placed.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        let result = match self.tool {
            PlacementTool::SingleCell => self.place_at(x, y),
            PlacementTool::Pattern(index) => self.place_pattern_at_index(index as usize, x, y),
        };
        match result {
            Ok(_) => true,
            Err(e) if e.is_ignorable() => {
                debug!(x, y, player = ?self.active_player, error = %e, "placement ignored");
                false
            }
            Err(e) => {
                warn!(x, y, player = ?self.active_player, error = %e, "click failed");
                false
            }
        }
    }

    // =========================================================================
    // SIMULATION CONTROL
    // =========================================================================

    /// Setup -> Simulation once both budgets are spent. In a paused
    /// simulation this resumes ticking. Anything else is a no-op.
    pub fn start_simulation(&mut self) -> bool {
        match self.phase {
            GamePhase::Setup if self.setup_complete() => {
                self.phase = GamePhase::Simulation;
                self.running = true;
                info!(total = self.config.total_generations, "simulation phase started");
                true
            }
            GamePhase::Simulation => self.resume(),
            _ => {
                debug!(phase = ?self.phase, "start_simulation ignored");
                false
            }
        }
    }

    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        debug!(generation = self.generation, "simulation paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Simulation || self.running {
            return false;
        }
        self.running = true;
        debug!(generation = self.generation, "simulation resumed");
        true
    }

    pub fn set_speed(&mut self, level: usize) -> Result<(), LifeError> {
        if self.phase == GamePhase::GameOver {
            return Err(LifeError::IllegalPhaseTransition { phase: self.phase });
        }
        self.speed.set(level)
    }

    pub fn increase_speed(&mut self) -> bool {
        self.phase != GamePhase::GameOver && self.speed.increase()
    }

    pub fn decrease_speed(&mut self) -> bool {
        self.phase != GamePhase::GameOver && self.speed.decrease()
    }

    /// One territorial generation, if the simulation is running.
    /// Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::Simulation || !self.running {
            return false;
        }

        self.buffers.step(RuleMode::Territorial);
        self.generation += 1;
        self.recalculate_scores();

        if self.generation >= self.config.total_generations {
            self.phase = GamePhase::GameOver;
            self.running = false;
            info!(
                generation = self.generation,
                score_a = self.scores.player_a,
                score_b = self.scores.player_b,
                result = ?MatchResult::from_scores(self.scores),
                "game over"
            );
        }
        true
    }

    fn recalculate_scores(&mut self) {
        self.scores = self.buffers.current().scores();
    }

    fn setup_complete(&self) -> bool {
        self.placed.iter().all(|&p| p >= self.config.budget_per_player)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn total_generations(&self) -> u32 {
        self.config.total_generations
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn placed(&self, player: Player) -> u32 {
        self.placed[player.slot()]
    }

    pub fn remaining_budget(&self, player: Player) -> u32 {
        self.config.budget_per_player.saturating_sub(self.placed[player.slot()])
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed(&self) -> SpeedControl {
        self.speed
    }

    pub fn tool(&self) -> PlacementTool {
        self.tool
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<CellView, LifeError> {
        self.buffers.current().get(x, y).map(CellView::from)
    }

    pub fn grid(&self) -> &Grid {
        self.buffers.current()
    }

    /// Derived from the final scores; None until the match is over
    pub fn winner(&self) -> Option<MatchResult> {
        (self.phase == GamePhase::GameOver).then(|| MatchResult::from_scores(self.scores))
    }

    pub fn status(&self) -> MatchStatus {
        let total = self.config.total_generations;
        match self.phase {
            GamePhase::Setup if self.setup_complete() => MatchStatus::ReadyToStart,
            GamePhase::Setup => MatchStatus::Placing {
                player: self.active_player,
                remaining: self.remaining_budget(self.active_player),
            },
            GamePhase::Simulation if self.running => {
                MatchStatus::Simulating { generation: self.generation, total }
            }
            GamePhase::Simulation => MatchStatus::Paused { generation: self.generation, total },
            GamePhase::GameOver => MatchStatus::GameOver {
                result: MatchResult::from_scores(self.scores),
            },
        }
    }

    pub fn snapshot(&self) -> TerritorialSnapshot {
        let grid = self.buffers.current();
        TerritorialSnapshot {
            cells: grid.views(),
            width: grid.width() as u32,
            height: grid.height() as u32,
            phase: self.phase,
            generation: self.generation,
            total_generations: self.config.total_generations,
            scores: self.scores,
            active_player: self.active_player,
            remaining_a: self.remaining_budget(Player::A),
            remaining_b: self.remaining_budget(Player::B),
            is_running: self.running,
            speed: self.speed.view(),
        }
    }
}

impl Tickable for TerritorialSession {
    fn tick(&mut self) -> bool {
        TerritorialSession::tick(self)
    }

    fn tick_interval(&self) -> Option<Duration> {
        (self.phase == GamePhase::Simulation && self.running).then(|| self.speed.interval())
    }
}
