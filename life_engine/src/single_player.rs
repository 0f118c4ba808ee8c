use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::driver::Tickable;
use crate::engine::{DoubleBuffer, RuleMode};
use crate::error::LifeError;
use crate::grid::Grid;
use crate::patterns::{self, Pattern, PatternCatalog};
use crate::speed::SpeedControl;
use crate::types::{Cell, CellView, Owner, PlacementTool, SinglePlayerSnapshot};

/// Free-running sandbox: `Idle ⇄ Running`.
///
/// The board can only be edited while idle. Each tick while running replaces
/// the grid with the next standard generation.
#[derive(Clone, Debug)]
pub struct SinglePlayerSession {
    config: GameConfig,
    catalog: PatternCatalog,
    buffers: DoubleBuffer,
    running: bool,
    speed: SpeedControl,
    tool: PlacementTool,
    generation: u64,
}

impl SinglePlayerSession {
    pub fn new(config: GameConfig, catalog: PatternCatalog) -> Result<Self, LifeError> {
        config.validate()?;
        let speed = SpeedControl::new(config.default_speed_index as usize)?;
        info!(width = config.width, height = config.height, "single-player session initialized");
        Ok(Self {
            buffers: DoubleBuffer::new(config.width, config.height),
            config,
            catalog,
            running: false,
            speed,
            tool: PlacementTool::SingleCell,
            generation: 0,
        })
    }

    // =========================================================================
    // SIMULATION CONTROL
    // =========================================================================

    /// Idle -> Running. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        debug!(generation = self.generation, "simulation started");
        true
    }

    /// Running -> Idle. Returns false if already idle.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        debug!(generation = self.generation, "simulation paused");
        true
    }

    pub fn set_speed(&mut self, level: usize) -> Result<(), LifeError> {
        self.speed.set(level)
    }

    pub fn increase_speed(&mut self) -> bool {
        self.speed.increase()
    }

    pub fn decrease_speed(&mut self) -> bool {
        self.speed.decrease()
    }

    /// Advance one generation if running. Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.buffers.step(RuleMode::Standard);
        self.generation += 1;
        true
    }

    // =========================================================================
    // EDITING (idle only)
    // =========================================================================

    /// Flip (x, y). The new cell is always unclaimed.
    pub fn toggle_cell(&mut self, x: i32, y: i32) -> Result<CellView, LifeError> {
        if self.running {
            return Err(LifeError::SimulationRunning);
        }
        let grid = self.buffers.current_mut();
        let toggled = if grid.get(x, y)?.is_alive() {
            Cell::dead()
        } else {
            Cell::alive(Owner::Unclaimed)
        };
        grid.set(x, y, toggled)?;
        Ok(toggled.into())
    }

    pub fn place_pattern(&mut self, name: &str, x: i32, y: i32) -> Result<u32, LifeError> {
        let pattern = self.catalog.find(name)?.clone();
        self.stamp(&pattern, x, y)
    }

    pub fn place_pattern_at_index(&mut self, index: usize, x: i32, y: i32) -> Result<u32, LifeError> {
        let pattern = self
            .catalog
            .get(index)
            .cloned()
            .ok_or_else(|| LifeError::UnknownPattern(format!("#{}", index)))?;
        self.stamp(&pattern, x, y)
    }

    fn stamp(&mut self, pattern: &Pattern, x: i32, y: i32) -> Result<u32, LifeError> {
        if self.running {
            return Err(LifeError::SimulationRunning);
        }
        patterns::place(self.buffers.current_mut(), pattern, x, y, Owner::Unclaimed)
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

    /// Apply the selected tool at (x, y). Rejected clicks are logged and
    /// otherwise ignored; returns whether the board changed.
    pub fn click(&mut self, x: i32, y: i32) -> bool {
        let result = match self.tool {
            PlacementTool::SingleCell => self.toggle_cell(x, y).map(|_| 1),
            PlacementTool::Pattern(index) => self.place_pattern_at_index(index as usize, x, y),
        };
        match result {
            Ok(_) => true,
            Err(e) if e.is_ignorable() => {
                debug!(x, y, error = %e, "click ignored");
                false
            }
            Err(e) => {
                warn!(x, y, error = %e, "click failed");
                false
            }
        }
    }

    /// Pause, then fill each cell alive with probability 1/2
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pause();
        let grid = self.buffers.current_mut();
        for cell in grid.cells_mut() {
            *cell = if rng.gen_bool(0.5) { Cell::alive(Owner::Unclaimed) } else { Cell::dead() };
        }
    }

    /// Pause and kill every cell; speed and tool survive.
    pub fn clear(&mut self) {
        self.pause();
        self.buffers.clear();
        self.generation = 0;
    }

    /// Back to a freshly initialized session
    pub fn reset(&mut self) {
        self.clear();
        self.speed = SpeedControl::new(self.config.default_speed_index as usize).unwrap_or_default();
        self.tool = PlacementTool::SingleCell;
        info!("single-player session reset");
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub fn cell_at(&self, x: i32, y: i32) -> Result<CellView, LifeError> {
        self.buffers.current().get(x, y).map(CellView::from)
    }

    pub fn grid(&self) -> &Grid {
        self.buffers.current()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
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

    pub fn snapshot(&self) -> SinglePlayerSnapshot {
        let grid = self.buffers.current();
        SinglePlayerSnapshot {
            cells: grid.views(),
            width: grid.width() as u32,
            height: grid.height() as u32,
            generation: self.generation,
            alive_count: grid.alive_count(),
            is_running: self.running,
            speed: self.speed.view(),
        }
    }
}

impl Tickable for SinglePlayerSession {
    fn tick(&mut self) -> bool {
        SinglePlayerSession::tick(self)
    }

    fn tick_interval(&self) -> Option<Duration> {
        self.running.then(|| self.speed.interval())
    }
}
