use std::time::Duration;

use crate::error::LifeError;
use crate::types::SpeedView;

/// Simulation speed multipliers, slowest to fastest. The tick interval is
/// `1 / multiplier` seconds.
pub const SPEED_MULTIPLIERS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
pub const SPEED_LABELS: [&str; 6] = ["0.5x", "1.0x", "1.5x", "2.0x", "2.5x", "3.0x"];
pub const SPEED_LEVEL_COUNT: usize = SPEED_MULTIPLIERS.len();
pub const DEFAULT_SPEED_INDEX: usize = 1;

/// Current position in the speed table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedControl {
    index: usize,
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self { index: DEFAULT_SPEED_INDEX }
    }
}

impl SpeedControl {
    pub fn new(index: usize) -> Result<Self, LifeError> {
        if index >= SPEED_LEVEL_COUNT {
            return Err(LifeError::InvalidSpeedLevel(index as u64));
        }
        Ok(Self { index })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set(&mut self, index: usize) -> Result<(), LifeError> {
        *self = Self::new(index)?;
        Ok(())
    }

    /// Returns true if the level changed (false at the fastest level)
    pub fn increase(&mut self) -> bool {
        if self.index + 1 < SPEED_LEVEL_COUNT {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Returns true if the level changed (false at the slowest level)
    pub fn decrease(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn multiplier(&self) -> f64 {
        SPEED_MULTIPLIERS[self.index]
    }

    pub fn label(&self) -> &'static str {
        SPEED_LABELS[self.index]
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.multiplier())
    }

    pub fn view(&self) -> SpeedView {
        SpeedView {
            index: self.index as u32,
            label: self.label().to_string(),
            multiplier: self.multiplier(),
            interval_ms: self.interval().as_millis() as u64,
        }
    }
}
