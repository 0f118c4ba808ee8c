use candid::{CandidType, Deserialize};
use serde::Serialize;

use crate::error::LifeError;
use crate::speed::{DEFAULT_SPEED_INDEX, SPEED_LEVEL_COUNT};
use crate::types::{
    DEFAULT_CELLS_PER_PLAYER, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_TOTAL_GENERATIONS,
};

/// Board and match settings shared by both game modes.
///
/// Missing JSON fields fall back to the defaults, so a host can override just
/// the values it cares about:
///
/// ```
/// use life_engine::GameConfig;
///
/// let config = GameConfig::from_json(r#"{ "total_generations": 40 }"#).unwrap();
/// assert_eq!(config.total_generations, 40);
/// assert_eq!(config.width, 20);
/// ```
#[derive(CandidType, Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub budget_per_player: u32,
    pub total_generations: u32,
    pub default_speed_index: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            budget_per_player: DEFAULT_CELLS_PER_PLAYER,
            total_generations: DEFAULT_TOTAL_GENERATIONS,
            default_speed_index: DEFAULT_SPEED_INDEX as u32,
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, LifeError> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| LifeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LifeError> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(LifeError::InvalidConfig("grid dimensions exceed i32 range".to_string()));
        }
        if self.budget_per_player == 0 {
            return Err(LifeError::InvalidConfig("budget_per_player must be at least 1".to_string()));
        }
        if self.total_generations == 0 {
            return Err(LifeError::InvalidConfig("total_generations must be at least 1".to_string()));
        }
        if self.default_speed_index as usize >= SPEED_LEVEL_COUNT {
            return Err(LifeError::InvalidConfig(format!(
                "default_speed_index must be below {}, got {}",
                SPEED_LEVEL_COUNT, self.default_speed_index
            )));
        }

        // Both players must be able to spend their whole budget on distinct cells
        let total_cells = self.width as u64 * self.height as u64;
        let needed = self.budget_per_player as u64 * 2;
        if needed > total_cells {
            return Err(LifeError::InvalidConfig(format!(
                "two budgets of {} cells do not fit on a {}x{} grid",
                self.budget_per_player, self.width, self.height
            )));
        }
        Ok(())
    }
}
