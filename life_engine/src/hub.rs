use std::time::Duration;

use candid::{CandidType, Deserialize};
use serde::Serialize;
use tracing::info;

use crate::config::GameConfig;
use crate::driver::Tickable;
use crate::error::LifeError;
use crate::patterns::PatternCatalog;
use crate::single_player::SinglePlayerSession;
use crate::territorial::TerritorialSession;

#[derive(CandidType, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    Menu,
    SinglePlayer,
    Territorial,
}

/// Owns one session per mode for the lifetime of the app. Switching modes
/// pauses and resets sessions instead of rebuilding them.
#[derive(Clone, Debug)]
pub struct GameHub {
    single: SinglePlayerSession,
    territorial: TerritorialSession,
    mode: GameMode,
}

impl GameHub {
    pub fn new(config: GameConfig, catalog: PatternCatalog) -> Result<Self, LifeError> {
        Ok(Self {
            single: SinglePlayerSession::new(config.clone(), catalog.clone())?,
            territorial: TerritorialSession::new(config, catalog)?,
            mode: GameMode::Menu,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn return_to_menu(&mut self) {
        self.single.pause();
        self.territorial.pause();
        self.mode = GameMode::Menu;
        info!("returned to menu");
    }

    pub fn enter_single_player(&mut self) -> &mut SinglePlayerSession {
        self.territorial.pause();
        self.single.clear();
        self.mode = GameMode::SinglePlayer;
        info!("entered single-player mode");
        &mut self.single
    }

    pub fn enter_territorial(&mut self) -> &mut TerritorialSession {
        self.single.pause();
        self.territorial.reset();
        self.mode = GameMode::Territorial;
        info!("entered territorial mode");
        &mut self.territorial
    }

    pub fn single_player(&self) -> &SinglePlayerSession {
        &self.single
    }

    pub fn single_player_mut(&mut self) -> &mut SinglePlayerSession {
        &mut self.single
    }

    pub fn territorial(&self) -> &TerritorialSession {
        &self.territorial
    }

    pub fn territorial_mut(&mut self) -> &mut TerritorialSession {
        &mut self.territorial
    }
}

impl Tickable for GameHub {
    fn tick(&mut self) -> bool {
        match self.mode {
            GameMode::Menu => false,
            GameMode::SinglePlayer => self.single.tick(),
            GameMode::Territorial => self.territorial.tick(),
        }
    }

    fn tick_interval(&self) -> Option<Duration> {
        match self.mode {
            GameMode::Menu => None,
            GameMode::SinglePlayer => self.single.tick_interval(),
            GameMode::Territorial => self.territorial.tick_interval(),
        }
    }
}
