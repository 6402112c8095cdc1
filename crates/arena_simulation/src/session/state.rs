//! Session FSM + score resources

use bevy::prelude::*;
use serde::Serialize;

/// Жизненный цикл сессии: Menu → Playing → GameOver → Menu
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    GameOver,
}

/// Команды host'а (кнопки меню / экрана game over)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Menu → Playing
    Start,
    /// GameOver → Menu
    Acknowledge,
}

/// Очки текущей сессии (не убывают во время Playing)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(pub u32);

/// Рекорд (кэш значения из HighScoreStore)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u32);

/// Номер сессии. Меняется на входе в Playing и в GameOver;
/// отложенные эффекты (reload timers) помечены generation'ом.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionGeneration(pub u64);

impl SessionGeneration {
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}
