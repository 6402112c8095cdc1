//! Session domain — SessionLifecycle
//!
//! ECS ответственность:
//! - SessionState FSM (Menu / Playing / GameOver)
//! - Score, HighScore, SessionGeneration
//! - High score persistence (HighScoreStore)
//! - Reset всего мира на старте сессии

use bevy::prelude::*;

pub mod persistence;
pub mod state;
pub mod systems;


pub use persistence::{HighScoreSlot, HighScoreStore, MemoryHighScoreStore, RonHighScoreStore, StoreError};
pub use state::{HighScore, Score, SessionCommand, SessionGeneration, SessionState};
pub use systems::{
    award_kill_score, evaluate_caught, handle_session_commands, record_high_score, refresh_high_score,
    reset_session,
};

use crate::SimulationSet;

/// Session Plugin
///
/// Требует StatesPlugin (MinimalPlugins его не содержат).
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SessionState>()
            .add_event::<SessionCommand>()
            .init_resource::<Score>()
            .init_resource::<HighScore>()
            .init_resource::<SessionGeneration>()
            .init_resource::<HighScoreSlot>();

        app.add_systems(Update, handle_session_commands.in_set(SimulationSet::Input))
            .add_systems(
                Update,
                (award_kill_score, evaluate_caught).chain().in_set(SimulationSet::Session),
            )
            .add_systems(OnEnter(SessionState::Playing), reset_session)
            .add_systems(OnEnter(SessionState::GameOver), record_high_score)
            .add_systems(OnEnter(SessionState::Menu), refresh_high_score);
    }
}
