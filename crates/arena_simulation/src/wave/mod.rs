//! Wave domain — WaveController

use bevy::prelude::*;

pub mod controller;


pub use controller::{
    advance_wave, enemy_count_for_round, sample_spawn_position, spawn_enemy_wave, RoundState, SpawnRequest,
    WaveStarted,
};

use crate::SimulationSet;

/// Wave Plugin
pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WaveStarted>()
            .init_resource::<RoundState>()
            .add_systems(Update, advance_wave.in_set(SimulationSet::Waves));
    }
}
