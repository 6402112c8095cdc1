//! Enemy domain — EnemyDirector
//!
//! Враги — entities (`Enemy` + `EnemyId` + `Transform`), спавнит их WaveController.

use bevy::prelude::*;

pub mod director;

#[cfg(test)]
mod director_tests;

pub use director::{
    advance_enemies, direct_pursuers, enemy_bundle, Enemy, EnemyId, NextEnemyId, PlayerCaught, Pursuer,
};

use crate::SimulationSet;

/// Enemy Plugin
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerCaught>()
            .init_resource::<NextEnemyId>()
            .add_systems(Update, advance_enemies.in_set(SimulationSet::Enemies));
    }
}
