//! Player domain — PlayerKinematics
//!
//! PlayerState живёт как Resource (один игрок на сессию).
//! Читается EnemyDirector (цель преследования), WeaponSystem (origin выстрела)
//! и snapshot'ом для HUD.

use bevy::prelude::*;

pub mod state;


pub use state::*;

use crate::clock::SimClock;
use crate::config::ArenaTuning;
use crate::input::InputState;

/// System: PlayerKinematics tick
pub fn tick_player_kinematics(
    mut player: ResMut<PlayerState>,
    input: Res<InputState>,
    clock: Res<SimClock>,
    tuning: Res<ArenaTuning>,
) {
    player.tick(&input, clock.delta, &tuning);
}
