//! Combat module — WeaponSystem + ProjectileManager
//!
//! ECS ответственность:
//! - Weapon state: ammo, reload, fire rate, recoil (WeaponLoadout resource)
//! - Reload timers с session generation (ReloadScheduler)
//! - Projectiles: spawn, integration, expiry, hit test против врагов
//! - Events: WeaponFired, ReloadStarted, ReloadCompleted, EnemyKilled

use bevy::prelude::*;

pub mod projectile;
pub mod reload;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod reload_tests;

// Re-export основных типов
pub use projectile::{
    projectile_bundle, spawn_projectile, test_hit, test_hit_segment, update_projectiles, EnemyKilled, HitTarget, NextProjectileId,
    Projectile, ProjectileId,
};
pub use reload::{poll_reload_timers, ReloadCompleted, ReloadPoll, ReloadScheduler};
pub use systems::{handle_weapon_input, ReloadStarted, WeaponFired};
pub use weapon::{
    spread_direction, Aim, FireOutcome, FireRejection, ProjectileSpec, ReloadTicket, WeaponDefinition,
    WeaponInstance, WeaponLoadout, WeaponSlot, ROSTER_SIZE,
};

use crate::SimulationSet;

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. poll_reload_timers — SimulationSet::Timers (каждый кадр, в любом state)
/// 2. handle_weapon_input — SimulationSet::Weapons (только Playing)
/// 3. update_projectiles — SimulationSet::Projectiles (только Playing)
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<ReloadStarted>()
            .add_event::<ReloadCompleted>()
            .add_event::<EnemyKilled>();

        app.init_resource::<WeaponLoadout>()
            .init_resource::<ReloadScheduler>()
            .init_resource::<NextProjectileId>();

        app.add_systems(Update, poll_reload_timers.in_set(SimulationSet::Timers))
            .add_systems(Update, handle_weapon_input.in_set(SimulationSet::Weapons))
            .add_systems(Update, update_projectiles.in_set(SimulationSet::Projectiles));
    }
}
