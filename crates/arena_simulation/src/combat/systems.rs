//! WeaponSystem tick: input → switch / reload / recoil / fire

use bevy::prelude::*;

use super::projectile::{spawn_projectile, NextProjectileId};
use super::reload::ReloadScheduler;
use super::weapon::{Aim, FireOutcome, WeaponLoadout, WeaponSlot};
use crate::clock::SimClock;
use crate::config::ArenaTuning;
use crate::input::InputState;
use crate::player::PlayerState;
use crate::session::SessionGeneration;
use crate::DeterministicRng;

/// Event: выстрел принят (для звука/VFX host'а)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub slot: WeaponSlot,
    pub pellets: u32,
    pub origin: Vec3,
}

/// Event: перезарядка началась
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadStarted {
    pub slot: WeaponSlot,
    pub due_at: f64,
}

/// System: WeaponSystem tick
///
/// Порядок внутри тика:
/// 1. Смена оружия (SelectWeapon)
/// 2. Запрос перезарядки (ReloadScheduler получает тикет текущей generation)
/// 3. Recoil recovery
/// 4. Выстрел (ProjectileManager.spawn для каждой дробины)
///
/// Recoil восстанавливается ДО выстрела, поэтому сразу после выстрела
/// offset ровно `-recoil_magnitude`.
#[allow(clippy::too_many_arguments)]
pub fn handle_weapon_input(
    mut commands: Commands,
    input: Res<InputState>,
    clock: Res<SimClock>,
    tuning: Res<ArenaTuning>,
    player: Res<PlayerState>,
    generation: Res<SessionGeneration>,
    mut loadout: ResMut<WeaponLoadout>,
    mut scheduler: ResMut<ReloadScheduler>,
    mut projectile_ids: ResMut<NextProjectileId>,
    mut rng: ResMut<DeterministicRng>,
    mut fired_events: EventWriter<WeaponFired>,
    mut reload_events: EventWriter<ReloadStarted>,
) {
    let now = clock.now();

    if let Some(index) = input.select_weapon {
        match WeaponSlot::from_index(index) {
            Some(slot) => {
                if loadout.switch_weapon(slot) {
                    crate::logger::log(&format!("Weapon switched to {:?}", slot));
                }
            }
            None => {
                crate::logger::log_warning(&format!("SelectWeapon({}) out of roster range", index));
            }
        }
    }

    if input.reload_pressed {
        if let Some(ticket) = loadout.request_reload(now) {
            scheduler.schedule(ticket, *generation);
            reload_events.write(ReloadStarted {
                slot: ticket.slot,
                due_at: ticket.due_at,
            });
            crate::logger::log(&format!("Reload started: {:?} (due {:.3}s)", ticket.slot, ticket.due_at));
        }
    }

    loadout.tick(clock.delta, tuning.recoil_recovery_rate);

    if !input.fire_pressed {
        return;
    }

    let aim = Aim {
        origin: player.position,
        forward: input.aim_forward,
    };
    let slot = loadout.active_slot();

    match loadout.try_fire(now, aim, tuning.pellet_spread_degrees, &mut rng.rng) {
        FireOutcome::Fired(pellets) => {
            for spec in &pellets {
                spawn_projectile(&mut commands, &mut projectile_ids, spec, tuning.projectile_lifetime);
            }
            fired_events.write(WeaponFired {
                slot,
                pellets: pellets.len() as u32,
                origin: aim.origin,
            });
        }
        FireOutcome::Rejected(reason) => {
            crate::logger::log(&format!("Fire rejected ({:?}): {:?}", slot, reason));
        }
    }
}
