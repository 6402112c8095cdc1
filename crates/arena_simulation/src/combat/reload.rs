//! Reload timers, привязанные к session generation
//!
//! Перезарядка завершается по wall-clock дедлайну, а не по тикам симуляции:
//! `poll_reload_timers` крутится каждый кадр в любом SessionState.
//! Тикет хранит generation сессии, в которой был запрошен; после reset
//! (или конца сессии) generation меняется и старые тикеты выбрасываются,
//! не трогая оружие новой сессии.

use bevy::prelude::*;

use super::weapon::{ReloadTicket, WeaponLoadout, WeaponSlot};
use crate::clock::SimClock;
use crate::session::SessionGeneration;

/// Event: перезарядка завершена (ammo = max)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ReloadCompleted {
    pub slot: WeaponSlot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingReload {
    ticket: ReloadTicket,
    generation: SessionGeneration,
}

/// Результат одного poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReloadPoll {
    pub completed: Vec<WeaponSlot>,
    /// Тикеты от прошлых сессий, выброшенные без применения
    pub discarded: usize,
}

/// Очередь отложенных перезарядок
#[derive(Resource, Debug, Clone, Default)]
pub struct ReloadScheduler {
    pending: Vec<PendingReload>,
}

impl ReloadScheduler {
    pub fn schedule(&mut self, ticket: ReloadTicket, generation: SessionGeneration) {
        self.pending.push(PendingReload { ticket, generation });
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Применить все тикеты с `due_at <= now`.
    ///
    /// Тикеты чужой generation выбрасываются сразу (не ждут дедлайна).
    /// Тикеты выполняются в порядке дедлайнов.
    pub fn poll(&mut self, now: f64, current: SessionGeneration, loadout: &mut WeaponLoadout) -> ReloadPoll {
        let mut result = ReloadPoll::default();
        let mut due = Vec::new();

        self.pending.retain(|pending| {
            if pending.generation != current {
                result.discarded += 1;
                return false;
            }
            if pending.ticket.due_at <= now {
                due.push(pending.ticket);
                return false;
            }
            true
        });

        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at));
        for ticket in due {
            if loadout.complete_reload(ticket.slot) {
                result.completed.push(ticket.slot);
            }
        }

        result
    }
}

/// System: завершение перезарядок (каждый кадр, независимо от SessionState)
pub fn poll_reload_timers(
    clock: Res<SimClock>,
    generation: Res<SessionGeneration>,
    mut scheduler: ResMut<ReloadScheduler>,
    mut loadout: ResMut<WeaponLoadout>,
    mut completed_events: EventWriter<ReloadCompleted>,
) {
    if scheduler.pending_count() == 0 {
        return;
    }

    let poll = scheduler.poll(clock.now(), *generation, &mut loadout);

    if poll.discarded > 0 {
        crate::logger::log_info(&format!(
            "Discarded {} stale reload timer(s) (generation {})",
            poll.discarded, generation.0
        ));
    }

    for slot in poll.completed {
        crate::logger::log(&format!("🔄 Reload complete: {:?}", slot));
        completed_events.write(ReloadCompleted { slot });
    }
}
