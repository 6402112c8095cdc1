//! Tests for ReloadScheduler (wall-clock completion, session generation).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use crate::combat::{Aim, FireOutcome, FireRejection, ReloadScheduler, WeaponDefinition, WeaponLoadout, WeaponSlot};
    use crate::session::SessionGeneration;

    fn loadout_with_empty_pistol() -> WeaponLoadout {
        let pistol = WeaponDefinition {
            reload_duration: 1.5,
            ..WeaponDefinition::pistol()
        };
        let mut loadout = WeaponLoadout::new([pistol, WeaponDefinition::shotgun(), WeaponDefinition::rifle()]);
        loadout.instance_mut(WeaponSlot::Pistol).ammo = 0;
        loadout
    }

    fn aim() -> Aim {
        Aim { origin: Vec3::ZERO, forward: Vec3::NEG_Z }
    }

    #[test]
    fn test_reload_completes_on_deadline_without_ticks() {
        let mut loadout = loadout_with_empty_pistol();
        let mut scheduler = ReloadScheduler::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let generation = SessionGeneration(1);

        let ticket = loadout.request_reload(0.0).unwrap();
        scheduler.schedule(ticket, generation);

        // До дедлайна: ничего не завершается, выстрел отклонён
        for now in [0.1, 0.75, 1.499] {
            let poll = scheduler.poll(now, generation, &mut loadout);
            assert!(poll.completed.is_empty());
            assert_eq!(
                loadout.try_fire(now, aim(), 5.0, &mut rng),
                FireOutcome::Rejected(FireRejection::Reloading)
            );
        }

        // Единственный poll ровно в дедлайн (никаких тиков между ними не было)
        let poll = scheduler.poll(1.5, generation, &mut loadout);
        assert_eq!(poll.completed, vec![WeaponSlot::Pistol]);
        assert_eq!(loadout.active_instance().ammo, 12);
        assert!(!loadout.active_instance().reloading);

        // Завершение происходит ровно один раз
        let poll = scheduler.poll(10.0, generation, &mut loadout);
        assert!(poll.completed.is_empty());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn test_late_poll_still_completes() {
        let mut loadout = loadout_with_empty_pistol();
        let mut scheduler = ReloadScheduler::default();
        let generation = SessionGeneration(3);

        scheduler.schedule(loadout.request_reload(2.0).unwrap(), generation);

        let poll = scheduler.poll(60.0, generation, &mut loadout);
        assert_eq!(poll.completed.len(), 1);
        assert_eq!(loadout.active_instance().ammo, 12);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut old_session = loadout_with_empty_pistol();
        let mut scheduler = ReloadScheduler::default();

        scheduler.schedule(old_session.request_reload(0.0).unwrap(), SessionGeneration(1));

        // Новая сессия: свежий loadout, но пистолет снова пуст и в reload
        let mut new_session = loadout_with_empty_pistol();
        let fresh = new_session.request_reload(1.0).unwrap();
        scheduler.schedule(fresh, SessionGeneration(2));

        // Старый дедлайн (1.5) прошёл — но тикет чужой
        let poll = scheduler.poll(1.6, SessionGeneration(2), &mut new_session);
        assert_eq!(poll.discarded, 1);
        assert!(poll.completed.is_empty());
        assert!(new_session.active_instance().reloading);
        assert_eq!(new_session.active_instance().ammo, 0);

        let poll = scheduler.poll(2.5, SessionGeneration(2), &mut new_session);
        assert_eq!(poll.completed, vec![WeaponSlot::Pistol]);
        assert_eq!(new_session.active_instance().ammo, 12);
    }

    #[test]
    fn test_multiple_slots_complete_independently() {
        let mut loadout = WeaponLoadout::default();
        let mut scheduler = ReloadScheduler::default();
        let generation = SessionGeneration(1);

        loadout.instance_mut(WeaponSlot::Pistol).ammo = 3;
        loadout.instance_mut(WeaponSlot::Rifle).ammo = 3;

        scheduler.schedule(loadout.request_reload(0.0).unwrap(), generation); // pistol, due 1.2
        loadout.switch_weapon(WeaponSlot::Rifle);
        scheduler.schedule(loadout.request_reload(0.0).unwrap(), generation); // rifle, due 2.0

        let poll = scheduler.poll(1.3, generation, &mut loadout);
        assert_eq!(poll.completed, vec![WeaponSlot::Pistol]);
        assert!(loadout.instance(WeaponSlot::Rifle).reloading);

        let poll = scheduler.poll(2.0, generation, &mut loadout);
        assert_eq!(poll.completed, vec![WeaponSlot::Rifle]);
        assert_eq!(loadout.instance(WeaponSlot::Rifle).ammo, 30);
    }
}
