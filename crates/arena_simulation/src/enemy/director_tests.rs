//! Tests for pursuit step and catch ordering.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::enemy::{direct_pursuers, EnemyId, NextEnemyId, Pursuer};

    const SCALE: f32 = 20.0;
    const CATCH: f32 = 10.0;

    fn pursuer(id: u64, position: Vec3) -> Pursuer {
        Pursuer {
            entity: Entity::from_raw(id as u32 + 1),
            id: EnemyId(id),
            position,
            speed: 1.0,
        }
    }

    #[test]
    fn test_pursuer_moves_toward_target() {
        let mut enemy = pursuer(0, Vec3::new(100.0, 5.0, 0.0));
        let target = Vec3::new(0.0, 5.0, 0.0);

        let caught = enemy.pursue(target, 0.5, SCALE, CATCH);

        assert!(!caught);
        // 1.0 * 0.5 * 20 = 10 units к цели
        assert!((enemy.position - Vec3::new(90.0, 5.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_pursuit_is_three_dimensional() {
        // Игрок над врагом (прыжок) — враг поднимается тоже
        let mut enemy = pursuer(0, Vec3::new(0.0, 5.0, 0.0));
        enemy.pursue(Vec3::new(0.0, 105.0, 0.0), 0.1, SCALE, CATCH);
        assert!((enemy.position.y - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_catch_uses_pre_move_distance() {
        // 10.5 до шага → не пойман, хотя после шага < 10
        let mut enemy = pursuer(0, Vec3::new(10.5, 0.0, 0.0));
        assert!(!enemy.pursue(Vec3::ZERO, 0.1, SCALE, CATCH));
        assert!(enemy.position.x < 10.0);

        // Теперь дистанция до шага < 10 → пойман
        assert!(enemy.pursue(Vec3::ZERO, 0.1, SCALE, CATCH));
    }

    #[test]
    fn test_enemy_on_target_does_not_move() {
        let mut enemy = pursuer(0, Vec3::ZERO);
        assert!(enemy.pursue(Vec3::ZERO, 0.1, SCALE, CATCH));
        assert_eq!(enemy.position, Vec3::ZERO);
    }

    #[test]
    fn test_first_catch_stops_scan() {
        let mut pursuers = vec![
            pursuer(0, Vec3::new(200.0, 0.0, 0.0)),
            pursuer(1, Vec3::new(5.0, 0.0, 0.0)),
            pursuer(2, Vec3::new(0.0, 0.0, 3.0)),
        ];
        let before_last = pursuers[2].position;

        let caught = direct_pursuers(&mut pursuers, Vec3::ZERO, 0.1, SCALE, CATCH);

        assert_eq!(caught, Some(1));
        // Враг до поймавшего сдвинулся, после — нет
        assert!(pursuers[0].position.x < 200.0);
        assert_eq!(pursuers[2].position, before_last);
    }

    #[test]
    fn test_no_catch_moves_everyone() {
        let mut pursuers = vec![
            pursuer(0, Vec3::new(200.0, 0.0, 0.0)),
            pursuer(1, Vec3::new(0.0, 0.0, -300.0)),
        ];

        assert_eq!(direct_pursuers(&mut pursuers, Vec3::ZERO, 0.1, SCALE, CATCH), None);
        assert!(pursuers[0].position.x < 200.0);
        assert!(pursuers[1].position.z > -300.0);
    }

    #[test]
    fn test_enemy_ids_are_sequential() {
        let mut ids = NextEnemyId::default();
        assert_eq!(ids.allocate(), EnemyId(0));
        assert_eq!(ids.allocate(), EnemyId(1));
        ids.reset();
        assert_eq!(ids.allocate(), EnemyId(0));
    }
}
