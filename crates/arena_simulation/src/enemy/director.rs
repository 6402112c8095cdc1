//! EnemyDirector — преследование игрока + catch detection
//!
//! Враги двигаются прямо к игроку (без pathfinding, без separation).
//! Порядок обхода — по возрастанию `EnemyId`; первый пойманный
//! останавливает обход (остальные в этом тике стоят).

use bevy::prelude::*;

use crate::clock::SimClock;
use crate::config::ArenaTuning;
use crate::player::PlayerState;

/// Враг в арене. Наличие entity = враг жив.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub speed: f32,
}

/// Порядковый id врага (tie-break для hit test и catch)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EnemyId(pub u64);

/// Счётчик id врагов (сбрасывается на старте сессии)
#[derive(Resource, Debug, Default)]
pub struct NextEnemyId(u64);

impl NextEnemyId {
    pub fn allocate(&mut self) -> EnemyId {
        let id = EnemyId(self.0);
        self.0 += 1;
        id
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Event: враг добрался до игрока (EnemyDirector → SessionLifecycle)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerCaught {
    pub enemy: Entity,
    pub enemy_id: EnemyId,
}

pub fn enemy_bundle(id: EnemyId, position: Vec3, speed: f32) -> impl Bundle {
    (Enemy { speed }, id, Transform::from_translation(position))
}

/// Снимок врага для одного шага директора
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pursuer {
    pub entity: Entity,
    pub id: EnemyId,
    pub position: Vec3,
    pub speed: f32,
}

impl Pursuer {
    /// Шаг к цели. Возвращает true, если ДО шага враг был ближе `catch_radius`.
    pub fn pursue(&mut self, target: Vec3, delta: f32, speed_scale: f32, catch_radius: f32) -> bool {
        let to_target = target - self.position;
        let distance = to_target.length();

        self.position += to_target.normalize_or_zero() * self.speed * delta * speed_scale;

        distance < catch_radius
    }
}

/// Обход всех преследователей в порядке слайса.
///
/// Возвращает индекс поймавшего врага; после него никто не двигается.
pub fn direct_pursuers(
    pursuers: &mut [Pursuer],
    target: Vec3,
    delta: f32,
    speed_scale: f32,
    catch_radius: f32,
) -> Option<usize> {
    for (index, pursuer) in pursuers.iter_mut().enumerate() {
        if pursuer.pursue(target, delta, speed_scale, catch_radius) {
            return Some(index);
        }
    }
    None
}

/// System: EnemyDirector.update
pub fn advance_enemies(
    clock: Res<SimClock>,
    tuning: Res<ArenaTuning>,
    player: Res<PlayerState>,
    mut enemies: Query<(Entity, &EnemyId, &Enemy, &mut Transform)>,
    mut caught_events: EventWriter<PlayerCaught>,
) {
    let mut pursuers: Vec<Pursuer> = enemies
        .iter()
        .map(|(entity, id, enemy, transform)| Pursuer {
            entity,
            id: *id,
            position: transform.translation,
            speed: enemy.speed,
        })
        .collect();
    pursuers.sort_by_key(|pursuer| pursuer.id);

    let caught = direct_pursuers(
        &mut pursuers,
        player.position,
        clock.delta,
        tuning.enemy_speed_scale,
        tuning.catch_radius,
    );

    for pursuer in &pursuers {
        if let Ok((_, _, _, mut transform)) = enemies.get_mut(pursuer.entity) {
            transform.translation = pursuer.position;
        }
    }

    if let Some(index) = caught {
        let pursuer = pursuers[index];
        crate::logger::log_info(&format!(
            "💀 Player caught by enemy {:?} at {:?}",
            pursuer.id, pursuer.position
        ));
        caught_events.write(PlayerCaught {
            enemy: pursuer.entity,
            enemy_id: pursuer.id,
        });
    }
}
