//! ProjectileManager — spawn, integration, expiry, hit test
//!
//! Снаряды — entities (`Projectile` + `ProjectileId` + `Transform`).
//! Hit test — плоский: точка (или отрезок шага) против списка целей, без scene graph.
//! Tie-break политика: снаряды по возрастанию `ProjectileId`,
//! цели по возрастанию `EnemyId`; первая цель в радиусе — жертва.

use bevy::prelude::*;

use super::weapon::ProjectileSpec;
use crate::clock::SimClock;
use crate::config::ArenaTuning;
use crate::enemy::{Enemy, EnemyId};

/// Снаряд в полёте
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub velocity: Vec3,
    /// Оставшееся время жизни (секунды)
    pub lifetime: f32,
    pub damage: u32,
}

impl Projectile {
    /// Интегрирует позицию и уменьшает lifetime.
    /// Возвращает false, если снаряд истёк.
    pub fn advance(&mut self, position: &mut Vec3, delta: f32) -> bool {
        *position += self.velocity * delta;
        self.lifetime -= delta;
        self.lifetime > 0.0
    }
}

/// Порядковый id снаряда (детерминированный порядок обработки)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectileId(pub u64);

/// Счётчик id снарядов (сбрасывается на старте сессии)
#[derive(Resource, Debug, Default)]
pub struct NextProjectileId(u64);

impl NextProjectileId {
    pub fn allocate(&mut self) -> ProjectileId {
        let id = ProjectileId(self.0);
        self.0 += 1;
        id
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Event: снаряд убил врага (ProjectileManager → scoring)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EnemyKilled {
    pub enemy: Entity,
    pub enemy_id: EnemyId,
    pub projectile: ProjectileId,
    pub damage: u32,
}

/// Цель для hit test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTarget {
    pub entity: Entity,
    pub id: EnemyId,
    pub position: Vec3,
}

/// Плоский hit test: первая цель (в порядке слайса), дистанция до которой < radius
pub fn test_hit(point: Vec3, targets: &[HitTarget], radius: f32) -> Option<Entity> {
    test_hit_segment(point, point, targets, radius)
}

/// Hit test по пройденному за тик отрезку `from → to`.
///
/// Быстрый снаряд (шаг больше диаметра цели) не проскакивает сквозь врага.
pub fn test_hit_segment(from: Vec3, to: Vec3, targets: &[HitTarget], radius: f32) -> Option<Entity> {
    targets
        .iter()
        .find(|target| distance_to_segment(target.position, from, to) < radius)
        .map(|target| target.entity)
}

fn distance_to_segment(point: Vec3, from: Vec3, to: Vec3) -> f32 {
    let segment = to - from;
    let length_squared = segment.length_squared();
    if length_squared <= f32::EPSILON {
        return point.distance(from);
    }
    let t = ((point - from).dot(segment) / length_squared).clamp(0.0, 1.0);
    point.distance(from + segment * t)
}

/// Bundle снаряда из ProjectileSpec
pub fn projectile_bundle(id: ProjectileId, spec: &ProjectileSpec, lifetime: f32) -> impl Bundle {
    (
        Projectile {
            velocity: spec.direction * spec.speed,
            lifetime,
            damage: spec.damage,
        },
        id,
        Transform::from_translation(spec.origin),
    )
}

/// Spawn снаряда (ProjectileManager.spawn)
pub fn spawn_projectile(
    commands: &mut Commands,
    ids: &mut NextProjectileId,
    spec: &ProjectileSpec,
    lifetime: f32,
) -> Entity {
    let id = ids.allocate();
    commands.spawn(projectile_bundle(id, spec, lifetime)).id()
}

/// System: ProjectileManager.update
///
/// 1. Интеграция позиции, уменьшение lifetime
/// 2. Истёкшие (lifetime ≤ 0) — despawn без hit test
/// 3. Живые — hit test отрезка шага против врагов; попадание убирает и врага, и снаряд
///
/// Один снаряд — максимум один враг; один враг — максимум один снаряд за тик.
pub fn update_projectiles(
    mut commands: Commands,
    clock: Res<SimClock>,
    tuning: Res<ArenaTuning>,
    mut projectiles: Query<(Entity, &ProjectileId, &mut Projectile, &mut Transform), Without<Enemy>>,
    enemies: Query<(Entity, &EnemyId, &Transform), With<Enemy>>,
    mut killed_events: EventWriter<EnemyKilled>,
) {
    let delta = clock.delta;

    let mut targets: Vec<HitTarget> = enemies
        .iter()
        .map(|(entity, id, transform)| HitTarget {
            entity,
            id: *id,
            position: transform.translation,
        })
        .collect();
    targets.sort_by_key(|target| target.id);

    let mut order: Vec<(ProjectileId, Entity)> =
        projectiles.iter().map(|(entity, id, _, _)| (*id, entity)).collect();
    order.sort_by_key(|(id, _)| *id);

    for (projectile_id, projectile_entity) in order {
        let Ok((_, _, mut projectile, mut transform)) = projectiles.get_mut(projectile_entity) else {
            continue;
        };

        let previous = transform.translation;
        if !projectile.advance(&mut transform.translation, delta) {
            commands.entity(projectile_entity).despawn();
            continue;
        }

        let Some(victim) = test_hit_segment(previous, transform.translation, &targets, tuning.hit_radius) else {
            continue;
        };

        let Some(index) = targets.iter().position(|target| target.entity == victim) else {
            continue;
        };
        let target = targets.remove(index);

        commands.entity(victim).despawn();
        commands.entity(projectile_entity).despawn();

        killed_events.write(EnemyKilled {
            enemy: victim,
            enemy_id: target.id,
            projectile: projectile_id,
            damage: projectile.damage,
        });

        crate::logger::log(&format!(
            "🎯 Projectile {:?} hit enemy {:?} at {:?}",
            projectile_id, target.id, transform.translation
        ));
    }
}
