//! WaveController — раунды + размещение спавна
//!
//! Новый раунд начинается, когда живых врагов не осталось.
//! Размер волны: `base + round * 2`.

use bevy::prelude::*;
use rand::Rng;

use crate::config::ArenaTuning;
use crate::enemy::{enemy_bundle, Enemy, NextEnemyId};
use crate::DeterministicRng;

/// Текущий раунд (≥ 1)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub index: u32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self { index: 1 }
    }
}

/// Запрос на спавн волны
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRequest {
    pub round: u32,
    pub count: u32,
}

impl RoundState {
    pub fn reset(&mut self) {
        self.index = 1;
    }

    /// Если арена пуста — следующий раунд и запрос на спавн
    pub fn check_and_advance(&mut self, live_count: usize, base_enemy_count: u32) -> Option<SpawnRequest> {
        if live_count > 0 {
            return None;
        }
        self.index += 1;
        Some(SpawnRequest {
            round: self.index,
            count: enemy_count_for_round(base_enemy_count, self.index),
        })
    }
}

pub fn enemy_count_for_round(base_enemy_count: u32, round: u32) -> u32 {
    base_enemy_count + round * 2
}

/// Event: началась новая волна
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveStarted {
    pub round: u32,
    pub count: u32,
}

/// Случайная точка спавна вне зоны исключения вокруг центра.
///
/// Rejection sampling ограничен `spawn_max_attempts`; если лимит исчерпан,
/// последний кандидат проецируется на окружность исключения.
pub fn sample_spawn_position<R: Rng>(rng: &mut R, tuning: &ArenaTuning) -> Vec3 {
    let extent = tuning.arena_half_extent;
    let exclusion = tuning.spawn_exclusion_radius;

    let mut candidate = Vec2::ZERO;
    for _ in 0..tuning.spawn_max_attempts.max(1) {
        candidate = Vec2::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent));
        if candidate.length() >= exclusion {
            return Vec3::new(candidate.x, tuning.enemy_ground_height, candidate.y);
        }
    }

    crate::logger::log_warning(&format!(
        "Spawn sampling exhausted {} attempts, projecting {:?} onto exclusion circle",
        tuning.spawn_max_attempts, candidate
    ));
    let direction = candidate.try_normalize().unwrap_or(Vec2::X);
    let projected = direction * exclusion;
    Vec3::new(projected.x, tuning.enemy_ground_height, projected.y)
}

/// Спавн `count` врагов в случайных точках
pub fn spawn_enemy_wave(
    commands: &mut Commands,
    count: u32,
    rng: &mut DeterministicRng,
    ids: &mut NextEnemyId,
    tuning: &ArenaTuning,
) {
    for _ in 0..count {
        let position = sample_spawn_position(&mut rng.rng, tuning);
        commands.spawn(enemy_bundle(ids.allocate(), position, tuning.enemy_speed));
    }
}

/// System: WaveController.check_and_advance
///
/// Работает после ProjectileManager и EnemyDirector: despawn'ы убитых врагов
/// уже применены (sync point между chained sets).
pub fn advance_wave(
    mut commands: Commands,
    tuning: Res<ArenaTuning>,
    mut round: ResMut<RoundState>,
    mut ids: ResMut<NextEnemyId>,
    mut rng: ResMut<DeterministicRng>,
    enemies: Query<(), With<Enemy>>,
    mut wave_events: EventWriter<WaveStarted>,
) {
    let Some(request) = round.check_and_advance(enemies.iter().count(), tuning.base_enemy_count) else {
        return;
    };

    spawn_enemy_wave(&mut commands, request.count, &mut rng, &mut ids, &tuning);
    wave_events.write(WaveStarted {
        round: request.round,
        count: request.count,
    });
    crate::logger::log_info(&format!("🌊 Round {} started: {} enemies", request.round, request.count));
}
