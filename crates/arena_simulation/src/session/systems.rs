//! SessionLifecycle systems: команды, очки, переходы, reset

use bevy::prelude::*;

use super::persistence::HighScoreSlot;
use super::state::{HighScore, Score, SessionCommand, SessionGeneration, SessionState};
use crate::combat::{EnemyKilled, NextProjectileId, Projectile, WeaponLoadout};
use crate::config::ArenaTuning;
use crate::enemy::{Enemy, NextEnemyId, PlayerCaught};
use crate::player::PlayerState;
use crate::wave::{spawn_enemy_wave, RoundState};
use crate::DeterministicRng;

/// System: SessionCommand → NextState
///
/// Start принимается только в Menu, Acknowledge — только в GameOver.
pub fn handle_session_commands(
    mut commands: EventReader<SessionCommand>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    for command in commands.read() {
        match (command, state.get()) {
            (SessionCommand::Start, SessionState::Menu) => {
                next_state.set(SessionState::Playing);
            }
            (SessionCommand::Acknowledge, SessionState::GameOver) => {
                next_state.set(SessionState::Menu);
            }
            (command, current) => {
                crate::logger::log(&format!("Ignored {:?} in {:?}", command, current));
            }
        }
    }
}

/// System: +kill_score за каждого убитого врага
pub fn award_kill_score(
    mut kills: EventReader<EnemyKilled>,
    tuning: Res<ArenaTuning>,
    mut score: ResMut<Score>,
) {
    for _ in kills.read() {
        score.0 = score.0.saturating_add(tuning.kill_score);
    }
}

/// System: PlayerCaught → GameOver
pub fn evaluate_caught(
    mut caught: EventReader<PlayerCaught>,
    score: Res<Score>,
    mut next_state: ResMut<NextState<SessionState>>,
) {
    if let Some(event) = caught.read().last() {
        crate::logger::log_info(&format!(
            "Session over: caught by {:?}, score {}",
            event.enemy_id, score.0
        ));
        next_state.set(SessionState::GameOver);
    }
}

/// OnEnter(Playing): новая сессия с чистого листа
#[allow(clippy::too_many_arguments)]
pub fn reset_session(
    mut commands: Commands,
    tuning: Res<ArenaTuning>,
    mut generation: ResMut<SessionGeneration>,
    mut player: ResMut<PlayerState>,
    mut loadout: ResMut<WeaponLoadout>,
    mut round: ResMut<RoundState>,
    mut score: ResMut<Score>,
    mut enemy_ids: ResMut<NextEnemyId>,
    mut projectile_ids: ResMut<NextProjectileId>,
    mut rng: ResMut<DeterministicRng>,
    enemies: Query<Entity, With<Enemy>>,
    projectiles: Query<Entity, With<Projectile>>,
) {
    generation.advance();

    for entity in enemies.iter().chain(projectiles.iter()) {
        commands.entity(entity).despawn();
    }

    *player = PlayerState::spawn(tuning.floor_height);
    *loadout = WeaponLoadout::new(tuning.roster.clone());
    round.reset();
    score.0 = 0;
    enemy_ids.reset();
    projectile_ids.reset();

    spawn_enemy_wave(&mut commands, tuning.base_enemy_count, &mut rng, &mut enemy_ids, &tuning);

    crate::logger::log_info(&format!(
        "▶ Session {} started: round 1, {} enemies",
        generation.0, tuning.base_enemy_count
    ));
}

/// OnEnter(GameOver): отменить отложенные эффекты, обновить рекорд
pub fn record_high_score(
    mut generation: ResMut<SessionGeneration>,
    score: Res<Score>,
    mut high_score: ResMut<HighScore>,
    store: Res<HighScoreSlot>,
) {
    generation.advance();

    let previous = high_score.0.max(store.0.get_high_score());
    high_score.0 = previous.max(score.0);

    if score.0 > previous {
        crate::logger::log_info(&format!("🏆 New high score: {} (was {})", score.0, previous));
        if let Err(e) = store.0.set_high_score(score.0) {
            crate::logger::log_error(&format!("Failed to persist high score: {e}"));
        }
    }
}

/// OnEnter(Menu): показать актуальный рекорд
pub fn refresh_high_score(store: Res<HighScoreSlot>, mut high_score: ResMut<HighScore>) {
    high_score.0 = high_score.0.max(store.0.get_high_score());
}
