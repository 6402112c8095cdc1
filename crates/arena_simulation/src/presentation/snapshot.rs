//! FrameSnapshot — read-only вид мира для host'а (рендер + HUD)

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::combat::{Projectile, ProjectileId, WeaponLoadout};
use crate::enemy::{Enemy, EnemyId};
use crate::player::PlayerState;
use crate::session::{HighScore, Score, SessionState};
use crate::wave::RoundState;

/// Какой визуал показывать (модель загружена или примитив-заглушка)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum VisualKind {
    Model,
    #[default]
    Fallback,
}

/// Готовность внешних ассетов (name → ready). Симуляция её не читает.
#[derive(Resource, Debug, Clone, Default)]
pub struct AssetReadiness {
    ready: HashMap<String, bool>,
}

impl AssetReadiness {
    pub const ENEMY_MODEL: &'static str = "enemy";
    pub const WEAPON_MODEL: &'static str = "weapon";

    pub fn mark(&mut self, name: impl Into<String>, ready: bool) {
        self.ready.insert(name.into(), ready);
    }

    pub fn is_ready(&self, name: &str) -> bool {
        self.ready.get(name).copied().unwrap_or(false)
    }

    pub fn visual(&self, name: &str) -> VisualKind {
        if self.is_ready(name) {
            VisualKind::Model
        } else {
            VisualKind::Fallback
        }
    }
}

/// Снимок кадра. Позиции — `[x, y, z]`, порядок списков — по id.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub state: SessionState,
    pub score: u32,
    pub high_score: u32,
    pub round: u32,
    pub active_weapon_name: String,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    pub recoil: f32,
    pub live_enemy_count: usize,
    pub player_position: [f32; 3],
    pub projectile_positions: Vec<[f32; 3]>,
    pub enemy_positions: Vec<[f32; 3]>,
    pub enemy_visual: VisualKind,
    pub weapon_visual: VisualKind,
}

impl FrameSnapshot {
    /// HUD текст (формат прототипа + строка оружия)
    pub fn hud_text(&self) -> String {
        let reload = if self.reloading { " [reloading]" } else { "" };
        format!(
            "Score: {}\nRound: {}\nEnemies: {}\n{}: {}/{}{}",
            self.score,
            self.round,
            self.live_enemy_count,
            self.active_weapon_name,
            self.ammo,
            self.max_ammo,
            reload
        )
    }
}

/// System: пересобрать FrameSnapshot (каждый кадр, в любом state)
#[allow(clippy::too_many_arguments)]
pub fn publish_snapshot(
    state: Res<State<SessionState>>,
    score: Res<Score>,
    high_score: Res<HighScore>,
    round: Res<RoundState>,
    player: Res<PlayerState>,
    loadout: Res<WeaponLoadout>,
    assets: Res<AssetReadiness>,
    enemies: Query<(&EnemyId, &Transform), With<Enemy>>,
    projectiles: Query<(&ProjectileId, &Transform), With<Projectile>>,
    mut snapshot: ResMut<FrameSnapshot>,
) {
    let mut enemy_list: Vec<_> = enemies.iter().collect();
    enemy_list.sort_by_key(|(id, _)| **id);

    let mut projectile_list: Vec<_> = projectiles.iter().collect();
    projectile_list.sort_by_key(|(id, _)| **id);

    let definition = loadout.active_definition();
    let instance = loadout.active_instance();

    *snapshot = FrameSnapshot {
        state: *state.get(),
        score: score.0,
        high_score: high_score.0,
        round: round.index,
        active_weapon_name: definition.name.clone(),
        ammo: instance.ammo,
        max_ammo: definition.max_ammo,
        reloading: instance.reloading,
        recoil: instance.recoil_offset,
        live_enemy_count: enemy_list.len(),
        player_position: player.position.to_array(),
        projectile_positions: projectile_list.iter().map(|(_, t)| t.translation.to_array()).collect(),
        enemy_positions: enemy_list.iter().map(|(_, t)| t.translation.to_array()).collect(),
        enemy_visual: assets.visual(AssetReadiness::ENEMY_MODEL),
        weapon_visual: assets.visual(AssetReadiness::WEAPON_MODEL),
    };
}
