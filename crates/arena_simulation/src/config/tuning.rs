use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::combat::{WeaponDefinition, ROSTER_SIZE};
use crate::logger;

/// Ошибки загрузки/валидации tuning файла
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize tuning: {0}")]
    Serialize(#[from] ron::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// All tunable simulation parameters, loaded from `arena_tuning.ron`.
///
/// Defaults reproduce the prototype arena: 800×800 spawn square, 50 unit
/// exclusion zone around the start, player eye at 10 units above the floor.
#[derive(Debug, Clone, Resource, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ArenaTuning {
    // === Player kinematics ===
    /// Гравитация (units/s²)
    pub gravity: f32,
    /// Экспоненциальное затухание горизонтальной скорости (1/s)
    pub damping: f32,
    /// Ускорение от input (units/s²)
    pub base_speed: f32,
    pub sprint_multiplier: f32,
    /// Импульс прыжка (units/s)
    pub jump_impulse: f32,
    /// Высота глаз игрока над полом
    pub floor_height: f32,

    // === Enemies ===
    pub enemy_speed: f32,
    /// Множитель шага преследования (position += dir * speed * delta * scale)
    pub enemy_speed_scale: f32,
    /// Дистанция, на которой враг ловит игрока
    pub catch_radius: f32,
    pub enemy_ground_height: f32,

    // === Projectiles ===
    pub hit_radius: f32,
    /// Время жизни снаряда (секунды)
    pub projectile_lifetime: f32,
    /// Конус разброса дробин (градусы)
    pub pellet_spread_degrees: f32,
    /// Скорость возврата recoil (в единицах recoil_magnitude за секунду)
    pub recoil_recovery_rate: f32,

    // === Scoring / waves ===
    pub kill_score: u32,
    pub base_enemy_count: u32,
    /// Половина стороны квадрата спавна (x, z ∈ [-h, h])
    pub arena_half_extent: f32,
    pub spawn_exclusion_radius: f32,
    /// Лимит rejection sampling на одного врага
    pub spawn_max_attempts: u32,

    // === Weapons ===
    pub roster: [WeaponDefinition; ROSTER_SIZE],
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            damping: 10.0,
            base_speed: 400.0,
            sprint_multiplier: 1.5,
            jump_impulse: 350.0,
            floor_height: 10.0,

            enemy_speed: 1.0,
            enemy_speed_scale: 20.0,
            catch_radius: 10.0,
            enemy_ground_height: 5.0,

            hit_radius: 5.0,
            projectile_lifetime: 2.0,
            pellet_spread_degrees: 5.0,
            recoil_recovery_rate: 5.0,

            kill_score: 10,
            base_enemy_count: 3,
            arena_half_extent: 400.0,
            spawn_exclusion_radius: 50.0,
            spawn_max_attempts: 1000,

            roster: WeaponDefinition::default_roster(),
        }
    }
}

impl ArenaTuning {
    /// Default file name inside the data directory.
    pub const FILE_NAME: &'static str = "arena_tuning.ron";

    /// Load from file, or fall back to defaults (file missing, unreadable,
    /// malformed or invalid). Missing file is written out with defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            let tuning = Self::default();
            if let Err(e) = tuning.save(path) {
                logger::log_warning(&format!("Failed to write default tuning: {e}"));
            }
            return tuning;
        }

        match Self::try_load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                logger::log_warning(&format!("{e}, using defaults"));
                Self::default()
            }
        }
    }

    /// Strict load: read + parse + validate.
    pub fn try_load(path: &Path) -> Result<Self, TuningError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&contents)
    }

    pub fn from_ron(contents: &str) -> Result<Self, TuningError> {
        let tuning: Self = ron::from_str(contents)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_ron(&self) -> Result<String, TuningError> {
        let pretty = ron::ser::PrettyConfig::default();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save current tuning to file (creates parent directories).
    pub fn save(&self, path: &Path) -> Result<(), TuningError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| TuningError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = self.to_ron()?;
        std::fs::write(path, contents).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Проверка инвариантов, которые симуляция считает гарантированными.
    ///
    /// Главное: exclusion zone должна помещаться в квадрат спавна, иначе
    /// fallback-проекция на окружность вылезет за арену.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
            ("sprint_multiplier", self.sprint_multiplier),
            ("projectile_lifetime", self.projectile_lifetime),
            ("hit_radius", self.hit_radius),
            ("catch_radius", self.catch_radius),
            ("arena_half_extent", self.arena_half_extent),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be > 0 (got {value})")));
            }
        }

        let non_negative = [
            ("damping", self.damping),
            ("jump_impulse", self.jump_impulse),
            ("enemy_speed", self.enemy_speed),
            ("enemy_speed_scale", self.enemy_speed_scale),
            ("pellet_spread_degrees", self.pellet_spread_degrees),
            ("recoil_recovery_rate", self.recoil_recovery_rate),
        ];
        for (name, value) in non_negative {
            // NaN не проходит ни одно сравнение
            if !(value >= 0.0) || value.is_infinite() {
                return Err(TuningError::Invalid(format!("{name} must be >= 0 (got {value})")));
            }
        }

        for (name, value) in [("floor_height", self.floor_height), ("enemy_ground_height", self.enemy_ground_height)] {
            if !value.is_finite() {
                return Err(TuningError::Invalid(format!("{name} must be finite (got {value})")));
            }
        }

        if !(self.spawn_exclusion_radius >= 0.0 && self.spawn_exclusion_radius <= self.arena_half_extent) {
            return Err(TuningError::Invalid(format!(
                "spawn_exclusion_radius {} must lie in [0, arena_half_extent {}]",
                self.spawn_exclusion_radius, self.arena_half_extent
            )));
        }

        if self.spawn_max_attempts == 0 {
            return Err(TuningError::Invalid("spawn_max_attempts must be >= 1".into()));
        }

        for definition in &self.roster {
            definition.validate().map_err(TuningError::Invalid)?;
        }

        Ok(())
    }
}
