//! Weapon roster + per-weapon ammo/reload/fire-rate state
//!
//! Architecture:
//! - `WeaponDefinition` — неизменяемые stats (roster фиксирован при старте)
//! - `WeaponInstance` — mutable состояние (ammo, reload, last shot, recoil)
//! - `WeaponLoadout` — параллельные массивы definitions/instances + active slot
//!
//! Fire gating (порядок важен): reloading → empty → cooldown.
//! Reload completion НЕ тикается здесь — см. `ReloadScheduler`.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Размер roster'а (фиксирован)
pub const ROSTER_SIZE: usize = 3;

/// Остаток recoil (в долях шага recovery), который считается нулём
const RECOIL_SNAP_FRACTION: f32 = 1e-3;

/// Неизменяемые stats оружия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub name: String,
    pub max_ammo: u32,
    /// Длительность перезарядки (секунды)
    pub reload_duration: f32,
    /// Минимальный интервал между выстрелами (секунды)
    pub fire_interval: f32,
    /// Скорость снаряда (units/s)
    pub projectile_speed: f32,
    pub damage: u32,
    /// Снарядов за выстрел (>1 → разброс)
    pub pellet_count: u32,
    pub recoil_magnitude: f32,
}

impl WeaponDefinition {
    pub fn pistol() -> Self {
        Self {
            name: "Pistol".into(),
            max_ammo: 12,
            reload_duration: 1.2,
            fire_interval: 0.25,
            projectile_speed: 600.0,
            damage: 10,
            pellet_count: 1,
            recoil_magnitude: 0.3,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun".into(),
            max_ammo: 6,
            reload_duration: 1.5,
            fire_interval: 0.8,
            projectile_speed: 500.0,
            damage: 8,
            pellet_count: 6,
            recoil_magnitude: 0.8,
        }
    }

    pub fn rifle() -> Self {
        Self {
            name: "Rifle".into(),
            max_ammo: 30,
            reload_duration: 2.0,
            fire_interval: 0.1,
            projectile_speed: 800.0,
            damage: 6,
            pellet_count: 1,
            recoil_magnitude: 0.2,
        }
    }

    /// Roster в порядке `WeaponSlot::ALL`
    pub fn default_roster() -> [WeaponDefinition; ROSTER_SIZE] {
        [Self::pistol(), Self::shotgun(), Self::rifle()]
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_ammo == 0 {
            return Err(format!("{}: max_ammo must be >= 1", self.name));
        }
        if self.pellet_count == 0 {
            return Err(format!("{}: pellet_count must be >= 1", self.name));
        }
        if !(self.reload_duration >= 0.0 && self.fire_interval >= 0.0 && self.recoil_magnitude >= 0.0) {
            return Err(format!(
                "{}: reload_duration, fire_interval and recoil_magnitude must be >= 0",
                self.name
            ));
        }
        if !(self.projectile_speed > 0.0) {
            return Err(format!("{}: projectile_speed must be > 0", self.name));
        }
        Ok(())
    }
}

/// Слот roster'а (индекс в параллельных массивах)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeaponSlot {
    #[default]
    Pistol,
    Shotgun,
    Rifle,
}

impl WeaponSlot {
    pub const ALL: [WeaponSlot; ROSTER_SIZE] = [WeaponSlot::Pistol, WeaponSlot::Shotgun, WeaponSlot::Rifle];

    pub fn index(self) -> usize {
        match self {
            WeaponSlot::Pistol => 0,
            WeaponSlot::Shotgun => 1,
            WeaponSlot::Rifle => 2,
        }
    }

    /// Index из input (hotkeys 1..3 → 0..2); вне диапазона → None
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Mutable состояние одного оружия
///
/// Инвариант: 0 ≤ ammo ≤ max_ammo (u32 + saturating логика)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponInstance {
    pub ammo: u32,
    pub reloading: bool,
    /// Время последнего выстрела (None = ещё не стреляли)
    pub last_shot: Option<f64>,
    /// Текущий recoil offset (≤ 0, возвращается к 0)
    pub recoil_offset: f32,
}

impl WeaponInstance {
    pub fn full(definition: &WeaponDefinition) -> Self {
        Self {
            ammo: definition.max_ammo,
            reloading: false,
            last_shot: None,
            recoil_offset: 0.0,
        }
    }
}

/// Откуда и куда стреляем (камера вне симуляции — только forward + позиция)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    pub origin: Vec3,
    pub forward: Vec3,
}

/// Описание снаряда для ProjectileManager
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
    pub speed: f32,
    pub damage: u32,
}

/// Почему выстрел не произошёл (не ошибка — обычный no-op)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    Reloading,
    Empty,
    Cooldown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FireOutcome {
    Rejected(FireRejection),
    Fired(Vec<ProjectileSpec>),
}

impl FireOutcome {
    pub fn is_fired(&self) -> bool {
        matches!(self, FireOutcome::Fired(_))
    }
}

/// Перезарядка, которую нужно завершить в `due_at` (wall-clock секунды)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReloadTicket {
    pub slot: WeaponSlot,
    pub due_at: f64,
}

/// Roster + состояние всех оружий + активный слот
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WeaponLoadout {
    definitions: [WeaponDefinition; ROSTER_SIZE],
    instances: [WeaponInstance; ROSTER_SIZE],
    active: WeaponSlot,
}

impl Default for WeaponLoadout {
    fn default() -> Self {
        Self::new(WeaponDefinition::default_roster())
    }
}

impl WeaponLoadout {
    pub fn new(definitions: [WeaponDefinition; ROSTER_SIZE]) -> Self {
        let instances = [
            WeaponInstance::full(&definitions[0]),
            WeaponInstance::full(&definitions[1]),
            WeaponInstance::full(&definitions[2]),
        ];
        Self {
            definitions,
            instances,
            active: WeaponSlot::default(),
        }
    }

    pub fn active_slot(&self) -> WeaponSlot {
        self.active
    }

    pub fn definition(&self, slot: WeaponSlot) -> &WeaponDefinition {
        &self.definitions[slot.index()]
    }

    pub fn instance(&self, slot: WeaponSlot) -> &WeaponInstance {
        &self.instances[slot.index()]
    }

    pub fn active_definition(&self) -> &WeaponDefinition {
        self.definition(self.active)
    }

    pub fn active_instance(&self) -> &WeaponInstance {
        self.instance(self.active)
    }

    #[cfg(test)]
    pub(crate) fn instance_mut(&mut self, slot: WeaponSlot) -> &mut WeaponInstance {
        &mut self.instances[slot.index()]
    }

    /// Все оружия полные, без reload/recoil, активен первый слот
    pub fn reset(&mut self) {
        for (instance, definition) in self.instances.iter_mut().zip(self.definitions.iter()) {
            *instance = WeaponInstance::full(definition);
        }
        self.active = WeaponSlot::default();
    }

    /// Смена активного слота. Состояние инстансов не трогаем:
    /// оружие в середине reload остаётся в reload.
    pub fn switch_weapon(&mut self, slot: WeaponSlot) -> bool {
        if self.active == slot {
            return false;
        }
        self.active = slot;
        true
    }

    /// Попытка выстрела активным оружием
    ///
    /// `spread_degrees` — полуугол конуса разброса (только при pellet_count > 1).
    pub fn try_fire<R: Rng>(
        &mut self,
        now: f64,
        aim: Aim,
        spread_degrees: f32,
        rng: &mut R,
    ) -> FireOutcome {
        let slot = self.active.index();
        let definition = &self.definitions[slot];
        let instance = &mut self.instances[slot];

        if instance.reloading {
            return FireOutcome::Rejected(FireRejection::Reloading);
        }
        if instance.ammo == 0 {
            return FireOutcome::Rejected(FireRejection::Empty);
        }
        if let Some(last_shot) = instance.last_shot {
            if now - last_shot < definition.fire_interval as f64 {
                return FireOutcome::Rejected(FireRejection::Cooldown);
            }
        }

        instance.ammo -= 1;
        instance.last_shot = Some(now);
        instance.recoil_offset = -definition.recoil_magnitude;

        let forward = aim.forward.try_normalize().unwrap_or(Vec3::NEG_Z);
        let spread = spread_degrees.to_radians();
        let pellets = (0..definition.pellet_count)
            .map(|_| {
                let direction = if definition.pellet_count > 1 {
                    spread_direction(forward, spread, rng)
                } else {
                    forward
                };
                ProjectileSpec {
                    origin: aim.origin,
                    direction,
                    speed: definition.projectile_speed,
                    damage: definition.damage,
                }
            })
            .collect();

        FireOutcome::Fired(pellets)
    }

    /// Запрос перезарядки активного оружия.
    ///
    /// No-op (None) если уже перезаряжается или магазин полный.
    pub fn request_reload(&mut self, now: f64) -> Option<ReloadTicket> {
        let slot = self.active;
        let definition = &self.definitions[slot.index()];
        let instance = &mut self.instances[slot.index()];

        if instance.reloading || instance.ammo == definition.max_ammo {
            return None;
        }

        instance.reloading = true;
        Some(ReloadTicket {
            slot,
            due_at: now + definition.reload_duration as f64,
        })
    }

    /// Завершение перезарядки (вызывается ReloadScheduler'ом).
    /// Возвращает false, если слот не был в reload.
    pub fn complete_reload(&mut self, slot: WeaponSlot) -> bool {
        let definition = &self.definitions[slot.index()];
        let instance = &mut self.instances[slot.index()];

        if !instance.reloading {
            return false;
        }
        instance.ammo = definition.max_ammo;
        instance.reloading = false;
        true
    }

    /// Recoil recovery: offset линейно возвращается к 0
    /// со скоростью `recoil_magnitude * recovery_rate` в секунду.
    pub fn tick(&mut self, delta: f32, recovery_rate: f32) {
        for (instance, definition) in self.instances.iter_mut().zip(self.definitions.iter()) {
            if instance.recoil_offset < 0.0 {
                let recovery = definition.recoil_magnitude * delta * recovery_rate;
                let next = instance.recoil_offset + recovery;
                // f32 накапливает ошибку за шаги: остаток меньше доли шага = 0
                instance.recoil_offset = if next >= -recovery * RECOIL_SNAP_FRACTION {
                    0.0
                } else {
                    next
                };
            }
        }
    }
}

/// Случайное направление внутри конуса (равномерно по телесному углу)
///
/// cos θ равномерен на [cos(max), 1], азимут равномерен на [0, 2π).
pub fn spread_direction<R: Rng>(forward: Vec3, max_angle: f32, rng: &mut R) -> Vec3 {
    if max_angle <= 0.0 {
        return forward;
    }

    let cos_max = max_angle.cos();
    let cos_theta = 1.0 - rng.gen::<f32>() * (1.0 - cos_max);
    let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
    let phi = rng.gen::<f32>() * TAU;

    let (u, v) = forward.any_orthonormal_pair();
    (forward * cos_theta + (u * phi.cos() + v * phi.sin()) * sin_theta).normalize()
}
