//! PlayerState + kinematic integration
//!
//! Kinematic контроллер без физического движка:
//! - Gravity + floor clamp (вместо ground raycast)
//! - Exponential damping горизонтальной скорости
//! - Acceleration от input в yaw-frame прицела

use bevy::prelude::*;

use crate::config::ArenaTuning;
use crate::input::InputState;

/// Состояние игрока (единственный владелец — PlayerKinematics)
///
/// Инвариант: `position.y >= floor_height`; `grounded` == позиция
/// была прижата к полу в этом тике.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    pub sprinting: bool,
}

impl PlayerState {
    /// Стартовая позиция: центр арены, на полу
    pub fn spawn(floor_height: f32) -> Self {
        Self {
            position: Vec3::new(0.0, floor_height, 0.0),
            velocity: Vec3::ZERO,
            grounded: true,
            sprinting: false,
        }
    }

    /// Один тик кинематики (чистая трансформация состояния)
    pub fn tick(&mut self, input: &InputState, delta: f32, tuning: &ArenaTuning) {
        self.sprinting = input.sprint;

        // Прыжок только с земли; grounded сбрасывается сразу
        if input.jump_pressed && self.grounded {
            self.velocity.y += tuning.jump_impulse;
            self.grounded = false;
        }

        self.velocity.y -= tuning.gravity * delta;

        self.velocity.x -= self.velocity.x * tuning.damping * delta;
        self.velocity.z -= self.velocity.z * tuning.damping * delta;

        let speed = if self.sprinting {
            tuning.base_speed * tuning.sprint_multiplier
        } else {
            tuning.base_speed
        };
        let direction = wish_direction(input.move_axes(), input.aim_forward);
        self.velocity += direction * speed * delta;

        self.position += self.velocity * delta;

        if self.position.y <= tuning.floor_height {
            self.position.y = tuning.floor_height;
            self.velocity.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }
}

/// Горизонтальное направление движения (normalized или ZERO)
///
/// `axes.y` — вперёд по прицелу (проекция на XZ), `axes.x` — вправо.
/// Прицел строго вверх/вниз даёт дефолтный forward −Z.
pub fn wish_direction(axes: Vec2, aim_forward: Vec3) -> Vec3 {
    let forward = Vec3::new(aim_forward.x, 0.0, aim_forward.z)
        .try_normalize()
        .unwrap_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y);

    (forward * axes.y + right * axes.x).normalize_or_zero()
}
