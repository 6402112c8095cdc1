//! InputState — текущее состояние управления

use bevy::prelude::*;

use super::events::{InputEvent, MoveAxis};

/// Текущее состояние управления (собирается из InputEvent)
///
/// Инвариант: edge-флаги (`jump_pressed`, `fire_pressed`, `reload_pressed`,
/// `select_weapon`) сбрасываются в конце каждого кадра через `clear_edges`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub sprint: bool,

    /// Forward вектор прицела (world space, normalized)
    pub aim_forward: Vec3,

    pub jump_pressed: bool,
    pub fire_pressed: bool,
    pub reload_pressed: bool,
    pub select_weapon: Option<usize>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            move_forward: false,
            move_backward: false,
            move_left: false,
            move_right: false,
            sprint: false,
            aim_forward: Vec3::NEG_Z,
            jump_pressed: false,
            fire_pressed: false,
            reload_pressed: false,
            select_weapon: None,
        }
    }
}

impl InputState {
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Move { axis, pressed } => match axis {
                MoveAxis::Forward => self.move_forward = pressed,
                MoveAxis::Backward => self.move_backward = pressed,
                MoveAxis::Left => self.move_left = pressed,
                MoveAxis::Right => self.move_right = pressed,
            },
            InputEvent::Sprint(pressed) => self.sprint = pressed,
            InputEvent::Jump => self.jump_pressed = true,
            InputEvent::Fire => self.fire_pressed = true,
            InputEvent::Reload => self.reload_pressed = true,
            // Последний выбор за кадр побеждает
            InputEvent::SelectWeapon(index) => self.select_weapon = Some(index),
            InputEvent::Look { forward } => {
                // Нулевой/NaN forward игнорируем — прицел остаётся прежним
                if let Some(forward) = forward.try_normalize() {
                    self.aim_forward = forward;
                }
            }
        }
    }

    /// Оси движения: x = right − left, y = forward − backward.
    ///
    /// Противоположные клавиши гасят друг друга (0), это не ошибка.
    pub fn move_axes(&self) -> Vec2 {
        Vec2::new(
            self.move_right as i32 as f32 - self.move_left as i32 as f32,
            self.move_forward as i32 as f32 - self.move_backward as i32 as f32,
        )
    }

    pub fn clear_edges(&mut self) {
        self.jump_pressed = false;
        self.fire_pressed = false;
        self.reload_pressed = false;
        self.select_weapon = None;
    }
}
