//! Input events (InputAdapter → core)

use bevy::prelude::*;

/// Ось движения (level-triggered, держится пока клавиша нажата)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAxis {
    Forward,
    Backward,
    Left,
    Right,
}

/// Event: дискретное событие ввода от host'а
///
/// - `Move`/`Sprint` — level-triggered (pressed/released)
/// - `Jump`/`Fire`/`Reload`/`SelectWeapon` — edge-triggered, живут один кадр
/// - `Look` — forward вектор камеры (камера вне симуляции)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Move { axis: MoveAxis, pressed: bool },
    Sprint(bool),
    Jump,
    Fire,
    Reload,
    SelectWeapon(usize),
    Look { forward: Vec3 },
}
