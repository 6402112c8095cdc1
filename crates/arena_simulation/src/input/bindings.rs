//! Key bindings: DOM-style key codes → InputEvent
//!
//! WASD + стрелки, Space — прыжок, Shift — спринт, R — перезарядка,
//! цифры 1..3 — выбор оружия. Выстрел идёт от мыши (host шлёт `InputEvent::Fire`).

use super::events::{InputEvent, MoveAxis};

/// Конвертирует key down/up в событие ввода.
///
/// Edge-triggered клавиши реагируют только на нажатие; отпускание
/// для них возвращает `None`. Неизвестные коды — `None`.
pub fn key_event(code: &str, pressed: bool) -> Option<InputEvent> {
    let axis = match code {
        "KeyW" | "ArrowUp" => Some(MoveAxis::Forward),
        "KeyS" | "ArrowDown" => Some(MoveAxis::Backward),
        "KeyA" | "ArrowLeft" => Some(MoveAxis::Left),
        "KeyD" | "ArrowRight" => Some(MoveAxis::Right),
        _ => None,
    };
    if let Some(axis) = axis {
        return Some(InputEvent::Move { axis, pressed });
    }

    if matches!(code, "ShiftLeft" | "ShiftRight") {
        return Some(InputEvent::Sprint(pressed));
    }

    if !pressed {
        return None;
    }

    match code {
        "Space" => Some(InputEvent::Jump),
        "KeyR" => Some(InputEvent::Reload),
        "Digit1" => Some(InputEvent::SelectWeapon(0)),
        "Digit2" => Some(InputEvent::SelectWeapon(1)),
        "Digit3" => Some(InputEvent::SelectWeapon(2)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_map_to_same_axis() {
        assert_eq!(key_event("KeyW", true), key_event("ArrowUp", true));
        assert_eq!(
            key_event("KeyA", false),
            Some(InputEvent::Move { axis: MoveAxis::Left, pressed: false })
        );
    }

    #[test]
    fn test_edge_keys_ignore_release() {
        assert_eq!(key_event("Space", true), Some(InputEvent::Jump));
        assert_eq!(key_event("Space", false), None);
        assert_eq!(key_event("KeyR", false), None);
        assert_eq!(key_event("Digit2", true), Some(InputEvent::SelectWeapon(1)));
    }

    #[test]
    fn test_sprint_is_level_triggered() {
        assert_eq!(key_event("ShiftLeft", true), Some(InputEvent::Sprint(true)));
        assert_eq!(key_event("ShiftRight", false), Some(InputEvent::Sprint(false)));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key_event("KeyQ", true), None);
    }
}
