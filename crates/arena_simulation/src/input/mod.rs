//! Input domain — InputAdapter → InputState
//!
//! Содержит:
//! - InputEvent / MoveAxis (события от host'а)
//! - InputState (resource, читается PlayerKinematics и WeaponSystem)
//! - bindings (DOM key codes → InputEvent)

use bevy::prelude::*;

pub mod bindings;
pub mod events;
pub mod state;


pub use bindings::key_event;
pub use events::*;
pub use state::*;

/// System: применить все InputEvent кадра к InputState
pub fn ingest_input_events(mut events: EventReader<InputEvent>, mut input: ResMut<InputState>) {
    for event in events.read() {
        input.apply(event);
    }
}

/// System: сброс edge-triggered флагов в конце кадра
pub fn clear_input_edges(mut input: ResMut<InputState>) {
    input.clear_edges();
}
