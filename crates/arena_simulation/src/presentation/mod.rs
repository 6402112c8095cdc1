//! Presentation adapter — FrameSnapshot + AssetReadiness
//!
//! Симуляция ничего не рендерит: host читает FrameSnapshot после update().

use bevy::prelude::*;

pub mod snapshot;

#[cfg(test)]
mod snapshot_tests;

pub use snapshot::{publish_snapshot, AssetReadiness, FrameSnapshot, VisualKind};

use crate::SimulationSet;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetReadiness>()
            .init_resource::<FrameSnapshot>()
            .add_systems(Update, publish_snapshot.in_set(SimulationSet::Presentation));
    }
}
