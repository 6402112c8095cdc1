//! Arena Simulation Core
//!
//! Headless ECS-симуляция arena shooter'а на Bevy 0.16.
//! Host (рендер, input, аудио) живёт снаружи: шлёт `InputEvent` /
//! `SessionCommand`, после каждого `update()` читает `FrameSnapshot`.
//!
//! Порядок кадра (Update, `SimulationSet` chain):
//! Clock → Input → Timers → Player → Weapons → Projectiles → Enemies →
//! Waves → Session → Presentation → Cleanup.
//! Player..Session работают только в `SessionState::Playing` и без паузы.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod clock;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod input;
pub mod logger;
pub mod player;
pub mod presentation;
pub mod session;
pub mod wave;

// Re-export основных типов для host'а
pub use clock::SimClock;
pub use combat::{CombatPlugin, EnemyKilled, ReloadCompleted, ReloadStarted, WeaponFired, WeaponLoadout, WeaponSlot};
pub use config::{ArenaTuning, TuningError};
pub use enemy::{Enemy, EnemyId, EnemyPlugin, PlayerCaught};
pub use input::{InputEvent, InputState, MoveAxis};
pub use logger::{init_logger, LogLevel, LogPrinter};
pub use player::PlayerState;
pub use presentation::{AssetReadiness, FrameSnapshot, PresentationPlugin, VisualKind};
pub use session::{
    HighScore, HighScoreSlot, HighScoreStore, MemoryHighScoreStore, RonHighScoreStore, Score, SessionCommand,
    SessionGeneration, SessionPlugin, SessionState,
};
pub use wave::{RoundState, WavePlugin, WaveStarted};

/// Фазы кадра (выполняются строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Clock,
    Input,
    /// Reload timers — в любом state
    Timers,
    Player,
    Weapons,
    Projectiles,
    Enemies,
    Waves,
    Session,
    Presentation,
    /// Сброс edge-triggered input
    Cleanup,
}

impl SimulationSet {
    /// Сеты игрового тика (только Playing, без паузы)
    pub const GAMEPLAY: [SimulationSet; 6] = [
        SimulationSet::Player,
        SimulationSet::Weapons,
        SimulationSet::Projectiles,
        SimulationSet::Enemies,
        SimulationSet::Waves,
        SimulationSet::Session,
    ];
}

/// Пауза игрового тика (host теряет pointer lock / фокус).
/// Время идёт, reload timers завершаются, SessionState не меняется.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationPaused(pub bool);

/// Run condition: тик не на паузе
pub fn simulation_running(paused: Res<SimulationPaused>) -> bool {
    !paused.0
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Ресурсы, вставленные до плагина (ArenaTuning, DeterministicRng),
/// не перезаписываются.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.init_resource::<ArenaTuning>()
            .init_resource::<SimClock>()
            .init_resource::<InputState>()
            .init_resource::<SimulationPaused>()
            .add_event::<InputEvent>();

        let floor_height = app.world().resource::<ArenaTuning>().floor_height;
        app.insert_resource(PlayerState::spawn(floor_height));

        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Input,
                SimulationSet::Timers,
                SimulationSet::Player,
                SimulationSet::Weapons,
                SimulationSet::Projectiles,
                SimulationSet::Enemies,
                SimulationSet::Waves,
                SimulationSet::Session,
                SimulationSet::Presentation,
                SimulationSet::Cleanup,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
        for set in SimulationSet::GAMEPLAY {
            app.configure_sets(
                Update,
                set.run_if(in_state(SessionState::Playing)).run_if(simulation_running),
            );
        }

        app.add_systems(Update, clock::advance_clock.in_set(SimulationSet::Clock))
            .add_systems(Update, input::ingest_input_events.in_set(SimulationSet::Input))
            .add_systems(Update, player::tick_player_kinematics.in_set(SimulationSet::Player))
            .add_systems(Update, input::clear_input_edges.in_set(SimulationSet::Cleanup));

        // Подсистемы
        app.add_plugins((SessionPlugin, CombatPlugin, EnemyPlugin, WavePlugin, PresentationPlugin));
    }
}

/// Детерминистичный RNG resource (seeded): разброс дроби, точки спавна
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// SimulationPlugin не добавляется: вызывающий может сначала
/// вставить свой ArenaTuning / HighScoreSlot.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(DeterministicRng::new(seed));

    app
}
