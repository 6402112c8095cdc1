//! Session integration test
//!
//! Полный App (SimulationPlugin) на ручном времени 60 FPS.
//!
//! Проверяем:
//! - Menu → Playing → GameOver → Menu (и только эти переходы)
//! - Terminal transition: после caught игровой тик не идёт
//! - +10 за убийство, граница раунда (5 → 7 → ...)
//! - High score = max(previous, final), запись в store

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use arena_simulation::enemy::{enemy_bundle, EnemyId};
use arena_simulation::*;

const FRAME: f64 = 1.0 / 60.0;

/// Helper: App с симуляцией, прогнанный до Menu
fn create_arena_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(FRAME)));
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

fn state(app: &App) -> SessionState {
    *app.world().resource::<State<SessionState>>().get()
}

fn live_enemies(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<(), With<Enemy>>().iter(world).count()
}

/// Start + два кадра: команда, затем переход (OnEnter(Playing))
fn start_session(app: &mut App) {
    app.world_mut().send_event(SessionCommand::Start);
    app.update();
    app.update();
    assert_eq!(state(app), SessionState::Playing);
}

/// Враг прямо на игроке: в следующем тике caught
fn spawn_catcher(app: &mut App) {
    let position = app.world().resource::<PlayerState>().position;
    app.world_mut().spawn(enemy_bundle(EnemyId(10_000), position, 1.0));
}

fn run_until_game_over(app: &mut App) {
    for _ in 0..3 {
        app.update();
        if state(app) == SessionState::GameOver {
            return;
        }
    }
    panic!("session did not reach GameOver");
}

/// Store, общий для теста и App
struct SharedStore(Arc<MemoryHighScoreStore>);

impl HighScoreStore for SharedStore {
    fn get_high_score(&self) -> u32 {
        self.0.get_high_score()
    }

    fn set_high_score(&self, value: u32) -> Result<(), session::StoreError> {
        self.0.set_high_score(value)
    }
}

#[test]
fn test_start_resets_world() {
    let mut app = create_arena_app(42);
    assert_eq!(state(&app), SessionState::Menu);
    assert_eq!(live_enemies(&mut app), 0);

    start_session(&mut app);

    assert_eq!(live_enemies(&mut app), 3);
    assert_eq!(app.world().resource::<RoundState>().index, 1);
    assert_eq!(app.world().resource::<Score>().0, 0);

    let loadout = app.world().resource::<WeaponLoadout>();
    assert_eq!(loadout.active_slot(), WeaponSlot::Pistol);
    assert_eq!(loadout.active_instance().ammo, 12);

    let snapshot = app.world().resource::<FrameSnapshot>();
    assert_eq!(snapshot.live_enemy_count, 3);
    assert_eq!(snapshot.enemy_positions.len(), 3);
}

#[test]
fn test_commands_ignored_outside_their_state() {
    let mut app = create_arena_app(1);

    app.world_mut().send_event(SessionCommand::Acknowledge);
    app.update();
    app.update();
    assert_eq!(state(&app), SessionState::Menu);

    start_session(&mut app);

    // Start во время Playing — no-op, мир не пересоздаётся
    let generation = *app.world().resource::<SessionGeneration>();
    app.world_mut().send_event(SessionCommand::Start);
    app.update();
    app.update();
    assert_eq!(state(&app), SessionState::Playing);
    assert_eq!(*app.world().resource::<SessionGeneration>(), generation);

    // Acknowledge во время Playing — тоже no-op
    app.world_mut().send_event(SessionCommand::Acknowledge);
    app.update();
    app.update();
    assert_eq!(state(&app), SessionState::Playing);
}

#[test]
fn test_terminal_transition_freezes_simulation() {
    let mut app = create_arena_app(7);
    start_session(&mut app);

    spawn_catcher(&mut app);
    run_until_game_over(&mut app);

    let frozen = app.world().resource::<FrameSnapshot>().enemy_positions.clone();
    let player = app.world().resource::<PlayerState>().position;

    // Fire в GameOver не стреляет, враги не двигаются
    for _ in 0..30 {
        app.world_mut().send_event(InputEvent::Fire);
        app.world_mut().send_event(InputEvent::Move { axis: MoveAxis::Forward, pressed: true });
        app.update();
    }

    assert_eq!(state(&app), SessionState::GameOver);
    let snapshot = app.world().resource::<FrameSnapshot>();
    assert_eq!(snapshot.enemy_positions, frozen);
    assert!(snapshot.projectile_positions.is_empty());
    assert_eq!(app.world().resource::<PlayerState>().position, player);
    assert_eq!(app.world().resource::<WeaponLoadout>().active_instance().ammo, 12);

    // GameOver → Menu → Playing: новый мир
    app.world_mut().send_event(SessionCommand::Acknowledge);
    app.update();
    app.update();
    assert_eq!(state(&app), SessionState::Menu);

    start_session(&mut app);
    assert_eq!(live_enemies(&mut app), 3);
}

#[test]
fn test_kill_scores_and_advances_round() {
    let mut app = create_arena_app(3);
    start_session(&mut app);

    // Одна цель прямо по прицелу (forward = −Z), остальные убраны тем же кадром
    {
        let world = app.world_mut();
        let enemies: Vec<Entity> = world.query_filtered::<Entity, With<Enemy>>().iter(world).collect();
        for entity in enemies {
            world.despawn(entity);
        }
        world.spawn(enemy_bundle(EnemyId(500), Vec3::new(0.0, 10.0, -30.0), 1.0));
    }

    app.world_mut().send_event(InputEvent::Fire);
    for _ in 0..10 {
        app.update();
        if app.world().resource::<Score>().0 > 0 {
            break;
        }
    }

    assert_eq!(app.world().resource::<Score>().0, 10);
    assert_eq!(app.world().resource::<WeaponLoadout>().active_instance().ammo, 11);

    // Арена опустела в том же тике → раунд 2, 3 + 2*2 = 7 врагов
    assert_eq!(app.world().resource::<RoundState>().index, 2);
    assert_eq!(live_enemies(&mut app), 7);
    assert_eq!(state(&app), SessionState::Playing);
}

#[test]
fn test_round_boundary_scenario() {
    let mut app = create_arena_app(21);
    start_session(&mut app);

    // 3 врага раунда 1 выстроены на линии прицела
    {
        let world = app.world_mut();
        let enemies: Vec<Entity> = world.query_filtered::<Entity, With<Enemy>>().iter(world).collect();
        assert_eq!(enemies.len(), 3);
        for (i, entity) in enemies.into_iter().enumerate() {
            let z = -30.0 * (i as f32 + 1.0);
            world.entity_mut(entity).insert(Transform::from_xyz(0.0, 10.0, z));
        }
    }

    for _ in 0..180 {
        app.world_mut().send_event(InputEvent::Fire);
        app.update();
        if app.world().resource::<RoundState>().index == 2 {
            break;
        }
    }

    assert_eq!(app.world().resource::<RoundState>().index, 2);
    assert_eq!(app.world().resource::<Score>().0, 30);

    let tuning = app.world().resource::<ArenaTuning>().clone();
    let world = app.world_mut();
    let positions: Vec<Vec3> = world
        .query_filtered::<&Transform, With<Enemy>>()
        .iter(world)
        .map(|transform| transform.translation)
        .collect();

    assert_eq!(positions.len(), 7);
    for position in positions {
        let horizontal = Vec2::new(position.x, position.z).length();
        assert!(horizontal >= tuning.spawn_exclusion_radius);
    }
}

#[test]
fn test_high_score_is_max_of_previous_and_final() {
    let store = Arc::new(MemoryHighScoreStore::new(40));

    let mut app = create_headless_app(5);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(FRAME)))
        .insert_resource(HighScoreSlot(Box::new(SharedStore(store.clone()))));
    app.add_plugins(SimulationPlugin);
    app.update();

    // Рекорд подтягивается из store на входе в Menu
    assert_eq!(app.world().resource::<HighScore>().0, 40);

    // Сессия 1: 30 < 40 — рекорд не меняется
    start_session(&mut app);
    app.world_mut().resource_mut::<Score>().0 = 30;
    spawn_catcher(&mut app);
    run_until_game_over(&mut app);
    app.update();
    assert_eq!(app.world().resource::<HighScore>().0, 40);
    assert_eq!(store.get_high_score(), 40);

    app.world_mut().send_event(SessionCommand::Acknowledge);
    app.update();
    app.update();

    // Сессия 2: 70 > 40 — новый рекорд, записан в store
    start_session(&mut app);
    assert_eq!(app.world().resource::<Score>().0, 0);
    app.world_mut().resource_mut::<Score>().0 = 70;
    spawn_catcher(&mut app);
    run_until_game_over(&mut app);
    app.update();
    assert_eq!(app.world().resource::<HighScore>().0, 70);
    assert_eq!(store.get_high_score(), 70);
}
