//! Headless прогон арены
//!
//! Скриптованный бот: стрейфит, целится в ближайшего врага, стреляет,
//! перезаряжается на пустом магазине. После game over — сразу новая сессия.
//!
//! Usage: `arena_simulation [--quiet | --verbose] [seed] [data_dir]`
//! С `data_dir` tuning и рекорд читаются/пишутся в RON файлы.
//! По умолчанию уровень логов Info; `--quiet` — только warnings,
//! `--verbose` — debug (каждый выстрел/отказ).

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use arena_simulation::logger::{self, LogLevel};
use arena_simulation::{
    create_headless_app, ArenaTuning, FrameSnapshot, HighScore, HighScoreSlot, InputEvent, MoveAxis,
    RonHighScoreStore, SessionCommand, SessionState, SimulationPlugin,
};

const FRAMES: u32 = 3600;
const HUD_EVERY: u32 = 60;
const STRAFE_PERIOD: u32 = 90;

fn main() {
    let (flags, positional): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let level = if flags.iter().any(|flag| flag == "--quiet") {
        LogLevel::Warning
    } else if flags.iter().any(|flag| flag == "--verbose") {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let mut args = positional.into_iter();
    let seed = args.next().and_then(|arg| arg.parse().ok()).unwrap_or(42);
    let data_dir = args.next().map(PathBuf::from);

    println!("Starting arena headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    logger::set_log_level(level);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    if let Some(dir) = &data_dir {
        let store = RonHighScoreStore::open(&dir.join(RonHighScoreStore::FILE_NAME));
        logger::log_info(&format!("High score file: {:?}", store.path()));
        app.insert_resource(ArenaTuning::load_or_default(&dir.join(ArenaTuning::FILE_NAME)))
            .insert_resource(HighScoreSlot(Box::new(store)));
    }

    app.add_plugins(SimulationPlugin);

    let mut sessions = 0;
    let mut start_sent = false;
    let mut acknowledged = false;
    let mut strafe_right = false;

    for frame in 0..FRAMES {
        let snapshot = app.world().resource::<FrameSnapshot>().clone();

        // Переход применяется на следующем кадре: команду шлём один раз
        match snapshot.state {
            SessionState::Playing => {
                start_sent = false;
                drive_bot(&mut app, &snapshot, frame, &mut strafe_right);
            }
            SessionState::GameOver if !acknowledged => {
                acknowledged = true;
                app.world_mut().send_event(SessionCommand::Acknowledge);
            }
            SessionState::Menu if !start_sent => {
                start_sent = true;
                acknowledged = false;
                sessions += 1;
                app.world_mut().send_event(SessionCommand::Start);
            }
            _ => {}
        }

        app.update();

        if frame % HUD_EVERY == 0 {
            let snapshot = app.world().resource::<FrameSnapshot>();
            logger::log_info(&format!(
                "Frame {} ({:?})\n{}",
                frame,
                snapshot.state,
                snapshot.hud_text()
            ));
        }
    }

    let high_score = app.world().resource::<HighScore>().0;
    logger::log_info(&format!("Simulation complete: {} session(s), high score {}", sessions, high_score));
}

/// Один кадр бота
fn drive_bot(app: &mut App, snapshot: &FrameSnapshot, frame: u32, strafe_right: &mut bool) {
    let world = app.world_mut();

    if frame % STRAFE_PERIOD == 0 {
        let (release, press) = if *strafe_right {
            (MoveAxis::Right, MoveAxis::Left)
        } else {
            (MoveAxis::Left, MoveAxis::Right)
        };
        *strafe_right = !*strafe_right;
        world.send_event(InputEvent::Move { axis: release, pressed: false });
        world.send_event(InputEvent::Move { axis: press, pressed: true });
    }

    let player = Vec3::from_array(snapshot.player_position);
    let nearest = snapshot
        .enemy_positions
        .iter()
        .map(|position| Vec3::from_array(*position))
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));

    if let Some(target) = nearest {
        world.send_event(InputEvent::Look { forward: target - player });
    }

    if snapshot.ammo == 0 && !snapshot.reloading {
        world.send_event(InputEvent::Reload);
    } else {
        world.send_event(InputEvent::Fire);
    }

    // Смена оружия каждый раунд: 1 → 2 → 3 → 1 ...
    let slot = (snapshot.round as usize + 2) % 3;
    world.send_event(InputEvent::SelectWeapon(slot));
}
