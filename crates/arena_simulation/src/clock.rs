//! Clock — монотонное время симуляции и delta кадра
//!
//! Обновляется каждый кадр (в любом SessionState) из `Time` Bevy.
//! Reload timers сравнивают дедлайны с `SimClock::now()`, поэтому время
//! идёт и в Menu/GameOver/паузе.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SimClock {
    /// Секунды с запуска App
    pub elapsed: f64,
    /// Delta текущего кадра (секунды)
    pub delta: f32,
    pub frame: u64,
}

impl SimClock {
    pub fn now(&self) -> f64 {
        self.elapsed
    }
}

/// System: синхронизация SimClock с Bevy Time
pub fn advance_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.delta = time.delta_secs();
    clock.elapsed = time.elapsed_secs_f64();
    clock.frame += 1;
}
