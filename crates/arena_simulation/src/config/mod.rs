//! Configuration — tunable constants арены (RON файл)

pub mod tuning;

pub use tuning::{ArenaTuning, TuningError};
