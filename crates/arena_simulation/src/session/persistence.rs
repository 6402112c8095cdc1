//! High score persistence
//!
//! `HighScoreStore` — единственная точка I/O сессии. Реализации:
//! - `MemoryHighScoreStore` — для тестов и headless прогонов
//! - `RonHighScoreStore` — RON файл рядом с tuning'ом
//!
//! Ошибки I/O не прерывают игру: значение в памяти остаётся
//! авторитетным до конца процесса.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use thiserror::Error;

use crate::logger;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse high score file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize high score: {0}")]
    Serialize(#[from] ron::Error),
}

/// Хранилище рекорда. Запись идемпотентна, чтение после записи
/// возвращает записанное значение.
pub trait HighScoreStore: Send + Sync {
    fn get_high_score(&self) -> u32;
    fn set_high_score(&self, value: u32) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    value: AtomicU32,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: AtomicU32::new(initial),
        }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get_high_score(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    fn set_high_score(&self, value: u32) -> Result<(), StoreError> {
        self.value.store(value, Ordering::Relaxed);
        Ok(())
    }
}

/// Формат файла рекорда
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// RON файл с рекордом
#[derive(Debug)]
pub struct RonHighScoreStore {
    path: PathBuf,
    cached: Mutex<u32>,
}

impl RonHighScoreStore {
    pub const FILE_NAME: &'static str = "high_score.ron";

    /// Открыть файл; при ошибке — warning и рекорд 0
    pub fn open(path: &Path) -> Self {
        match Self::try_open(path) {
            Ok(store) => store,
            Err(e) => {
                logger::log_warning(&format!("{e}, starting with high score 0"));
                Self {
                    path: path.to_path_buf(),
                    cached: Mutex::new(0),
                }
            }
        }
    }

    /// Strict open. Отсутствующий файл — не ошибка (рекорд 0).
    pub fn try_open(path: &Path) -> Result<Self, StoreError> {
        let high_score = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            ron::from_str::<HighScoreRecord>(&contents)?.high_score
        } else {
            0
        };

        Ok(Self {
            path: path.to_path_buf(),
            cached: Mutex::new(high_score),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, value: u32) -> Result<(), StoreError> {
        let contents = ron::ser::to_string_pretty(&HighScoreRecord { high_score: value }, Default::default())?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HighScoreStore for RonHighScoreStore {
    fn get_high_score(&self) -> u32 {
        self.cached.lock().map(|value| *value).unwrap_or_default()
    }

    fn set_high_score(&self, value: u32) -> Result<(), StoreError> {
        if let Ok(mut cached) = self.cached.lock() {
            *cached = value;
        }
        self.write(value)
    }
}

/// Активное хранилище рекорда (по умолчанию — в памяти)
#[derive(Resource)]
pub struct HighScoreSlot(pub Box<dyn HighScoreStore>);

impl Default for HighScoreSlot {
    fn default() -> Self {
        Self(Box::new(MemoryHighScoreStore::default()))
    }
}
