//! Engine configuration.

use super::constants::*;
use crate::utils::persistence::{default_data_dir, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Tunables for one running instance. Missing keys in `config.json` fall back
/// to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoConfig {
    /// Where `progress.json` and `uploads/` live (None = ~/.ecoquest)
    pub data_dir: Option<PathBuf>,

    /// Grid dimension N for both mazes
    pub maze_size: usize,

    /// Per-cell obstacle chance in the land maze
    pub obstacle_probability: f64,

    /// Items placed in a freshly generated land maze
    pub land_items: usize,

    /// Items placed in a freshly generated water maze
    pub water_items: usize,

    /// Points for picking up one maze item
    pub item_reward: u32,

    /// Points for reaching the maze goal
    pub goal_bonus: u32,

    /// Points for the daily challenge before the streak bonus
    pub daily_base_reward: u32,

    /// Regenerate the whole world when the goal is reached
    pub regenerate_on_goal: bool,
}

impl Default for EcoConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            maze_size: DEFAULT_MAZE_SIZE,
            obstacle_probability: OBSTACLE_PROBABILITY,
            land_items: LAND_ITEM_COUNT,
            water_items: WATER_ITEM_COUNT,
            item_reward: ITEM_REWARD,
            goal_bonus: GOAL_BONUS,
            daily_base_reward: DAILY_BASE_REWARD,
            regenerate_on_goal: false,
        }
    }
}

impl EcoConfig {
    /// Config rooted at a specific directory (tests, `--data-dir`)
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Load `config.json` from `dir`, keeping `dir` as the data directory.
    pub fn load_from(dir: &Path) -> Self {
        let mut config: EcoConfig = load_json_or_default(&dir.join(CONFIG_FILE));
        if config.data_dir.is_none() {
            config.data_dir = Some(dir.to_path_buf());
        }
        config.sanitized()
    }

    /// Load from ~/.ecoquest/config.json.
    pub fn load_default() -> io::Result<Self> {
        let dir = default_data_dir()?;
        Ok(Self::load_from(&dir))
    }

    /// Write these settings to `dir/config.json` unless the file exists, so
    /// there is something to edit. Returns true if a file was written.
    pub fn save_if_missing(&self, dir: &Path) -> io::Result<bool> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Ok(false);
        }
        let template = EcoConfig {
            data_dir: None,
            ..self.clone()
        };
        save_json(&path, &template)?;
        log::info!("[CONFIG] wrote defaults to {}", path.display());
        Ok(true)
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn progress_path(&self) -> io::Result<PathBuf> {
        Ok(self.data_dir()?.join(PROGRESS_FILE))
    }

    pub fn upload_dir(&self) -> io::Result<PathBuf> {
        Ok(self.data_dir()?.join(UPLOAD_DIR))
    }

    /// Clamp values a hand-edited config could break.
    pub fn sanitized(mut self) -> Self {
        self.maze_size = self.maze_size.max(MIN_MAZE_SIZE);
        if !(0.0..1.0).contains(&self.obstacle_probability) {
            log::warn!(
                "[CONFIG] obstacle_probability {} out of range, using {}",
                self.obstacle_probability,
                OBSTACLE_PROBABILITY
            );
            self.obstacle_probability = OBSTACLE_PROBABILITY;
        }
        self
    }
}
