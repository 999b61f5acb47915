// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use crate::error::Result;
use crate::io::dataset;
use crate::model::{Duplicates, ElementIndex};

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dataset file to use instead of the bundled table
    pub dataset: Option<PathBuf>,
    /// Default for mass queries: match the rounded mass exactly
    pub exact_mass: bool,
    pub duplicates: Duplicates,
    /// One of "error", "warn", "info", "debug", "trace", "off"
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: None,
            exact_mass: true,
            duplicates: Duplicates::Error,
            log_level: "warn".to_string(),
        }
    }
}

/// Either the bundled index or one built from a user dataset.
pub enum IndexHandle {
    Bundled(&'static ElementIndex),
    Owned(ElementIndex),
}

impl std::ops::Deref for IndexHandle {
    type Target = ElementIndex;

    fn deref(&self) -> &ElementIndex {
        match self {
            IndexHandle::Bundled(index) => *index,
            IndexHandle::Owned(index) => index,
        }
    }
}

impl Config {
    /// Loads config from standard OS location (e.g., ~/.config/ele/settings.json)
    pub fn load() -> (Self, String) {
        Self::load_from(Self::get_path())
    }

    pub fn load_from(path: PathBuf) -> (Self, String) {
        if path.exists() {
            match File::open(&path) {
                Ok(file) => {
                    let reader = BufReader::new(file);
                    match serde_json::from_reader(reader) {
                        Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
                        Err(e) => (Self::default(), format!("Error parsing config: {}", e)),
                    }
                }
                Err(e) => (Self::default(), format!("Error opening config: {}", e)),
            }
        } else {
            (
                Self::default(),
                "No config found. Using defaults.".to_string(),
            )
        }
    }

    /// Saves config to standard OS location
    pub fn save(&self) -> String {
        self.save_to(Self::get_path())
    }

    pub fn save_to(&self, path: PathBuf) -> String {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match File::create(&path) {
            Ok(file) => {
                let writer = BufWriter::new(file);
                match serde_json::to_writer_pretty(writer, self) {
                    Ok(_) => format!("Config saved to {:?}", path),
                    Err(e) => format!("Failed to save config: {}", e),
                }
            }
            Err(e) => format!("Could not create config file: {}", e),
        }
    }

    /// Index over the configured dataset, or the bundled one.
    pub fn open_index(&self) -> Result<IndexHandle> {
        match &self.dataset {
            Some(path) => {
                let records = dataset::load_path(path)?;
                Ok(IndexHandle::Owned(ElementIndex::build(records)?))
            }
            None => Ok(IndexHandle::Bundled(ElementIndex::bundled())),
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    fn get_path() -> PathBuf {
        if let Some(proj) = ProjectDirs::from("org", "ele", "ele") {
            proj.config_dir().join("settings.json")
        } else {
            PathBuf::from("settings.json")
        }
    }
}
