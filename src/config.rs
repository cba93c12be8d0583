use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::discord_helpers::multipage_embed::options::{
    ControlAppearance, PaginatorOptions, DEFAULT_TIMEOUT_SECS,
};
use crate::discord_helpers::multipage_embed::store::DEFAULT_CAPACITY;
use crate::{hey, nay};

pub const CONFIG_PATH: &str = "./config.json";

/// Bot-wide paginator defaults, kept in `./config.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ConfigSettings {
    timeout_seconds: u64,
    restrict_to_owner: bool,
    ephemeral: bool,
    controls: ControlAppearance,
    max_sessions: usize,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            restrict_to_owner: false,
            ephemeral: false,
            controls: ControlAppearance::default(),
            max_sessions: DEFAULT_CAPACITY,
        }
    }
}

impl ConfigSettings {
    pub fn get() -> Self {
        Self::get_from(Path::new(CONFIG_PATH))
    }

    /// Read the config at `path`, writing a default one if there is none.
    /// A file that does not parse is left alone and the defaults are used.
    pub fn get_from(path: &Path) -> Self {
        if !path.exists() {
            Self::generate(path);
            return Self::default();
        }

        let Ok(data) = fs::read_to_string(path) else {
            hey!("Failed to read config file {}, using defaults", path.display());
            return Self::default();
        };

        match serde_json::from_str::<ConfigSettings>(data.as_str()) {
            Ok(cfg) => cfg,
            Err(e) => {
                nay!("Failed to deserialize config data: {}", e);
                Self::default()
            }
        }
    }

    fn generate(path: &Path) {
        if path.exists() {
            hey!("Config data already exists");
            return;
        };

        let Ok(mut file) = OpenOptions::new()
            .read(false)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
        else {
            hey!("Failed to get file for config file.");
            return;
        };

        let Ok(data) = serde_json::to_string_pretty(&Self::default()) else {
            hey!("Failed to serialize config data.");
            return;
        };

        if let Err(e) = write!(file, "{}", data) {
            hey!("Failed to write to file for config: {}", e);
        }
    }

    /// Options new paginators start from; commands override per call.
    pub fn paginator_options(&self) -> PaginatorOptions {
        PaginatorOptions {
            timeout: Duration::from_secs(self.timeout_seconds),
            restrict_to_owner: self.restrict_to_owner,
            ephemeral: self.ephemeral,
            controls: self.controls.clone(),
            ..PaginatorOptions::default()
        }
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }
}
