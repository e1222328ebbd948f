//! Layered settings: defaults, `taxmap.toml`, environment, then flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use taxmap_ingest::{DATA_DIR_NAME, DATASET_ROOT_NAME, MAP_FILE_NAME, locate_data_root};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "taxmap.toml";

/// Environment variable for overriding the data folder.
pub const DATA_DIR_ENV_VAR: &str = "TAXMAP_DATA_DIR";

const DEFAULT_OUTPUT_DIR: &str = "output";

/// Contents of `taxmap.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_root: Option<PathBuf>,
    pub dataset_root: Option<String>,
    pub map_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub data_root: Option<PathBuf>,
    pub map_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Data folder locations tried in order.
    pub data_root_candidates: Vec<PathBuf>,
    /// Folder under the data root holding the dataset folders.
    pub dataset_root: String,
    /// Explicit map file; `None` means `tr.json` in the data root.
    pub map_file: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Settings {
    /// Built-in defaults relative to `cwd` and the executable's folder.
    pub fn defaults(cwd: &Path, exe_dir: Option<&Path>) -> Self {
        let mut candidates = vec![cwd.join(DATA_DIR_NAME)];
        if let Some(parent) = cwd.parent() {
            candidates.push(parent.join(DATA_DIR_NAME));
        }
        if let Some(dir) = exe_dir {
            let candidate = dir.join(DATA_DIR_NAME);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        Self {
            data_root_candidates: candidates,
            dataset_root: DATASET_ROOT_NAME.to_string(),
            map_file: None,
            output_dir: cwd.join(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Applies the config file, the environment value and the flags on top
    /// of the defaults, in that order.
    pub fn layered(
        mut self,
        file: Option<FileConfig>,
        env_data_root: Option<PathBuf>,
        overrides: &Overrides,
    ) -> Self {
        if let Some(file) = file {
            if let Some(root) = file.data_root {
                self.data_root_candidates = vec![root];
            }
            if let Some(name) = file.dataset_root {
                self.dataset_root = name;
            }
            if file.map_file.is_some() {
                self.map_file = file.map_file;
            }
            if let Some(dir) = file.output_dir {
                self.output_dir = dir;
            }
        }
        if let Some(root) = env_data_root {
            self.data_root_candidates = vec![root];
        }
        if let Some(root) = &overrides.data_root {
            self.data_root_candidates = vec![root.clone()];
        }
        if overrides.map_file.is_some() {
            self.map_file.clone_from(&overrides.map_file);
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir.clone_from(dir);
        }
        self
    }

    /// Resolves settings from the process environment.
    ///
    /// An explicit `--config` must be readable; a missing `taxmap.toml` in
    /// the working directory is not an error.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let cwd = std::env::current_dir().context("read working directory")?;
        let exe = std::env::current_exe().ok();
        let exe_dir = exe.as_deref().and_then(Path::parent);

        let file = match &overrides.config {
            Some(path) => Some(FileConfig::load(path)?),
            None => {
                let path = cwd.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Some(FileConfig::load(&path)?)
                } else {
                    None
                }
            }
        };
        let env_data_root = std::env::var_os(DATA_DIR_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        let settings = Self::defaults(&cwd, exe_dir).layered(file, env_data_root, overrides);
        debug!(?settings, "settings resolved");
        Ok(settings)
    }

    /// First existing data folder.
    pub fn data_root(&self) -> Result<PathBuf> {
        Ok(locate_data_root(&self.data_root_candidates)?)
    }

    pub fn dataset_root_dir(&self, data_root: &Path) -> PathBuf {
        data_root.join(&self.dataset_root)
    }

    pub fn map_path(&self, data_root: &Path) -> PathBuf {
        self.map_file
            .clone()
            .unwrap_or_else(|| data_root.join(MAP_FILE_NAME))
    }
}
