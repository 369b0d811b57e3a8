use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::ExcludedCourses;

/// File name looked up in the working directory when no `--config` is given.
pub const PROJECT_CONFIG_FILE: &str = "enrollnet.toml";

/// Environment variable that overrides `store.data_file`.
pub const DATA_FILE_ENV: &str = "ENROLLNET_DATA";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
    #[serde(default)]
    pub excluded_courses: ExcludedCourses,
    #[serde(default = "default_student_min_edge_weight")]
    pub student_min_edge_weight: u32,
    #[serde(default = "default_course_min_edge_weight")]
    pub course_min_edge_weight: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            excluded_courses: ExcludedCourses::default(),
            student_min_edge_weight: default_student_min_edge_weight(),
            course_min_edge_weight: default_course_min_edge_weight(),
        }
    }
}

/// Power-iteration limits for eigenvector centrality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EigenvectorConfig {
    /// Hard cap on iterations; the scores reached at the cap are returned.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Stop once the L1 change between iterations drops below this.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/registrations.json")
}

const fn default_lock_timeout_ms() -> u64 {
    5_000
}

const fn default_student_min_edge_weight() -> u32 {
    2
}

const fn default_course_min_edge_weight() -> u32 {
    3
}

const fn default_max_iter() -> usize {
    100
}

const fn default_tolerance() -> f64 {
    1e-6
}

/// Load the project config.
///
/// With an explicit path the file must exist. Otherwise
/// `<project_root>/enrollnet.toml` is used when present and defaults apply
/// when it is not.
pub fn load_project_config(project_root: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = project_root.join(PROJECT_CONFIG_FILE);
            if !path.exists() {
                return Ok(ProjectConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    parse_project_config(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse config TOML text.
pub fn parse_project_config(content: &str) -> Result<ProjectConfig> {
    let config = toml::from_str::<ProjectConfig>(content)?;
    if config.eigenvector.tolerance.is_nan() || config.eigenvector.tolerance < 0.0 {
        anyhow::bail!(
            "eigenvector.tolerance must be a non-negative number, got {}",
            config.eigenvector.tolerance
        );
    }
    Ok(config)
}

/// Resolve the registry data file.
///
/// Precedence (highest wins):
/// 1. `--data` flag
/// 2. `ENROLLNET_DATA` env var
/// 3. `store.data_file`, relative paths anchored at `project_root`
pub fn resolve_data_file(
    project_root: &Path,
    config: &StoreConfig,
    cli_override: Option<&Path>,
) -> PathBuf {
    let env_value = std::env::var_os(DATA_FILE_ENV).map(PathBuf::from);
    resolve_data_file_inner(project_root, config, cli_override, env_value)
}

fn resolve_data_file_inner(
    project_root: &Path,
    config: &StoreConfig,
    cli_override: Option<&Path>,
    env_value: Option<PathBuf>,
) -> PathBuf {
    let chosen = cli_override
        .map(Path::to_path_buf)
        .or(env_value.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| config.data_file.clone());

    if chosen.is_absolute() {
        chosen
    } else {
        project_root.join(chosen)
    }
}
