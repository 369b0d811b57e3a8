pub mod centrality;
pub mod completions;
pub mod list;
pub mod network;
pub mod register;
pub mod remove;
pub mod stats;
pub mod status;

use std::path::Path;

use anyhow::Result;
use enrollnet_core::config::{NetworkConfig, load_project_config, resolve_data_file};
use enrollnet_core::error::ErrorCode;
use enrollnet_core::model::{CachedCentrality, StudentRecord};
use enrollnet_core::store::{CentralityProvider, RegistryStore, StoreError};
use enrollnet_network::NetworkEngine;
use tracing::{debug, warn};

use crate::output::{CliError, OutputMode, render_error};

/// Everything a command needs: the store, the engine bound to the project's
/// network settings, and the resolved output mode.
pub struct Context {
    pub store: RegistryStore,
    pub engine: NetworkEngine,
    pub network: NetworkConfig,
    pub output: OutputMode,
}

impl Context {
    /// Load the project config and open the registry.
    ///
    /// # Errors
    ///
    /// Returns an error (after rendering it) if the config file cannot be
    /// read or parsed.
    pub fn load(
        project_root: &Path,
        config_path: Option<&Path>,
        data_override: Option<&Path>,
        output: OutputMode,
    ) -> Result<Self> {
        let config = match load_project_config(project_root, config_path) {
            Ok(config) => config,
            Err(e) => {
                render_error(
                    output,
                    &CliError::from_code(ErrorCode::ConfigParseError, format!("{e:#}")),
                )?;
                return Err(e);
            }
        };

        let data_file = resolve_data_file(project_root, &config.store, data_override);
        debug!(data_file = %data_file.display(), "registry resolved");

        Ok(Self {
            store: RegistryStore::from_config(data_file, &config.store),
            engine: NetworkEngine::from_config(&config),
            network: config.network,
            output,
        })
    }

    /// Current records and centralities valid for them under this engine's
    /// settings.
    ///
    /// The cache is used when its key matches; otherwise scores are
    /// recomputed in memory and the file is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error (after rendering it) if the registry cannot be read.
    pub fn current_centrality(&self) -> Result<(Vec<StudentRecord>, CachedCentrality)> {
        let data = self.store.read().map_err(|e| self.store_failure(e))?;
        if data.cache_is_current(&self.engine) {
            return Ok((data.students, data.cached_centrality));
        }
        warn!("cached centrality does not match the current records or settings; recomputing");
        let cached = self.engine.recompute(&data.students);
        Ok((data.students, cached))
    }

    /// Render a store failure and convert it for `?`.
    pub fn store_failure(&self, err: StoreError) -> anyhow::Error {
        if let Err(render_err) = render_error(self.output, &CliError::from(&err)) {
            return render_err;
        }
        anyhow::Error::new(err)
    }
}
