//! Config hot-reload with CLI overrides re-applied on every change.

use std::path::PathBuf;

use graviton_config::{CliArgs, Config, ConfigError};
use tracing::warn;

/// Polls `config.ron` and yields the effective config when it changes.
pub struct ConfigWatcher {
    dir: PathBuf,
    on_disk: Config,
    overrides: CliArgs,
}

impl ConfigWatcher {
    /// `on_disk` is the config as loaded, before CLI overrides.
    pub fn new(dir: PathBuf, on_disk: Config, overrides: CliArgs) -> Self {
        Self {
            dir,
            on_disk,
            overrides,
        }
    }

    /// The on-disk config with CLI overrides applied.
    pub fn effective(&self) -> Config {
        let mut config = self.on_disk.clone();
        config.apply_cli_overrides(&self.overrides);
        config
    }

    /// Re-reads the file. Returns the new effective config if the file
    /// changed and the result is valid.
    pub fn poll(&mut self) -> Result<Option<Config>, ConfigError> {
        let Some(changed) = self.on_disk.reload(&self.dir)? else {
            return Ok(None);
        };
        let mut effective = changed.clone();
        effective.apply_cli_overrides(&self.overrides);
        effective.validate()?;
        self.on_disk = changed;
        Ok(Some(effective))
    }

    /// Like [`poll`](Self::poll), but logs failures and keeps the old config.
    pub fn poll_or_warn(&mut self) -> Option<Config> {
        self.poll()
            .inspect_err(|e| warn!("Ignoring config reload: {e}"))
            .ok()
            .flatten()
    }
}
