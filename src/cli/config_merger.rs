//! Merges CLI overrides into file and environment configuration.
//!
//! Precedence, highest first: serve flags, global flags, `NOTIFY_*`
//! environment variables, configuration files.

use std::path::Path;

use super::parser::{Cli, Commands, Environment};
use crate::config::{ConfigError, ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load unvalidated settings; validation runs after the CLI overrides
    /// are applied so a flag can fix a bad file value.
    pub fn load(config_path: Option<&Path>, env: Option<Environment>) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = env {
            loader = loader.with_environment(env.into());
        }

        if let Some(path) = config_path {
            if !path.is_file() {
                return Err(ConfigError::file_not_found(path.display().to_string()));
            }
            loader = loader.with_file(path);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Apply CLI overrides and validate the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(command) = &cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }

            if let Some(port) = port {
                config.server.port = *port;
            }

            if let Some(level) = log_level {
                config.logger.level = level.clone().into();
            }
        }
    }
}
