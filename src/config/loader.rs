//! Configuration loader for notify-gateway
//!
//! Sources are merged lowest to highest priority:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `NOTIFY_*` environment variables
//!
//! When a single file is selected (`NOTIFY_CONFIG_FILE` or `--config`) it
//! replaces steps 1-3.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "NOTIFY_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "NOTIFY";

/// `NOTIFY_PROVIDER__REGION` -> `provider.region`
const ENV_SEPARATOR: &str = "__";

type Builder = ConfigBuilder<DefaultState>;

/// Layered configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `NOTIFY_CONFIG_DIR`, `NOTIFY_CONFIG_FILE` and
    /// `NOTIFY_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Conflict`] when both the directory and the file
    /// variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::Conflict(format!(
                "{} and {} cannot both be set; use the directory for layered \
                 loading or the file for a single configuration file",
                CONFIG_DIR_ENV, CONFIG_FILE_ENV
            )));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single configuration file instead of the layered directory
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_dir = path.into();
        self.config_file = None;
        self
    }

    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load, deserialize and validate settings from all sources
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings without running validation, so CLI overrides can be
    /// applied before checking.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        self.build_config()?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = match &self.config_file {
            Some(file) => add_file_source(Config::builder(), file, true)?,
            None => self.add_layered_sources(Config::builder())?,
        };

        add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn add_layered_sources(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;
        let builder = add_file_source(
            builder,
            &self
                .config_dir
                .join(format!("{}.toml", self.environment.as_str())),
            false,
        )?;
        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

fn add_file_source(builder: Builder, path: &Path, required: bool) -> Result<Builder, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(path.display().to_string()));
    }

    let name = path
        .to_str()
        .ok_or_else(|| ConfigError::Parse(format!("non UTF-8 path: {}", path.display())))?;

    Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
}

fn add_env_source(builder: Builder) -> Builder {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[application]
name = "test-gateway"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 3000

[provider]
region = "us-east-1"
application_id = "base-app"

[messaging]
sender_address = "no-reply@example.com"
origination_number = "+15550100000"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        /// Starts from a clean slate for every variable the loader reads.
        fn clean() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                AppEnvironment::ENV_VAR,
                "NOTIFY_SERVER__PORT",
                "NOTIFY_PROVIDER__REGION",
                "NOTIFY_PROVIDER__APPLICATION_ID",
                "NOTIFY_MESSAGING__ORIGINATION_NUMBER",
            ] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file().is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_loader_reads_environment_variables() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/etc/notify");
        env.set(AppEnvironment::ENV_VAR, "production");

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("/etc/notify"));
        assert_eq!(loader.environment(), AppEnvironment::Production);
    }

    #[test]
    fn test_loader_dir_and_file_conflict() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        env.set(CONFIG_DIR_ENV, "/etc/notify");
        env.set(CONFIG_FILE_ENV, "/etc/notify/gateway.toml");

        match ConfigLoader::new() {
            Err(ConfigError::Conflict(msg)) => {
                assert!(msg.contains(CONFIG_DIR_ENV));
                assert!(msg.contains(CONFIG_FILE_ENV));
            }
            other => panic!("Expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);

        let result = ConfigLoader::new().unwrap().with_dir(temp_dir.path()).load();
        match result {
            Err(ConfigError::FileNotFound { path }) => assert!(path.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_dir(temp_dir.path())
            .load()
            .expect("Should load settings");

        assert_eq!(settings.application.name, "test-gateway");
        assert_eq!(settings.provider.application_id, "base-app");
        assert_eq!(settings.messaging.sender_address, "no-reply@example.com");
        // Unset keys keep their defaults.
        assert_eq!(settings.messaging.default_voice_id, "Matthew");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_load_full_precedence_chain() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let staging = r#"
[application]
name = "staging-gateway"

[server]
port = 3001

[provider]
region = "eu-west-1"
"#;
        let local = r#"
[server]
port = 3002
"#;
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("staging.toml", staging),
            ("local.toml", local),
        ]);
        env.set("NOTIFY_PROVIDER__REGION", "ap-southeast-2");

        let settings = ConfigLoader::new()
            .unwrap()
            .with_dir(temp_dir.path())
            .with_environment(AppEnvironment::Staging)
            .load()
            .expect("Should load settings");

        assert_eq!(settings.provider.region, "ap-southeast-2");
        assert_eq!(settings.server.port, 3002);
        assert_eq!(settings.application.name, "staging-gateway");
        assert_eq!(settings.application.version, "1.0.0");
    }

    #[test]
    fn test_env_values_stay_strings() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set("NOTIFY_MESSAGING__ORIGINATION_NUMBER", "+15557654321");
        env.set("NOTIFY_PROVIDER__APPLICATION_ID", "0042");
        env.set("NOTIFY_SERVER__PORT", "4000");

        let settings = ConfigLoader::new()
            .unwrap()
            .with_dir(temp_dir.path())
            .load()
            .expect("Should load settings");

        assert_eq!(settings.messaging.origination_number, "+15557654321");
        assert_eq!(settings.provider.application_id, "0042");
        // Numeric fields still deserialize from the string value.
        assert_eq!(settings.server.port, 4000);
    }

    #[test]
    fn test_optional_files_not_required() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        let settings = ConfigLoader::new()
            .unwrap()
            .with_dir(temp_dir.path())
            .with_environment(AppEnvironment::Production)
            .load()
            .expect("Missing production.toml and local.toml are fine");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_load_single_file_mode() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();

        let single = r#"
[server]
host = "0.0.0.0"
port = 5000

[provider]
application_id = "single-app"
"#;
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG), ("gateway.toml", single)]);
        let path = temp_dir.path().join("gateway.toml");
        env.set(CONFIG_FILE_ENV, path.to_str().unwrap());

        let settings = ConfigLoader::new()
            .unwrap()
            .load()
            .expect("Should load settings");

        // default.toml in the same directory is not consulted.
        assert_eq!(settings.provider.application_id, "single-app");
        assert_eq!(settings.server.port, 5000);
        assert!(settings.messaging.sender_address.is_empty());
    }

    #[test]
    fn test_with_file_overrides_directory() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("custom.toml", BASE_CONFIG)]);

        let loader = ConfigLoader::new()
            .unwrap()
            .with_file(temp_dir.path().join("custom.toml"));
        assert!(loader.config_file().is_some());
        assert_eq!(loader.load().unwrap().application.name, "test-gateway");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set("NOTIFY_SERVER__PORT", "0");

        let loader = ConfigLoader::new().unwrap().with_dir(temp_dir.path());
        let err = loader.load().unwrap_err();
        assert_eq!(err.field(), Some("server.port"));
        assert!(loader.load_unvalidated().is_ok());
    }
}
