//! Command dispatch after parsing and configuration loading.

use super::handlers::ServeCommandHandler;
use super::parser::Cli;
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// What `main` should do once a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Start the HTTP server
    Serve,
    /// The command finished; exit without serving
    Exit,
}

/// Run the parsed command against validated settings.
///
/// A missing subcommand behaves like `serve`.
pub async fn execute_command(cli: &Cli, settings: &Settings) -> AppResult<Outcome> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    if cli.is_dry_run() {
        ServeCommandHandler::new(settings).dry_run()?;
        return Ok(Outcome::Exit);
    }

    Ok(Outcome::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.provider.application_id = "app-123".to_string();
        config
    }

    #[tokio::test]
    async fn test_dry_run_exits() {
        let cli = Cli::try_parse_from(["notify-gateway", "serve", "--dry-run"]).unwrap();
        let outcome = execute_command(&cli, &valid_config()).await.unwrap();
        assert_eq!(outcome, Outcome::Exit);
    }

    #[tokio::test]
    async fn test_serve_and_default_start_server() {
        for args in [&["notify-gateway", "serve"][..], &["notify-gateway"][..]] {
            let cli = Cli::try_parse_from(args).unwrap();
            let outcome = execute_command(&cli, &valid_config()).await.unwrap();
            assert_eq!(outcome, Outcome::Serve);
        }
    }

    #[tokio::test]
    async fn test_conflicting_flags_rejected() {
        let cli = Cli {
            command: None,
            config: None,
            env: None,
            verbose: true,
            quiet: true,
        };
        let err = execute_command(&cli, &valid_config()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
