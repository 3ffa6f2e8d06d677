// Main entrypoint for the hang-webserver mock.

use hang_webserver::app::App;
use hang_webserver::config::{Config, ConfigTrait, Mode};
use hang_webserver::shutdown::GracefulShutdown;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const USAGE_EXIT_CODE: u8 = 2;

/// Failure-injecting HTTP server simulating slow, failing and flaky upstreams.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TCP port to listen on (loopback only)
    port: u16,

    /// Custom config file path
    #[arg(short, long, value_name = "FILE")]
    cfg: Option<PathBuf>,

    /// Request dispatcher to run (overrides the config file)
    #[arg(long, value_enum)]
    mode: Option<Mode>,
}

/// Exit status for a failed parse; `None` when clap only printed help or version.
fn usage_exit_status(kind: ErrorKind) -> Option<u8> {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => Some(USAGE_EXIT_CODE),
    }
}

/// Parses arguments; usage errors print to stdout and exit with status 2.
fn parse_args() -> std::result::Result<Args, ExitCode> {
    match Args::try_parse() {
        Ok(args) => Ok(args),
        Err(e) => match usage_exit_status(e.kind()) {
            Some(code) => {
                println!("{}", Args::command().render_usage());
                Err(ExitCode::from(code))
            }
            None => e.exit(),
        },
    }
}

/// Loads the configuration from YAML file, or the built-in defaults.
fn load_cfg(args: &Args) -> Result<Config> {
    let cfg = match &args.cfg {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load custom config from {:?}", path))?,
        None => Config::default(),
    };

    let cfg = cfg.with_port(args.port);
    let cfg = match args.mode {
        Some(mode) => cfg.with_mode(mode),
        None => cfg,
    };

    // Validate the effective listen address before any socket work.
    cfg.listen_addr()?;
    Ok(cfg)
}

/// Configures structured logging based on configuration.
fn configure_logger(cfg: &Config) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let log_level = cfg
        .logs()
        .and_then(|logs| logs.level.as_deref())
        .unwrap_or("info");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if cfg.is_prod() {
        // Production: JSON format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        // Development: Pretty console format
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(code) => return code,
    };

    let result = tokio::runtime::Runtime::new()
        .context("failed to create tokio runtime")
        .and_then(|rt| rt.block_on(async_main(args)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn async_main(args: Args) -> Result<()> {
    let cfg = load_cfg(&args)?;
    configure_logger(&cfg);

    let shutdown_token = CancellationToken::new();
    let graceful_shutdown =
        GracefulShutdown::new(shutdown_token.clone()).with_timeout(Duration::from_secs(5));

    let app = App::start(shutdown_token.clone(), cfg).await?;
    println!(
        "HTTP Server Running on PORT {}..........",
        app.local_addr().port()
    );

    let app_token = shutdown_token.clone();
    graceful_shutdown.spawn(async move {
        if let Err(e) = app.wait().await {
            error!(
                component = "main",
                scope = "app",
                event = "serve_failed",
                error = %e,
                "server exited with error"
            );
        }
        // A dead accept loop takes the process down with it.
        app_token.cancel();
    });

    if let Err(e) = graceful_shutdown.await_shutdown().await {
        error!(
            component = "main",
            scope = "service",
            event = "graceful_shutdown_failed",
            error = %e,
            "failed to gracefully shut down service"
        );
        return Err(e);
    }

    info!(component = "main", event = "exited", "bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage_error(argv: &[&str]) -> ErrorKind {
        Args::try_parse_from(argv)
            .expect_err("arguments must be rejected")
            .kind()
    }

    #[test]
    fn test_single_port_argument() {
        let args = Args::try_parse_from(["hang-webserver", "8080"]).unwrap();
        assert_eq!(args.port, 8080);
        assert!(args.cfg.is_none());
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_wrong_arity_and_bad_port_exit_with_usage() {
        for argv in [
            &["hang-webserver"][..],
            &["hang-webserver", "1", "2"][..],
            &["hang-webserver", "abc"][..],
            &["hang-webserver", "70000"][..],
        ] {
            let kind = usage_error(argv);
            assert!(
                !matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion),
                "{:?} parsed as {:?}",
                argv,
                kind
            );
            assert_eq!(usage_exit_status(kind), Some(2), "{:?}", argv);
        }
    }

    #[test]
    fn test_help_and_version_are_not_usage_errors() {
        assert_eq!(usage_exit_status(usage_error(&["hang-webserver", "--help"])), None);
        assert_eq!(usage_exit_status(usage_error(&["hang-webserver", "--version"])), None);
    }

    #[test]
    fn test_mode_and_cfg_flags() {
        let args = Args::try_parse_from([
            "hang-webserver",
            "--mode",
            "hang-only",
            "--cfg",
            "cfg/hang-webserver.cfg.yaml",
            "9000",
        ])
        .unwrap();
        assert_eq!(args.port, 9000);
        assert_eq!(args.mode, Some(Mode::HangOnly));
        assert_eq!(args.cfg, Some(PathBuf::from("cfg/hang-webserver.cfg.yaml")));

        let cfg = load_cfg(&Args::try_parse_from(["hang-webserver", "9001"]).unwrap()).unwrap();
        assert_eq!(cfg.api().port, 9001);
        assert_eq!(cfg.mode(), Mode::FailureInjection);
    }
}
