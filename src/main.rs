//! Countdown CLI - a digit-pad countdown timer for the terminal
//!
//! Enter a duration as six HH:MM:SS digits, start it, and get a
//! notification when it reaches zero:
//! - `countdown start 130` counts down one minute thirty
//! - `countdown interactive` reads digits and commands from stdin

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use countdown::cli::{run_session, Cli, Commands, Display, NotifierKind, SessionOptions};
use countdown::notification::{NotificationSender, Notifier};
use countdown::types::CountdownConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Start(ref args)) => {
            let config = build_config(&cli)?;
            let notifier = build_notifier(cli.notifier, &config);
            let options = SessionOptions::start(args.duration, !args.paused, args.json);
            run_session(config, notifier, options).await?;
        }
        Some(Commands::Interactive) => {
            let config = build_config(&cli)?;
            let notifier = build_notifier(cli.notifier, &config);
            run_session(config, notifier, SessionOptions::interactive()).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Loads the config file (if any) and applies command-line overrides.
fn build_config(cli: &Cli) -> Result<CountdownConfig> {
    let mut config = match &cli.config {
        Some(path) => CountdownConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CountdownConfig::default(),
    };

    if let Some(tick_ms) = cli.tick_ms {
        config = config.with_tick_interval_ms(tick_ms);
    }
    if cli.notifier == NotifierKind::None {
        config = config.with_notification_enabled(false);
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Picks the notification backend.
///
/// `none` still gets a terminal notifier; the disabled config keeps it from
/// being called.
fn build_notifier(kind: NotifierKind, config: &CountdownConfig) -> Notifier {
    match kind {
        NotifierKind::Desktop => {
            let notifier = Notifier::desktop(config.notification.timeout_seconds);
            if notifier.is_available() {
                notifier
            } else {
                tracing::warn!("no desktop notification backend found, using terminal");
                Notifier::terminal()
            }
        }
        NotifierKind::Terminal | NotifierKind::None => Notifier::terminal(),
    }
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
