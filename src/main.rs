//! ReviewDeck - terminal client for an AI code review service
//!
//! Select source files, submit them to the review service as a single
//! batch, and browse the structured results and persisted history without
//! leaving the terminal.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error or failed batch submission

mod app;
mod cli;
mod client;
mod config;
mod intake;
mod models;
mod render;
mod stats;
mod store;
mod view;

use anyhow::{Context, Result};
use app::{App, SubmitOutcome};
use cli::{Args, ReportFormat};
use client::ReviewClient;
use config::Config;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use view::View;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("ReviewDeck v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Fatal: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .reviewdeck.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".reviewdeck.toml");

    if path.exists() {
        eprintln!("⚠️  .reviewdeck.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .reviewdeck.toml")?;

    println!("✅ Created .reviewdeck.toml with default settings.");
    println!("   Edit it to customize the service URL, timeout, and extensions.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .reviewdeck.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Build the application and dispatch to the requested mode.
async fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Handle --dry-run: intake only, no submission
    if args.dry_run {
        return handle_dry_run(&args, &config);
    }

    let client = ReviewClient::new(
        &config.server.base_url,
        Duration::from_secs(config.server.timeout_seconds),
    );

    let show_progress = !args.quiet && !args.batch;
    let mut app = App::new(client, config.intake.extensions.clone(), show_progress);

    if !args.paths.is_empty() {
        let accepted = app.select_paths(&args.paths);
        if accepted == 0 {
            warn!("No usable source files among the given paths");
        } else {
            debug!("Preselected {} file(s)", accepted);
        }
    }

    if args.batch {
        return run_batch(&mut app, args.format).await;
    }

    run_interactive(&mut app).await
}

/// Handle --dry-run: run intake over the paths, print what survived, exit.
fn handle_dry_run(args: &Args, config: &Config) -> Result<i32> {
    println!("\n🔍 Dry run: intake filter only (nothing is submitted)...\n");

    let candidates = intake::candidates_from_paths(&args.paths);
    let mut accepted = 0;

    for candidate in &candidates {
        if intake::accepts(
            candidate.content_type.as_deref(),
            &candidate.name,
            &config.intake.extensions,
        ) {
            println!("   📄 {} ({} bytes)", candidate.path.display(), candidate.size);
            accepted += 1;
        }
    }

    if accepted == 0 {
        println!("   No files passed the intake filter.");
    } else {
        println!("\n   Total: {} file(s) would be submitted", accepted);
    }

    Ok(0)
}

/// One-shot mode: submit the preselected batch, print a report, exit.
async fn run_batch(app: &mut App, format: ReportFormat) -> Result<i32> {
    if app.pending().is_empty() {
        anyhow::bail!("no files passed the intake filter");
    }

    match app.submit().await {
        SubmitOutcome::Submitted(count) => {
            info!("Batch analyzed: {} review(s)", count);

            let output = match format {
                ReportFormat::Json => render::render_batch_json(app.store().session())?,
                ReportFormat::Text => render::render_batch_text(app.store().session()),
            };

            println!("{}", output);
            Ok(0)
        }
        SubmitOutcome::Failed(message) => {
            eprintln!("❌ Error analyzing code: {}", message);
            Ok(1)
        }
        outcome => anyhow::bail!("unexpected submission outcome: {:?}", outcome),
    }
}

const HELP: &str = "\
Commands:
  add <path>...     select files or directories for review
  rm <index>        remove a pending file by index
  submit            analyze the pending files
  upload            switch to the Upload view
  results           switch to the Results view
  history           switch to the History view (refreshes it)
  help              show this help
  quit              exit";

/// Interactive mode: a command loop over the three views.
///
/// Everything runs on one logical event loop; the only suspension point is
/// the network call inside submit/navigate.
async fn run_interactive(app: &mut App) -> Result<i32> {
    println!("{}", render::render_screen(app));
    println!("Type `help` for commands.");

    let stdin = std::io::stdin();

    loop {
        print!("reviewdeck> ");
        std::io::stdout().flush().ok();

        let mut line = String::new();
        if stdin
            .read_line(&mut line)
            .context("Failed to read input")?
            == 0
        {
            break; // EOF
        }

        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "add" | "a" => {
                let paths: Vec<PathBuf> = parts.map(PathBuf::from).collect();
                if paths.is_empty() {
                    println!("Usage: add <path>...");
                    continue;
                }

                let accepted = app.select_paths(&paths);
                if accepted > 0 {
                    println!("📋 {} file(s) selected", accepted);
                }
                // Nothing accepted: the selection is unchanged and intake
                // stays silent about it.
            }
            "rm" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(index) => {
                    if let Some(file) = app.remove_pending(index) {
                        println!("Removed {}", file.name);
                    } else {
                        println!("No pending file at index {}", index);
                    }
                }
                None => {
                    println!("Usage: rm <index>");
                    continue;
                }
            },
            "submit" | "go" => match app.submit().await {
                SubmitOutcome::Submitted(count) => {
                    println!("✅ {} file(s) reviewed", count);
                }
                SubmitOutcome::Failed(message) => {
                    eprintln!("\n❌ Error analyzing code. Please try again. ({})", message);
                }
                SubmitOutcome::NothingPending => {
                    println!("Nothing selected. Use `add <path>...` first.");
                }
                SubmitOutcome::Busy => {
                    println!("A request is already in flight.");
                }
            },
            "upload" | "u" => app.navigate(View::Upload).await,
            "results" | "r" => app.navigate(View::Results).await,
            "history" | "h" => app.navigate(View::History).await,
            "help" | "?" => {
                println!("{}", HELP);
                continue;
            }
            "quit" | "exit" | "q" => break,
            other => {
                println!("Unknown command: {} (try `help`)", other);
                continue;
            }
        }

        println!("{}", render::render_screen(app));
    }

    Ok(0)
}
