//! CLI entrypoint for quotacap
//!
//! This is the main binary that wires together all layers using
//! dependency injection. It plays the embedding host: generation runs once
//! at startup, then the requested command talks to the service.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use quotacap_application::{CategoryConfigRegistry, FixedActiveCategory, QuotaCapService};
use quotacap_infrastructure::{ConfigLoader, FsCategorySource, TomlConfigStore};
use quotacap_presentation::{Cli, Command, ConsoleFormatter, OutputFormat};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load settings: {}", e))?
    };
    config.validate()?;

    info!("Starting quotacap");

    // === Dependency Injection ===
    let store = TomlConfigStore::open(&config.store.path).with_context(|| {
        format!(
            "Failed to open cap store at {}",
            config.store.path.display()
        )
    })?;
    let source = Arc::new(FsCategorySource::new(
        &config.sources.word_file,
        &config.sources.section_file,
    ));
    let registry = CategoryConfigRegistry::with_debug_logging_default(
        Box::new(store),
        config.store.debug_logging,
    );
    let mut service = QuotaCapService::with_registry(registry, source)
        .with_max_attempts(config.generator.max_attempts);

    let generated = service.generate();

    let command = cli.command.unwrap_or(Command::Status {
        output: OutputFormat::Table,
    });

    match command {
        Command::Generate { retry } => {
            let mut success = generated;
            while retry && !success && service.can_retry() {
                success = service.immediate_retry();
            }
            print!(
                "{}",
                ConsoleFormatter::format_generation(
                    success,
                    service.status().len(),
                    service.retry_budget()
                )
            );
            if !success {
                bail!("Category generation failed");
            }
        }
        Command::Status { output } => {
            let status = service.status();
            match output {
                OutputFormat::Table => print!("{}", ConsoleFormatter::format_status(&status)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_status_json(&status)),
            }
        }
        Command::Clamp { value, category } => {
            let host = FixedActiveCategory::new(category.clone());
            let result = service.clamp_for_host(&host, value);
            print!(
                "{}",
                ConsoleFormatter::format_clamp(category.as_deref(), value, result)
            );
        }
        Command::Reset => {
            if !service.reset_all_to_defaults() {
                bail!("Failed to reset category configs");
            }
            print!("{}", ConsoleFormatter::format_status(&service.status()));
        }
        Command::SetCap { category, value } => {
            service
                .set_cap(&category, value)
                .with_context(|| format!("Failed to set cap of {}", category))?;
            print!("{}", ConsoleFormatter::format_status(&service.status()));
        }
        Command::Toggle { category, state } => {
            service
                .set_enabled(&category, state.is_on())
                .with_context(|| format!("Failed to toggle {}", category))?;
            print!("{}", ConsoleFormatter::format_status(&service.status()));
        }
        Command::Validate { value } => {
            let valid = service.validate_quota_value(value);
            print!("{}", ConsoleFormatter::format_validation(value, valid));
            if !valid {
                bail!("Invalid cap value: {}", value);
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// The `-v` count picks the level unless `RUST_LOG` is set. With
/// `--log-file`, events are mirrored to that file; the returned guard must
/// live until exit so buffered lines get flushed.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let Some(path) = &cli.log_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", path.display()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(Some(guard))
}
