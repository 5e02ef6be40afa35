//! Command implementations for the PX processor CLI
//!
//! This module contains the command execution logic, configuration layering,
//! logging setup and the colored summaries printed after each command.

use crate::app::services::batch::{BatchProcessor, BatchSummary};
use crate::app::services::export::write_output;
use crate::app::services::fetcher::Fetcher;
use crate::app::services::language_resolver::LanguagePolicy;
use crate::app::services::px_parser::{ParseResult, PxParser};
use crate::cli::args::{Args, BatchArgs, Commands, CommonArgs, InspectArgs, ParseArgs};
use crate::config::Config;
use crate::{Error, Result};
use anyhow::Context;
use colored::*;
use serde_json::{Value, json};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Main command runner for the PX processor
///
/// Sets up logging, layers the configuration and dispatches to the
/// subcommand handler. Cancellation aborts in-flight fetches and batches.
pub async fn run(args: Args, cancellation: CancellationToken) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        anyhow::bail!("No command given");
    };

    setup_logging(command.common())?;
    info!("Starting PX processor");
    debug!("Command line arguments: {:?}", command);

    let config = load_configuration(&command).context("Invalid configuration")?;
    debug!("Loaded configuration: {:?}", config);

    match command {
        Commands::Parse(parse_args) => run_parse(&parse_args, &config, &cancellation).await,
        Commands::Inspect(inspect_args) => {
            run_inspect(&inspect_args, &config, &cancellation).await
        }
        Commands::Batch(batch_args) => run_batch(&batch_args, &config, &cancellation).await,
    }
}

/// Set up structured logging on stderr
fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("px_processor={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialize logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Defaults, config file and environment, then command-line flags
fn load_configuration(command: &Commands) -> Result<Config> {
    let common = command.common();
    match command {
        Commands::Parse(args) => args.validate()?,
        Commands::Inspect(_) => common.validate()?,
        Commands::Batch(args) => args.validate()?,
    }

    let mut config = Config::load_layered(common.config_file.as_deref())?;
    apply_cli_overrides(&mut config, command)?;
    config.validate()?;
    Ok(config)
}

/// Apply command-line flags on top of the layered configuration
pub fn apply_cli_overrides(config: &mut Config, command: &Commands) -> Result<()> {
    let common = command.common();

    if let Some(language) = &common.language {
        config.parsing.language = Some(language.clone());
    }
    if common.lenient {
        config.parsing.language_policy = LanguagePolicy::Lenient;
    }
    if let Some(null_pattern) = &common.null_pattern {
        config.parsing.null_pattern = null_pattern.clone();
    }
    if let Some(sd_pattern) = &common.sd_pattern {
        config.parsing.sd_pattern = sd_pattern.clone();
    }
    if let Some(encoding) = &common.encoding {
        config.fetch.encoding = encoding.clone();
    }
    if let Some(timeout) = common.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if common.no_verify {
        config.fetch.verify_tls = false;
    }
    if let Some(ca_cert) = &common.ca_cert {
        config.fetch.ca_certificate = Some(ca_cert.clone());
    }
    for (name, value) in common.parse_headers()? {
        config.fetch.headers.insert(name, value);
    }

    match command {
        Commands::Parse(args) => {
            if let Some(format) = args.format {
                config.output.format = format;
            }
            if let Some(separator) = args.separator {
                config.output.separator = u8::try_from(separator).map_err(|_| {
                    Error::configuration(format!("Separator must be ASCII, got '{}'", separator))
                })?;
            }
            config.output.force_overwrite |= args.force_overwrite;
        }
        Commands::Batch(args) => {
            if let Some(format) = args.format {
                config.output.format = format;
            }
            if let Some(workers) = args.workers {
                config.performance.workers = workers;
            }
            if let Some(output_dir) = &args.output_dir {
                config.output.output_dir = Some(output_dir.clone());
            }
            config.output.force_overwrite |= args.force_overwrite;
        }
        Commands::Inspect(_) => {}
    }

    Ok(())
}

/// Fetch and parse one document, aborting on cancellation
async fn fetch_and_parse(
    uri: &str,
    config: &Config,
    cancellation: &CancellationToken,
) -> Result<ParseResult> {
    let fetcher = Fetcher::new(&config.fetch)?;
    let parser = PxParser::new(&config.parsing)?;

    tokio::select! {
        result = parser.parse_uri(&fetcher, uri) => result,
        _ = cancellation.cancelled() => Err(Error::processing_interrupted(
            format!("Parsing of {} cancelled", uri)
        )),
    }
}

async fn run_parse(
    args: &ParseArgs,
    config: &Config,
    cancellation: &CancellationToken,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let result = fetch_and_parse(&args.uri, config, cancellation)
        .await
        .with_context(|| format!("Failed to parse {}", args.uri))?;

    if let Some(output) = &args.output {
        write_output(&result.px, output, &config.output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {:?} output to {}", config.output.format, output.display());
    }

    if !args.common.quiet {
        print_parse_summary(&args.uri, &result, args.output.as_deref(), start);
    }
    Ok(())
}

async fn run_inspect(
    args: &InspectArgs,
    config: &Config,
    cancellation: &CancellationToken,
) -> anyhow::Result<()> {
    let result = fetch_and_parse(&args.uri, config, cancellation)
        .await
        .with_context(|| format!("Failed to inspect {}", args.uri))?;
    let report = inspect_report(&result, args.translations);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_inspect_report(&args.uri, &result, args.translations);
    }
    Ok(())
}

async fn run_batch(
    args: &BatchArgs,
    config: &Config,
    cancellation: &CancellationToken,
) -> anyhow::Result<()> {
    let processor = BatchProcessor::new(config)?.with_progress(args.common.show_progress());
    let output_dir = config.output.output_dir.as_deref();

    let summary = tokio::select! {
        summary = processor.process_directory(&args.input_dir, output_dir) => {
            summary.with_context(|| format!("Batch over {} failed", args.input_dir.display()))?
        }
        _ = cancellation.cancelled() => {
            return Err(Error::processing_interrupted("Batch processing cancelled").into());
        }
    };

    if !args.common.quiet {
        print_batch_summary(&summary);
    }
    Ok(())
}

/// Machine-readable description of a parsed document
pub fn inspect_report(result: &ParseResult, include_translations: bool) -> Value {
    let px = &result.px;
    let dimensions: Vec<Value> = px
        .dimensions
        .iter()
        .map(|dimension| {
            json!({
                "name": dimension.name,
                "members": dimension.members,
                "codes": dimension.codes,
            })
        })
        .collect();

    let mut report = json!({
        "title": px.title(),
        "attributes": px.metadata.keys().collect::<Vec<_>>(),
        "dimensions": dimensions,
        "stats": result.stats,
    });

    if let Some(multilingual) = &px.multilingual {
        report["languages"] = json!({
            "declared": multilingual.languages,
            "default": multilingual.default_language,
            "requested": multilingual.requested_language,
        });
        if include_translations {
            report["translations"] = json!(multilingual.translation_map);
        }
    }

    report
}

fn print_parse_summary(
    uri: &str,
    result: &ParseResult,
    output: Option<&std::path::Path>,
    start: Instant,
) {
    let stats = &result.stats;
    println!("\n{}", "Parse Summary".bright_green().bold());
    println!("  {} {}", "Document:".bright_cyan(), uri.bright_white());
    if let Some(title) = result.px.title() {
        println!("  {} {}", "Title:".bright_cyan(), title.bright_white());
    }
    println!(
        "  {} {} ({})",
        "Dimensions:".bright_cyan(),
        stats.dimensions.to_string().bright_white(),
        result.px.table.dimension_names.join(", ")
    );
    println!(
        "  {} {}",
        "Rows:".bright_cyan(),
        stats.rows.to_string().bright_white().bold()
    );
    if stats.missing_values + stats.disclosed_values > 0 {
        println!(
            "  {} {} missing, {} disclosed ({:.1}% filled)",
            "Special values:".bright_yellow(),
            stats.missing_values,
            stats.disclosed_values,
            stats.fill_rate()
        );
    }
    if let Some(output) = output {
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            output.display().to_string().bright_white()
        );
    }
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        start.elapsed().as_millis().to_string().bright_white()
    );
}

fn print_inspect_report(uri: &str, result: &ParseResult, include_translations: bool) {
    let px = &result.px;
    println!("\n{} {}", "Document".bright_green().bold(), uri.bright_white());
    if let Some(title) = px.title() {
        println!("  {} {}", "Title:".bright_cyan(), title);
    }

    if let Some(multilingual) = &px.multilingual {
        println!(
            "  {} {} (default {}, showing {})",
            "Languages:".bright_cyan(),
            multilingual.languages.join(", "),
            multilingual.default_language.bright_white(),
            multilingual.requested_language.bright_white().bold()
        );
    }

    println!("\n{}", "Metadata".bright_green().bold());
    for (name, value) in px.metadata.iter() {
        println!("  {} {}", format!("{}:", name).bright_cyan(), value.joined(", "));
    }

    println!("\n{}", "Dimensions".bright_green().bold());
    for dimension in &px.dimensions {
        println!(
            "  {} {} members",
            dimension.name.bright_white().bold(),
            dimension.len()
        );
        for index in 0..dimension.len() {
            let label = &dimension.members[index];
            match dimension.codes.as_ref().and_then(|codes| codes.get(index)) {
                Some(code) => println!("    {} {}", code.bright_yellow(), label),
                None => println!("    {}", label),
            }
        }
    }

    if include_translations {
        if let Some(multilingual) = &px.multilingual {
            println!("\n{}", "Translations".bright_green().bold());
            for (field, translations) in &multilingual.translation_map {
                println!("  {}", field.bright_white().bold());
                for (language, value) in translations {
                    println!("    {} {}", format!("[{}]", language).bright_yellow(), value.joined(", "));
                }
            }
        }
    }

    println!(
        "\n  {} {} rows, {:.1}% filled",
        "Table:".bright_cyan(),
        result.stats.rows.to_string().bright_white().bold(),
        result.stats.fill_rate()
    );
}

fn print_batch_summary(summary: &BatchSummary) {
    println!("\n{}", "Batch Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.duration.as_millis().to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        summary.succeeded().to_string().bright_white()
    );
    if summary.failed() > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            summary.failed().to_string().bright_red().bold()
        );
        for failure in summary.failures() {
            if let Err(e) = &failure.result {
                println!("    {} {}", failure.input.display().to_string().red(), e);
            }
        }
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        summary.total_rows().to_string().bright_white().bold()
    );
}
