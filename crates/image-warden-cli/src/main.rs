// crates/image-warden-cli/src/main.rs
// ============================================================================
// Module: Image Warden CLI Entry Point
// Description: Batch audit runner for base-image compliance.
// Purpose: Wire telemetry, platform, catalog, and trigger collaborators into
//          one audited batch run with gated remediation.
// Dependencies: clap, image-warden-config, image-warden-core,
//               image-warden-providers, tracing-subscriber
// ============================================================================

//! ## Overview
//! The CLI runs one batch audit: it reads a telemetry export, normalizes and
//! evaluates every deploy record, dispatches remediation where the gates
//! allow, then writes a JSON report and prints an operator summary. Dry-run
//! is the default; live mode must be requested explicitly and requires
//! trigger credentials in configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod report;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use image_warden_config::WardenConfig;
use image_warden_core::BatchCoordinator;
use image_warden_core::PlatformValidator;
use image_warden_core::RecordSource;
use image_warden_core::RemediationDispatcher;
use image_warden_core::VersionResolver;
use image_warden_providers::AwsLookupConfig;
use image_warden_providers::AwsServiceLookup;
use image_warden_providers::BcpDeploymentLookup;
use image_warden_providers::BcpLookupConfig;
use image_warden_providers::ImageCatalogClient;
use image_warden_providers::ImageCatalogConfig;
use image_warden_providers::OtlpFileSource;
use image_warden_providers::PipelineTriggerClient;
use image_warden_providers::PipelineTriggerConfig;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Base-image compliance audit over one telemetry export.
#[derive(Parser, Debug)]
#[command(name = "image-warden", version)]
struct Cli {
    /// Path to the telemetry trace-export JSON file.
    #[arg(long)]
    input: PathBuf,

    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Branch remediation pipelines run against.
    #[arg(long, default_value = "main")]
    branch: String,

    /// Enable live mode; remediation triggers actually fire.
    #[arg(long, default_value_t = false)]
    live: bool,

    /// Directory batch reports are written into; overrides configuration.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level filter for diagnostic output on stderr.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Terminal CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes one batch audit run.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let config = WardenConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("configuration rejected: {err}")))?;
    if cli.live && !config.trigger.is_configured() {
        return Err(CliError::new(
            "live mode requires trigger.endpoint and trigger.token in configuration".to_string(),
        ));
    }

    let source = OtlpFileSource::new(cli.input);
    let records = source
        .records()
        .map_err(|err| CliError::new(format!("telemetry input rejected: {err}")))?;
    tracing::info!(count = records.len(), live = cli.live, "batch audit starting");

    let coordinator = build_coordinator(&config, cli.live, cli.branch.clone())?;
    let result = coordinator.run(&records);

    let output_dir = cli.output_dir.unwrap_or_else(|| config.report.output_dir.clone());
    let path = report::write_json_report(&result, &output_dir)
        .map_err(|err| CliError::new(err.to_string()))?;

    write_stdout_line(&report::render_summary(&result))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    write_stdout_line(&format!("report written to {}", path.display()))
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;

    if result.summary.trigger_failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Pipeline Wiring
// ============================================================================

/// Builds the batch coordinator from configuration.
fn build_coordinator(
    config: &WardenConfig,
    live: bool,
    branch: String,
) -> CliResult<
    BatchCoordinator<BcpDeploymentLookup, AwsServiceLookup, ImageCatalogClient, PipelineTriggerClient>,
> {
    let bcp = BcpDeploymentLookup::new(BcpLookupConfig {
        endpoint: config.bcp.endpoint.clone(),
        token: config.bcp.token.clone(),
        timeout_ms: config.bcp.timeout_ms,
    })
    .map_err(|err| CliError::new(format!("platform lookup setup failed: {err}")))?;

    let aws = AwsServiceLookup::new(AwsLookupConfig {
        endpoint: config.aws.endpoint.clone(),
        token: config.aws.token.clone(),
        cluster: config.aws.cluster.clone(),
        timeout_ms: config.aws.timeout_ms,
    })
    .map_err(|err| CliError::new(format!("service lookup setup failed: {err}")))?;

    let authority = ImageCatalogClient::new(ImageCatalogConfig {
        endpoint: config.authority.endpoint.clone(),
        timeout_ms: config.authority.timeout_ms,
        streams: config.authority.streams.clone(),
    })
    .map_err(|err| CliError::new(format!("catalog client setup failed: {err}")))?;

    let trigger = PipelineTriggerClient::new(PipelineTriggerConfig {
        endpoint: config.trigger.endpoint.clone(),
        token: config.trigger.token.clone(),
        timeout_ms: config.trigger.timeout_ms,
    })
    .map_err(|err| CliError::new(format!("trigger client setup failed: {err}")))?;

    let validator = PlatformValidator::new(bcp, aws, config.bcp.namespace.clone());
    let resolver = VersionResolver::new(authority);
    let dispatcher = RemediationDispatcher::new(trigger, live, branch);
    Ok(BatchCoordinator::new(validator, resolver, dispatcher))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Initializes stderr diagnostic output with the requested filter.
fn init_tracing(level: &str) -> CliResult<()> {
    let filter = EnvFilter::try_new(level)
        .map_err(|err| CliError::new(format!("invalid log level: {err}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| CliError::new(format!("logging setup failed: {err}")))?;
    Ok(())
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits a terminal error and maps it to a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
