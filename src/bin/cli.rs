use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use inventory_api_check::prelude::*;
use tracing_subscriber::EnvFilter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "inventory-check")]
#[command(about = "Run the inventory API scenario: register, login, add product, update quantity, verify", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a scenario YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the API under test (overrides config and INVENTORY_BASE_URL)
    #[arg(short, long, value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Username for the register and login steps
    #[arg(short, long)]
    username: Option<String>,

    /// Password for the register and login steps
    #[arg(short, long)]
    password: Option<String>,

    /// Quantity written by the update step and expected in the listing
    #[arg(short, long)]
    quantity: Option<i64>,

    /// Append a run-unique suffix to the product SKU
    #[arg(long)]
    unique_sku: bool,

    /// Print the outcome as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn log_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "inventory_api_check=debug"
    } else {
        "inventory_api_check=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(feature = "otel")]
fn init_otel_tracing(verbose: bool) -> anyhow::Result<()> {
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::runtime::Tokio;
    use opentelemetry_sdk::trace::TracerProvider;

    let otlp_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&otlp_endpoint)
        .build()?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, Tokio)
        .build();

    let tracer = provider.tracer("inventory-check");
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(otel_layer)
        .init();

    opentelemetry::global::set_tracer_provider(provider);
    Ok(())
}

#[cfg(not(feature = "otel"))]
fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    #[cfg(feature = "otel")]
    if let Err(e) = init_otel_tracing(cli.verbose) {
        eprintln!("Error: failed to initialise OpenTelemetry: {}", e);
        return ExitCode::from(2);
    }

    #[cfg(not(feature = "otel"))]
    init_tracing(cli.verbose);

    let result = run(cli).await;

    #[cfg(feature = "otel")]
    opentelemetry::global::shutdown_tracer_provider();

    match result {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Scenario could not start");
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Layer configuration: file, then environment, then command-line flags
fn resolve_config(cli: &Cli) -> anyhow::Result<RunnerConfig> {
    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    config.apply_env()?;

    if let Some(url) = &cli.base_url {
        config.web.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout_ms {
        config.web.timeout = timeout;
    }
    if let Some(username) = &cli.username {
        config.credentials.username = username.clone();
    }
    if let Some(password) = &cli.password {
        config.credentials.password = password.clone();
    }
    if let Some(quantity) = cli.quantity {
        config.new_quantity = quantity;
    }
    if cli.unique_sku {
        config.product.unique_sku = true;
    }

    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = resolve_config(&cli)?;
    let runner = ScenarioRunner::new(config)?;

    let outcome = runner.run().await;

    if cli.json {
        println!("{}", report::to_json(&outcome)?);
    } else {
        let stdout = std::io::stdout();
        report::render_text(&outcome, &mut stdout.lock())?;
    }

    Ok(outcome.success())
}
