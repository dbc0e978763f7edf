//! CLI entry point for civic_data.
//!
//! Provides subcommands for deduplicating Philadelphia polling places and
//! summarising recent 311 service calls from OpenDataPhilly.

use anyhow::{Context, Result};
use chrono::Utc;
use civic_data::{
    calls::{
        FilterAction, FilterKind, FilterState, StatusClass, count_by_status, count_by_type,
        format_requested,
    },
    config::Settings,
    fetch::{BasicClient, HttpClient, auth::UrlParam, fetch_bytes},
    output::{append_counts, write_json},
    parser::{parse_calls, parse_precincts},
    polling::{
        AggregateOptions, DiagnosticsSink, DistanceWarning, KeyMode, TracingSink, aggregate_with,
        to_feature_collection,
    },
    services::carto::CartoClient,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "civic_data")]
#[command(about = "Fetch and reshape Philadelphia open data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deduplicate polling places and write them as GeoJSON
    PollingPlaces {
        /// Path to a GeoJSON file or URL to fetch (defaults to the Carto table)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// GeoJSON file to write
        #[arg(short, long, default_value = "polling_places.geojson")]
        output: String,

        /// Warn when a precinct lies farther than this from its polling place (metres)
        #[arg(short, long, default_value_t = civic_data::polling::aggregate::WARNING_RADIUS)]
        radius: f64,

        /// Group place names ignoring case and extra whitespace
        #[arg(long, default_value_t = false)]
        normalize_names: bool,
    },
    /// Count recent 311 calls by service type and status
    Calls {
        /// Path to a CSV export (fetches from Carto when omitted)
        #[arg(value_name = "FILE")]
        source: Option<String>,

        /// Calls per request
        #[arg(long, default_value_t = 200)]
        page_size: usize,

        /// Maximum number of pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Number of most recent calls to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Only keep calls of this service type
        #[arg(long)]
        call_type: Option<String>,

        /// Only keep calls with this status
        #[arg(long)]
        status: Option<String>,

        /// CSV file to append counts to
        #[arg(short, long, default_value = "call_counts.csv")]
        output: String,

        /// Log each filtered call
        #[arg(short, long, default_value_t = false)]
        list: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let settings = Settings::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = Path::new(&settings.log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&settings.log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("civic_data.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = http_client(&settings)?;

    match cli.command {
        Commands::PollingPlaces {
            source,
            output,
            radius,
            normalize_names,
        } => {
            let options = AggregateOptions {
                warning_radius_m: radius,
                key_mode: if normalize_names {
                    KeyMode::Normalized
                } else {
                    KeyMode::Exact
                },
            };
            polling_places(client, &settings, source, &output, &options).await?;
        }
        Commands::Calls {
            source,
            page_size,
            pages,
            offset,
            call_type,
            status,
            output,
            list,
        } => {
            let mut filter = FilterState::default();
            if let Some(value) = call_type {
                filter = filter.reduce(FilterAction::Toggle {
                    kind: FilterKind::CallType,
                    value,
                });
            }
            if let Some(value) = status {
                filter = filter.reduce(FilterAction::Toggle {
                    kind: FilterKind::Status,
                    value,
                });
            }

            let calls = match source {
                Some(path) => parse_calls(&fetcher(client.as_ref(), &path).await?)?,
                None => {
                    CartoClient::with_base_url(client, &settings.carto_base_url)
                        .fetch_all_service_calls(page_size, pages, offset)
                        .await?
                }
            };
            summarize_calls(&calls, &filter, &output, list)?;
        }
    }

    Ok(())
}

/// Anonymous client, or one that signs every request with the Carto key.
fn http_client(settings: &Settings) -> Result<Box<dyn HttpClient>> {
    let basic = BasicClient::new()?;
    let client: Box<dyn HttpClient> = match &settings.carto_api_key {
        Some(key) => Box::new(UrlParam::carto(basic, key.clone())),
        None => Box::new(basic),
    };
    Ok(client)
}

/// Loads data from a local file path or fetches it over HTTP.
#[tracing::instrument(skip_all, fields(source = %source))]
async fn fetcher(client: &dyn HttpClient, source: &str) -> Result<Vec<u8>> {
    let bytes = if source.starts_with("http") {
        fetch_bytes(client, source).await?
    } else {
        std::fs::read(source).with_context(|| format!("failed to read {source}"))?
    };
    Ok(bytes)
}

/// Fetches the precinct rows, folds them into polling places and writes
/// the result as GeoJSON.
#[tracing::instrument(skip_all, fields(output = %output))]
async fn polling_places(
    client: Box<dyn HttpClient>,
    settings: &Settings,
    source: Option<String>,
    output: &str,
    options: &AggregateOptions,
) -> Result<()> {
    let records = match source {
        Some(source) => parse_precincts(&fetcher(client.as_ref(), &source).await?)?,
        None => {
            CartoClient::with_base_url(client, &settings.carto_base_url)
                .fetch_polling_places()
                .await?
        }
    };

    let mut warnings: Vec<DistanceWarning> = Vec::new();
    let places = aggregate_with(&records, options, &mut warnings)?;

    let mut log = TracingSink;
    let flagged = warnings.len();
    for w in warnings {
        log.report(w);
    }

    info!(
        records = records.len(),
        places = places.len(),
        flagged,
        radius_m = options.warning_radius_m,
        "Polling places aggregated"
    );

    write_json(output, &to_feature_collection(&places))?;
    info!(output, "Polling places written");
    Ok(())
}

/// Applies the filter, counts by type and status, appends the counts and
/// optionally logs each call.
fn summarize_calls(
    calls: &[civic_data::calls::ServiceCall],
    filter: &FilterState,
    output: &str,
    list: bool,
) -> Result<()> {
    let filtered: Vec<_> = filter.apply(calls).into_iter().cloned().collect();
    let description = filter.describe();

    if filtered.is_empty() && filter.is_active() {
        warn!(filter = description.as_deref(), "No calls match the filter");
    }

    if list {
        for call in &filtered {
            let status = call.status_label();
            info!(
                service = call.service_label(),
                address = call.address.as_deref().unwrap_or("-"),
                requested = %call
                    .requested_datetime
                    .as_deref()
                    .map(format_requested)
                    .unwrap_or_default(),
                status,
                class = StatusClass::from_status(status).as_str(),
                "Call"
            );
        }
    }

    let by_type = count_by_type(&filtered);
    let by_status = count_by_status(&filtered);
    debug!(types = by_type.len(), statuses = by_status.len(), "Counted calls");

    let now = Utc::now();
    append_counts(output, "call_type", &by_type, description.as_deref(), now)?;
    append_counts(output, "status", &by_status, description.as_deref(), now)?;

    info!(
        total = calls.len(),
        shown = filtered.len(),
        filter = description.as_deref().unwrap_or("none"),
        output,
        "311 calls summarised"
    );
    Ok(())
}
