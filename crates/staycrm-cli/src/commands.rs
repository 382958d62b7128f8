//! Subcommand implementations

use crate::{OutputFormat, TokenCommands};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use staycrm_client::{CrmClient, Resource, Snapshot, TokenStore};
use staycrm_core::{CallRecord, Config, Error, Result};
use staycrm_metrics::{
    DashboardSummary, DashboardView, MetricsParams, SummaryInput, write_call_history,
};
use std::path::Path;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

/// Lower bound for `dashboard --watch`
const MIN_WATCH_SECS: u64 = 5;

/// JSON shape of `dashboard --format json`
#[derive(Debug, Serialize)]
struct DashboardReport<'a> {
    fetched_at: DateTime<Utc>,
    mock_resources: Vec<&'static str>,
    summary: &'a DashboardSummary,
}

/// Print the dashboard once, or every `watch` seconds until Ctrl+C
pub(crate) async fn dashboard(
    config: &Config,
    format: OutputFormat,
    watch: Option<u64>,
) -> Result<()> {
    let client = CrmClient::from_config(config)?;
    let params = MetricsParams::from(&config.metrics);

    let Some(secs) = watch else {
        let output = fetch_and_render(&client, &params, format).await?;
        println!("{output}");
        return Ok(());
    };

    let period = Duration::from_secs(secs.max(MIN_WATCH_SECS));
    info!(interval_secs = period.as_secs(), "Watching dashboard. Press Ctrl+C to stop.");
    let ticker = tokio::time::interval(period);
    let (client, params) = (&client, &params);

    watch_loop(signal::ctrl_c(), ticker, || async move {
        match fetch_and_render(client, params, format).await {
            Ok(output) => println!("{output}"),
            Err(e) => error!(error = %e, "Dashboard refresh failed"),
        }
    })
    .await;
    Ok(())
}

/// Run `refresh` on every tick until `shutdown` resolves
///
/// `shutdown` is created once and also raced against a refresh in flight,
/// so a Ctrl+C during a slow fetch stops the loop immediately.
async fn watch_loop<S, F, Fut>(shutdown: S, mut ticker: tokio::time::Interval, mut refresh: F)
where
    S: Future,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Received Ctrl+C, stopping");
                return;
            }
            _ = ticker.tick() => {
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("Received Ctrl+C, stopping");
                        return;
                    }
                    () = refresh() => {}
                }
            }
        }
    }
}

/// Fetch the call log and write it to `output` as CSV
pub(crate) async fn export_calls(config: &Config, output: &Path) -> Result<()> {
    let client = CrmClient::from_config(config)?;
    let calls = client.fetch_all::<CallRecord>(Resource::Calls).await?;

    if calls.is_mock() {
        warn!("Call log unavailable; exporting sample data");
    }
    write_call_history(output, &calls.data, &Local)?;
    println!(
        "Exported {} calls to {}",
        calls.data.len(),
        output.display()
    );
    Ok(())
}

/// Manage the stored bearer token
pub(crate) async fn token(config: &Config, action: TokenCommands) -> Result<()> {
    let store = TokenStore::from_config(config.auth.token_path.as_deref())?;

    match action {
        TokenCommands::Set { value } => {
            if value.trim().is_empty() {
                return Err(Error::Validation {
                    field: "token".to_string(),
                    message: "token must not be empty".to_string(),
                });
            }
            store.save(&value).await?;
            println!("Token saved to {}", store.path().display());
        }
        TokenCommands::Clear => {
            store.clear().await?;
            println!("Token cleared");
        }
        TokenCommands::Show => match store.load().await? {
            Some(token) => println!("{} ({})", mask_token(&token), store.path().display()),
            None => println!("No token stored ({})", store.path().display()),
        },
    }
    Ok(())
}

/// Print the resolved configuration
pub(crate) fn config(config: &Config, show: bool) -> Result<()> {
    if show {
        println!("{}", config_toml(config)?);
    } else {
        config.check()?;
        println!("Configuration is valid");
    }
    Ok(())
}

async fn fetch_and_render(
    client: &CrmClient,
    params: &MetricsParams,
    format: OutputFormat,
) -> Result<String> {
    let snapshot = client.fetch_snapshot().await?;
    if snapshot.any_mock() {
        warn!(resources = ?mock_names(&snapshot), "Using sample data for unreachable endpoints");
    }
    render(&snapshot, params, &Local::now(), format)
}

/// Summarise `snapshot` and format it for output
pub(crate) fn render<Tz: TimeZone>(
    snapshot: &Snapshot,
    params: &MetricsParams,
    now: &DateTime<Tz>,
    format: OutputFormat,
) -> Result<String> {
    let summary = summarize(snapshot, params, now);
    match format {
        OutputFormat::Table => {
            let view = DashboardView::from_summary(&summary);
            Ok(match mock_notice(snapshot) {
                Some(notice) => view.with_notice(notice),
                None => view,
            }
            .to_string())
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&DashboardReport {
            fetched_at: snapshot.fetched_at,
            mock_resources: mock_names(snapshot),
            summary: &summary,
        })?),
    }
}

pub(crate) fn summarize<Tz: TimeZone>(
    snapshot: &Snapshot,
    params: &MetricsParams,
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let input = SummaryInput {
        leads: &snapshot.leads.data,
        calls: &snapshot.calls.data,
        bookings: &snapshot.bookings.data,
        stats: snapshot.stats.data.as_ref(),
    };
    DashboardSummary::compute(&input, params, now)
}

/// Warning line for resources answered from sample data
pub(crate) fn mock_notice(snapshot: &Snapshot) -> Option<String> {
    let names = mock_names(snapshot);
    (!names.is_empty()).then(|| format!("Showing sample data for: {}", names.join(", ")))
}

fn mock_names(snapshot: &Snapshot) -> Vec<&'static str> {
    snapshot
        .mock_resources()
        .into_iter()
        .map(Resource::name)
        .collect()
}

fn config_toml(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| Error::Configuration {
        message: format!("Failed to serialize configuration: {e}"),
    })
}

/// First and last four characters, the rest elided
pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{head}…{tail}")
}
