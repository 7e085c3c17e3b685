//! wattline: data core for a workshop energy-monitoring dashboard.
//!
//! Fetches machine telemetry from the plant's REST backend, reconstructs
//! each machine's continuous OFF/ON/PRODUCTION timeline over a working-day
//! window, and shapes the result for the dashboard's step chart, workshop
//! timeline and printable daily report.

pub mod api;
pub mod charts;
pub mod live;
pub mod models;
pub mod report;
pub mod settings;
pub mod timeline;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use api::BackendClient;
use live::{live_loop, LiveMonitor};
use settings::SettingsStore;

/// Run the headless monitor: poll live status until interrupted, logging a
/// daily summary on the way up.
pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("wattline starting up...");

    let settings_path = std::env::var_os("WATTLINE_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("wattline.json"));
    let settings = SettingsStore::new(settings_path)?;

    let client = BackendClient::new(settings.backend().base_url)?;
    if let Some(session) = settings.session() {
        log::info!("restoring session for {}", session.username);
        client.set_token(session.token);
    }

    let machines = client.machines().await?;
    log::info!("monitoring {} machines", machines.len());

    let today = Utc::now().date_naive();
    match report::build_daily_report(&client, &machines, today).await {
        Ok(daily) => log::info!(
            "today so far: {:.2} kWh, Rs {:.2}",
            daily.total_energy_kwh,
            daily.total_cost
        ),
        Err(err) => log::warn!("daily report unavailable: {err:#}"),
    }

    let monitor = LiveMonitor::new();
    let cancel_token = CancellationToken::new();
    let machine_ids: Vec<i64> = machines.iter().map(|m| m.id).collect();
    let poller = tokio::spawn(live_loop(
        client.clone(),
        monitor.clone(),
        machine_ids,
        cancel_token.clone(),
    ));

    tokio::signal::ctrl_c().await?;
    log::info!("shutting down");
    cancel_token.cancel();
    poller.await?;

    let snapshot = monitor.snapshot().await;
    log::info!(
        "{} polls completed, {} failed",
        snapshot.poll_count,
        snapshot.failed_polls
    );

    Ok(())
}
