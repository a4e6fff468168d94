//! Vigil CLI
//!
//! Command-line front end for the dashboard controller:
//! - One-shot refresh of the full dashboard
//! - Watch mode with auto-refresh
//! - Single-channel detail inspection
//! - Default config generation

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vigil::dashboard::{
    AutoRefresh, DashboardController, DashboardView, RefreshOutcome, TextView,
};
use vigil::proxy::{ChannelSelector, ProxyClient};
use vigil::validate::DateField;
use vigil::{Config, Severity};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Event monitoring dashboard for NVR event and channel analytics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path (default: standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start date (YYYY-MM-DD, default: allowed range start)
    #[arg(long, global = true)]
    start: Option<String>,

    /// End date (YYYY-MM-DD, default: allowed range end)
    #[arg(long, global = true)]
    end: Option<String>,

    /// Severity filter (all, critical, warn, info)
    #[arg(short, long, default_value = "all", global = true)]
    severity: Severity,

    /// Restrict to a single channel id
    #[arg(long, global = true)]
    channel: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch everything once and print the dashboard (default)
    Refresh,

    /// Keep refreshing on the configured interval until interrupted
    Watch,

    /// Show the detail view for one channel
    Channel {
        /// Numeric channel id
        id: String,
    },

    /// Print a default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    init_tracing(&config);

    if matches!(cli.command, Some(Commands::InitConfig)) {
        print!("{}", vigil::config::generate_default_config());
        return Ok(());
    }

    tracing::info!("Vigil dashboard controller v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(backend = %config.backend.base_url, "connecting to backend proxy");

    let backend = Arc::new(ProxyClient::new(config.proxy_config()));
    let controller = Arc::new(DashboardController::new(
        backend,
        config.dashboard_settings()?,
    ));
    let view = Arc::new(TextView::new());

    for notice in controller.bootstrap().await {
        view.render_status(&notice);
    }

    // Apply command-line selections on top of the bootstrapped defaults.
    if let Some(start) = &cli.start {
        for notice in controller.edit_date(DateField::Start, start).await {
            view.render_status(&notice);
        }
    }
    if let Some(end) = &cli.end {
        for notice in controller.edit_date(DateField::End, end).await {
            view.render_status(&notice);
        }
    }
    controller.set_severity(cli.severity).await;
    if let Some(channel) = &cli.channel {
        controller
            .set_channel(ChannelSelector::One(channel.clone()))
            .await;
    }

    match cli.command.unwrap_or(Commands::Refresh) {
        Commands::Refresh => {
            run_refresh(&controller, view.as_ref()).await;
        }
        Commands::Watch => {
            run_refresh(&controller, view.as_ref()).await;

            let auto = Arc::new(AutoRefresh::new(
                Arc::clone(&controller),
                config.refresh_config(),
            ));
            let (status, handle) = Arc::clone(&auto).start(view.clone());
            view.render_status(&status);

            tokio::signal::ctrl_c().await?;
            if let Some(status) = auto.stop().await {
                view.render_status(&status);
            }
            handle.abort();
        }
        Commands::Channel { id } => match controller.channel_detail(&id).await {
            Ok(detail) => view.render_channel_detail(&detail),
            Err(e) => {
                tracing::error!(channel = %id, category = %e.category, "channel detail failed");
                view.render_status(&vigil::StatusMessage::error(e.user_message, 7_000));
            }
        },
        Commands::InitConfig => unreachable!("handled above"),
    }

    Ok(())
}

/// Run one refresh cycle and draw the result
async fn run_refresh(controller: &DashboardController, view: &TextView) {
    match controller.refresh().await {
        RefreshOutcome::Completed(report) => {
            tracing::info!(
                cycle_id = %report.cycle_id,
                succeeded = report.succeeded,
                total = report.total,
                "refresh finished"
            );
            view.render(&controller.snapshot().await);
        }
        RefreshOutcome::Blocked(status) => view.render_status(&status),
        RefreshOutcome::AlreadyRunning => {}
    }
}

/// Initialize logging from the configuration
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vigil={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
