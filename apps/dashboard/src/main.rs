use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_api_base, load_settings, DashboardSnapshot, HttpOrderApi,
    OrderSyncController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(about = "Exhibitor order dashboard")]
struct Args {
    /// Overrides the configured backend base url.
    #[arg(long, global = true)]
    api_base: Option<String>,
    /// Print snapshots as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the exhibitors that can sign in.
    Exhibitors,
    /// Sign in as an exhibitor and follow their orders until Ctrl-C.
    Watch {
        #[arg(long)]
        exhibitor: String,
        /// Sync once, print, and exit.
        #[arg(long)]
        once: bool,
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load dashboard settings")?;
    if let Some(api_base) = &args.api_base {
        settings.api_base = normalize_api_base(api_base)?;
    }

    match args.command {
        Command::Exhibitors => {
            print!("{}", render::ExhibitorList);
            Ok(())
        }
        Command::Watch {
            exhibitor,
            once,
            interval_secs,
        } => {
            if let Some(secs) = interval_secs {
                settings.refresh_interval = Duration::from_secs(secs);
            }
            info!(api_base = %settings.api_base, "starting dashboard");

            let api = HttpOrderApi::new(settings.api_base.clone(), settings.request_timeout)
                .context("failed to build http client")?;
            let controller = OrderSyncController::init(Arc::new(api), &settings);

            if controller.select_exhibitor(&exhibitor).await.is_none() {
                bail!("unknown exhibitor '{exhibitor}'; run `dashboard exhibitors` for the list");
            }
            controller.confirm_login().await;
            print_snapshot(&controller.snapshot().await, args.json)?;

            if once {
                controller.sign_out().await;
                return Ok(());
            }

            watch_until_interrupted(&controller, args.json).await?;
            controller.teardown().await;
            Ok(())
        }
    }
}

async fn watch_until_interrupted(controller: &OrderSyncController, json: bool) -> Result<()> {
    let mut updates = controller.subscribe();
    let mut last_printed = updates.borrow_and_update().last_sync;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for ctrl-c")?;
                info!("interrupted; signing out");
                controller.sign_out().await;
                return Ok(());
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = updates.borrow_and_update().clone();
                if snapshot.last_sync != last_printed {
                    last_printed = snapshot.last_sync;
                    print_snapshot(&snapshot, json)?;
                }
            }
        }
    }
}

fn print_snapshot(snapshot: &DashboardSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
    } else {
        print!("{}", render::DashboardView(snapshot));
    }
    Ok(())
}
