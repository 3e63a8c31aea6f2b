//! Terminal rendition of the dashboard.
//!
//! ```bash
//! RUST_LOG=marketiq=debug cargo run --example terminal_dashboard -- MSFT
//! ```
//!
//! Reads `.env` and the `MARKETIQ_*` variables. Press Ctrl-C to quit; pass
//! `--toggle-theme` to flip the persisted theme before starting.

use marketiq::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), SdkError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let toggle = args.iter().any(|a| a == "--toggle-theme");
    let ticker_arg = args.iter().find(|a| !a.starts_with("--"));

    let config = DashboardConfig::from_env()?;
    tracing::info!(?config, "Starting dashboard");

    let theme = ThemeFlag::load(config.file_store(), SharedMarker::new());
    let mut dashboard = Dashboard::new(config.client()?, theme, DashboardOptions::from(&config));

    if toggle {
        let theme = dashboard.toggle_theme()?;
        println!("Theme is now {theme}");
    }

    match ticker_arg {
        Some(raw) => {
            if dashboard.set_ticker(raw).is_none() {
                println!("Blank ticker, nothing to poll");
            }
        }
        None => dashboard.start(),
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = dashboard.next_update() => {
                let Some(state) = update else { break };
                if state.loading {
                    continue;
                }
                render(&dashboard);
            }
        }
    }

    dashboard.shutdown();
    Ok(())
}

fn render<S, K, M>(dashboard: &Dashboard<S, K, M>)
where
    S: QuoteSource + Send + Sync + 'static,
    K: KeyValueStore,
    M: PresentationMarker,
{
    let state = dashboard.state();
    let ticker = state
        .ticker
        .as_ref()
        .map(Ticker::to_string)
        .unwrap_or_else(|| "-".to_string());
    let updated = state
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();

    println!("\nMarketIQ  {ticker}  [{}]  {updated}", state.theme);
    match dashboard.view() {
        DashboardView::Ready { chart, table } => {
            if let Some(latest) = state.series.as_ref().and_then(|s| s.latest_close()) {
                let close = latest.close.map(|c| c.to_string()).unwrap_or_default();
                println!("{}: {} at {}", chart.data.datasets[0].label, close, latest.label);
            }
            print!("{}", table.to_text());
        }
        placeholder => {
            if let Some(error) = &state.last_error {
                println!("Fetch failed: {error}");
            }
            println!("{}", placeholder.placeholder().unwrap_or_default());
        }
    }
}
