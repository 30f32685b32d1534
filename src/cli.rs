//! CLI definition and dispatch.

use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::static_data_adapter::StaticDataAdapter;
use crate::adapters::text_report;
use crate::domain::config_validation::{non_empty, parse_key, validate_app_config, validate_holdings};
use crate::domain::error::PortfolioError;
use crate::domain::holding::Holding;
use crate::domain::quote::{Quote, QuoteBook, perturb_quote};
use crate::domain::sector::{aggregate_by_sector, sector_names};
use crate::domain::settings::{AppConfig, DataSource, LogFormat};
use crate::domain::snapshot::{MarketSnapshot, iso_timestamp};
use crate::domain::summary::PortfolioSummary;
use crate::domain::valuation::enrich_holdings;
use crate::logging::init_tracing;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PortfolioDataPort;
use crate::refresher::{market_channel, start_price_refresher};

#[derive(Parser, Debug)]
#[command(name = "portfolio-tracker", about = "Portfolio dashboard with simulated live prices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API and dashboard
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Overrides PORT and the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the portfolio grouped by sector
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the portfolio and reprint it after every simulated refresh
    Watch {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Refresh interval in seconds, overriding the config file
        #[arg(short, long)]
        interval: Option<u64>,
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Fetch one simulated quote
    Quote {
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate the config file and portfolio data
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { config, port } => with_portfolio(config.as_ref(), |mut app, holdings, quotes| {
            if let Some(port) = port {
                app.port = port;
            }
            run_serve(app, holdings, quotes)
        }),
        Command::Show { config } => with_portfolio(config.as_ref(), run_show),
        Command::Watch {
            config,
            interval,
            ticks,
        } => with_portfolio(config.as_ref(), |mut app, holdings, quotes| {
            if let Some(secs) = interval.filter(|s| *s > 0) {
                app.refresh_interval = Duration::from_secs(secs);
            }
            run_watch(app, holdings, quotes, ticks)
        }),
        Command::Quote { symbol, config } => {
            with_portfolio(config.as_ref(), |app, _holdings, quotes| {
                run_quote(&app, &quotes, &symbol)
            })
        }
        Command::Validate { config } => {
            with_portfolio(config.as_ref(), |app, holdings, quotes| {
                run_validate(&app, &holdings, &quotes)
            })
        }
    }
}

fn fail(err: &PortfolioError) -> ExitCode {
    error!("{err}");
    err.into()
}

/// Read the config file, or start from defaults when none is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, PortfolioError> {
    match path {
        None => Ok(FileConfigAdapter::empty()),
        Some(path) => FileConfigAdapter::from_file(path).map_err(|e| PortfolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Resolve settings from the config file plus the `PORT` override.
pub fn build_app_config(
    config: &dyn ConfigPort,
    port_env: Option<&str>,
) -> Result<AppConfig, PortfolioError> {
    validate_app_config(config)?;
    let defaults = AppConfig::default();

    let port = match non_empty(port_env.map(str::to_string)) {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| {
                PortfolioError::invalid_config("env", "PORT", format!("cannot use {raw:?} as a port"))
            })?,
        None => parse_key::<u16>(config, "server", "port")?.unwrap_or(defaults.port),
    };

    let data_source = match (
        non_empty(config.get_string("data", "holdings_csv")),
        non_empty(config.get_string("data", "quotes_csv")),
    ) {
        (Some(holdings), Some(quotes)) => DataSource::Csv {
            holdings: PathBuf::from(holdings.trim()),
            quotes: PathBuf::from(quotes.trim()),
        },
        _ => DataSource::BuiltIn,
    };

    Ok(AppConfig {
        host: non_empty(config.get_string("server", "host"))
            .map(|h| h.trim().to_string())
            .unwrap_or(defaults.host),
        port,
        refresh_interval: parse_key::<u64>(config, "market", "refresh_interval_secs")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval),
        max_fluctuation: parse_key::<f64>(config, "market", "max_fluctuation_pct")?
            .map(|pct| pct / 100.0)
            .unwrap_or(defaults.max_fluctuation),
        seed: parse_key::<u64>(config, "market", "seed")?,
        data_source,
        log_level: non_empty(config.get_string("logging", "level"))
            .unwrap_or(defaults.log_level),
        log_format: config
            .get_string("logging", "format")
            .and_then(|f| LogFormat::parse(&f))
            .unwrap_or_default(),
    })
}

/// Load the config file and resolve settings. Relative data paths are taken
/// from the config file's directory.
pub fn load_app_config(
    path: Option<&PathBuf>,
    port_env: Option<&str>,
) -> Result<AppConfig, PortfolioError> {
    let config = load_config(path)?;
    let mut app = build_app_config(&config, port_env)?;
    if let Some(dir) = path.and_then(|p| p.parent()) {
        app.data_source = app.data_source.relative_to(dir);
    }
    Ok(app)
}

pub fn data_port_for(source: &DataSource) -> Box<dyn PortfolioDataPort> {
    match source {
        DataSource::BuiltIn => Box::new(StaticDataAdapter::new()),
        DataSource::Csv { holdings, quotes } => {
            Box::new(CsvAdapter::new(holdings.clone(), quotes.clone()))
        }
    }
}

/// Load and cross-check holdings against their baseline quotes.
pub fn load_portfolio(
    port: &dyn PortfolioDataPort,
) -> Result<(Vec<Holding>, QuoteBook), PortfolioError> {
    let holdings = port.load_holdings()?;
    let quotes = port.load_quotes()?;
    validate_holdings(&holdings, &quotes)?;
    info!(
        source = %port.describe(),
        holdings = holdings.len(),
        quotes = quotes.len(),
        "portfolio loaded"
    );
    Ok((holdings, quotes))
}

pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Shared start-up: config, logging, data. Runs `body` on success.
fn with_portfolio<F>(config_path: Option<&PathBuf>, body: F) -> ExitCode
where
    F: FnOnce(AppConfig, Vec<Holding>, QuoteBook) -> ExitCode,
{
    let app = match load_app_config(config_path, std::env::var("PORT").ok().as_deref()) {
        Ok(app) => app,
        Err(e) => {
            init_tracing("info", LogFormat::Text);
            return fail(&e);
        }
    };
    init_tracing(&app.log_level, app.log_format);
    if let Some(path) = config_path {
        info!("Loaded config from {}", path.display());
    }

    let port = data_port_for(&app.data_source);
    match load_portfolio(port.as_ref()) {
        Ok((holdings, quotes)) => body(app, holdings, quotes),
        Err(e) => fail(&e),
    }
}

/// Value the portfolio against one snapshot and lay it out as text.
pub fn render_portfolio(
    holdings: &[Holding],
    snapshot: &MarketSnapshot,
    refresh_secs: u64,
) -> Result<String, PortfolioError> {
    let enriched = enrich_holdings(holdings, &snapshot.quotes)?;
    let summary = PortfolioSummary::compute(&enriched, snapshot.as_of);
    let sectors = aggregate_by_sector(&enriched);
    Ok(text_report::format_portfolio(&summary, &sectors, refresh_secs))
}

fn run_show(app: AppConfig, holdings: Vec<Holding>, quotes: QuoteBook) -> ExitCode {
    let snapshot = MarketSnapshot::initial(quotes, Utc::now());
    match render_portfolio(&holdings, &snapshot, app.refresh_interval.as_secs()) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Print the portfolio, then reprint after each refresh until Ctrl-C or
/// `ticks` refreshes. A failed render is logged and the previous output
/// stands.
pub async fn watch_portfolio(
    app: &AppConfig,
    holdings: &[Holding],
    quotes: QuoteBook,
    ticks: Option<u64>,
    out: &mut dyn Write,
) -> Result<(), PortfolioError> {
    let refresh_secs = app.refresh_interval.as_secs();
    let (market, mut updates) = market_channel(MarketSnapshot::initial(quotes, Utc::now()));

    let first = updates.borrow_and_update().clone();
    writeln!(out, "{}", render_portfolio(holdings, &first, refresh_secs)?)?;

    if ticks == Some(0) {
        return Ok(());
    }

    let refresher = start_price_refresher(
        market,
        app.refresh_interval,
        app.max_fluctuation,
        make_rng(app.seed),
    );

    let mut shown: u64 = 0;
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                match render_portfolio(holdings, &snapshot, refresh_secs) {
                    Ok(text) => writeln!(out, "{text}")?,
                    Err(e) => warn!(error = %e, "refresh failed, keeping previous view"),
                }
                shown += 1;
                if ticks.is_some_and(|t| shown >= t) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    refresher.stop().await;
    Ok(())
}

fn run_watch(app: AppConfig, holdings: Vec<Holding>, quotes: QuoteBook, ticks: Option<u64>) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => return fail(&PortfolioError::Io(e)),
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match runtime.block_on(watch_portfolio(&app, &holdings, quotes, ticks, &mut out)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

/// One simulated lookup: the baseline quote with a single fluctuation.
pub fn simulate_quote(
    quotes: &QuoteBook,
    symbol: &str,
    max_change: f64,
    rng: &mut StdRng,
) -> Result<Quote, PortfolioError> {
    let base = quotes.get(symbol).ok_or_else(|| PortfolioError::StockNotFound {
        symbol: symbol.to_string(),
    })?;
    Ok(perturb_quote(base, max_change, rng))
}

fn run_quote(app: &AppConfig, quotes: &QuoteBook, symbol: &str) -> ExitCode {
    let mut rng = make_rng(app.seed);
    match simulate_quote(quotes, symbol, app.max_fluctuation, &mut rng) {
        Ok(quote) => {
            println!("{}", text_report::format_quote(&quote, &iso_timestamp(Utc::now())));
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_validate(app: &AppConfig, holdings: &[Holding], quotes: &QuoteBook) -> ExitCode {
    println!("Configuration is valid");
    println!("  listen:    {}", app.listen_addr());
    println!(
        "  refresh:   every {}s, up to ±{:.2}%",
        app.refresh_interval.as_secs(),
        app.max_fluctuation * 100.0
    );
    println!("  holdings:  {}", holdings.len());
    println!("  quotes:    {}", quotes.len());
    println!("  sectors:   {}", sector_names(holdings).join(", "));
    ExitCode::SUCCESS
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

/// Run the HTTP server until Ctrl-C, then stop the refresher.
#[cfg(feature = "web")]
pub async fn serve(app: AppConfig, holdings: Vec<Holding>, quotes: QuoteBook) -> Result<(), PortfolioError> {
    use crate::adapters::web::{AppState, build_router};

    let (market, updates) = market_channel(MarketSnapshot::initial(quotes, Utc::now()));
    let refresher = start_price_refresher(
        market,
        app.refresh_interval,
        app.max_fluctuation,
        make_rng(app.seed),
    );

    let state = AppState {
        holdings: holdings.into(),
        market: updates,
        refresh_interval: app.refresh_interval,
    };
    let router = build_router(state);

    let listener = match tokio::net::TcpListener::bind(app.listen_addr()).await {
        Ok(l) => l,
        Err(e) => {
            refresher.stop().await;
            return Err(e.into());
        }
    };
    info!("Server is running on port {}", app.port);
    info!("API available at http://localhost:{}/api", app.port);

    let served = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    refresher.stop().await;
    served.map_err(PortfolioError::from)
}

fn run_serve(app: AppConfig, holdings: Vec<Holding>, quotes: QuoteBook) -> ExitCode {
    #[cfg(feature = "web")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => return fail(&PortfolioError::Io(e)),
        };
        match runtime.block_on(serve(app, holdings, quotes)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(&e),
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (app, holdings, quotes);
        error!("web feature is required for serve");
        ExitCode::from(1)
    }
}

