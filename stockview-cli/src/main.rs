//! StockView CLI: one fetch, printed to stdout and written to disk.
//!
//! Commands:
//! - `fetch`: fetch a symbol, print key information and recent rows,
//!   write `{SYMBOL}_stock_data.csv`, optionally the chart JSON and the
//!   HTML download link

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockview_core::{
    run_cycle, DashboardConfig, DashboardRequest, DashboardView, MetricRow, PreviewTable,
    ViewOptions, YahooProvider,
};

const FETCH_FAILED: &str = "Failed to fetch data. Please check the stock symbol and try again.";

#[derive(Parser)]
#[command(
    name = "stockview-cli",
    about = "StockView CLI: fetch stock data and export the dashboard artifacts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one symbol and print its key information and recent rows.
    Fetch {
        /// Ticker symbol (e.g., AAPL).
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to the configured lookback before --end.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Directory the CSV is written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write the candlestick chart spec as JSON to this path.
        #[arg(long)]
        chart_json: Option<PathBuf>,

        /// Print the HTML download link with the CSV embedded as a data URI.
        #[arg(long, default_value_t = false)]
        link: bool,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            symbol,
            start,
            end,
            out_dir,
            chart_json,
            link,
            config,
        } => run_fetch(FetchArgs {
            symbol,
            start,
            end,
            out_dir,
            chart_json,
            link,
            config,
        }),
    }
}

struct FetchArgs {
    symbol: String,
    start: Option<String>,
    end: Option<String>,
    out_dir: PathBuf,
    chart_json: Option<PathBuf>,
    link: bool,
    config: Option<PathBuf>,
}

fn run_fetch(args: FetchArgs) -> Result<()> {
    let config = DashboardConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;

    let end = parse_date_arg("--end", args.end.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let start = parse_date_arg("--start", args.start.as_deref())?
        .unwrap_or_else(|| config.lookback_start(end));

    let request = DashboardRequest::new(&args.symbol, start, end);
    let provider =
        YahooProvider::new(config.provider.clone()).context("failed to build HTTP client")?;

    let view = run_cycle(&provider, &request, &ViewOptions::from(&config))
        .with_context(|| format!("{FETCH_FAILED} ({})", request.symbol))?;

    print_view(&view);

    let csv_path = view
        .csv
        .save_to(&args.out_dir)
        .with_context(|| format!("failed to write CSV into {}", args.out_dir.display()))?;
    info!(path = %csv_path.display(), rows = view.row_count, "csv written");
    println!("CSV saved to: {}", csv_path.display());

    if let Some(path) = &args.chart_json {
        let json = view.chart.to_json().context("failed to serialize chart")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write chart JSON to {}", path.display()))?;
        println!("Chart saved to: {}", path.display());
    }

    if args.link {
        println!("{}", view.csv.html_link());
    }

    Ok(())
}

fn parse_date_arg(flag: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid {flag} date '{s}' (expected YYYY-MM-DD)"))
        })
        .transpose()
}

fn print_view(view: &DashboardView) {
    let symbol = &view.request.symbol;
    println!("Key Information for {symbol}");
    print_metrics(&view.metrics);
    println!();

    println!(
        "Stock Price History for {symbol}: {} candles ({} to {})",
        view.chart.candles.len(),
        view.request.start,
        view.request.end
    );
    println!();

    println!("Recent Stock Data for {symbol}");
    print_preview(&view.preview);
    println!();
}

fn print_metrics(rows: &[MetricRow]) {
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        println!("  {:<width$}  {}", row.label, row.value);
    }
}

fn print_preview(table: &PreviewTable) {
    if table.is_empty() {
        println!("  (no trading days in range)");
        return;
    }

    // Column width = widest of header and cells.
    let widths: Vec<usize> = (0..table.headers.len())
        .map(|i| {
            table
                .rows
                .iter()
                .filter_map(|r| r.get(i))
                .chain(std::iter::once(&table.headers[i]))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("  {}", format_row(&table.headers, &widths));
    for row in &table.rows {
        println!("  {}", format_row(row, &widths));
    }
}

/// First column left-aligned, the rest right-aligned.
fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, w))| {
            if i == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
