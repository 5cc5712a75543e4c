//! `dashctl`: the dashboard views as plain-text terminal tables.
//!
//! Builds the same services as the server from the same environment and
//! prints one view per invocation.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use mtm_dashboard::app_state::AppState;
use mtm_dashboard::config::DashboardConfig;
use mtm_dashboard::domain::rows::{RowError, TxLink};
use mtm_dashboard::domain::{
    BalanceSnapshot, ConversionListsView, ConversionRow, DownloadsView, EthConversionRow,
    ListSnapshot, OverviewView, ReleaseSnapshot,
};
use mtm_dashboard::logging;
use mtm_dashboard::service::ConversionList;
use mtm_dashboard::util::clipboard::{CopyMethod, copy_to_clipboard};

#[derive(Debug, Parser)]
#[command(name = "dashctl", version, about = "MTM to NYM dashboard in the terminal")]
struct Cli {
    /// Log level or EnvFilter directives for diagnostics on stderr.
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stat cards, monthly trend, balances and recent conversions.
    Overview,
    /// All conversions.
    Transactions {
        /// Page of the MTM → NYM list.
        #[arg(long, default_value_t = 1)]
        mtm_page: u32,
        /// Page of the ETH → NYM list.
        #[arg(long, default_value_t = 1)]
        eth_page: u32,
    },
    /// Failed conversions only.
    Failed {
        /// Page of the MTM → NYM list.
        #[arg(long, default_value_t = 1)]
        mtm_page: u32,
        /// Page of the ETH → NYM list.
        #[arg(long, default_value_t = 1)]
        eth_page: u32,
    },
    /// Service wallet balances.
    Balances,
    /// App download statistics.
    Downloads {
        /// Page of the release list.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Copy the full error of a failed row to the clipboard.
    CopyError {
        /// List the row is on.
        #[arg(long, value_enum)]
        list: ListArg,
        /// Page of the failed list the row is on.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Row identifier.
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListArg {
    Mtm,
    Eth,
}

impl From<ListArg> for ConversionList {
    fn from(value: ListArg) -> Self {
        match value {
            ListArg::Mtm => Self::Mtm,
            ListArg::Eth => Self::Eth,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    logging::init(&cli.log_level, false);

    let state = AppState::from_config(&config).context("building services")?;
    let views = &state.views;

    match cli.command {
        Command::Overview => print_overview(&views.overview().await?),
        Command::Transactions { mtm_page, eth_page } => {
            print_conversion_lists(&views.transactions(mtm_page, eth_page).await);
        }
        Command::Failed { mtm_page, eth_page } => {
            print_conversion_lists(&views.failed(mtm_page, eth_page).await);
        }
        Command::Balances => print_balances(&views.balances().await?),
        Command::Downloads { page } => print_downloads(&views.downloads(page).await?),
        Command::CopyError { list, page, id } => {
            let text = views.failed_row_error(list.into(), page, &id).await?;
            match copy_to_clipboard(&text, "Error message")? {
                CopyMethod::System => eprintln!("Error message copied to clipboard"),
                CopyMethod::Osc52 => {
                    eprintln!("Error message copied to clipboard (fallback method)");
                }
            }
        }
    }
    Ok(())
}

fn print_overview(view: &OverviewView) {
    if let Some(cards) = &view.stats {
        let rows = cards
            .iter()
            .map(|c| vec![c.name.clone(), c.display.clone()])
            .collect::<Vec<_>>();
        print_table(&["Metric", "Value"], &rows);
    }
    if !view.monthly.is_empty() {
        println!();
        let rows = view
            .monthly
            .iter()
            .map(|m| vec![m.month.clone(), m.total_conversions.to_string(), bar(m.share)])
            .collect::<Vec<_>>();
        print_table(&["Month", "Conversions", ""], &rows);
    }
    if !view.balances.is_empty() {
        println!();
        print_balances(&view.balances);
    }
    if let Some(recent) = &view.recent {
        println!("\nRecent Conversions");
        print_table(
            &["Status", "Source", "Destination", "Created"],
            &recent.iter().map(mtm_columns).collect::<Vec<_>>(),
        );
    }
    for err in &view.errors {
        eprintln!("{} unavailable: {}", err.section, err.message);
    }
}

fn print_conversion_lists(view: &ConversionListsView) {
    println!("MTM to NYM Conversions");
    print_list(
        &view.mtm,
        &["ID", "Status", "Source", "Destination", "Error", "Created"],
        |row: &ConversionRow| {
            vec![
                row.id.clone(),
                row.status.label().to_string(),
                link(row.source.as_ref()),
                link(row.destination.as_ref()),
                error_preview(row.error.as_ref()),
                row.created_at_display.clone(),
            ]
        },
    );
    println!("\nETH to NYM Conversions");
    print_list(
        &view.eth,
        &["ID", "Status", "ETH", "NYM", "Swap", "Bridge", "Error", "Created"],
        |row: &EthConversionRow| {
            vec![
                row.id.to_string(),
                row.status.label().to_string(),
                row.eth_amount.clone(),
                row.nym_amount.clone().unwrap_or_else(|| "-".to_string()),
                link(row.swap.as_ref()),
                link(row.bridge.as_ref()),
                error_preview(row.error.as_ref()),
                row.created_at_display.clone(),
            ]
        },
    );
}

fn print_balances(balances: &[BalanceSnapshot]) {
    let rows = balances
        .iter()
        .map(|b| {
            vec![
                b.chain.currency().to_string(),
                format!("{:.6}", b.balance),
                b.balance_usd
                    .map_or_else(|| "-".to_string(), |usd| format!("${usd:.2}")),
                b.address.clone(),
            ]
        })
        .collect::<Vec<_>>();
    print_table(&["Chain", "Balance", "USD", "Address"], &rows);
}

fn print_downloads(view: &DownloadsView) {
    println!("Total downloads: {}\n", view.total_downloads_display);
    print_list(
        &view.releases,
        &["Version", "Downloads", "Size", "Released"],
        |r: &ReleaseSnapshot| {
            vec![
                r.version.clone(),
                r.downloads.to_string(),
                r.file_size.clone(),
                r.release_date.format("%Y-%m-%d").to_string(),
            ]
        },
    );
}

fn print_list<R>(
    snapshot: &ListSnapshot<R>,
    headers: &[&str],
    columns: impl Fn(&R) -> Vec<String>,
) {
    match snapshot {
        ListSnapshot::Idle => {}
        ListSnapshot::Loading { .. } => println!("Loading..."),
        ListSnapshot::Errored { message } => println!("Error: {message}"),
        ListSnapshot::Empty { message, .. } => println!("{message}"),
        ListSnapshot::Loaded { rows, pagination } => {
            print_table(headers, &rows.iter().map(columns).collect::<Vec<_>>());
            if let Some(showing) = &pagination.showing {
                println!("{showing}  (page {})", pagination.label);
            }
        }
    }
}

fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    println!("{}", line(headers.to_vec()));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );
    for row in rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }
}

fn mtm_columns(row: &ConversionRow) -> Vec<String> {
    vec![
        row.status.label().to_string(),
        link(row.source.as_ref()),
        link(row.destination.as_ref()),
        row.created_at_display.clone(),
    ]
}

fn link(link: Option<&TxLink>) -> String {
    link.map_or_else(|| "-".to_string(), |l| l.short_hash.clone())
}

fn error_preview(error: Option<&RowError>) -> String {
    error.map_or_else(String::new, |e| e.preview.clone())
}

fn bar(share: f64) -> String {
    let cells = (share.clamp(0.0, 1.0) * 30.0).round() as usize;
    "#".repeat(cells)
}
