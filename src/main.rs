use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lastgrid::{cli, config, error, types::MONTH_CAP, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch monthly charts and show one album grid per month
    Grid(GridOptions),

    /// List the month windows a grid session would fetch
    Months(MonthsOptions),

    /// Handle the album image cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GridOptions {
    /// Last.fm user (defaults to LASTFM_USER)
    #[clap(long)]
    pub user: Option<String>,

    /// First month to fetch (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub from: Option<NaiveDate>,

    /// Number of months to fetch
    #[clap(long, default_value_t = MONTH_CAP, value_parser = utils::parse_month_count)]
    pub months: usize,

    /// Also write the grids as an HTML page
    #[clap(long)]
    pub html: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct MonthsOptions {
    /// First month (YYYY-MM)
    #[clap(long, value_parser = utils::parse_month)]
    pub from: Option<NaiveDate>,

    /// Number of months in the chain
    #[clap(long, default_value_t = MONTH_CAP, value_parser = utils::parse_month_count)]
    pub months: usize,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle the album image cache",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct CacheOptions {
    /// Filter cached albums by artist or album name
    #[clap(long)]
    pub search: Option<String>,

    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Remove every cached album image
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::init_tracing();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Grid(opt) => cli::grid(opt.user, opt.from, opt.months, opt.html).await,
        Command::Months(opt) => cli::months(opt.from, opt.months).await,
        Command::Cache(opt) => match opt.command {
            Some(CacheSubcommand::Clear) => cli::clear_cache().await,
            None => cli::list_cache(opt.search).await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
