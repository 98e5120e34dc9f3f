use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use settleup_summary::config::{paths::SettleUpPaths, settings::Settings};
use settleup_summary::display;
use settleup_summary::import::{load_transactions, summarize_file};
use settleup_summary::reports::{AmountKind, OverviewOptions, OverviewReport, ParticipantBalances};

#[derive(Parser)]
#[command(
    name = "settleup",
    version,
    about = "Summaries of SettleUp shared-expense exports",
    long_about = "Reads a SettleUp CSV export and prints totals per category, \
                  per category and participant, and per participant."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category x participant summary
    Summary {
        /// Export file (default: settings.default_input)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Sum what each participant paid instead of what they spent
        #[arg(long)]
        paid: bool,
        /// Order categories from highest to lowest total
        #[arg(long)]
        sort: bool,
        /// Show category totals only
        #[arg(long)]
        totals: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Spent, paid, and balance per participant
    Balances {
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },

    /// One line per transaction with per-participant amounts
    Overview {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Participant columns, in order (default: settings, then everyone)
        #[arg(short, long = "participant")]
        participants: Vec<String>,
        /// Timezone for the displayed timestamps
        #[arg(long, env = "SETTLEUP_DISPLAY_TZ")]
        timezone: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings, defaults included, to the settings file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = SettleUpPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("settleup_summary={}", settings.log_level))),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Summary {
            input,
            paid,
            sort,
            totals,
            json,
        }) => {
            let kind = if paid { AmountKind::Paid } else { AmountKind::Spent };
            let mut matrix = summarize_file(input_path(input, &settings), kind, &settings)?;
            if sort {
                matrix.sort_categories_by_total();
            }

            if json && totals {
                println!("{}", serde_json::to_string_pretty(&matrix.totals_by_category())?);
            } else if json {
                println!("{}", serde_json::to_string_pretty(&matrix)?);
            } else if totals {
                println!("{}", display::format_category_totals(&matrix, &settings.uncategorized_label));
            } else {
                println!("{}", display::format_matrix(&matrix, &settings.uncategorized_label));
            }
        }
        Some(Commands::Balances { input, json }) => {
            let transactions = load_transactions(input_path(input, &settings), &settings)?;
            let balances = ParticipantBalances::from_transactions(&transactions);

            if json {
                println!("{}", serde_json::to_string_pretty(&balances)?);
            } else {
                println!("{}", display::format_balances(&balances));
            }
        }
        Some(Commands::Overview {
            input,
            participants,
            timezone,
            json,
        }) => {
            let mut settings = settings;
            if !participants.is_empty() {
                settings.overview_participants = participants;
            }
            if let Some(timezone) = timezone {
                settings.display_timezone = timezone;
            }

            let options = OverviewOptions::from_settings(&settings)?;
            let transactions = load_transactions(input_path(input, &settings), &settings)?;
            let report = OverviewReport::generate(&transactions, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", display::format_overview(&report));
            }
        }
        Some(Commands::Config { init }) => {
            if init {
                settings.save(&paths)?;
                println!("Wrote {}", paths.settings_file().display());
                println!();
            }

            println!("settleup-summary configuration");
            println!("==============================");
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Default input:    {}", settings.default_input);
            println!("  Transfer tag:     {}", settings.transfer_tag);
            println!("  Source timezone:  {}", settings.source_timezone);
            println!("  Display timezone: {}", settings.display_timezone);
        }
        None => {
            println!("settleup - summaries of SettleUp shared-expense exports");
            println!();
            println!("Run 'settleup --help' for usage information.");
        }
    }

    Ok(())
}

fn input_path(input: Option<PathBuf>, settings: &Settings) -> PathBuf {
    input.unwrap_or_else(|| PathBuf::from(&settings.default_input))
}
