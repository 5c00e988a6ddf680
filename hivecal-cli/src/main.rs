mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hivecal_core::apiary::ApiaryDir;
use hivecal_core::config::HivecalConfig;
use hivecal_core::constants::MAX_HORIZON_DAYS;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hivecal")]
#[command(about = "Turn hive inspection schedules into calendar feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the inspection calendar (.ics) for one apiary or all of them
    Feed {
        /// Only include this apiary (by slug)
        #[arg(short, long)]
        apiary: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Days ahead to schedule (defaults to horizon_days from config)
        #[arg(long, value_parser = horizon_parser())]
        horizon: Option<u32>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// List overdue and upcoming inspections
    Upcoming {
        /// Only include this apiary (by slug)
        #[arg(short, long)]
        apiary: Option<String>,

        /// Days ahead to schedule (defaults to horizon_days from config)
        #[arg(long, value_parser = horizon_parser())]
        horizon: Option<u32>,

        /// Pretend today is this date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,

        /// Print occurrences as JSON
        #[arg(long)]
        json: bool,
    },
    /// List apiaries and how many hives need attention
    Apiaries,
    /// Check that an .ics feed file can be read back
    Verify { file: PathBuf },
}

fn horizon_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(..=i64::from(MAX_HORIZON_DAYS))
}

fn main() -> Result<()> {
    // Logs go to stderr so `hivecal feed` can stream the calendar on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HIVECAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HivecalConfig::load()?;
    let source = ApiaryDir::new(config.apiary_path());

    match cli.command {
        Commands::Feed {
            apiary,
            output,
            horizon,
            today,
        } => {
            let options = commands::ScheduleOptions::new(&config, apiary, horizon, today.as_deref())?;
            commands::feed::run(&source, options, output.as_deref())
        }
        Commands::Upcoming {
            apiary,
            horizon,
            today,
            json,
        } => {
            let options = commands::ScheduleOptions::new(&config, apiary, horizon, today.as_deref())?;
            commands::upcoming::run(&source, options, json)
        }
        Commands::Apiaries => commands::apiaries::run(&source, &config),
        Commands::Verify { file } => commands::verify::run(&file),
    }
}
