use clap::Parser;
use fpl_gameweek::cli::{Args, is_config_mode};
use fpl_gameweek::commands;
use fpl_gameweek::config::Config;
use fpl_gameweek::data_fetcher::fetch_bootstrap;
use fpl_gameweek::error::AppError;
use fpl_gameweek::logging::setup_logging;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Config operations run without logging or network setup
    if is_config_mode(&args) {
        if args.list_config {
            return commands::handle_list_config_command().await;
        }
        return commands::handle_config_update_command(&args).await;
    }

    let (log_file_path, _guard) = setup_logging(&args).await?;
    info!("Logging to {}", log_file_path);

    let config = Config::load().await?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_seconds))
        .build()?;

    if args.refresh {
        // Repopulate the snapshot cache so every query below sees live data
        fetch_bootstrap(&client, &config, true).await?;
    }

    if args.wants_summary() {
        return commands::handle_summary_command(&client, &config).await;
    }

    if args.gameweek {
        commands::handle_gameweek_command(&client, &config).await?;
    }
    if args.deadline {
        commands::handle_deadline_command(&client, &config).await?;
    }
    if args.phases {
        commands::handle_phases_command(&client, &config).await?;
    }
    if args.elapsed {
        commands::handle_elapsed_command(&client, &config).await?;
    }
    if args.current_phase {
        commands::handle_current_phase_command(&client, &config).await?;
    }
    if args.entry.is_some() {
        commands::handle_record_command(&client, &config, &args).await?;
    }

    Ok(())
}
