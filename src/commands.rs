use crate::cli::Args;
use crate::config::Config;
use crate::data_fetcher::models::Manager;
use crate::data_fetcher::{
    fetch_current_phase, fetch_elapsed_phases, fetch_latest_completed_gameweek, fetch_phases,
    fetch_player_gameweek_record, fetch_upcoming_deadline,
};
use crate::error::AppError;
use reqwest::Client;

/// Handles configuration update commands (--config, --set-log-file,
/// --clear-log-file). Updates the stored config and saves the changes.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(base_url) = &args.new_api_base_url {
        config.api_base_url = base_url.clone();
    }
    if let Some(log_path) = &args.new_log_file_path {
        config.log_file_path = Some(log_path.clone());
    }
    if args.clear_log_file_path {
        config.log_file_path = None;
    }

    config.validate()?;
    config.save().await?;
    println!("Config saved to {}", crate::config::get_config_path());
    Ok(())
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Prints the latest completed gameweek id and finished flag.
pub async fn handle_gameweek_command(client: &Client, config: &Config) -> Result<(), AppError> {
    let completed = fetch_latest_completed_gameweek(client, config).await;
    if completed.is_sentinel() {
        println!("No gameweek has completed yet");
    } else {
        println!(
            "Latest completed gameweek: {} (finished: {})",
            completed.id, completed.finished
        );
    }
    Ok(())
}

/// Prints the next deadline at the +05:30 display offset.
pub async fn handle_deadline_command(client: &Client, config: &Config) -> Result<(), AppError> {
    match fetch_upcoming_deadline(client, config).await? {
        Some(deadline) => println!(
            "Next deadline: {}",
            deadline.format("%A %-d %B %Y, %H:%M %:z")
        ),
        None => println!("No upcoming deadline, the season is over"),
    }
    Ok(())
}

/// Prints the month phases with their gameweek boundaries.
pub async fn handle_phases_command(client: &Client, config: &Config) -> Result<(), AppError> {
    let phases = fetch_phases(client, config).await?;
    if phases.is_empty() {
        println!("No phases published yet");
        return Ok(());
    }
    for phase in phases {
        println!(
            "{:<12} GW {:>2} - {:>2}",
            phase.name, phase.start_event, phase.stop_event
        );
    }
    Ok(())
}

/// Prints the phases that have fully elapsed.
pub async fn handle_elapsed_command(client: &Client, config: &Config) -> Result<(), AppError> {
    match fetch_elapsed_phases(client, config).await {
        Some(phases) if phases.is_empty() => println!("No phase has fully elapsed yet"),
        Some(phases) => {
            for phase in phases {
                println!(
                    "{:<12} GW {:>2} - {:>2}",
                    phase.name, phase.start_event, phase.stop_event
                );
            }
        }
        None => println!("Phase data is currently unavailable"),
    }
    Ok(())
}

/// Prints the name of the phase currently in progress.
pub async fn handle_current_phase_command(
    client: &Client,
    config: &Config,
) -> Result<(), AppError> {
    match fetch_current_phase(client, config).await {
        Some(name) => println!("Current phase: {name}"),
        None => println!("Phase data is currently unavailable"),
    }
    Ok(())
}

/// Looks up one manager's score record for a gameweek.
pub async fn handle_record_command(
    client: &Client,
    config: &Config,
    args: &Args,
) -> Result<(), AppError> {
    let Some(entry_id) = args.entry else {
        return Err(AppError::config_error("manager lookup requires --entry <ENTRY_ID>"));
    };
    let week = args.week.ok_or_else(|| {
        AppError::config_error("--entry requires --week <GW> to pick a gameweek")
    })?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| format!("Entry {entry_id}"));

    let manager = Manager::new(entry_id, name);
    match fetch_player_gameweek_record(client, config, &manager, week).await? {
        Some(record) => {
            println!("{} - gameweek {}", record.player_name, record.gameweek);
            println!("  Gross points:  {:>3}", record.gross_points);
            println!("  Transfer cost: {:>3}", record.transfer_cost);
            println!("  Net points:    {:>3}", record.net_points);
        }
        None => println!(
            "No history entry for {} in gameweek {}",
            manager.name, week
        ),
    }
    Ok(())
}

/// Prints the full calendar summary: gameweek, deadline, phases, current
/// phase. The default when no query flag is given.
pub async fn handle_summary_command(client: &Client, config: &Config) -> Result<(), AppError> {
    handle_gameweek_command(client, config).await?;
    handle_deadline_command(client, config).await?;
    println!();
    println!("Phases:");
    handle_phases_command(client, config).await?;
    handle_current_phase_command(client, config).await?;
    Ok(())
}
