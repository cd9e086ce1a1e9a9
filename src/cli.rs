use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the invocation is a configuration operation rather
/// than a calendar query, so main can skip the fetch path entirely.
pub fn is_config_mode(args: &Args) -> bool {
    args.new_api_base_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Fantasy Premier League Gameweek Calendar
///
/// Queries the public fantasy league API for calendar facts: the latest
/// completed gameweek, the next deadline, month phases, and per-manager
/// gameweek scores.
///
/// With no query flags, prints the full calendar summary (gameweek,
/// deadline, phases, current phase).
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Show the latest completed gameweek id and whether it has finished.
    #[arg(short = 'g', long = "gameweek", help_heading = "Queries")]
    pub gameweek: bool,

    /// Show the next upcoming deadline (displayed at UTC+05:30).
    #[arg(short = 'n', long = "deadline", help_heading = "Queries")]
    pub deadline: bool,

    /// List the month phases with their gameweek boundaries.
    #[arg(short = 'p', long = "phases", help_heading = "Queries")]
    pub phases: bool,

    /// List the phases that have fully elapsed.
    #[arg(long = "elapsed", help_heading = "Queries")]
    pub elapsed: bool,

    /// Show the name of the phase currently in progress.
    #[arg(long = "current-phase", help_heading = "Queries")]
    pub current_phase: bool,

    /// Manager entry id to look up a gameweek score for. Requires --week.
    #[arg(long = "entry", help_heading = "Manager Lookup", value_name = "ENTRY_ID")]
    pub entry: Option<i64>,

    /// Manager display name for the score lookup ("First Last").
    /// Defaults to "Entry <id>" when omitted.
    #[arg(long = "name", help_heading = "Manager Lookup", value_name = "NAME")]
    pub name: Option<String>,

    /// Gameweek number for the manager score lookup.
    #[arg(long = "week", help_heading = "Manager Lookup", value_name = "GW")]
    pub week: Option<i32>,

    /// Bypass the snapshot cache and fetch fresh calendar data.
    #[arg(long = "refresh", help_heading = "Queries")]
    pub refresh: bool,

    /// Update API base URL in config.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "BASE_URL"
    )]
    pub new_api_base_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config, reverting to the default location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings.
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Write logs to a custom file for this run only.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,

    /// Echo logs to stdout in addition to the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,
}

impl Args {
    /// True when no specific query flag was given and the full calendar
    /// summary should be printed.
    pub fn wants_summary(&self) -> bool {
        !(self.gameweek
            || self.deadline
            || self.phases
            || self.elapsed
            || self.current_phase
            || self.entry.is_some())
    }
}
