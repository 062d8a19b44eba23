//! Command-line parsing
//!
//! Parses `cafe-finder [command] [args]`; no command starts the GUI.

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the window: no arguments
    Gui,
    /// One search, printed as text: search <keyword...>
    Search { keyword: String },
    /// Print the user's history: history
    History,
    /// Print the effective configuration: config
    Config,
    /// Show help: help
    Help,
    Unknown(String),
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Self {
        let Some((cmd, rest)) = args.split_first() else {
            return Command::Gui;
        };

        match cmd.to_lowercase().as_str() {
            // Joined verbatim; an empty keyword is still a valid search.
            "search" | "s" => Command::Search { keyword: rest.join(" ") },
            "history" | "h" => Command::History,
            "config" => Command::Config,
            "help" | "--help" | "-h" => Command::Help,
            _ => Command::Unknown(cmd.clone()),
        }
    }

    pub fn help_text() -> &'static str {
        r#"Cafe Finder - search cafes and browse past results

Usage: cafe-finder [command]

Commands:
  (none)              Open the search window
  search <keyword>    Search once and print the place
  history             Print previously found places
  config              Print the effective configuration
  help                Show this help message

Environment:
  CAFE_SEARCH_URL, CAFE_HISTORY_URL, CAFE_USER_ID, CAFE_KEYWORD_PREFIX
  RUST_LOG            Log filter, e.g. RUST_LOG=cafe_finder=debug"#
    }
}
