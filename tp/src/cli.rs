//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Config;
use crate::tools::ToolRequest;

/// tp - conversational travel planner
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a trip in plain language; the assistant looks up flights, hotels and activities",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn one travel request into an itinerary
    Plan {
        /// What you want, e.g. "Flights from Mumbai to Goa in December and a hotel for 5 nights"
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,

        /// Print each tool call the assistant made
        #[arg(long)]
        show_tools: bool,
    },

    /// Interactive planning session (default)
    Chat,

    /// List the tools the assistant can call
    Tools,

    /// Run a single tool directly, without the model
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },
}

/// Direct tool invocations
#[derive(Debug, Clone, Subcommand)]
pub enum ToolCommand {
    /// Cheapest round trip between two cities
    Flights {
        origin: String,
        destination: String,
        /// YYYY-MM-DD or a month name
        date: String,
    },

    /// First hotel offer for a stay
    Hotels { destination: String, nights: u32 },

    /// Activity suggestions by category
    Activities { destination: String, category: String },
}

impl From<ToolCommand> for ToolRequest {
    fn from(command: ToolCommand) -> Self {
        match command {
            ToolCommand::Flights {
                origin,
                destination,
                date,
            } => ToolRequest::Flights {
                origin,
                destination,
                date,
            },
            ToolCommand::Hotels { destination, nights } => ToolRequest::Hotels { destination, nights },
            ToolCommand::Activities { destination, category } => ToolRequest::Activities { destination, category },
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
        .join("tripplanner.log");
    debug!(?path, "get_log_path: returning path");
    path
}

struct Credential {
    name: &'static str,
    env: String,
    set: bool,
}

/// Which of the default credential variables are present
fn check_credentials(config: &Config) -> Vec<Credential> {
    debug!("check_credentials: called");
    let llm_env = config
        .llm
        .resolve()
        .map(|r| r.api_key_env)
        .unwrap_or_else(|_| "GEMINI_API_KEY".to_string());

    [
        ("llm", llm_env),
        ("flights", config.flights.api_key_env.clone()),
        ("hotels", config.hotels.api_key_env.clone()),
    ]
    .into_iter()
    .map(|(name, env)| {
        let set = std::env::var(&env).is_ok_and(|v| !v.trim().is_empty());
        Credential { name, env, set }
    })
    .collect()
}

/// Generate the after_help text with credential checks and the log location
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let credentials = check_credentials(&Config::default());
    let log_path = get_log_path();

    let mut help = String::new();

    help.push_str("API Keys:\n");
    for cred in &credentials {
        let icon = if cred.set {
            debug!(name = cred.name, "generate_after_help: credential set");
            "\u{2705}"
        } else {
            debug!(name = cred.name, "generate_after_help: credential missing");
            "\u{274C}"
        };
        help.push_str(&format!("  {} {:<10} {}\n", icon, cred.name, cred.env));
    }

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}", log_path.display()));

    help
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_joins_words_and_reads_flag() {
        let cli = Cli::parse_from(["tp", "plan", "Goa", "in", "December", "--show-tools"]);
        match cli.command {
            Some(Command::Plan { request, show_tools }) => {
                assert_eq!(request.join(" "), "Goa in December");
                assert!(show_tools);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plan_requires_a_request() {
        assert!(Cli::try_parse_from(["tp", "plan"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::parse_from(["tp", "tools", "-l", "debug", "--config", "/tmp/tp.yml"]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tp.yml")));
        assert!(matches!(cli.command, Some(Command::Tools)));
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["tp"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_tool_hotels_converts_to_request() {
        let cli = Cli::parse_from(["tp", "tool", "hotels", "Goa", "5"]);
        let Some(Command::Tool { command }) = cli.command else {
            panic!("expected tool command");
        };
        assert_eq!(
            ToolRequest::from(command),
            ToolRequest::Hotels {
                destination: "Goa".to_string(),
                nights: 5
            }
        );
    }

    #[test]
    fn test_tool_hotels_rejects_negative_nights() {
        assert!(Cli::try_parse_from(["tp", "tool", "hotels", "Goa", "-2"]).is_err());
    }

    #[test]
    fn test_after_help_lists_credentials_and_log_path() {
        let help = generate_after_help();
        assert!(help.contains("GEMINI_API_KEY"));
        assert!(help.contains("FLIGHT_API_KEY"));
        assert!(help.contains("HOTEL_API_KEY"));
        assert!(help.contains("tripplanner.log"));
    }
}
