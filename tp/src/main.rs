//! tp - travel planner CLI

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info};

use tripplanner::chat::ChatSession;
use tripplanner::cli::{Cli, Command, ToolCommand, generate_after_help, get_log_path};
use tripplanner::config::Config;
use tripplanner::repl::{PlannerRepl, print_reply};
use tripplanner::tools::{ToolContext, ToolExecutor, ToolOutcome, ToolRequest};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in a .env file next to where tp is run
    dotenv::dotenv().ok();

    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("tp loaded config: provider={}", config.llm.provider);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Plan { request, show_tools }) => {
            debug!(show_tools, "main: matched Plan command");
            cmd_plan(&config, &request.join(" "), show_tools).await
        }
        Some(Command::Chat) | None => {
            debug!("main: matched Chat command");
            cmd_chat(&config).await
        }
        Some(Command::Tools) => {
            debug!("main: matched Tools command");
            cmd_tools(&config)
        }
        Some(Command::Tool { command }) => {
            debug!(?command, "main: matched Tool command");
            cmd_tool(&config, command).await
        }
    }
}

/// One-shot planning: a fresh session, one request, one itinerary
async fn cmd_plan(config: &Config, request: &str, show_tools: bool) -> Result<()> {
    debug!(request_len = request.len(), show_tools, "cmd_plan: called");
    if request.trim().is_empty() {
        eprintln!("{}", "Please enter your travel plans first.".yellow());
        return Ok(());
    }

    let mut session = ChatSession::from_config(config)?;

    eprintln!("{}", "Planning your trip... this may take a moment.".dimmed());
    match session.send(request).await {
        Ok(reply) => {
            info!(tool_calls = reply.tool_calls.len(), tokens = reply.usage.total(), "cmd_plan: itinerary ready");
            print_reply(&reply, show_tools);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("An error occurred: {}", e).red());
            std::process::exit(1);
        }
    }
}

async fn cmd_chat(config: &Config) -> Result<()> {
    debug!("cmd_chat: called");
    let session = ChatSession::from_config(config)?;
    PlannerRepl::new(session).run().await
}

fn cmd_tools(config: &Config) -> Result<()> {
    debug!("cmd_tools: called");
    let executor = ToolExecutor::from_config(config)?;

    for def in executor.definitions() {
        println!("{}", def.name.bright_cyan().bold());
        println!("  {}", def.description);

        let required: Vec<&str> = def.input_schema["required"]
            .as_array()
            .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        if let Some(props) = def.input_schema["properties"].as_object() {
            for (param, schema) in props {
                let kind = schema["type"].as_str().unwrap_or("any");
                let marker = if required.contains(&param.as_str()) { "" } else { " (optional)" };
                println!("    {:<14} {}{}", param.yellow(), kind, marker);
            }
        }
        println!();
    }
    Ok(())
}

/// Run one tool directly; an error outcome exits non-zero
async fn cmd_tool(config: &Config, command: ToolCommand) -> Result<()> {
    debug!(?command, "cmd_tool: called");
    let executor = ToolExecutor::from_config(config)?;
    let ctx = ToolContext::new(config.search.clone());
    let request = ToolRequest::from(command);

    eprintln!("{} {}", "-->".bright_yellow(), request.to_string().dimmed());
    let result = executor.dispatch(&request, &ctx).await;
    info!(tool = %request.tool_name(), outcome = ?result.outcome, "cmd_tool: finished");

    match result.outcome {
        ToolOutcome::Error => {
            eprintln!("{}", result.content.red());
            std::process::exit(1);
        }
        ToolOutcome::Success | ToolOutcome::Empty => {
            println!("{}", result.content);
            Ok(())
        }
    }
}
