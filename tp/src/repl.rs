//! Interactive planning REPL
//!
//! Wraps a [`ChatSession`] in a rustyline loop. Context carries over between
//! messages until `/reset`.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::chat::{ChatReply, ChatSession};

/// Outcome of a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashResult {
    Continue,
    Quit,
}

pub struct PlannerRepl {
    session: ChatSession,
    show_tools: bool,
}

impl PlannerRepl {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session,
            show_tools: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        debug!("PlannerRepl::run: called");
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        println!("{}", "Please enter your travel plans first.".yellow());
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input) {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.process_user_input(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Have a good trip!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "AI-Powered Travel Planner".bright_cyan().bold());
        println!("Tell me where you want to go, when, and what you like to do.");
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    pub fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let cmd = input.split_whitespace().next().unwrap_or("");
        debug!(%cmd, "PlannerRepl::handle_slash_command: called");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/reset" | "/r" => {
                self.session.reset();
                println!("{}", "Conversation cleared.".dimmed());
                SlashResult::Continue
            }
            "/tools" => {
                self.show_tools = !self.show_tools;
                let state = if self.show_tools { "on" } else { "off" };
                println!("{}", format!("Tool trace {}.", state).dimmed());
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the planner", "/quit".yellow());
        println!("  {:14} Start a new conversation", "/reset".yellow());
        println!("  {:14} Toggle the tool-call trace", "/tools".yellow());
        println!();
    }

    async fn process_user_input(&mut self, input: &str) {
        println!("{}", "Planning your trip... this may take a moment.".dimmed());
        match self.session.send(input).await {
            Ok(reply) => print_reply(&reply, self.show_tools),
            Err(e) => println!("{}", format!("An error occurred: {}", e).red()),
        }
    }
}

/// Print the optional tool trace followed by the itinerary text
pub fn print_reply(reply: &ChatReply, show_tools: bool) {
    if show_tools {
        for call in &reply.tool_calls {
            println!("{} {}", "-->".bright_yellow(), call.describe().dimmed());
        }
        if !reply.tool_calls.is_empty() {
            println!();
        }
    }
    println!("{}", reply.text);
    println!();
}
