//! tripplanner - conversational travel planning
//!
//! A user describes a trip in natural language. An LLM decides which lookups
//! to run, the crate executes them against flight and hotel aggregators (plus
//! a fixed activity catalogue) and feeds the text results back until the model
//! writes an itinerary.
//!
//! # Modules
//!
//! - [`dates`] - Date expressions to concrete search windows
//! - [`providers`] - Flight and hotel aggregator clients
//! - [`tools`] - Tool trait, registry and the three travel tools
//! - [`llm`] - Provider-agnostic chat types and clients
//! - [`chat`] - Model/tool orchestration loop
//! - [`prompts`] - System prompt templates
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`repl`] - Interactive planning session

pub mod chat;
pub mod cli;
pub mod config;
pub mod dates;
pub mod llm;
pub mod prompts;
pub mod providers;
pub mod repl;
pub mod tools;
