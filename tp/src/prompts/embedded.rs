//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt for the travel agent chat
pub const TRAVEL_AGENT: &str = include_str!("../../prompts/travel_agent.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "travel_agent" => Some(TRAVEL_AGENT),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
