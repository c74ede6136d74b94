//! Prompt templates
//!
//! `.pmt` files are embedded at build time and rendered with Handlebars.

pub mod embedded;
mod loader;

pub use loader::{PromptContext, PromptLoader};
