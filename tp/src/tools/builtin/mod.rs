//! Built-in travel tools

mod activities;
mod flights;
mod hotels;

pub use activities::FindActivitiesTool;
pub use flights::SearchFlightsTool;
pub use hotels::SearchHotelsTool;
