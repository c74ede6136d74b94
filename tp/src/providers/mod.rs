//! Third-party aggregator clients
//!
//! Each client builds its RapidAPI requests and parses the JSON it gets back.
//! All HTTP goes through [`JsonTransport`] so the clients can be driven with
//! canned responses.

pub mod hotels;
pub mod kiwi;
pub mod transport;

pub use hotels::{HotelOffer, HotelQuery, HotelsClient};
pub use kiwi::{FlightOffer, FlightQuery, KiwiClient};
pub use transport::{GetRequest, JsonTransport, ReqwestTransport, TransportError};
