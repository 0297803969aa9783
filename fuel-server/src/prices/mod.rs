//! Crowd-sourced price table.
//!
//! Maps station id → last reported petrol/diesel prices. The default
//! backend lives in process memory for the lifetime of the server.

mod store;

pub use store::{InMemoryPriceStore, PriceStore};
