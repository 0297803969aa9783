//! Web layer for the fuel price finder.
//!
//! Provides HTTP endpoints for nearby stations, cheapest stations and
//! crowd-sourced price updates.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
