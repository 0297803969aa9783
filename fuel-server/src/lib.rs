//! Fuel price finder server.
//!
//! Finds fuel stations around a point via the OpenStreetMap Overpass API
//! and joins them with crowd-sourced petrol and diesel prices.

pub mod config;
pub mod domain;
pub mod overpass;
pub mod prices;
pub mod stations;
pub mod web;
