//! HTTP route handlers.

use std::any::Any;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::domain::{
    Coordinates, DomainError, FuelType, SearchArea, Station, StationId, parse_price,
};
use crate::overpass::OverpassError;
use crate::stations::{cheapest, element_ids, normalize_and_merge, sort_by_distance};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// Station routes are served both at `/stations` and at `/api/stations`,
/// the prefix used by the mobile client.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/stations", station_routes())
        .nest("/api/stations", station_routes())
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn station_routes() -> Router<AppState> {
    Router::new()
        .route("/nearby", get(nearby_stations))
        .route("/cheapest", get(cheapest_stations))
        .route("/:id/update-price", post(update_price))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> AppError {
    AppError::NotFound {
        message: "Not found".to_string(),
    }
}

/// Parse the mandatory `lat`/`lng` query pair.
fn require_coordinates(lat: Option<&str>, lng: Option<&str>) -> Result<Coordinates, AppError> {
    fn present(v: Option<&str>) -> Option<&str> {
        v.map(str::trim).filter(|v| !v.is_empty())
    }

    match (present(lat), present(lng)) {
        (Some(lat), Some(lng)) => Ok(Coordinates::parse(lat, lng)?),
        _ => Err(AppError::BadRequest {
            message: "Latitude and longitude are required".to_string(),
        }),
    }
}

/// Fetch elements for `area` and merge them with the price table.
async fn fetch_stations(state: &AppState, area: &SearchArea) -> Result<Vec<Station>, AppError> {
    let elements = state.source.fetch_elements(area).await?;
    let ids = element_ids(&elements);
    let prices = state.prices.get_many(&ids).await;

    Ok(normalize_and_merge(&elements, &prices, Some(&area.center)))
}

fn to_results(stations: &[Station]) -> Json<Vec<StationResult>> {
    Json(stations.iter().map(StationResult::from_station).collect())
}

/// Stations around a point, merged with reported prices.
async fn nearby_stations(
    State(state): State<AppState>,
    query: Result<Query<NearbyRequest>, QueryRejection>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    let Query(req) = query?;
    let center = require_coordinates(req.lat.as_deref(), req.lng.as_deref())?;
    let area =
        SearchArea::with_radius_str(center, req.radius.as_deref(), state.config.nearby_radius_m)?;

    let mut stations = fetch_stations(&state, &area).await?;

    let by_distance = req
        .sort_by
        .as_deref()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("distance"));
    if by_distance {
        sort_by_distance(&mut stations);
    }

    Ok(to_results(&stations))
}

/// Cheapest stations for one fuel around a point.
async fn cheapest_stations(
    State(state): State<AppState>,
    query: Result<Query<CheapestRequest>, QueryRejection>,
) -> Result<Json<Vec<StationResult>>, AppError> {
    let Query(req) = query?;
    let center = require_coordinates(req.lat.as_deref(), req.lng.as_deref())?;

    let fuel = match req.fuel_type.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        Some(f) => FuelType::parse(f)?,
        None => FuelType::default(),
    };

    let limit = match req.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) => l
            .parse::<usize>()
            .map_err(|_| DomainError::InvalidLimit(l.to_string()))?,
        None => state.config.cheapest_limit,
    };

    let area =
        SearchArea::with_radius_str(center, req.radius.as_deref(), state.config.cheapest_radius_m)?;

    let stations = fetch_stations(&state, &area).await?;
    Ok(to_results(&cheapest(stations, fuel, limit)))
}

/// Record a reported price for a station.
async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UpdatePriceResponse>, AppError> {
    let id = StationId::parse(&id)?;

    // An absent body is treated like an empty object so it reports missing fields
    let req: UpdatePriceRequest = if body.iter().all(u8::is_ascii_whitespace) {
        UpdatePriceRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        })?
    };

    let fuel_type = req.fuel_type.as_deref().map(str::trim).filter(|f| !f.is_empty());
    let price = req.price.as_ref().filter(|p| match p {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.trim().is_empty(),
        _ => true,
    });

    let (Some(fuel_type), Some(price)) = (fuel_type, price) else {
        return Err(AppError::BadRequest {
            message: "Fuel type and price are required".to_string(),
        });
    };

    let fuel = FuelType::parse(fuel_type)?;
    let price = parse_price(price)?;

    let record = state.prices.upsert(id, fuel, price, Utc::now()).await;
    let priced_stations = state.prices.len().await;

    info!(
        station = %id,
        fuel = %fuel,
        price,
        reported_by = req.reported_by.as_deref().unwrap_or("anonymous"),
        priced_stations,
        "price updated"
    );

    Ok(Json(UpdatePriceResponse {
        message: "Price updated successfully".to_string(),
        station: record,
    }))
}

/// Turn a handler panic into a generic 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    AppError::Internal {
        message: format!("handler panicked: {detail}"),
    }
    .into_response()
}

/// Message returned for every server-side failure.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Missing or malformed request input
    BadRequest { message: String },
    NotFound { message: String },
    /// The station data source failed
    Upstream(OverpassError),
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<OverpassError> for AppError {
    fn from(e: OverpassError) -> Self {
        AppError::Upstream(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side details are logged but never sent to the client
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream(e) => {
                error!(error = %e, "station source failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Internal { message } => {
                error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
