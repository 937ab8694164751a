use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::station::{self, PoliceStation};

#[derive(Debug, Deserialize)]
pub struct NearestStationParams {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct NearestStationResponse {
    pub station: PoliceStation,
    pub distance_km: f64,
}

pub async fn nearest_police_station(
    Query(params): Query<NearestStationParams>,
) -> Result<Json<NearestStationResponse>, AppError> {
    if !(-90.0..=90.0).contains(&params.latitude) {
        return Err(AppError::BadRequest("invalid latitude".into()));
    }
    if !(-180.0..=180.0).contains(&params.longitude) {
        return Err(AppError::BadRequest("invalid longitude".into()));
    }

    let (nearest, distance_km) = station::nearest(params.latitude, params.longitude);
    Ok(Json(NearestStationResponse {
        station: nearest.clone(),
        distance_km,
    }))
}
