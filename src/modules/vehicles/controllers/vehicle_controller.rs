use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::taxes::models::OwnershipRank;
use crate::modules::vehicles::models::VehicleRequest;
use crate::modules::vehicles::services::VehicleService;

/// Query parameters for a vehicle tax assessment
#[derive(Debug, Deserialize)]
pub struct AssessTaxQuery {
    #[serde(default = "default_ownership_rank")]
    pub ownership_rank: OwnershipRank,
}

fn default_ownership_rank() -> OwnershipRank {
    OwnershipRank::FIRST
}

/// List vehicles
/// GET /vehicles
pub async fn list_vehicles(
    service: web::Data<Arc<VehicleService>>,
) -> Result<HttpResponse, AppError> {
    let vehicles = service.list_vehicles().await?;
    Ok(HttpResponse::Ok().json(vehicles))
}

/// Create a vehicle
/// POST /vehicles
pub async fn create_vehicle(
    service: web::Data<Arc<VehicleService>>,
    request: web::Json<VehicleRequest>,
) -> Result<HttpResponse, AppError> {
    let vehicle = service.create_vehicle(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(vehicle))
}

/// Get vehicle by ID
/// GET /vehicles/{id}
pub async fn get_vehicle(
    service: web::Data<Arc<VehicleService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let vehicle = service.get_vehicle(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(vehicle))
}

/// Update a vehicle
/// PUT /vehicles/{id}
pub async fn update_vehicle(
    service: web::Data<Arc<VehicleService>>,
    path: web::Path<i64>,
    request: web::Json<VehicleRequest>,
) -> Result<HttpResponse, AppError> {
    let vehicle = service
        .update_vehicle(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(vehicle))
}

/// Delete a vehicle
/// DELETE /vehicles/{id}
pub async fn delete_vehicle(
    service: web::Data<Arc<VehicleService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_vehicle(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Tax breakdown for a catalogued vehicle
/// GET /vehicles/{id}/tax?ownership_rank=2
pub async fn assess_vehicle_tax(
    service: web::Data<Arc<VehicleService>>,
    path: web::Path<i64>,
    query: web::Query<AssessTaxQuery>,
) -> Result<HttpResponse, AppError> {
    let assessment = service
        .assess_vehicle(path.into_inner(), query.ownership_rank)
        .await?;
    Ok(HttpResponse::Ok().json(assessment))
}

/// Configure vehicle routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vehicles")
            .route("", web::get().to(list_vehicles))
            .route("", web::post().to(create_vehicle))
            .route("/{id}", web::get().to(get_vehicle))
            .route("/{id}", web::put().to(update_vehicle))
            .route("/{id}", web::delete().to(delete_vehicle))
            .route("/{id}/tax", web::get().to(assess_vehicle_tax)),
    );
}
