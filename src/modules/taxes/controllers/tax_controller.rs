//! Tax controller for HTTP endpoints
//!
//! Exposes the tax engine directly, without going through the vehicle catalog.

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::modules::taxes::models::TaxCalculationRequest;
use crate::modules::taxes::services::TaxCalculator;

/// Calculate tax for an arbitrary assessed value
///
/// POST /taxes/calculate
pub async fn calculate_tax(
    calculator: web::Data<TaxCalculator>,
    request: web::Json<TaxCalculationRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let assessment = calculator.compute_tax(request.assessed_value, request.ownership_rank)?;

    tracing::debug!(
        assessed_value = %assessment.assessed_value,
        ownership_rank = %assessment.ownership_rank,
        total_tax = %assessment.total_tax,
        "Tax calculated"
    );

    Ok(HttpResponse::Ok().json(assessment))
}

/// Published rates and fees
///
/// GET /taxes/schedule
pub async fn get_schedule(calculator: web::Data<TaxCalculator>) -> HttpResponse {
    HttpResponse::Ok().json(calculator.schedule())
}

/// Configure tax routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes")
            .route("/calculate", web::post().to(calculate_tax))
            .route("/schedule", web::get().to(get_schedule)),
    );
}
