//! Motor-vehicle tax service library
//!
//! Progressive vehicle tax engine plus the vehicle catalog it is computed against.

use actix_web::web;

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::taxes;
pub use modules::vehicles;

/// Register extractor error handling and every route group.
///
/// Callers supply `web::Data<TaxCalculator>` and `web::Data<Arc<VehicleService>>`.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    middleware::configure_extractors(cfg);
    cfg.configure(modules::health::configure)
        .configure(modules::taxes::configure)
        .configure(modules::vehicles::configure);
}
