pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{OwnershipRank, TaxAssessment, TaxCalculationRequest, TaxSchedule};
pub use services::TaxCalculator;
