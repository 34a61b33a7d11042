// Vehicles module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{Vehicle, VehicleDraft, VehicleRequest};
pub use repositories::{InMemoryVehicleRepository, MySqlVehicleRepository, VehicleRepository};
pub use services::VehicleService;
