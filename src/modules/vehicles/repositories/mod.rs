pub mod vehicle_repository;

pub use vehicle_repository::{
    InMemoryVehicleRepository, MySqlVehicleRepository, VehicleRepository,
};
