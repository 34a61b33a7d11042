use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::core::error::{AppError, Result};
use crate::modules::taxes::models::{OwnershipRank, TaxAssessment};
use crate::modules::taxes::services::TaxCalculator;
use crate::modules::vehicles::models::{Vehicle, VehicleRequest};
use crate::modules::vehicles::repositories::vehicle_repository::duplicate_name;
use crate::modules::vehicles::repositories::VehicleRepository;

/// Service for vehicle catalog business logic
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
    calculator: TaxCalculator,
    max_assessed_value: Decimal,
}

impl VehicleService {
    pub fn new(
        repository: Arc<dyn VehicleRepository>,
        calculator: TaxCalculator,
        max_assessed_value: Decimal,
    ) -> Self {
        Self {
            repository,
            calculator,
            max_assessed_value,
        }
    }

    /// Check the backing store is reachable
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }

    /// List all vehicles ordered by name
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.repository.find_all().await
    }

    /// Get vehicle by ID
    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| vehicle_not_found(id))
    }

    /// Create a new vehicle; names must be unique
    pub async fn create_vehicle(&self, request: VehicleRequest) -> Result<Vehicle> {
        let draft = request.validate(self.max_assessed_value)?;

        if self.repository.find_by_name(&draft.name).await?.is_some() {
            return Err(duplicate_name(&draft.name));
        }

        let vehicle = self.repository.create(draft).await?;

        info!(
            vehicle_id = vehicle.id,
            name = %vehicle.name,
            assessed_value = %vehicle.assessed_value,
            "Vehicle created"
        );

        Ok(vehicle)
    }

    /// Replace a vehicle's fields, with the same validation as creation
    pub async fn update_vehicle(&self, id: i64, request: VehicleRequest) -> Result<Vehicle> {
        let draft = request.validate(self.max_assessed_value)?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(vehicle_not_found(id));
        }

        if let Some(existing) = self.repository.find_by_name(&draft.name).await? {
            if existing.id != id {
                return Err(duplicate_name(&draft.name));
            }
        }

        let vehicle = self
            .repository
            .update(id, draft)
            .await?
            .ok_or_else(|| vehicle_not_found(id))?;

        info!(
            vehicle_id = vehicle.id,
            name = %vehicle.name,
            assessed_value = %vehicle.assessed_value,
            "Vehicle updated"
        );

        Ok(vehicle)
    }

    /// Delete a vehicle
    pub async fn delete_vehicle(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(vehicle_not_found(id));
        }

        info!(vehicle_id = id, "Vehicle deleted");
        Ok(())
    }

    /// Compute tax for a catalogued vehicle at the given ownership rank
    pub async fn assess_vehicle(
        &self,
        id: i64,
        ownership_rank: OwnershipRank,
    ) -> Result<TaxAssessment> {
        let vehicle = self.get_vehicle(id).await?;
        self.calculator
            .compute_tax(vehicle.assessed_value, ownership_rank)
    }
}

fn vehicle_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Vehicle {} not found", id))
}
