// Vehicle persistence
//
// Two implementations of the same interface:
// - MySqlVehicleRepository: sqlx-backed, used when DATABASE_URL is set
// - InMemoryVehicleRepository: process-local map, used otherwise and in tests
//
// Both enforce name uniqueness and report it as AppError::Conflict.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tokio::sync::RwLock;

use crate::core::traits::Repository;
use crate::core::{AppError, Result};
use crate::modules::vehicles::models::{Vehicle, VehicleDraft};

/// Repository for the vehicle catalog
#[async_trait]
pub trait VehicleRepository: Repository<Vehicle, VehicleDraft, i64> {
    /// Find a vehicle by its exact (trimmed) name
    async fn find_by_name(&self, name: &str) -> Result<Option<Vehicle>>;

    /// Check the backing store is reachable
    async fn ping(&self) -> Result<()>;
}

/// Conflict reported for a name already in the catalog, by both stores and the service
pub(crate) fn duplicate_name(name: &str) -> AppError {
    AppError::conflict(format!("Vehicle with name '{}' already exists", name))
}

fn map_write_error(err: sqlx::Error, name: &str) -> AppError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return duplicate_name(name);
        }
    }
    AppError::Database(err)
}

/// MySQL implementation
#[derive(Clone)]
pub struct MySqlVehicleRepository {
    pool: MySqlPool,
}

impl MySqlVehicleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Vehicle, VehicleDraft, i64> for MySqlVehicleRepository {
    async fn find_all(&self) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, vehicle_type, assessed_value, created_at, updated_at
            FROM vehicles
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, vehicle_type, assessed_value, created_at, updated_at
            FROM vehicles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn create(&self, draft: VehicleDraft) -> Result<Vehicle> {
        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (name, vehicle_type, assessed_value)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.vehicle_type)
        .bind(draft.assessed_value)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::internal("Inserted vehicle ID out of range"))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Vehicle was created but not found"))
    }

    async fn update(&self, id: i64, draft: VehicleDraft) -> Result<Option<Vehicle>> {
        // rows_affected is 0 for an unchanged row in MySQL, so existence is
        // decided by reading the row back.
        sqlx::query(
            r#"
            UPDATE vehicles
            SET name = ?, vehicle_type = ?, assessed_value = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.vehicle_type)
        .bind(draft.assessed_value)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &draft.name))?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl VehicleRepository for MySqlVehicleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, name, vehicle_type, assessed_value, created_at, updated_at
            FROM vehicles
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryState {
    last_id: i64,
    vehicles: BTreeMap<i64, Vehicle>,
}

impl InMemoryState {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.vehicles
            .values()
            .any(|v| v.name == name && Some(v.id) != except)
    }
}

/// In-process implementation backed by an ordered map
#[derive(Debug, Default)]
pub struct InMemoryVehicleRepository {
    state: RwLock<InMemoryState>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Vehicle, VehicleDraft, i64> for InMemoryVehicleRepository {
    async fn find_all(&self) -> Result<Vec<Vehicle>> {
        let state = self.state.read().await;
        let mut vehicles: Vec<Vehicle> = state.vehicles.values().cloned().collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vehicles)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>> {
        Ok(self.state.read().await.vehicles.get(&id).cloned())
    }

    async fn create(&self, draft: VehicleDraft) -> Result<Vehicle> {
        let mut state = self.state.write().await;
        if state.name_taken(&draft.name, None) {
            return Err(duplicate_name(&draft.name));
        }

        state.last_id += 1;
        let now = Utc::now();
        let vehicle = Vehicle {
            id: state.last_id,
            name: draft.name,
            vehicle_type: draft.vehicle_type,
            assessed_value: draft.assessed_value,
            created_at: now,
            updated_at: now,
        };
        state.vehicles.insert(vehicle.id, vehicle.clone());

        Ok(vehicle)
    }

    async fn update(&self, id: i64, draft: VehicleDraft) -> Result<Option<Vehicle>> {
        let mut state = self.state.write().await;
        if state.name_taken(&draft.name, Some(id)) {
            return Err(duplicate_name(&draft.name));
        }

        let Some(vehicle) = state.vehicles.get_mut(&id) else {
            return Ok(None);
        };
        vehicle.name = draft.name;
        vehicle.vehicle_type = draft.vehicle_type;
        vehicle.assessed_value = draft.assessed_value;
        vehicle.updated_at = Utc::now();

        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state.write().await.vehicles.remove(&id).is_some())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Vehicle>> {
        let state = self.state.read().await;
        Ok(state.vehicles.values().find(|v| v.name == name).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
