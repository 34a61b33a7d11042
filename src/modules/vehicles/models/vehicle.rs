// Vehicle catalog entry
//
// A vehicle carries the assessed value the tax engine reads. Names are unique
// across the catalog; the store enforces it with a unique index and the
// service checks it up front to return a readable conflict.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Upper bound on assessed values accepted into the catalog
pub const DEFAULT_MAX_ASSESSED_VALUE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Fractional digits the `assessed_value` column stores, DECIMAL(20, 4)
pub const MAX_VALUE_SCALE: u32 = 4;

pub const MIN_LABEL_LENGTH: usize = 2;
pub const MAX_LABEL_LENGTH: usize = 100;

/// Stored vehicle record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,

    pub name: String,

    /// Category label, e.g. "Matic" or "Sport"
    #[serde(rename = "type")]
    pub vehicle_type: String,

    pub assessed_value: Decimal,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Create / update request body
///
/// Every field is optional at the wire level so that missing fields surface
/// as validation errors with a readable message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "type")]
    pub vehicle_type: Option<String>,

    #[serde(default)]
    pub assessed_value: Option<Decimal>,
}

/// Validated vehicle fields, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub name: String,
    pub vehicle_type: String,
    pub assessed_value: Decimal,
}

impl VehicleRequest {
    /// Validate and normalize into a draft
    ///
    /// Labels are trimmed; the assessed value must lie in `(0, max_assessed_value]`
    /// with at most four significant fractional digits.
    pub fn validate(&self, max_assessed_value: Decimal) -> Result<VehicleDraft> {
        let (name, vehicle_type, assessed_value) =
            match (&self.name, &self.vehicle_type, self.assessed_value) {
                (Some(name), Some(vehicle_type), Some(value)) => (name, vehicle_type, value),
                _ => {
                    return Err(AppError::validation(
                        "Missing required fields: name, type, assessed_value",
                    ))
                }
            };

        let name = validate_label("name", name)?;
        let vehicle_type = validate_label("type", vehicle_type)?;

        if assessed_value <= Decimal::ZERO || assessed_value > max_assessed_value {
            return Err(AppError::validation(format!(
                "Assessed value must be a positive number not exceeding {}",
                max_assessed_value
            )));
        }
        if assessed_value.normalize().scale() > MAX_VALUE_SCALE {
            return Err(AppError::validation(format!(
                "Assessed value must have at most {} decimal places",
                MAX_VALUE_SCALE
            )));
        }

        Ok(VehicleDraft {
            name,
            vehicle_type,
            assessed_value,
        })
    }
}

fn validate_label(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let length = trimmed.chars().count();

    if length == 0 {
        return Err(AppError::validation(format!("Vehicle {} is required", field)));
    }
    if length < MIN_LABEL_LENGTH {
        return Err(AppError::validation(format!(
            "Vehicle {} must be at least {} characters",
            field, MIN_LABEL_LENGTH
        )));
    }
    if length > MAX_LABEL_LENGTH {
        return Err(AppError::validation(format!(
            "Vehicle {} must be at most {} characters",
            field, MAX_LABEL_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}
