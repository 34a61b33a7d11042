use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Sequential position of a vehicle among one owner's holdings (1 = first).
///
/// Always >= 1. There is no upper bound: the progressive rate keeps growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OwnershipRank(u32);

impl OwnershipRank {
    pub const FIRST: OwnershipRank = OwnershipRank(1);

    pub fn new(rank: u32) -> Result<Self> {
        if rank == 0 {
            return Err(AppError::validation("Ownership rank must be at least 1"));
        }
        Ok(Self(rank))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn is_first(&self) -> bool {
        self.0 == 1
    }

    /// Number of ownership steps beyond the first vehicle
    pub fn additional(&self) -> u32 {
        self.0 - 1
    }
}

impl TryFrom<i64> for OwnershipRank {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self> {
        if value < 1 {
            return Err(AppError::validation("Ownership rank must be at least 1"));
        }
        let rank = u32::try_from(value)
            .map_err(|_| AppError::validation("Ownership rank is too large"))?;
        Self::new(rank)
    }
}

impl TryFrom<Decimal> for OwnershipRank {
    type Error = AppError;

    fn try_from(value: Decimal) -> Result<Self> {
        if !value.fract().is_zero() {
            return Err(AppError::validation(format!(
                "Ownership rank must be a whole number, got {}",
                value
            )));
        }
        let whole = value
            .to_i64()
            .ok_or_else(|| AppError::validation("Ownership rank is too large"))?;
        Self::try_from(whole)
    }
}

impl<'de> Deserialize<'de> for OwnershipRank {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Decimal as Deserialize>::deserialize(deserializer)?;
        OwnershipRank::try_from(raw).map_err(|err| match err {
            AppError::Validation(message) => serde::de::Error::custom(message),
            other => serde::de::Error::custom(other),
        })
    }
}

impl fmt::Display for OwnershipRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tax breakdown for one vehicle at one ownership rank.
///
/// All amounts share the unit of `assessed_value` and are unrounded.
/// `base_rate` is a percentage (16 means 16%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    pub assessed_value: Decimal,
    pub ownership_rank: OwnershipRank,
    /// BBNKB
    pub transfer_fee: Decimal,
    pub base_rate: Decimal,
    /// PKB
    pub vehicle_tax: Decimal,
    pub progressive_surcharge: Decimal,
    /// SWDKLLJ
    pub mandatory_insurance_fee: Decimal,
    /// STNK administration
    pub registration_admin_fee: Decimal,
    /// TNKB administration
    pub plate_admin_fee: Decimal,
    pub total_tax: Decimal,
}

impl TaxAssessment {
    /// Sum of the three flat fees
    pub fn fixed_fees(&self) -> Decimal {
        self.mandatory_insurance_fee + self.registration_admin_fee + self.plate_admin_fee
    }
}

/// Request body for an ad-hoc tax calculation
#[derive(Debug, Clone, Deserialize)]
pub struct TaxCalculationRequest {
    pub assessed_value: Decimal,
    pub ownership_rank: OwnershipRank,
}

/// Published rates and fees, rates expressed as percentages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxSchedule {
    pub jurisdiction: String,
    pub transfer_fee_rate: Decimal,
    pub first_ownership_rate: Decimal,
    pub rate_increment_per_rank: Decimal,
    pub mandatory_insurance_fee: Decimal,
    pub registration_admin_fee: Decimal,
    pub plate_admin_fee: Decimal,
}
