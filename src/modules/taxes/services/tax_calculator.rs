use rust_decimal::Decimal;

use crate::core::error::AppError;
use crate::modules::taxes::models::{OwnershipRank, TaxAssessment, TaxSchedule};

/// BBNKB: 12.5% of the assessed value
pub const TRANSFER_FEE_RATE: Decimal = Decimal::from_parts(125, 0, 0, false, 3);
/// PKB rate for the first vehicle an owner holds
pub const FIRST_OWNERSHIP_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);
/// Added to the PKB rate for every ownership rank after the first
pub const RATE_INCREMENT_PER_RANK: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// SWDKLLJ mandatory accident insurance contribution
pub const MANDATORY_INSURANCE_FEE: Decimal = Decimal::from_parts(35_000, 0, 0, false, 0);
/// STNK registration administration fee
pub const REGISTRATION_ADMIN_FEE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
/// TNKB licence plate administration fee
pub const PLATE_ADMIN_FEE: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);

const JURISDICTION: &str = "DKI Jakarta";

/// Largest scale a `Decimal` can carry
const MAX_SCALE: u32 = 28;

/// Progressive motor-vehicle tax engine.
///
/// Stateless: every call is a pure function of its inputs, so one instance can
/// be shared across workers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxCalculator;

impl TaxCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full tax breakdown for a vehicle.
    ///
    /// Amounts are exact decimals; nothing is rounded. An input whose breakdown
    /// cannot be represented exactly in 28 significant digits is rejected with a
    /// validation error instead.
    pub fn compute_tax(
        &self,
        assessed_value: Decimal,
        ownership_rank: OwnershipRank,
    ) -> Result<TaxAssessment, AppError> {
        self.validate_assessed_value(assessed_value)?;

        let transfer_fee = exact_mul(assessed_value, TRANSFER_FEE_RATE)?;
        let rate = self.base_rate(ownership_rank)?;

        let vehicle_tax = exact_mul(transfer_fee, rate)?;
        let first_owner_vehicle_tax = exact_mul(transfer_fee, FIRST_OWNERSHIP_RATE)?;
        let progressive_surcharge = exact_add(vehicle_tax, -first_owner_vehicle_tax)?;

        let total_tax = exact_add(
            vehicle_tax,
            MANDATORY_INSURANCE_FEE + REGISTRATION_ADMIN_FEE + PLATE_ADMIN_FEE,
        )?;

        Ok(TaxAssessment {
            assessed_value,
            ownership_rank,
            transfer_fee,
            base_rate: as_percentage(rate),
            vehicle_tax,
            progressive_surcharge,
            mandatory_insurance_fee: MANDATORY_INSURANCE_FEE,
            registration_admin_fee: REGISTRATION_ADMIN_FEE,
            plate_admin_fee: PLATE_ADMIN_FEE,
            total_tax,
        })
    }

    /// PKB rate as a fraction: 0.16 for the first vehicle, +0.08 per extra rank.
    pub fn base_rate(&self, ownership_rank: OwnershipRank) -> Result<Decimal, AppError> {
        if ownership_rank.is_first() {
            return Ok(FIRST_OWNERSHIP_RATE);
        }

        let increment = exact_mul(
            RATE_INCREMENT_PER_RANK,
            Decimal::from(ownership_rank.additional()),
        )?;
        exact_add(FIRST_OWNERSHIP_RATE, increment)
    }

    /// The assessed value must be strictly positive
    pub fn validate_assessed_value(&self, assessed_value: Decimal) -> Result<(), AppError> {
        if assessed_value <= Decimal::ZERO {
            return Err(AppError::Validation(
                "Assessed value must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Rates and fees this calculator applies
    pub fn schedule(&self) -> TaxSchedule {
        TaxSchedule {
            jurisdiction: JURISDICTION.to_string(),
            transfer_fee_rate: as_percentage(TRANSFER_FEE_RATE),
            first_ownership_rate: as_percentage(FIRST_OWNERSHIP_RATE),
            rate_increment_per_rank: as_percentage(RATE_INCREMENT_PER_RANK),
            mandatory_insurance_fee: MANDATORY_INSURANCE_FEE,
            registration_admin_fee: REGISTRATION_ADMIN_FEE,
            plate_admin_fee: PLATE_ADMIN_FEE,
        }
    }
}

fn as_percentage(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Product of two decimals, or an error when it cannot be held without rounding.
///
/// `Decimal::checked_mul` only reports overflow; past 28 significant digits it
/// rounds silently, so the product is formed on the raw mantissas instead.
fn exact_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal, AppError> {
    let mantissa = lhs
        .mantissa()
        .checked_mul(rhs.mantissa())
        .ok_or_else(overflow)?;
    exact(mantissa, lhs.scale() + rhs.scale())
}

/// Sum of two decimals, or an error when it cannot be held without rounding
fn exact_add(lhs: Decimal, rhs: Decimal) -> Result<Decimal, AppError> {
    let scale = lhs.scale().max(rhs.scale());
    let mantissa = rescale(lhs, scale)?
        .checked_add(rescale(rhs, scale)?)
        .ok_or_else(overflow)?;
    exact(mantissa, scale)
}

fn rescale(value: Decimal, scale: u32) -> Result<i128, AppError> {
    10i128
        .checked_pow(scale - value.scale())
        .and_then(|factor| value.mantissa().checked_mul(factor))
        .ok_or_else(overflow)
}

/// Builds `mantissa * 10^-scale`, dropping only trailing zeros to make it fit
fn exact(mut mantissa: i128, mut scale: u32) -> Result<Decimal, AppError> {
    loop {
        if scale <= MAX_SCALE {
            if let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale) {
                return Ok(value);
            }
        }
        if scale == 0 {
            return Err(overflow());
        }
        if mantissa % 10 != 0 {
            return Err(inexact());
        }
        mantissa /= 10;
        scale -= 1;
    }
}

fn overflow() -> AppError {
    AppError::Validation("Tax amount exceeds the supported numeric range".to_string())
}

fn inexact() -> AppError {
    AppError::Validation(
        "Assessed value has more precision than the tax breakdown can represent".to_string(),
    )
}
